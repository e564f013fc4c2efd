//! Interface manifests
//!
//! Each build ships three text files listing its interface sources, one
//! name per line. They are exported like any other file and read back from
//! the output directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::build::BuildDescriptor;
use crate::error::{ExportError, Result};
use crate::export::ExportBatcher;
use crate::location::FileLocation;

/// Category of source files a manifest lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestKind {
    /// Lua and XML code files
    Code,
    /// Addon TOC files
    Toc,
    /// Generated addon files
    GeneratedAddons,
}

impl ManifestKind {
    /// Short name used in logs and errors
    pub fn label(&self) -> &'static str {
        match self {
            Self::Code => "ui-code-list",
            Self::Toc => "ui-toc-list",
            Self::GeneratedAddons => "ui-gen-addon-list",
        }
    }
}

/// A manifest file with a fixed content identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Manifest {
    /// What the manifest lists
    pub kind: ManifestKind,
    /// Content identifier
    pub id: u32,
    /// Path of the manifest inside the build
    pub name: &'static str,
}

impl Manifest {
    /// Export unit for this manifest
    pub fn location(&self) -> FileLocation {
        FileLocation::new(self.id, self.name)
    }

    /// Where the manifest lands under `output_dir`
    pub fn path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.name)
    }
}

/// The manifests every export reads.
pub const MANIFESTS: [Manifest; 3] = [
    Manifest {
        kind: ManifestKind::Code,
        id: 6067012,
        name: "Interface/ui-code-list.txt",
    },
    Manifest {
        kind: ManifestKind::Toc,
        id: 6076661,
        name: "Interface/ui-toc-list.txt",
    },
    Manifest {
        kind: ManifestKind::GeneratedAddons,
        id: 6139026,
        name: "Interface/ui-gen-addon-list.txt",
    },
];

/// Non-empty, trimmed lines of a manifest
pub fn parse_manifest(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Exports the manifests and collects the names they list.
pub struct ManifestReader<'a> {
    batcher: &'a ExportBatcher,
    manifests: &'a [Manifest],
}

impl<'a> ManifestReader<'a> {
    /// Reader over the standard manifest set
    pub fn new(batcher: &'a ExportBatcher) -> Self {
        Self::with_manifests(batcher, &MANIFESTS)
    }

    /// Reader over a custom manifest set
    pub fn with_manifests(batcher: &'a ExportBatcher, manifests: &'a [Manifest]) -> Self {
        Self { batcher, manifests }
    }

    /// Export the manifests into `output_dir` and return every name they
    /// list, sorted by raw bytes with exact duplicates removed.
    pub async fn read(&self, build: &BuildDescriptor, output_dir: &Path) -> Result<Vec<String>> {
        self.export(build, output_dir).await?;
        self.collect(output_dir).await
    }

    /// Export the manifests into `output_dir` as one batch
    pub async fn export(&self, build: &BuildDescriptor, output_dir: &Path) -> Result<()> {
        let locations: Vec<FileLocation> = self.manifests.iter().map(Manifest::location).collect();
        self.batcher.export(&locations, build, output_dir).await?;
        Ok(())
    }

    /// Read already-exported manifests from `output_dir`.
    ///
    /// A manifest missing at this point fails the whole read; a partial
    /// name set is never returned.
    pub async fn collect(&self, output_dir: &Path) -> Result<Vec<String>> {
        let mut candidates = Vec::new();
        for manifest in self.manifests {
            let path = manifest.path(output_dir);
            let text = match tokio::fs::read_to_string(&path).await {
                Ok(text) => text,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    return Err(ExportError::IncompleteManifest {
                        name: manifest.kind.label(),
                        path,
                    });
                }
                Err(e) => return Err(ExportError::io(path, e)),
            };

            let before = candidates.len();
            candidates.extend(parse_manifest(&text).map(str::to_string));
            debug!(
                "{} lists {} files",
                manifest.kind.label(),
                candidates.len() - before
            );
        }

        candidates.sort();
        candidates.dedup();
        info!("Manifests list {} distinct files", candidates.len());
        Ok(candidates)
    }

    /// Remove the exported manifest files. Already-missing files are ignored.
    pub async fn cleanup(&self, output_dir: &Path) -> Result<()> {
        for manifest in self.manifests {
            let path = manifest.path(output_dir);
            match tokio::fs::remove_file(&path).await {
                Ok(()) => debug!("Removed {}", path.display()),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(ExportError::io(path, e)),
            }
        }
        Ok(())
    }
}
