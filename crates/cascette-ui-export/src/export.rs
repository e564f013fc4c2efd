//! Batched export through the external retrieval tool
//!
//! The batcher owns listing construction: dedupe, ordering, and the scoped
//! temporary file. The actual CDN fetch is behind [`ExportTool`] so the rest
//! of the pipeline can run against an in-process implementation.

use async_trait::async_trait;
use cascette_formats::listfile::format_line;
use std::collections::BTreeSet;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempPath;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::build::BuildDescriptor;
use crate::error::{ExportError, Result};
use crate::location::FileLocation;

/// Default executable name of the retrieval tool
pub const DEFAULT_TOOL: &str = "TACTTool";

/// Materializes a listing of `id;name` lines under an output directory.
#[async_trait]
pub trait ExportTool: Send + Sync {
    /// Export every entry of `listing` for `build` into `output_dir`.
    ///
    /// Files are written at `output_dir/<name>`.
    async fn export(&self, listing: &Path, build: &BuildDescriptor, output_dir: &Path)
    -> Result<()>;
}

/// Retrieval tool run as a subprocess.
///
/// Invoked as `<program> -m list -b <build config> -c <cdn config> -i <listing> -o <output>`;
/// the exit status is the only result.
#[derive(Debug, Clone)]
pub struct TactTool {
    program: PathBuf,
}

impl TactTool {
    /// Wrap an executable path or name on `PATH`
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Build the subprocess invocation
    pub fn command(&self, listing: &Path, build: &BuildDescriptor, output_dir: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("-m")
            .arg("list")
            .arg("-b")
            .arg(&build.build_config)
            .arg("-c")
            .arg(&build.cdn_config)
            .arg("-i")
            .arg(listing)
            .arg("-o")
            .arg(output_dir)
            .kill_on_drop(true);
        command
    }
}

impl Default for TactTool {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL)
    }
}

#[async_trait]
impl ExportTool for TactTool {
    async fn export(
        &self,
        listing: &Path,
        build: &BuildDescriptor,
        output_dir: &Path,
    ) -> Result<()> {
        debug!(
            "Running {} for listing {}",
            self.program.display(),
            listing.display()
        );

        let status = self
            .command(listing, build, output_dir)
            .status()
            .await
            .map_err(|e| {
                ExportError::ExportToolFailure(format!(
                    "failed to start {}: {e}",
                    self.program.display()
                ))
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ExportError::ExportToolFailure(format!(
                "{} exited with {status}",
                self.program.display()
            )))
        }
    }
}

/// Turns sets of locations into single tool invocations.
#[derive(Clone)]
pub struct ExportBatcher {
    tool: Arc<dyn ExportTool>,
}

impl ExportBatcher {
    /// Create a batcher over an export tool
    pub fn new(tool: Arc<dyn ExportTool>) -> Self {
        Self { tool }
    }

    /// Deduplicate and order locations the way listings are written
    pub fn batch<'a, I>(locations: I) -> Vec<&'a FileLocation>
    where
        I: IntoIterator<Item = &'a FileLocation>,
    {
        locations
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Export `locations` in one tool invocation.
    ///
    /// Returns the number of distinct locations exported. The temporary
    /// listing is removed whether or not the tool succeeds; a failure to
    /// remove it is only logged. An empty batch does not invoke the tool.
    pub async fn export<'a, I>(
        &self,
        locations: I,
        build: &BuildDescriptor,
        output_dir: &Path,
    ) -> Result<usize>
    where
        I: IntoIterator<Item = &'a FileLocation>,
    {
        let batch = Self::batch(locations);
        if batch.is_empty() {
            info!("Nothing to export");
            return Ok(0);
        }

        let listing = write_listing(&batch)?;
        info!(
            "Exporting {} files to {}",
            batch.len(),
            output_dir.display()
        );

        let result = self.tool.export(&listing, build, output_dir).await;

        let listing_path = listing.to_path_buf();
        if let Err(e) = listing.close() {
            warn!(
                "Failed to remove export listing {}: {}",
                listing_path.display(),
                e
            );
        }

        result.map(|()| batch.len())
    }
}

/// Write one `id;name` line per location to a fresh temporary file
fn write_listing(batch: &[&FileLocation]) -> Result<TempPath> {
    let file = tempfile::Builder::new()
        .prefix("cascette-export-")
        .suffix(".txt")
        .tempfile()
        .map_err(|e| ExportError::io(std::env::temp_dir(), e))?;
    let path = file.path().to_path_buf();

    let mut writer = BufWriter::new(file);
    for location in batch {
        writeln!(writer, "{}", format_line(location.id, &location.name))
            .map_err(|e| ExportError::io(&path, e))?;
    }

    let file = writer
        .into_inner()
        .map_err(|e| ExportError::io(&path, e.into_error()))?;
    Ok(file.into_temp_path())
}
