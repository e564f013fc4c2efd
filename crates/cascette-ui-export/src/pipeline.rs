//! End-to-end export run
//!
//! ```text
//! ResolveBuild → ExportManifests → ReadManifests ┐
//!                BuildIndex ─────────────────────┴→ ResolveFiles → ExportFiles
//!                → [WriteVersionMetadata] → [CleanupManifests] → Done
//! ```
//!
//! The listfile index is built while the manifests are exported and read.
//! Any failure aborts the run; nothing is retried or rolled back.

use cascette_protocol::{HttpConfig, ListfileClient, VersionsClient};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::build::{BuildDescriptor, BuildResolver};
use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::export::{ExportBatcher, ExportTool, TactTool};
use crate::listfile::ListfileIndex;
use crate::manifest::ManifestReader;
use crate::resolver::FileResolver;

/// Name of the version metadata file written at the output root
pub const VERSION_FILE: &str = "version.txt";

/// Steps of an export run, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    /// Query the version service
    ResolveBuild,
    /// Export the manifest files
    ExportManifests,
    /// Read names from the exported manifests
    ReadManifests,
    /// Download and index the listfile
    BuildIndex,
    /// Resolve manifest names to identifiers
    ResolveFiles,
    /// Export the resolved files
    ExportFiles,
    /// Write `version.txt`
    WriteVersionMetadata,
    /// Remove the manifest files
    CleanupManifests,
    /// Finished
    Done,
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ResolveBuild => "resolve build",
            Self::ExportManifests => "export manifests",
            Self::ReadManifests => "read manifests",
            Self::BuildIndex => "build listfile index",
            Self::ResolveFiles => "resolve files",
            Self::ExportFiles => "export files",
            Self::WriteVersionMetadata => "write version metadata",
            Self::CleanupManifests => "clean up manifests",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

fn enter(stage: RunStage) {
    info!(stage = %stage, "Entering stage");
}

/// Counts reported by a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Build that was exported
    pub build: BuildDescriptor,
    /// Distinct names listed by the manifests
    pub candidates: usize,
    /// Names resolved to an identifier
    pub resolved: usize,
    /// Names with no listfile entry
    pub unmatched: usize,
    /// Files handed to the export tool
    pub exported: usize,
}

/// A configured export run.
pub struct Pipeline {
    config: ExportConfig,
    resolver: BuildResolver,
    listfile: ListfileClient,
    batcher: ExportBatcher,
}

impl Pipeline {
    /// Create a run that exports through `tool` with default HTTP settings
    pub fn new(config: ExportConfig, tool: Arc<dyn ExportTool>) -> Result<Self> {
        Self::with_http(config, tool, &HttpConfig::default())
    }

    /// Create a run that exports through `tool` using `http` for upstream
    /// requests. The listfile download ignores the request timeout.
    pub fn with_http(
        config: ExportConfig,
        tool: Arc<dyn ExportTool>,
        http: &HttpConfig,
    ) -> Result<Self> {
        config.validate()?;

        let versions =
            VersionsClient::new(config.versions_base_url(), http).map_err(ExportError::versions)?;
        let listfile = ListfileClient::new(http).map_err(ExportError::listfile)?;

        Ok(Self {
            resolver: BuildResolver::new(versions),
            listfile,
            batcher: ExportBatcher::new(tool),
            config,
        })
    }

    /// Create a run that exports through the configured subprocess tool
    pub fn from_config(config: ExportConfig) -> Result<Self> {
        let tool = Arc::new(TactTool::new(&config.tool));
        Self::new(config, tool)
    }

    /// Execute every stage of the run.
    pub async fn run(&self) -> Result<RunSummary> {
        let config = &self.config;
        let output = config.output.as_path();

        enter(RunStage::ResolveBuild);
        let build = self
            .resolver
            .resolve(config.product, config.region)
            .await?;

        tokio::fs::create_dir_all(output)
            .await
            .map_err(|e| ExportError::io(output, e))?;

        let manifests = ManifestReader::new(&self.batcher);
        let (candidates, index) = tokio::try_join!(
            async {
                enter(RunStage::ExportManifests);
                manifests.export(&build, output).await?;
                enter(RunStage::ReadManifests);
                manifests.collect(output).await
            },
            async {
                enter(RunStage::BuildIndex);
                ListfileIndex::build(
                    &self.listfile,
                    config.listfile_url.as_str(),
                    &config.listfile_prefix,
                )
                .await
            },
        )?;

        enter(RunStage::ResolveFiles);
        let resolution = FileResolver::new(&index).resolve(&candidates);
        info!(
            "Resolved {} of {} files ({} without listfile entry)",
            resolution.locations.len(),
            candidates.len(),
            resolution.unmatched.len()
        );

        enter(RunStage::ExportFiles);
        let exported = self
            .batcher
            .export(&resolution.locations, &build, output)
            .await?;

        if config.export_version {
            enter(RunStage::WriteVersionMetadata);
            write_version(output, &build.version).await?;
        }

        if !config.keep_manifests {
            enter(RunStage::CleanupManifests);
            manifests.cleanup(output).await?;
        }

        enter(RunStage::Done);
        Ok(RunSummary {
            build,
            candidates: candidates.len(),
            resolved: resolution.locations.len(),
            unmatched: resolution.unmatched.len(),
            exported,
        })
    }
}

/// Write the version string, exactly, to `version.txt`
async fn write_version(output: &Path, version: &str) -> Result<()> {
    let path = output.join(VERSION_FILE);
    tokio::fs::write(&path, version)
        .await
        .map_err(|e| ExportError::io(path, e))
}
