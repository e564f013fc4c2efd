//! Run configuration.
//!
//! Loaded from CLI arguments with environment variable fallbacks
//! (`CASCETTE_UI_EXPORT_*`).
//!
//! # Example
//!
//! ```no_run
//! use cascette_ui_export::ExportConfig;
//!
//! let config = ExportConfig::from_args();
//! config.validate().expect("Invalid configuration");
//!
//! println!("Exporting {} ({}) to {}", config.product, config.region, config.output.display());
//! ```

use cascette_protocol::{COMMUNITY_LISTFILE_URL, Product, Region};
use clap::Parser;
use std::path::PathBuf;
use url::Url;

use crate::error::{ExportError, Result};
use crate::export::DEFAULT_TOOL;
use crate::listfile::INTERFACE_PREFIX;

/// Export run configuration loaded from CLI args and environment variables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cascette-ui-export",
    about = "Export the interface sources of a WoW product build",
    version
)]
pub struct ExportConfig {
    /// Product to export (wow, wowt, wow_classic, wow_classic_era, ...)
    #[arg(short, long, env = "CASCETTE_UI_EXPORT_PRODUCT")]
    pub product: Product,

    /// Output directory
    #[arg(short, long, env = "CASCETTE_UI_EXPORT_OUTPUT")]
    pub output: PathBuf,

    /// CDN region (us, eu, kr, tw, cn, sg)
    #[arg(short, long, env = "CASCETTE_UI_EXPORT_REGION", default_value = "us")]
    pub region: Region,

    /// Keep the manifest text files after export
    #[arg(long)]
    pub keep_manifests: bool,

    /// Write version.txt with the build version at the output root
    #[arg(long)]
    pub export_version: bool,

    /// Content retrieval tool executable
    #[arg(long, env = "CASCETTE_UI_EXPORT_TOOL", default_value = DEFAULT_TOOL)]
    pub tool: PathBuf,

    /// Version service base URL (defaults to the region's TACT host)
    #[arg(long, env = "CASCETTE_UI_EXPORT_VERSIONS_URL")]
    pub versions_url: Option<Url>,

    /// Community listfile snapshot URL
    #[arg(long, env = "CASCETTE_UI_EXPORT_LISTFILE_URL", default_value = COMMUNITY_LISTFILE_URL)]
    pub listfile_url: Url,

    /// Listfile subtree to index
    #[arg(long, default_value = INTERFACE_PREFIX)]
    pub listfile_prefix: String,
}

impl ExportConfig {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Configuration with defaults for everything but product and output
    pub fn new(product: Product, output: impl Into<PathBuf>) -> Self {
        Self {
            product,
            output: output.into(),
            region: Region::default(),
            keep_manifests: false,
            export_version: false,
            tool: PathBuf::from(DEFAULT_TOOL),
            versions_url: None,
            listfile_url: Url::parse(COMMUNITY_LISTFILE_URL)
                .unwrap_or_else(|_| unreachable!("listfile URL constant is valid")),
            listfile_prefix: INTERFACE_PREFIX.to_string(),
        }
    }

    /// Version service base URL in effect
    pub fn versions_base_url(&self) -> String {
        self.versions_url
            .as_ref()
            .map_or_else(|| self.region.tact_https_url().to_string(), Url::to_string)
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Config` if:
    /// - the tool path is empty
    /// - the output path exists but is not a directory
    /// - the listfile prefix is empty
    pub fn validate(&self) -> Result<()> {
        if self.tool.as_os_str().is_empty() {
            return Err(ExportError::Config("export tool path is empty".to_string()));
        }

        if self.output.exists() && !self.output.is_dir() {
            return Err(ExportError::Config(format!(
                "output path is not a directory: {}",
                self.output.display()
            )));
        }

        if self.listfile_prefix.is_empty() {
            return Err(ExportError::Config(
                "listfile prefix must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
