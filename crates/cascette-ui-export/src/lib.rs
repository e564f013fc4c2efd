//! Interface source export for WoW product builds.
//!
//! Resolves the current build of a product, reads the build's interface
//! manifests, maps the listed names to FileDataIDs through the community
//! listfile, and hands the result to an external retrieval tool.
//!
//! # Architecture
//!
//! - `build`: version service lookup ([`BuildResolver`], [`BuildDescriptor`])
//! - `listfile`: name to FileDataID index ([`ListfileIndex`])
//! - `manifest`: the fixed manifest set and its reader ([`ManifestReader`])
//! - `resolver`: manifest names to export units ([`FileResolver`])
//! - `export`: listing batches and the tool seam ([`ExportBatcher`], [`ExportTool`])
//! - `pipeline`: the run itself ([`Pipeline`])
//!
//! # Example
//!
//! ```no_run
//! use cascette_ui_export::{ExportConfig, Pipeline};
//! use cascette_protocol::Product;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     tracing_subscriber::fmt::init();
//!
//!     let mut config = ExportConfig::new(Product::WowClassicEra, "./ui-source");
//!     config.export_version = true;
//!
//!     let summary = Pipeline::from_config(config)?.run().await?;
//!     println!("{} files exported for {}", summary.exported, summary.build.version);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod build;
pub mod config;
pub mod error;
pub mod export;
pub mod listfile;
pub mod location;
pub mod manifest;
pub mod pipeline;
pub mod resolver;

pub use build::{BuildDescriptor, BuildResolver};
pub use config::ExportConfig;
pub use error::{ExportError, Result};
pub use export::{ExportBatcher, ExportTool, TactTool};
pub use listfile::ListfileIndex;
pub use location::FileLocation;
pub use manifest::{MANIFESTS, Manifest, ManifestKind, ManifestReader};
pub use pipeline::{Pipeline, RunStage, RunSummary};
pub use resolver::{FileResolver, Resolution};
