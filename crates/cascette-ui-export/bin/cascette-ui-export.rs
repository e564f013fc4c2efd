//! Interface export binary entry point.
//!
//! A thin wrapper around the cascette-ui-export library that:
//! 1. Initializes logging
//! 2. Parses configuration from CLI args and environment
//! 3. Runs the export pipeline
//!
//! Any failure aborts the run with a non-zero exit status.

use anyhow::Result;
use cascette_ui_export::{ExportConfig, Pipeline};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ExportConfig::from_args();
    tracing::info!(
        "Exporting {} ({}) to {}",
        config.product,
        config.region,
        config.output.display()
    );

    let summary = Pipeline::from_config(config)?.run().await?;

    tracing::info!(
        "Exported {} files for {} (build {}); {} of {} manifest entries had no listfile entry",
        summary.exported,
        summary.build.version,
        summary.build.build_number,
        summary.unmatched,
        summary.candidates
    );

    Ok(())
}
