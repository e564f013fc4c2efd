//! Error types for an export run.
//!
//! Every variant is fatal to the run. Names that do not resolve against the
//! listfile are not errors and never show up here.

use cascette_protocol::{ProtocolError, Region};
use std::path::PathBuf;
use thiserror::Error;

/// Export run errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The version endpoint or listfile snapshot could not be fetched, or
    /// returned data that could not be used
    #[error("Upstream unavailable ({source_name}): {source}")]
    UpstreamUnavailable {
        /// Which upstream failed
        source_name: &'static str,
        /// Underlying protocol error
        #[source]
        source: ProtocolError,
    },

    /// The versions table has no row for the requested region
    #[error("No build found for region {region} ({rows} rows in response)")]
    RegionNotFound {
        /// Requested region
        region: Region,
        /// Rows the response did contain
        rows: usize,
    },

    /// A manifest file was not produced by the export tool
    #[error("Manifest {name} missing after export: {}", path.display())]
    IncompleteManifest {
        /// Manifest name
        name: &'static str,
        /// Where the manifest was expected
        path: PathBuf,
    },

    /// The external retrieval tool failed
    #[error("Export tool failed: {0}")]
    ExportToolFailure(String),

    /// Local file-system operation failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ExportError {
    /// Upstream failure of the version endpoint
    pub fn versions(source: ProtocolError) -> Self {
        Self::UpstreamUnavailable {
            source_name: "versions",
            source,
        }
    }

    /// Upstream failure of the listfile snapshot
    pub fn listfile(source: ProtocolError) -> Self {
        Self::UpstreamUnavailable {
            source_name: "listfile",
            source,
        }
    }

    /// I/O failure on `path`
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
