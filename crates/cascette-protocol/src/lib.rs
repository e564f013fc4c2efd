//! # cascette-protocol
//!
//! Network plumbing for resolving a World of Warcraft product build:
//!
//! - **Version service**: `GET https://{region}.version.battle.net/{product}/versions`
//!   returns a BPSV table with build and CDN configuration keys per region
//! - **Community listfile**: the published `FileDataID;path` snapshot
//!
//! Requests are made once; there is no retry or caching layer. Failures are
//! reported as [`ProtocolError`] and left to the caller to treat as fatal.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cascette_protocol::{HttpConfig, Product, Region, VersionsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = VersionsClient::for_region(Region::EU, &HttpConfig::default())?;
//!     let versions = client.versions(Product::WowClassicEra).await?;
//!
//!     if let Some(row) = versions.find_row("Region", "eu") {
//!         println!(
//!             "{}",
//!             row.get_raw_by_name("VersionsName", versions.schema()).unwrap_or("unknown")
//!         );
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod transport;

pub use client::{COMMUNITY_LISTFILE_URL, ListfileClient, Product, Region, VersionsClient};
pub use error::{ProtocolError, Result};
pub use transport::{HttpConfig, build_client};
