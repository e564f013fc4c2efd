//! Clients for the services a product build is resolved from
//!
//! - [`VersionsClient`]: the per-region TACT version endpoint, returning a
//!   BPSV table with one row per region
//! - [`ListfileClient`]: the community-maintained `FileDataID;path` snapshot

mod listfile;
mod product;
mod region;
mod versions;

pub use listfile::{COMMUNITY_LISTFILE_URL, ListfileClient};
pub use product::Product;
pub use region::Region;
pub use versions::VersionsClient;
