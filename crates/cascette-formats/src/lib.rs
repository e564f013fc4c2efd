//! Text format parsers for the NGDP version service and file listings
//!
//! # Supported Formats
//!
//! - **BPSV**: Blizzard Pipe-Separated Values, the table format of the TACT
//!   version endpoints
//! - **Listfile**: `id;name` lines, used by the community listfile snapshot
//!   and by export listings

#![warn(missing_docs)]

pub mod bpsv;
pub mod listfile;
