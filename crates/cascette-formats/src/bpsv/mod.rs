//! BPSV (Blizzard Pipe-Separated Values) format support
//!
//! BPSV is the text table format returned by the TACT version endpoints.
//!
//! # Format Overview
//!
//! - A header line with field definitions (`Name!TYPE:size`)
//! - An optional sequence number line (`## seqn = N`)
//! - Data rows with pipe-separated values
//!
//! # Example
//!
//! ```
//! use cascette_formats::bpsv::parse;
//!
//! let content = "Region!STRING:0|BuildId!DEC:4\n## seqn = 12345\nus|1234\neu|5678";
//! let document = parse(content).expect("Test operation should succeed");
//! assert_eq!(document.sequence_number(), Some(12345));
//! assert_eq!(document.row_count(), 2);
//!
//! let eu = document.find_row("Region", "eu").expect("eu row");
//! assert_eq!(eu.get_raw_by_name("BuildId", document.schema()), Some("5678"));
//! ```

mod document;
mod reader;
mod schema;
mod types;

pub use document::{BpsvDocument, BpsvRow};
pub use reader::{BpsvReader, parse};
pub use schema::BpsvSchema;
pub use types::{BpsvError, BpsvField, BpsvType, BpsvValue};
