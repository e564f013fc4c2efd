use crate::bpsv::document::BpsvDocument;
use crate::bpsv::schema::BpsvSchema;
use crate::bpsv::types::BpsvError;
use std::io::{BufRead, BufReader, Read};

/// BPSV document reader
pub struct BpsvReader<R> {
    reader: BufReader<R>,
}

impl<R: Read> BpsvReader<R> {
    /// Create a new reader from any `Read` source
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }

    /// Read and parse a complete BPSV document.
    ///
    /// The first non-blank line is the header. Blank lines and `#` comments
    /// are skipped, except `## seqn` which sets the sequence number.
    pub fn read_document(mut self) -> Result<BpsvDocument, BpsvError> {
        let mut document: Option<BpsvDocument> = None;
        let mut buffer = String::new();
        let mut line_number = 0;

        while self.reader.read_line(&mut buffer)? > 0 {
            line_number += 1;
            let line = buffer.trim();

            if line.is_empty() {
                buffer.clear();
                continue;
            }

            match document.as_mut() {
                None => {
                    document = Some(BpsvDocument::new(BpsvSchema::parse(line)?));
                }
                Some(doc) if line.starts_with("## seqn") => {
                    doc.set_sequence_number(parse_sequence_line(line)?);
                }
                Some(_) if line.starts_with('#') => {}
                Some(doc) => {
                    let values = line.split('|').map(str::to_string).collect();
                    doc.add_raw_row(values, line_number)?;
                }
            }

            buffer.clear();
        }

        document.ok_or(BpsvError::EmptyDocument)
    }
}

impl<'a> BpsvReader<&'a [u8]> {
    /// Create a reader from a byte slice
    #[must_use]
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

/// Parse a BPSV document from a string
pub fn parse(content: &str) -> Result<BpsvDocument, BpsvError> {
    BpsvReader::from_bytes(content.as_bytes()).read_document()
}

/// Parse `## seqn = 12345`, also accepting `:` or whitespace as separator
fn parse_sequence_line(line: &str) -> Result<u32, BpsvError> {
    let rest = line
        .strip_prefix("## seqn")
        .map(str::trim_start)
        .ok_or_else(|| BpsvError::InvalidSequenceNumber(line.to_string()))?;

    let number = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .unwrap_or(rest)
        .trim();

    number
        .parse::<u32>()
        .map_err(|_| BpsvError::InvalidSequenceNumber(line.to_string()))
}
