//! `id;name` listing format
//!
//! Used by the community listfile snapshot (`FileDataID;path`, no header)
//! and by the listing handed to the content retrieval tool.

use std::io::BufRead;

/// One `id;name` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListfileEntry<'a> {
    /// Numeric content identifier (FileDataID)
    pub id: u32,
    /// Path as written in the listing
    pub name: &'a str,
}

/// Parse a single listing line.
///
/// Splits at the first `;`. Returns `None` for blank lines, lines without a
/// separator, an unparsable id, or an empty name.
#[must_use]
pub fn parse_line(line: &str) -> Option<ListfileEntry<'_>> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (id, name) = line.split_once(';')?;
    let id = id.trim().parse::<u32>().ok()?;
    if name.is_empty() {
        return None;
    }

    Some(ListfileEntry { id, name })
}

/// Format a single listing line (without terminator)
#[must_use]
pub fn format_line(id: u32, name: &str) -> String {
    format!("{id};{name}")
}

/// Streaming reader over a listing.
///
/// Yields `(id, name)` pairs; malformed lines are skipped and counted. With a
/// prefix set, lines whose name does not start with it are dropped before
/// the name is copied out.
pub struct ListfileReader<R> {
    reader: R,
    buffer: String,
    prefix: String,
    skipped: usize,
}

impl<R: BufRead> ListfileReader<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self::with_prefix(reader, "")
    }

    /// Wrap a buffered reader, keeping only names that start with `prefix`
    /// (case-sensitive)
    pub fn with_prefix(reader: R, prefix: impl Into<String>) -> Self {
        Self {
            reader,
            buffer: String::new(),
            prefix: prefix.into(),
            skipped: 0,
        }
    }

    /// Number of non-blank lines that failed to parse so far
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R: BufRead> Iterator for ListfileReader<R> {
    type Item = std::io::Result<(u32, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }

            match parse_line(&self.buffer) {
                Some(entry) if entry.name.starts_with(self.prefix.as_str()) => {
                    return Some(Ok((entry.id, entry.name.to_string())));
                }
                Some(_) => {}
                None if self.buffer.trim().is_empty() => {}
                None => self.skipped += 1,
            }
        }
    }
}
