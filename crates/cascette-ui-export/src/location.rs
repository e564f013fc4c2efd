//! Export units and path normalization

use std::fmt;

/// A single file to export: content identifier plus output path.
///
/// `name` keeps the casing it was found with and always uses `/` separators.
/// Ordering is by id, then name, which is the order export listings use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileLocation {
    /// Content identifier (FileDataID)
    pub id: u32,
    /// Output path relative to the export directory
    pub name: String,
}

impl FileLocation {
    /// Create a location
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for FileLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.id, self.name)
    }
}

/// Replace `\` separators with `/`, keeping case
pub fn to_forward_slashes(name: &str) -> String {
    name.replace('\\', "/")
}

/// Lookup key for a file name: lowercase with `/` separators.
///
/// The listfile stores names in this form already; callers normalize at
/// every lookup rather than when the index is built.
pub fn normalize_key(name: &str) -> String {
    to_forward_slashes(name).to_lowercase()
}
