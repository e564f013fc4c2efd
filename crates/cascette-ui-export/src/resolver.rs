//! Manifest name resolution against the listfile

use std::collections::HashSet;
use tracing::debug;

use crate::listfile::ListfileIndex;
use crate::location::{FileLocation, normalize_key, to_forward_slashes};

/// Outcome of resolving a set of candidate names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Resolved locations in candidate order
    pub locations: Vec<FileLocation>,
    /// Candidates with no listfile entry
    pub unmatched: Vec<String>,
}

/// Maps candidate names to content identifiers.
pub struct FileResolver<'a> {
    index: &'a ListfileIndex,
}

impl<'a> FileResolver<'a> {
    /// Resolve against `index`
    pub fn new(index: &'a ListfileIndex) -> Self {
        Self { index }
    }

    /// Resolve names, keeping their casing and switching to `/` separators.
    ///
    /// Lookups ignore case and separator style. Names with no listfile entry
    /// are dropped. When several candidates share a lookup key, only the
    /// first one is kept, so callers control the winning spelling through the
    /// order they pass names in.
    pub fn resolve<I, S>(&self, candidates: I) -> Resolution
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut resolution = Resolution::default();
        let mut seen = HashSet::new();

        for candidate in candidates {
            let candidate = candidate.as_ref();
            let key = normalize_key(candidate);

            let Some(id) = self.index.lookup(candidate) else {
                debug!("No listfile entry for {}", candidate);
                resolution.unmatched.push(candidate.to_string());
                continue;
            };

            if seen.insert(key) {
                resolution
                    .locations
                    .push(FileLocation::new(id, to_forward_slashes(candidate)));
            } else {
                debug!("{} duplicates an earlier spelling", candidate);
            }
        }

        resolution
    }
}
