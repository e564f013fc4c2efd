//! Name-to-identifier index over the community listfile

use cascette_formats::listfile::ListfileReader;
use cascette_protocol::ListfileClient;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::error::{ExportError, Result};
use crate::location::normalize_key;

/// Subtree of the listfile that holds interface sources
pub const INTERFACE_PREFIX: &str = "interface/";

/// Mapping from listfile name to content identifier.
///
/// Only rows under a single subtree are kept. Names are stored exactly as the
/// snapshot spells them (already lowercase with `/` separators); lookups
/// normalize their input instead.
#[derive(Debug, Clone, Default)]
pub struct ListfileIndex {
    entries: HashMap<String, u32>,
}

impl ListfileIndex {
    /// Download a snapshot and index the rows under `prefix`.
    pub async fn build(client: &ListfileClient, url: &str, prefix: &str) -> Result<Self> {
        info!("Fetching listfile snapshot from {}", url);
        let snapshot = client.fetch(url).await.map_err(ExportError::listfile)?;
        let index = Self::from_snapshot(&snapshot, prefix);
        info!("Indexed {} listfile entries under {}", index.len(), prefix);
        Ok(index)
    }

    /// Index the rows of a snapshot whose name starts with `prefix`.
    ///
    /// The prefix match is case-sensitive. Malformed rows are skipped; a later
    /// duplicate name replaces an earlier one.
    pub fn from_snapshot(snapshot: &str, prefix: &str) -> Self {
        let mut reader = ListfileReader::with_prefix(snapshot.as_bytes(), prefix);
        let entries = reader
            .by_ref()
            // Reading from a byte slice cannot fail
            .filter_map(std::result::Result::ok)
            .map(|(id, name)| (name, id))
            .collect();

        if reader.skipped() > 0 {
            debug!("Skipped {} malformed listfile rows", reader.skipped());
        }

        Self { entries }
    }

    /// Look up a name after normalizing case and separators
    pub fn lookup(&self, name: &str) -> Option<u32> {
        self.entries.get(&normalize_key(name)).copied()
    }

    /// Number of indexed names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was indexed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether a stored name is present, without normalization
    pub fn contains_raw(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

impl FromIterator<(String, u32)> for ListfileIndex {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
