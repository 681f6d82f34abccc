use std::path::Path;

use crate::data::Entries;
use crate::error::CacheError;

/// Language tags written alongside the records by formats that keep them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Languages<'a> {
    pub source: &'a str,
    pub target: &'a str,
}

/// Persistence backend for a dictionary file.
///
/// Implementations must treat a missing file on `load` as an empty dictionary.
pub trait DictionaryStore {
    /// Reads every record from `path`, keyed by fingerprint.
    ///
    /// # Returns
    /// * `Ok(Entries)` - The records found, empty if the file does not exist
    /// * `Err(CacheError)` - If the file exists but cannot be read or parsed
    fn load(&self, path: &Path) -> Result<Entries, CacheError>;

    /// Writes `entries` to `path`, replacing any previous content.
    ///
    /// Missing parent directories are created.
    fn save(&self, path: &Path, entries: &Entries, languages: Languages<'_>) -> Result<(), CacheError>;
}
