use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::data::{DictionaryStore, Entries, Languages, TranslationRecord};
use crate::error::CacheError;
use crate::stores::properties_format::{parse_properties, write_properties};
use crate::stores::write_atomically;

/// Flat key-value backend: one `fingerprint=translation` line per record.
///
/// Source phrases are not stored. Records loaded from this format have an empty
/// `source_phrase`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertiesStore;

/// First non-empty value among the target phrase and the source phrase
fn persisted_value(record: &TranslationRecord) -> &str {
    [record.target_phrase.as_str(), record.source_phrase.as_str()]
        .into_iter()
        .find(|value| !value.is_empty())
        .unwrap_or("")
}

/// Header line in the layout of `java.util.Date::toString`
fn timestamp_comment(now: DateTime<Utc>) -> String {
    now.format("%a %b %d %H:%M:%S %Z %Y").to_string()
}

impl DictionaryStore for PropertiesStore {
    fn load(&self, path: &Path) -> Result<Entries, CacheError> {
        if !path.exists() {
            return Ok(Entries::new());
        }

        let content = fs::read_to_string(path).map_err(|e| CacheError::io(path, e))?;
        let pairs = parse_properties(&content).map_err(|e| CacheError::Properties {
            path: path.to_path_buf(),
            line: e.line,
            message: e.message,
        })?;

        let mut entries = Entries::new();
        for (key, value) in pairs {
            let record = TranslationRecord {
                calculated_key: key.clone(),
                source_phrase: String::new(),
                target_phrase: value,
            };
            if let Some(previous) = entries.insert(key, record) {
                tracing::warn!(
                    "Duplicate key {} in {}, keeping the later value",
                    previous.calculated_key,
                    path.display()
                );
            }
        }
        Ok(entries)
    }

    fn save(&self, path: &Path, entries: &Entries, _languages: Languages<'_>) -> Result<(), CacheError> {
        let comments = [String::new(), timestamp_comment(Utc::now())];
        let pairs = entries
            .values()
            .map(|record| (record.calculated_key.as_str(), persisted_value(record)));

        write_atomically(path, |mut out| write_properties(&mut out, &comments, pairs))
    }
}
