use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// In-memory dictionary keyed by fingerprint.
///
/// Sorted so that saved files do not reorder between runs.
pub type Entries = BTreeMap<String, TranslationRecord>;

/// A single phrase and its translation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRecord {
    /// Fingerprint of the normalized source phrase, or the raw key for flat dictionaries
    #[serde(default, deserialize_with = "null_as_default")]
    pub calculated_key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_phrase: String,
    /// Empty until someone supplies a translation
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_phrase: String,
}

impl TranslationRecord {
    /// A freshly seen phrase with no translation yet
    pub fn untranslated(calculated_key: impl Into<String>, source_phrase: impl Into<String>) -> Self {
        Self {
            calculated_key: calculated_key.into(),
            source_phrase: source_phrase.into(),
            target_phrase: String::new(),
        }
    }

    pub fn is_translated(&self) -> bool {
        !self.target_phrase.is_empty()
    }
}

/// Structured dictionary file: language tags plus all records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_language: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_language: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub objects: Vec<TranslationRecord>,
}

// Dictionaries edited by hand or written by other tools carry explicit nulls.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
