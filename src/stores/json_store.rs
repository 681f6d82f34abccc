use std::fs;
use std::io;
use std::path::Path;

use crate::data::{DictionaryDocument, DictionaryStore, Entries, Languages};
use crate::error::CacheError;
use crate::stores::write_atomically;

/// Structured-document backend: a pretty-printed JSON object holding the language
/// tags and every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStore;

impl DictionaryStore for JsonStore {
    fn load(&self, path: &Path) -> Result<Entries, CacheError> {
        if !path.exists() {
            return Ok(Entries::new());
        }

        let content = fs::read_to_string(path).map_err(|e| CacheError::io(path, e))?;
        let document: DictionaryDocument =
            serde_json::from_str(&content).map_err(|source| CacheError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        let mut entries = Entries::new();
        for record in document.objects {
            if let Some(previous) = entries.insert(record.calculated_key.clone(), record) {
                tracing::warn!(
                    "Duplicate key {} in {}, keeping the later record",
                    previous.calculated_key,
                    path.display()
                );
            }
        }
        Ok(entries)
    }

    fn save(&self, path: &Path, entries: &Entries, languages: Languages<'_>) -> Result<(), CacheError> {
        let document = DictionaryDocument {
            source_language: languages.source.to_string(),
            target_language: languages.target.to_string(),
            objects: entries.values().cloned().collect(),
        };

        write_atomically(path, |out| {
            serde_json::to_writer_pretty(out, &document).map_err(io::Error::from)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TranslationRecord;

    fn record(key: &str, source: &str, target: &str) -> TranslationRecord {
        TranslationRecord {
            calculated_key: key.to_string(),
            source_phrase: source.to_string(),
            target_phrase: target.to_string(),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let entries = JsonStore.load(&dir.path().join("none.json")).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_save_writes_languages_and_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/dict.json");

        let mut entries = Entries::new();
        entries.insert("b".to_string(), record("b", "Yes", "Ja"));
        entries.insert("a".to_string(), record("a", "No", ""));

        let languages = Languages { source: "en", target: "de" };
        JsonStore.save(&path, &entries, languages).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains('\n'), "output should be pretty-printed");

        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["sourceLanguage"], "en");
        assert_eq!(value["targetLanguage"], "de");
        let objects = value["objects"].as_array().unwrap();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0]["calculatedKey"], "a");
        assert_eq!(objects[1]["targetPhrase"], "Ja");
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dict.json");

        let mut entries = Entries::new();
        entries.insert("k1".to_string(), record("k1", "Line\nbreak \"quoted\"", "Zeile"));
        entries.insert("k2".to_string(), record("k2", "Pending", ""));

        JsonStore
            .save(&path, &entries, Languages { source: "en", target: "de" })
            .unwrap();
        assert_eq!(JsonStore.load(&path).unwrap(), entries);
    }

    #[test]
    fn test_load_rejects_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ \"objects\": [").unwrap();

        assert!(matches!(JsonStore.load(&path), Err(CacheError::Json { .. })));
    }

    #[test]
    fn test_duplicate_keys_keep_last_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dup.json");
        fs::write(
            &path,
            r#"{"objects":[
                {"calculatedKey":"k","sourcePhrase":"A","targetPhrase":"first"},
                {"calculatedKey":"k","sourcePhrase":"A","targetPhrase":"second"}
            ]}"#,
        )
        .unwrap();

        let entries = JsonStore.load(&path).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries["k"].target_phrase, "second");
    }
}
