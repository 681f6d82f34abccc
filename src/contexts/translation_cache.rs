use crate::config::CacheConfig;
use crate::contexts::fingerprint;
use crate::data::{Entries, Languages, TranslationRecord, Translator};
use crate::error::CacheError;

/// Returned for phrases with no recorded translation unless `omit_missing_keys` is set
pub const UNKNOWN_PLACEHOLDER: &str = "__UNKNOWN__";

/// TranslationCache maps phrase fingerprints to recorded translations for one
/// source language and persists them in a dictionary file.
///
/// Lookups of unknown phrases register them with an empty translation, so after
/// `close` the dictionary lists every phrase that still needs translating.
#[derive(Debug, Clone)]
pub struct TranslationCache {
    config: CacheConfig,
    source_language: String,
    entries: Entries,
}

impl TranslationCache {
    /// Creates an empty cache for the given configuration and source language
    pub fn new(config: CacheConfig, source_language: impl Into<String>) -> Self {
        Self {
            config,
            source_language: source_language.into(),
            entries: Entries::new(),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    /// Replaces configuration and source language and clears all entries.
    ///
    /// Lookups made since the last `close` are discarded.
    pub fn reconfigure(&mut self, config: CacheConfig, source_language: impl Into<String>) {
        if !self.entries.is_empty() {
            tracing::debug!(
                "Discarding {} unsaved entries for '{}'",
                self.entries.len(),
                self.source_language
            );
        }
        self.config = config;
        self.source_language = source_language.into();
        self.entries.clear();
    }

    /// Returns the recorded translation for `source_phrase`, registering the phrase
    /// if it has not been seen.
    ///
    /// # Returns
    /// * `Some("")` - For an empty phrase (nothing is registered)
    /// * `Some(translation)` - If the phrase is known; the translation may be empty
    /// * `Some(UNKNOWN_PLACEHOLDER)` - If the phrase was just registered
    /// * `None` - If the phrase was just registered and `omit_missing_keys` is set
    pub fn lookup_or_register(&mut self, source_phrase: &str) -> Option<String> {
        if source_phrase.is_empty() {
            return Some(String::new());
        }

        let key = fingerprint(self.config.fingerprint_algorithm, source_phrase);
        if let Some(record) = self.entries.get(&key) {
            return Some(record.target_phrase.clone());
        }

        tracing::debug!("Registering untranslated phrase {:?} as {}", source_phrase, key);
        self.entries
            .insert(key.clone(), TranslationRecord::untranslated(key, source_phrase));

        if self.config.omit_missing_keys {
            None
        } else {
            Some(UNKNOWN_PLACEHOLDER.to_string())
        }
    }

    /// Clears the entries and reloads them from the configured dictionary.
    ///
    /// A missing dictionary file leaves the cache empty.
    pub fn open(&mut self) -> Result<(), CacheError> {
        self.entries.clear();

        let store = self.config.dictionary_format.store()?;
        self.entries = store.load(&self.config.dictionary)?;

        tracing::debug!(
            "Opened {} dictionary {} with {} entries",
            self.config.dictionary_format,
            self.config.dictionary.display(),
            self.entries.len()
        );
        Ok(())
    }

    /// Writes the entries to the configured dictionary, then clears them.
    ///
    /// On failure the entries are kept so the caller can retry.
    pub fn close(&mut self) -> Result<(), CacheError> {
        let store = self.config.dictionary_format.store()?;
        let languages = Languages {
            source: &self.source_language,
            target: &self.config.target_language,
        };
        store.save(&self.config.dictionary, &self.entries, languages)?;

        tracing::info!(
            "Saved {} entries ({} untranslated) to {}",
            self.entries.len(),
            self.untranslated().count(),
            self.config.dictionary.display()
        );
        self.entries.clear();
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a record by fingerprint without registering anything
    pub fn get(&self, fingerprint: &str) -> Option<&TranslationRecord> {
        self.entries.get(fingerprint)
    }

    /// Records still waiting for a translation
    pub fn untranslated(&self) -> impl Iterator<Item = &TranslationRecord> {
        self.entries.values().filter(|record| !record.is_translated())
    }
}

impl Translator for TranslationCache {
    fn reconfigure(&mut self, config: CacheConfig, source_language: &str) {
        TranslationCache::reconfigure(self, config, source_language);
    }

    fn translate(&mut self, source_phrase: Option<&str>) -> Option<String> {
        self.lookup_or_register(source_phrase?)
    }

    fn open(&mut self) -> Result<(), CacheError> {
        TranslationCache::open(self)
    }

    fn close(&mut self) -> Result<(), CacheError> {
        TranslationCache::close(self)
    }
}
