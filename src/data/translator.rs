use crate::config::CacheConfig;
use crate::error::CacheError;

/// Per-phrase translation step driven by the translation pipeline.
///
/// Callers follow a fixed sequence: `reconfigure` once per source/target pairing,
/// then `open`, then any number of `translate` calls, then `close`.
pub trait Translator {
    /// Switches to a new configuration and source language, dropping in-memory state
    fn reconfigure(&mut self, config: CacheConfig, source_language: &str);

    /// Translates one phrase.
    ///
    /// # Returns
    /// * `Some(String)` - The translation, or a placeholder for unknown phrases
    /// * `None` - If there is no phrase, or no placeholder should be emitted
    fn translate(&mut self, source_phrase: Option<&str>) -> Option<String>;

    /// Loads persisted state
    fn open(&mut self) -> Result<(), CacheError>;

    /// Persists state and releases it
    fn close(&mut self) -> Result<(), CacheError>;
}
