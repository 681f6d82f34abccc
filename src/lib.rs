//! Translation-memory cache.
//!
//! A [`TranslationCache`] answers per-phrase lookups from a dictionary file and
//! registers unknown phrases so they are written back for translation on `close`.
//! Dictionaries are stored as JSON documents or as flat `.properties` files.

pub mod config;
pub mod contexts;
pub mod data;
pub mod error;
pub mod stores;

pub use config::{CacheConfig, ConfigError, DictionaryFormat};
pub use contexts::{fingerprint, FingerprintAlgorithm, TranslationCache, UNKNOWN_PLACEHOLDER};
pub use data::{DictionaryStore, TranslationRecord, Translator};
pub use error::CacheError;
