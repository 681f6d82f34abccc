//! Configuration for a translation cache.
//!
//! The file is YAML (JSON is accepted as well, being a subset) with camelCase keys:
//!
//! ```yaml
//! dictionary: dictionaries/de.json
//! dictionaryFormat: json        # json | properties | xliff12
//! omitMissingKeys: false
//! targetLanguage: de
//! fingerprintAlgorithm: sha1    # sha1 | sha256
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::contexts::FingerprintAlgorithm;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// On-disk layout of a dictionary file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DictionaryFormat {
    /// Structured document with language tags and a list of records
    #[default]
    Json,
    /// Flat `key=value` lines; source phrases are not preserved
    Properties,
    /// XLIFF 1.2 localization segments (no backend available)
    Xliff12,
}

impl fmt::Display for DictionaryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DictionaryFormat::Json => "json",
            DictionaryFormat::Properties => "properties",
            DictionaryFormat::Xliff12 => "xliff12",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheConfig {
    /// Path of the dictionary file read by `open` and written by `close`
    pub dictionary: PathBuf,
    #[serde(default)]
    pub dictionary_format: DictionaryFormat,
    /// Return `None` instead of the placeholder for phrases without a translation
    #[serde(default)]
    pub omit_missing_keys: bool,
    /// Written into structured-document output only
    #[serde(default)]
    pub target_language: String,
    #[serde(default)]
    pub fingerprint_algorithm: FingerprintAlgorithm,
}

impl CacheConfig {
    pub fn new(dictionary: impl Into<PathBuf>) -> Self {
        Self {
            dictionary: dictionary.into(),
            dictionary_format: DictionaryFormat::default(),
            omit_missing_keys: false,
            target_language: String::new(),
            fingerprint_algorithm: FingerprintAlgorithm::default(),
        }
    }

    pub fn with_format(mut self, format: DictionaryFormat) -> Self {
        self.dictionary_format = format;
        self
    }

    pub fn with_target_language(mut self, target_language: impl Into<String>) -> Self {
        self.target_language = target_language.into();
        self
    }

    pub fn with_omit_missing_keys(mut self, omit: bool) -> Self {
        self.omit_missing_keys = omit;
        self
    }

    /// Loads a configuration file.
    ///
    /// A relative `dictionary` path is resolved against the directory holding the
    /// configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::parse(&content)?;
        if config.dictionary.is_relative() {
            if let Some(base) = path.parent() {
                config.dictionary = base.join(&config.dictionary);
            }
        }

        tracing::debug!(
            "Loaded configuration from {}: dictionary={}, format={}",
            path.display(),
            config.dictionary.display(),
            config.dictionary_format
        );
        Ok(config)
    }

    /// Parses configuration text without touching the filesystem
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: CacheConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.dictionary.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("'dictionary' must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config_uses_defaults() {
        let config = CacheConfig::parse("dictionary: dict/fr.json\n").unwrap();

        assert_eq!(config.dictionary, PathBuf::from("dict/fr.json"));
        assert_eq!(config.dictionary_format, DictionaryFormat::Json);
        assert!(!config.omit_missing_keys);
        assert_eq!(config.target_language, "");
        assert_eq!(config.fingerprint_algorithm, FingerprintAlgorithm::Sha1);
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
dictionary: dict/fr.properties
dictionaryFormat: properties
omitMissingKeys: true
targetLanguage: fr
fingerprintAlgorithm: sha256
"#;
        let config = CacheConfig::parse(yaml).unwrap();

        assert_eq!(config.dictionary_format, DictionaryFormat::Properties);
        assert!(config.omit_missing_keys);
        assert_eq!(config.target_language, "fr");
        assert_eq!(config.fingerprint_algorithm, FingerprintAlgorithm::Sha256);
    }

    #[test]
    fn test_parse_json_config() {
        let json = r#"{"dictionary": "d.json", "dictionaryFormat": "xliff12"}"#;
        let config = CacheConfig::parse(json).unwrap();
        assert_eq!(config.dictionary_format, DictionaryFormat::Xliff12);
    }

    #[test]
    fn test_unknown_fingerprint_algorithm_is_rejected() {
        let yaml = "dictionary: d.json\nfingerprintAlgorithm: md5\n";
        assert!(matches!(CacheConfig::parse(yaml), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_empty_dictionary_path_is_rejected() {
        let result = CacheConfig::parse("dictionary: ''\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_resolves_dictionary_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("phrasebook.yml");
        fs::write(&config_path, "dictionary: dict/es.json\ntargetLanguage: es\n").unwrap();

        let config = CacheConfig::load(&config_path).unwrap();
        assert_eq!(config.dictionary, dir.path().join("dict/es.json"));
        assert_eq!(config.target_language, "es");
    }

    #[test]
    fn test_load_missing_config_file() {
        let result = CacheConfig::load(Path::new("/nonexistent/phrasebook.yml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
