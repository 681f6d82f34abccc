use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use phrasebook::{CacheConfig, DictionaryFormat, TranslationCache};

mod summary;

use summary::{Outcome, TranslationSummary};

const DEFAULT_CONFIG_FILE: &str = "phrasebook.yml";

#[derive(Clone, Copy)]
pub struct Config {
    pub verbose: bool,
    pub dry_run: bool,
}

/// Command-line values layered over the configuration file
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub dictionary: Option<PathBuf>,
    pub format: Option<DictionaryFormat>,
    pub target_language: Option<String>,
    pub omit_missing_keys: Option<bool>,
}

/// Builds the cache configuration from the configuration file and command-line
/// overrides.
///
/// An explicit `--config` must exist. Without it, `phrasebook.yml` in the current
/// directory is used when present; otherwise `--dictionary` is required.
pub fn resolve_cache_config(overrides: &ConfigOverrides) -> Result<CacheConfig> {
    let config_file = match &overrides.config_file {
        Some(path) => Some(path.clone()),
        None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|path| path.exists()),
    };
    resolve_with_file(overrides, config_file.as_deref())
}

fn resolve_with_file(overrides: &ConfigOverrides, config_file: Option<&Path>) -> Result<CacheConfig> {
    let mut cache_config = match (config_file, &overrides.dictionary) {
        (Some(path), _) => CacheConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        (None, Some(dictionary)) => CacheConfig::new(dictionary.clone()),
        (None, None) => anyhow::bail!(
            "No configuration found: pass --config, create {} or pass --dictionary",
            DEFAULT_CONFIG_FILE
        ),
    };

    if let Some(dictionary) = &overrides.dictionary {
        cache_config.dictionary = dictionary.clone();
    }
    if let Some(format) = overrides.format {
        cache_config.dictionary_format = format;
    }
    if let Some(target_language) = &overrides.target_language {
        cache_config.target_language = target_language.clone();
    }
    if let Some(omit) = overrides.omit_missing_keys {
        cache_config.omit_missing_keys = omit;
    }

    Ok(cache_config)
}

pub fn translate(
    source_language: &str,
    phrases: Vec<String>,
    cache_config: CacheConfig,
    config: &Config,
) -> Result<()> {
    let phrases = if phrases.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .context("Failed to read phrases from stdin")?
    } else {
        phrases
    };

    let mut cache = open_cache(source_language, cache_config)?;
    let mut summary = TranslationSummary::new(phrases.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for phrase in &phrases {
        let (translation, outcome) = lookup(&mut cache, phrase);
        summary.record(outcome);
        writeln!(out, "{}", translation.as_deref().unwrap_or("")).context("Failed to write output")?;
    }
    out.flush().context("Failed to write output")?;

    if config.dry_run {
        eprintln!(
            "[DRY RUN] Would write {} entries to {}",
            cache.len(),
            cache.config().dictionary.display()
        );
    } else {
        let dictionary = cache.config().dictionary.clone();
        cache
            .close()
            .with_context(|| format!("Failed to save dictionary {}", dictionary.display()))?;
    }

    if config.verbose {
        summary.finish();
    }
    Ok(())
}

pub fn missing(source_language: &str, cache_config: CacheConfig) -> Result<()> {
    let cache = open_cache(source_language, cache_config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for record in cache.untranslated() {
        if record.source_phrase.is_empty() {
            writeln!(out, "{}", record.calculated_key)?;
        } else {
            writeln!(out, "{}\t{}", record.calculated_key, record.source_phrase)?;
        }
    }
    Ok(())
}

pub fn stats(source_language: &str, cache_config: CacheConfig) -> Result<()> {
    let cache = open_cache(source_language, cache_config)?;
    let untranslated = cache.untranslated().count();

    println!("Dictionary:   {}", cache.config().dictionary.display());
    println!("Format:       {}", cache.config().dictionary_format);
    println!("Entries:      {}", cache.len());
    println!("Translated:   {}", cache.len() - untranslated);
    println!("Untranslated: {}", untranslated);
    Ok(())
}

fn open_cache(source_language: &str, cache_config: CacheConfig) -> Result<TranslationCache> {
    let mut cache = TranslationCache::new(cache_config, source_language);
    cache.open().with_context(|| {
        format!(
            "Failed to open dictionary {}",
            cache.config().dictionary.display()
        )
    })?;
    Ok(cache)
}

fn lookup(cache: &mut TranslationCache, phrase: &str) -> (Option<String>, Outcome) {
    if phrase.is_empty() {
        return (cache.lookup_or_register(phrase), Outcome::Empty);
    }

    let before = cache.len();
    let translation = cache.lookup_or_register(phrase);

    let outcome = if cache.len() > before {
        Outcome::Registered
    } else if translation.as_deref().is_some_and(|t| !t.is_empty()) {
        Outcome::Translated
    } else {
        Outcome::Pending
    };
    (translation, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use phrasebook::UNKNOWN_PLACEHOLDER;
    use std::fs;

    #[test]
    fn test_resolve_requires_a_source() {
        let overrides = ConfigOverrides::default();
        assert!(resolve_with_file(&overrides, None).is_err());
    }

    #[test]
    fn test_resolve_from_dictionary_flag() {
        let overrides = ConfigOverrides {
            dictionary: Some(PathBuf::from("dict.properties")),
            format: Some(DictionaryFormat::Properties),
            omit_missing_keys: Some(true),
            ..Default::default()
        };
        let config = resolve_with_file(&overrides, None).unwrap();

        assert_eq!(config.dictionary, PathBuf::from("dict.properties"));
        assert_eq!(config.dictionary_format, DictionaryFormat::Properties);
        assert!(config.omit_missing_keys);
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("phrasebook.yml");
        fs::write(&config_path, "dictionary: de.json\ntargetLanguage: de\n").unwrap();

        let overrides = ConfigOverrides {
            target_language: Some("de-AT".to_string()),
            ..Default::default()
        };
        let config = resolve_with_file(&overrides, Some(&config_path)).unwrap();

        assert_eq!(config.dictionary, dir.path().join("de.json"));
        assert_eq!(config.target_language, "de-AT");
        assert_eq!(config.dictionary_format, DictionaryFormat::Json);
    }

    #[test]
    fn test_flag_can_turn_omit_missing_keys_off() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("phrasebook.yml");
        fs::write(&config_path, "dictionary: de.json\nomitMissingKeys: true\n").unwrap();

        let config = resolve_with_file(&ConfigOverrides::default(), Some(&config_path)).unwrap();
        assert!(config.omit_missing_keys);

        let overrides = ConfigOverrides {
            omit_missing_keys: Some(false),
            ..Default::default()
        };
        let config = resolve_with_file(&overrides, Some(&config_path)).unwrap();
        assert!(!config.omit_missing_keys);
    }

    #[test]
    fn test_missing_explicit_config_file_is_an_error() {
        let overrides = ConfigOverrides::default();
        let result = resolve_with_file(&overrides, Some(Path::new("/nonexistent/phrasebook.yml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_lookup_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = TranslationCache::new(CacheConfig::new(dir.path().join("d.json")), "en");

        let (translation, outcome) = lookup(&mut cache, "Print");
        assert_eq!(translation.as_deref(), Some(UNKNOWN_PLACEHOLDER));
        assert_eq!(outcome, Outcome::Registered);

        let (translation, outcome) = lookup(&mut cache, "print");
        assert_eq!(translation.as_deref(), Some(""));
        assert_eq!(outcome, Outcome::Pending);

        let (translation, outcome) = lookup(&mut cache, "");
        assert_eq!(translation.as_deref(), Some(""));
        assert_eq!(outcome, Outcome::Empty);
        assert_eq!(cache.len(), 1);
    }
}
