use std::path::PathBuf;

use thiserror::Error;

use crate::config::DictionaryFormat;

/// Errors raised while loading or persisting a dictionary
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("I/O error on dictionary '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON dictionary '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid properties dictionary '{}' at line {line}: {message}", path.display())]
    Properties {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// The selected format has no backend.
    #[error("Unsupported dictionary format: {0}")]
    UnsupportedFormat(DictionaryFormat),
}

impl CacheError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CacheError::Io { path: path.into(), source }
    }
}
