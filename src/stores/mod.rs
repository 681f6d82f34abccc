//! Dictionary file backends, one per supported `DictionaryFormat`.

mod json_store;
mod properties_format;
mod properties_store;

pub use json_store::JsonStore;
pub use properties_format::{parse_properties, write_properties, PropertiesError};
pub use properties_store::PropertiesStore;

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::config::DictionaryFormat;
use crate::data::DictionaryStore;
use crate::error::CacheError;

static JSON_STORE: JsonStore = JsonStore;
static PROPERTIES_STORE: PropertiesStore = PropertiesStore;

impl DictionaryFormat {
    /// Returns the backend for this format.
    ///
    /// # Returns
    /// * `Err(CacheError::UnsupportedFormat)` - If the format has no backend
    pub fn store(self) -> Result<&'static dyn DictionaryStore, CacheError> {
        match self {
            DictionaryFormat::Json => Ok(&JSON_STORE),
            DictionaryFormat::Properties => Ok(&PROPERTIES_STORE),
            DictionaryFormat::Xliff12 => Err(CacheError::UnsupportedFormat(self)),
        }
    }
}

/// Replaces the file at `path` with whatever `write` produces.
///
/// Output goes to a temporary file in the same directory, which is renamed over
/// `path` only once writing succeeded. A failed write leaves the old file intact.
/// Missing parent directories are created.
pub(crate) fn write_atomically<F>(path: &Path, write: F) -> Result<(), CacheError>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| CacheError::io(dir, e))?;

    let mut file = NamedTempFile::new_in(dir).map_err(|e| CacheError::io(dir, e))?;
    {
        let mut writer = BufWriter::new(file.as_file_mut());
        write(&mut writer).map_err(|e| CacheError::io(path, e))?;
        writer.flush().map_err(|e| CacheError::io(path, e))?;
    }
    file.persist(path).map_err(|e| CacheError::io(path, e.error))?;
    Ok(())
}
