//! JSON file store
//!
//! Keeps `words.json` and `loaded_sets.json` in one directory. Writes go to a
//! temporary file first and are renamed into place.

use super::WordStore;
use crate::core::WordEntry;
use crate::error::StoreError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const WORDS_FILE: &str = "words.json";
const LOADED_SETS_FILE: &str = "loaded_sets.json";

/// Word store backed by JSON files in a data directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`
    ///
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn words_path(&self) -> PathBuf {
        self.dir.join(WORDS_FILE)
    }

    #[must_use]
    pub fn loaded_sets_path(&self) -> PathBuf {
        self.dir.join(LOADED_SETS_FILE)
    }
}

impl WordStore for JsonFileStore {
    fn load_words(&self) -> Result<Vec<WordEntry>, StoreError> {
        read_json(&self.words_path())
    }

    fn save_words(&self, words: &[WordEntry]) -> Result<(), StoreError> {
        write_json(&self.words_path(), words)
    }

    fn load_loaded_sets(&self) -> Result<Vec<String>, StoreError> {
        read_json(&self.loaded_sets_path())
    }

    fn save_loaded_sets(&self, sets: &[String]) -> Result<(), StoreError> {
        write_json(&self.loaded_sets_path(), sets)
    }
}

/// Read a JSON document, treating a missing or blank file as the default value
fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if content.trim().is_empty() {
        return Ok(T::default());
    }

    serde_json::from_str(&content).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let io_err = |source: io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let bytes = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)
}
