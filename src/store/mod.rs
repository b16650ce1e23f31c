//! Word storage
//!
//! The session engine reads and writes the learner's words through the
//! `WordStore` trait. Two stores ship with the crate: a JSON file store for
//! the CLI and an in-memory store for tests and embedding.

mod json;
pub mod library;
mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

use crate::core::WordEntry;
use crate::error::StoreError;

/// Persistent collection of word entries plus the "loaded sets" marker list
///
/// Calls are synchronous and each one is atomic from the caller's point of
/// view. A store holding nothing loads as empty lists.
pub trait WordStore {
    /// Load every stored word
    ///
    /// # Errors
    /// Returns an error if stored data exists but cannot be read or parsed.
    fn load_words(&self) -> Result<Vec<WordEntry>, StoreError>;

    /// Replace the stored words
    ///
    /// # Errors
    /// Returns an error if the words could not be written.
    fn save_words(&self, words: &[WordEntry]) -> Result<(), StoreError>;

    /// Load the identifiers of word sets that were imported
    ///
    /// # Errors
    /// Returns an error if stored data exists but cannot be read or parsed.
    fn load_loaded_sets(&self) -> Result<Vec<String>, StoreError>;

    /// Replace the loaded-sets marker list
    ///
    /// # Errors
    /// Returns an error if the list could not be written.
    fn save_loaded_sets(&self, sets: &[String]) -> Result<(), StoreError>;
}

impl<S: WordStore + ?Sized> WordStore for &S {
    fn load_words(&self) -> Result<Vec<WordEntry>, StoreError> {
        (**self).load_words()
    }

    fn save_words(&self, words: &[WordEntry]) -> Result<(), StoreError> {
        (**self).save_words(words)
    }

    fn load_loaded_sets(&self) -> Result<Vec<String>, StoreError> {
        (**self).load_loaded_sets()
    }

    fn save_loaded_sets(&self, sets: &[String]) -> Result<(), StoreError> {
        (**self).save_loaded_sets(sets)
    }
}
