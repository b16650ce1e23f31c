//! In-memory word store

use super::WordStore;
use crate::core::WordEntry;
use crate::error::StoreError;
use std::cell::{Cell, RefCell};

/// Word store that keeps everything in memory
///
/// Saves can be made to fail on demand, which is how tests exercise the
/// engine's handling of persistence failures.
#[derive(Debug, Default)]
pub struct MemoryStore {
    words: RefCell<Vec<WordEntry>>,
    loaded_sets: RefCell<Vec<String>>,
    fail_saves: Cell<bool>,
    saves: Cell<usize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(words: Vec<WordEntry>) -> Self {
        Self {
            words: RefCell::new(words),
            ..Self::default()
        }
    }

    /// Snapshot of the stored words
    #[must_use]
    pub fn words(&self) -> Vec<WordEntry> {
        self.words.borrow().clone()
    }

    /// Make every following save fail (or succeed again)
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    /// Number of successful saves of either list
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_saves.get() {
            return Err(StoreError::Rejected("memory store is read-only".to_string()));
        }
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

impl WordStore for MemoryStore {
    fn load_words(&self) -> Result<Vec<WordEntry>, StoreError> {
        Ok(self.words())
    }

    fn save_words(&self, words: &[WordEntry]) -> Result<(), StoreError> {
        self.check_writable()?;
        *self.words.borrow_mut() = words.to_vec();
        Ok(())
    }

    fn load_loaded_sets(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.loaded_sets.borrow().clone())
    }

    fn save_loaded_sets(&self, sets: &[String]) -> Result<(), StoreError> {
        self.check_writable()?;
        *self.loaded_sets.borrow_mut() = sets.to_vec();
        Ok(())
    }
}
