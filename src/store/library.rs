//! Word-set library management
//!
//! Word sets arrive as JSON arrays of `{cs, tr?, ru}` objects. Importing a set
//! appends its unseen words; reloading rebuilds it while keeping the history
//! of words that are still part of it; deleting drops it entirely. Single
//! words can be deleted too.

use super::WordStore;
use crate::core::WordEntry;
use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// One word of a word-set definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedWord {
    pub cs: String,
    #[serde(default)]
    pub tr: Option<String>,
    pub ru: String,
}

impl ImportedWord {
    fn into_entry(self, set_name: &str) -> WordEntry {
        WordEntry {
            cs: self.cs,
            tr: Some(self.tr.unwrap_or_default()),
            ru: self.ru,
            correct: 0,
            incorrect: 0,
            last_review: None,
            set_name: Some(set_name.to_string()),
        }
    }
}

/// Outcome of `import_set`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportReport {
    pub added: usize,
}

/// Outcome of `reload_set`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReloadReport {
    pub added: usize,
    /// Words still in the set, history kept
    pub kept: usize,
    pub removed: usize,
}

/// A set present in the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetSummary {
    pub name: String,
    pub words: usize,
    /// Words answered correctly at least once
    pub learned: usize,
}

/// Parse a word-set definition
///
/// Rows missing `cs` or `ru`, or with either blank, are skipped with a warning.
///
/// # Errors
///
/// Returns `StoreError::InvalidFormat` if the document is not a JSON array.
pub fn parse_word_set(json: &str) -> Result<Vec<ImportedWord>, StoreError> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| StoreError::InvalidFormat(format!("not valid JSON: {e}")))?;

    let serde_json::Value::Array(rows) = value else {
        return Err(StoreError::InvalidFormat(
            "expected a JSON array of words".to_string(),
        ));
    };

    let words = rows
        .into_iter()
        .enumerate()
        .filter_map(|(i, row)| match serde_json::from_value::<ImportedWord>(row) {
            Ok(word) if !word.cs.trim().is_empty() && !word.ru.trim().is_empty() => Some(word),
            Ok(_) => {
                tracing::warn!(row = i, "skipping word with blank text");
                None
            }
            Err(e) => {
                tracing::warn!(row = i, error = %e, "skipping malformed word");
                None
            }
        })
        .collect();

    Ok(words)
}

/// Read and parse a word-set file
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array.
pub fn load_word_set(path: &Path) -> Result<Vec<ImportedWord>, StoreError> {
    let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_word_set(&content)
}

/// Add a word set to the collection
///
/// Words already present anywhere in the collection (same `cs` and `ru`) are
/// skipped. `source_key` is recorded in the loaded-sets list.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub fn import_set<S: WordStore + ?Sized>(
    store: &S,
    set_name: &str,
    source_key: &str,
    words: Vec<ImportedWord>,
) -> Result<ImportReport, StoreError> {
    let mut collection = store.load_words()?;
    let mut added = 0;

    for word in words {
        if collection.iter().any(|w| w.matches(&word.cs, &word.ru)) {
            continue;
        }
        collection.push(word.into_entry(set_name));
        added += 1;
    }

    store.save_words(&collection)?;

    let mut loaded = store.load_loaded_sets()?;
    if !loaded.iter().any(|s| s == source_key) {
        loaded.push(source_key.to_string());
        store.save_loaded_sets(&loaded)?;
    }

    tracing::info!(set = set_name, added, "imported word set");
    Ok(ImportReport { added })
}

/// Rebuild a set from a new definition, keeping history of surviving words
///
/// Surviving words take the new transcription when one is given. Words of
/// other sets are not touched.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub fn reload_set<S: WordStore + ?Sized>(
    store: &S,
    set_name: &str,
    words: Vec<ImportedWord>,
) -> Result<ReloadReport, StoreError> {
    let (old_set, mut collection): (Vec<WordEntry>, Vec<WordEntry>) = store
        .load_words()?
        .into_iter()
        .partition(|w| w.set_name.as_deref() == Some(set_name));

    let mut report = ReloadReport::default();

    for word in words {
        match old_set.iter().find(|w| w.matches(&word.cs, &word.ru)) {
            Some(existing) => {
                let mut kept = existing.clone();
                if let Some(tr) = word.tr.filter(|t| !t.is_empty()) {
                    kept.tr = Some(tr);
                }
                collection.push(kept);
                report.kept += 1;
            }
            None => {
                collection.push(word.into_entry(set_name));
                report.added += 1;
            }
        }
    }

    report.removed = old_set.len().saturating_sub(report.kept);
    store.save_words(&collection)?;

    tracing::info!(
        set = set_name,
        added = report.added,
        kept = report.kept,
        removed = report.removed,
        "reloaded word set"
    );
    Ok(report)
}

/// Remove a set and its loaded-sets marker
///
/// Returns how many words were removed.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub fn delete_set<S: WordStore + ?Sized>(
    store: &S,
    set_name: &str,
    source_key: Option<&str>,
) -> Result<usize, StoreError> {
    let mut collection = store.load_words()?;
    let before = collection.len();
    collection.retain(|w| w.set_name.as_deref() != Some(set_name));
    let removed = before - collection.len();
    store.save_words(&collection)?;

    if let Some(key) = source_key {
        let mut loaded = store.load_loaded_sets()?;
        loaded.retain(|s| s != key);
        store.save_loaded_sets(&loaded)?;
    }

    tracing::info!(set = set_name, removed, "deleted word set");
    Ok(removed)
}

/// Remove a single word, matched by `(cs, ru)`
///
/// Returns whether a word was removed. The store is only written when one was.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub fn delete_word<S: WordStore + ?Sized>(
    store: &S,
    cs: &str,
    ru: &str,
) -> Result<bool, StoreError> {
    let mut collection = store.load_words()?;
    let Some(index) = collection.iter().position(|w| w.matches(cs, ru)) else {
        tracing::warn!(word = cs, "no such word to delete");
        return Ok(false);
    };

    collection.remove(index);
    store.save_words(&collection)?;
    tracing::info!(word = cs, "deleted word");
    Ok(true)
}

/// Clear the answer history of every word
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub fn reset_stats<S: WordStore + ?Sized>(store: &S) -> Result<usize, StoreError> {
    let mut collection = store.load_words()?;
    for word in &mut collection {
        word.correct = 0;
        word.incorrect = 0;
        word.last_review = None;
    }
    store.save_words(&collection)?;
    Ok(collection.len())
}

/// Export words as a word-set definition (history stripped)
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export_words(words: &[WordEntry]) -> Result<String, serde_json::Error> {
    let rows: Vec<ImportedWord> = words
        .iter()
        .map(|w| ImportedWord {
            cs: w.cs.clone(),
            tr: Some(w.tr.clone().unwrap_or_default()),
            ru: w.ru.clone(),
        })
        .collect();
    serde_json::to_string_pretty(&rows)
}

/// Distinct named sets in the collection, alphabetically
#[must_use]
pub fn set_summaries(words: &[WordEntry]) -> Vec<SetSummary> {
    let mut sets: BTreeMap<&str, SetSummary> = BTreeMap::new();
    for word in words {
        let Some(name) = word.set_name.as_deref().filter(|n| !n.is_empty()) else {
            continue;
        };
        let summary = sets.entry(name).or_insert_with(|| SetSummary {
            name: name.to_string(),
            words: 0,
            learned: 0,
        });
        summary.words += 1;
        if word.correct > 0 {
            summary.learned += 1;
        }
    }
    sets.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn imported(cs: &str, ru: &str, tr: Option<&str>) -> ImportedWord {
        ImportedWord {
            cs: cs.to_string(),
            tr: tr.map(str::to_string),
            ru: ru.to_string(),
        }
    }

    #[test]
    fn parse_rejects_non_arrays() {
        assert!(matches!(
            parse_word_set(r#"{"sets": []}"#),
            Err(StoreError::InvalidFormat(_))
        ));
        assert!(matches!(parse_word_set("nope"), Err(StoreError::InvalidFormat(_))));
    }

    #[test]
    fn parse_skips_bad_rows() {
        let words = parse_word_set(
            r#"[
                {"cs": "ahoj", "tr": "[ahoj]", "ru": "привет"},
                {"cs": "pes"},
                {"cs": " ", "ru": "пусто"},
                {"cs": "kočka", "ru": "кошка"}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            words,
            vec![
                imported("ahoj", "привет", Some("[ahoj]")),
                imported("kočka", "кошка", None),
            ]
        );
    }

    #[test]
    fn import_skips_existing_pairs_and_marks_set() {
        let store = MemoryStore::new(vec![WordEntry::new("ahoj", "привет").with_history(3, 0)]);

        let report = import_set(
            &store,
            "Základy",
            "basics.json",
            vec![
                imported("ahoj", "привет", None),
                imported("pes", "собака", Some("[pes]")),
            ],
        )
        .unwrap();

        assert_eq!(report.added, 1);
        let words = store.words();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].correct, 3);
        assert_eq!(words[1].set_name.as_deref(), Some("Základy"));
        assert!(words[1].is_new());
        assert_eq!(store.load_loaded_sets().unwrap(), vec!["basics.json"]);

        import_set(&store, "Základy", "basics.json", vec![]).unwrap();
        assert_eq!(store.load_loaded_sets().unwrap().len(), 1);
    }

    #[test]
    fn reload_keeps_history_adds_and_removes() {
        let store = MemoryStore::new(vec![
            WordEntry::new("ahoj", "привет").in_set("A").with_history(2, 1),
            WordEntry::new("pes", "собака").in_set("A").with_history(0, 4),
            WordEntry::new("les", "лес").in_set("B").with_history(1, 1),
        ]);

        let report = reload_set(
            &store,
            "A",
            vec![
                imported("ahoj", "привет", Some("[ahoj]")),
                imported("voda", "вода", None),
            ],
        )
        .unwrap();

        assert_eq!(
            report,
            ReloadReport {
                added: 1,
                kept: 1,
                removed: 1
            }
        );

        let words = store.words();
        assert_eq!(words.len(), 3);
        let les = words.iter().find(|w| w.cs == "les").unwrap();
        assert_eq!((les.correct, les.incorrect), (1, 1));
        let ahoj = words.iter().find(|w| w.cs == "ahoj").unwrap();
        assert_eq!((ahoj.correct, ahoj.incorrect), (2, 1));
        assert_eq!(ahoj.transcription(), Some("[ahoj]"));
        assert!(words.iter().all(|w| w.cs != "pes"));
    }

    #[test]
    fn delete_removes_words_and_marker() {
        let store = MemoryStore::new(vec![
            WordEntry::new("ahoj", "привет").in_set("A"),
            WordEntry::new("les", "лес").in_set("B"),
        ]);
        store
            .save_loaded_sets(&["a.json".to_string(), "b.json".to_string()])
            .unwrap();

        let removed = delete_set(&store, "A", Some("a.json")).unwrap();

        assert_eq!(removed, 1);
        assert_eq!(store.words().len(), 1);
        assert_eq!(store.load_loaded_sets().unwrap(), vec!["b.json"]);
    }

    #[test]
    fn delete_word_leaves_other_words_untouched() {
        let store = MemoryStore::new(vec![
            WordEntry::new("ahoj", "привет").in_set("A").with_history(2, 1),
            WordEntry::new("pes", "собака").in_set("A").with_history(0, 4),
            WordEntry::new("les", "лес").in_set("B").with_history(1, 1),
        ]);

        assert!(delete_word(&store, "pes", "собака").unwrap());

        let words = store.words();
        assert_eq!(words.len(), 2);
        assert_eq!(
            words
                .iter()
                .map(|w| (w.cs.as_str(), w.correct, w.incorrect))
                .collect::<Vec<_>>(),
            vec![("ahoj", 2, 1), ("les", 1, 1)]
        );
        assert_eq!(words[0].set_name.as_deref(), Some("A"));
    }

    #[test]
    fn delete_word_without_a_match_saves_nothing() {
        let store = MemoryStore::new(vec![WordEntry::new("ahoj", "привет")]);

        assert!(!delete_word(&store, "ahoj", "пока").unwrap());
        assert_eq!(store.words().len(), 1);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn reset_clears_history() {
        let mut word = WordEntry::new("ahoj", "привет").with_history(5, 2);
        word.last_review = Some(chrono::Utc::now());
        let store = MemoryStore::new(vec![word]);

        assert_eq!(reset_stats(&store).unwrap(), 1);
        let words = store.words();
        assert!(words[0].is_new());
        assert_eq!(words[0].last_review, None);
    }

    #[test]
    fn export_strips_history() {
        let words = vec![WordEntry::new("ahoj", "привет").with_history(5, 2)];
        let json = export_words(&words).unwrap();

        assert!(!json.contains("correct"));
        assert_eq!(
            parse_word_set(&json).unwrap(),
            vec![imported("ahoj", "привет", Some(""))]
        );
    }

    #[test]
    fn summaries_group_by_set() {
        let words = vec![
            WordEntry::new("a", "1").in_set("Zvířata").with_history(1, 0),
            WordEntry::new("b", "2").in_set("Jídlo"),
            WordEntry::new("c", "3").in_set("Zvířata"),
            WordEntry::new("d", "4"),
        ];

        let sets = set_summaries(&words);
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].name, "Jídlo");
        assert_eq!((sets[1].words, sets[1].learned), (2, 1));
    }
}
