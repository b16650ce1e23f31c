//! Vocabulary word entries
//!
//! A `WordEntry` is one bilingual pair with its answer history, exactly as the
//! word store persists it. A `SessionWord` is the per-session copy that also
//! tracks whether the learner has already answered it correctly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A bilingual vocabulary entry with performance history
///
/// `(cs, ru)` is the identity key: no two entries in one collection share both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    /// Target-language text
    pub cs: String,
    /// Optional transcription shown under the prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tr: Option<String>,
    /// Native-language translation
    pub ru: String,
    #[serde(default)]
    pub correct: u32,
    #[serde(default)]
    pub incorrect: u32,
    #[serde(default)]
    pub last_review: Option<DateTime<Utc>>,
    #[serde(default)]
    pub set_name: Option<String>,
}

impl WordEntry {
    /// Create an entry with no history and no set
    #[must_use]
    pub fn new(cs: impl Into<String>, ru: impl Into<String>) -> Self {
        Self {
            cs: cs.into(),
            tr: None,
            ru: ru.into(),
            correct: 0,
            incorrect: 0,
            last_review: None,
            set_name: None,
        }
    }

    #[must_use]
    pub fn with_transcription(mut self, tr: impl Into<String>) -> Self {
        self.tr = Some(tr.into());
        self
    }

    #[must_use]
    pub fn in_set(mut self, set_name: impl Into<String>) -> Self {
        self.set_name = Some(set_name.into());
        self
    }

    #[must_use]
    pub const fn with_history(mut self, correct: u32, incorrect: u32) -> Self {
        self.correct = correct;
        self.incorrect = incorrect;
        self
    }

    /// Total graded answers for this word
    #[inline]
    #[must_use]
    pub const fn total_attempts(&self) -> u32 {
        self.correct + self.incorrect
    }

    #[inline]
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.total_attempts() == 0
    }

    /// Success rate in `[0, 1]`, or `None` for a word that was never answered
    #[must_use]
    pub fn success_rate(&self) -> Option<f64> {
        let total = self.total_attempts();
        (total > 0).then(|| f64::from(self.correct) / f64::from(total))
    }

    /// Transcription, treating the empty string stored by older imports as absent
    #[must_use]
    pub fn transcription(&self) -> Option<&str> {
        self.tr.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Whether `other` names the same word (same `(cs, ru)` pair)
    #[inline]
    #[must_use]
    pub fn same_word(&self, other: &Self) -> bool {
        self.matches(&other.cs, &other.ru)
    }

    #[inline]
    #[must_use]
    pub fn matches(&self, cs: &str, ru: &str) -> bool {
        self.cs == cs && self.ru == ru
    }

    pub(crate) fn record(&mut self, is_correct: bool) {
        if is_correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
    }
}

impl fmt::Display for WordEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.cs, self.ru)
    }
}

/// A word taking part in the current session
///
/// Shallow copy of the stored entry plus ephemeral state. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionWord {
    pub entry: WordEntry,
    /// Set once the word is answered correctly; never reverts
    pub answered: bool,
    pub attempts: u32,
}

impl SessionWord {
    #[must_use]
    pub const fn new(entry: WordEntry) -> Self {
        Self {
            entry,
            answered: false,
            attempts: 0,
        }
    }
}

impl From<&WordEntry> for SessionWord {
    fn from(entry: &WordEntry) -> Self {
        Self::new(entry.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_rate_none_when_unattempted() {
        let word = WordEntry::new("ahoj", "привет");
        assert!(word.is_new());
        assert_eq!(word.success_rate(), None);
    }

    #[test]
    fn success_rate_counts_both_outcomes() {
        let word = WordEntry::new("pes", "собака").with_history(1, 3);
        assert_eq!(word.total_attempts(), 4);
        assert!((word.success_rate().unwrap() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn identity_is_cs_and_ru() {
        let a = WordEntry::new("kočka", "кошка").in_set("Zvířata");
        let b = WordEntry::new("kočka", "кошка").with_history(4, 1);
        let c = WordEntry::new("kočka", "кот");

        assert!(a.same_word(&b));
        assert!(!a.same_word(&c));
    }

    #[test]
    fn empty_transcription_is_absent() {
        let word = WordEntry::new("ano", "да").with_transcription("");
        assert_eq!(word.transcription(), None);

        let word = WordEntry::new("ano", "да").with_transcription("[ano]");
        assert_eq!(word.transcription(), Some("[ano]"));
    }

    #[test]
    fn deserializes_store_field_names() {
        let json = r#"{
            "cs": "dům",
            "tr": "",
            "ru": "дом",
            "correct": 2,
            "incorrect": 1,
            "lastReview": "2024-03-01T10:00:00.000Z",
            "setName": "Základy"
        }"#;

        let word: WordEntry = serde_json::from_str(json).unwrap();
        assert_eq!(word.cs, "dům");
        assert_eq!(word.correct, 2);
        assert_eq!(word.incorrect, 1);
        assert!(word.last_review.is_some());
        assert_eq!(word.set_name.as_deref(), Some("Základy"));
    }

    #[test]
    fn missing_counters_default_to_zero() {
        let word: WordEntry = serde_json::from_str(r#"{"cs":"voda","ru":"вода"}"#).unwrap();
        assert!(word.is_new());
        assert_eq!(word.last_review, None);
        assert_eq!(word.set_name, None);
    }

    #[test]
    fn session_word_starts_unanswered() {
        let word = SessionWord::from(&WordEntry::new("den", "день"));
        assert!(!word.answered);
        assert_eq!(word.attempts, 0);
    }
}
