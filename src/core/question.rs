//! Quiz questions and learner answers
//!
//! Two question variants exist:
//! - `Translate`: show the target-language word, pick its translation from
//!   a small set of options
//! - `Construct`: show the translation, assemble the target-language word from
//!   a shuffled pool of letter tiles (the word's letters plus a few decoys)

use rustc_hash::FxHashMap;
use std::fmt;

/// Question variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Translate,
    Construct,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translate => write!(f, "translate"),
            Self::Construct => write!(f, "construct"),
        }
    }
}

/// Multiple-choice translation question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateQuestion {
    /// Target-language word shown to the learner
    pub prompt: String,
    pub transcription: Option<String>,
    pub correct_answer: String,
    /// Distinct translations, `correct_answer` among them, in display order
    pub options: Vec<String>,
}

/// One letter button in a construct question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterTile {
    /// Lowercase letter
    pub letter: char,
    /// Rendered as a capital (only ever one tile: the word's capital initial)
    pub capitalized: bool,
}

impl LetterTile {
    #[must_use]
    pub const fn new(letter: char) -> Self {
        Self {
            letter,
            capitalized: false,
        }
    }
}

impl fmt::Display for LetterTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.capitalized {
            self.letter.to_uppercase().try_for_each(|c| write!(f, "{c}"))
        } else {
            write!(f, "{}", self.letter)
        }
    }
}

/// Lowercase a letter to a single char
///
/// Letters whose lowercase form spans several chars keep only the first, so a
/// word has exactly one tile per slot.
#[must_use]
pub fn fold_letter(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Letter-by-letter word construction question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructQuestion {
    /// Native-language translation shown to the learner
    pub prompt: String,
    /// Target word, case preserved for display
    pub target_word: String,
    pub letter_pool: Vec<LetterTile>,
}

impl ConstructQuestion {
    /// Number of letters the learner has to place (spaces are given)
    #[must_use]
    pub fn letter_count(&self) -> usize {
        self.target_word.chars().filter(|&c| c != ' ').count()
    }

    /// Folded letters of the target in slot order
    pub fn target_letters(&self) -> impl Iterator<Item = char> + '_ {
        self.target_word
            .chars()
            .filter(|&c| c != ' ')
            .map(fold_letter)
    }

    /// Whether the submitted letters spell the target, ignoring case
    #[must_use]
    pub fn is_spelled_by(&self, letters: &[char]) -> bool {
        self.assemble(letters)
            .chars()
            .filter(|&c| c != ' ')
            .map(fold_letter)
            .eq(self.target_letters())
    }

    /// Lay the submitted letters into the target's slots
    ///
    /// Spaces in the target are copied through without consuming a letter.
    /// Letters beyond the target's letter count are ignored; missing ones
    /// leave the word short.
    #[must_use]
    pub fn assemble(&self, letters: &[char]) -> String {
        let mut submitted = letters.iter().take(self.letter_count());
        let mut word = String::with_capacity(self.target_word.len());

        for c in self.target_word.chars() {
            if c == ' ' {
                word.push(' ');
            } else if let Some(&letter) = submitted.next() {
                word.push(letter);
            }
        }

        word
    }

    /// Partially built word for display
    ///
    /// Unfilled slots render as `_`. A placed letter is uppercased when the
    /// target has an uppercase character at that slot.
    #[must_use]
    pub fn render_progress(&self, letters: &[char]) -> String {
        let mut submitted = letters.iter();
        let mut shown = String::with_capacity(self.target_word.len());

        for c in self.target_word.chars() {
            if c == ' ' {
                shown.push(' ');
                continue;
            }
            match submitted.next() {
                Some(&letter) if c.is_uppercase() => shown.extend(letter.to_uppercase()),
                Some(&letter) => shown.push(letter),
                None => shown.push('_'),
            }
        }

        shown
    }

    /// Whether every submitted letter can be drawn from the pool
    ///
    /// Comparison is case-insensitive and respects how many times each
    /// letter occurs among the tiles.
    #[must_use]
    pub fn letters_available(&self, letters: &[char]) -> bool {
        let mut remaining: FxHashMap<char, usize> = FxHashMap::default();
        for tile in &self.letter_pool {
            *remaining.entry(tile.letter).or_insert(0) += 1;
        }

        letters.iter().map(|&c| fold_letter(c)).all(|c| {
            remaining
                .get_mut(&c)
                .filter(|count| **count > 0)
                .map(|count| *count -= 1)
                .is_some()
        })
    }
}

/// A generated question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Question {
    Translate(TranslateQuestion),
    Construct(ConstructQuestion),
}

impl Question {
    #[must_use]
    pub const fn variant(&self) -> Variant {
        match self {
            Self::Translate(_) => Variant::Translate,
            Self::Construct(_) => Variant::Construct,
        }
    }

    /// Text shown as the question
    #[must_use]
    pub fn prompt(&self) -> &str {
        match self {
            Self::Translate(q) => &q.prompt,
            Self::Construct(q) => &q.prompt,
        }
    }

    /// The expected answer, as shown in feedback
    #[must_use]
    pub fn expected(&self) -> &str {
        match self {
            Self::Translate(q) => &q.correct_answer,
            Self::Construct(q) => &q.target_word,
        }
    }
}

/// A learner's answer to the current question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// The chosen translation option
    Choice(String),
    /// Letters in the order they were placed (spaces excluded)
    Letters(Vec<char>),
}

impl Answer {
    /// Letters answer from typed text, dropping spaces
    #[must_use]
    pub fn typed(text: &str) -> Self {
        Self::Letters(text.chars().filter(|&c| c != ' ').collect())
    }
}
