//! Question generation
//!
//! Picks the first unanswered session word and turns it into either a
//! multiple-choice translation question or a letter-construction question.

use crate::core::{
    Alphabet, ConstructQuestion, LetterTile, Question, SessionWord, TranslateQuestion, Variant,
    WordEntry, fold_letter,
};
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use rustc_hash::FxHashSet;

/// What the session should show next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Next {
    /// Ask about the session word at `index`
    Ask { index: usize, question: Question },
    /// Every session word has been answered correctly
    Complete,
}

/// Builds questions from session words
#[derive(Debug, Clone)]
pub struct QuestionGenerator {
    alphabet: Alphabet,
    /// Wrong options offered alongside the correct translation
    pub distractors: usize,
    /// Below this many distinct wrong options, translate questions become
    /// construct questions
    pub min_distractors: usize,
    /// Upper bound on decoy letters in a construct pool
    pub max_decoys: usize,
}

impl Default for QuestionGenerator {
    fn default() -> Self {
        Self::new(Alphabet::default())
    }
}

impl QuestionGenerator {
    #[must_use]
    pub const fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            distractors: 3,
            min_distractors: 2,
            max_decoys: 3,
        }
    }

    #[must_use]
    pub const fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Next question for the session, or `Complete`
    ///
    /// The target is the first unanswered word in current session order; the
    /// variant is a fair coin flip.
    pub fn next<R: Rng + ?Sized>(
        &self,
        words: &[SessionWord],
        pool: &[WordEntry],
        rng: &mut R,
    ) -> Next {
        let Some(index) = words.iter().position(|w| !w.answered) else {
            return Next::Complete;
        };

        let variant = if rng.random_bool(0.5) {
            Variant::Translate
        } else {
            Variant::Construct
        };

        Next::Ask {
            index,
            question: self.question_for(&words[index].entry, pool, variant, rng),
        }
    }

    /// Build a question of the requested variant, falling back to the other
    /// variant when the requested one cannot be asked sensibly
    ///
    /// Translate falls back to construct when fewer than `min_distractors`
    /// distinct wrong translations exist. Construct falls back to translate
    /// when the word has no letters. If neither works, a translate question
    /// with whatever options exist is returned.
    pub fn question_for<R: Rng + ?Sized>(
        &self,
        word: &WordEntry,
        pool: &[WordEntry],
        variant: Variant,
        rng: &mut R,
    ) -> Question {
        let constructible = letters_of(&word.cs).next().is_some();

        match variant {
            Variant::Construct if constructible => Question::Construct(self.construct(word, rng)),
            _ => {
                let distractors = self.distractors(word, pool, rng);
                if distractors.len() < self.min_distractors && constructible {
                    tracing::debug!(
                        word = %word.cs,
                        available = distractors.len(),
                        "too few distinct translations, asking construct instead"
                    );
                    return Question::Construct(self.construct(word, rng));
                }
                Question::Translate(self.translate(word, distractors, rng))
            }
        }
    }

    /// Sample distinct wrong translations from the whole pool
    pub fn distractors<R: Rng + ?Sized>(
        &self,
        word: &WordEntry,
        pool: &[WordEntry],
        rng: &mut R,
    ) -> Vec<String> {
        let mut seen = FxHashSet::default();
        let alternatives: Vec<&str> = pool
            .iter()
            .map(|w| w.ru.as_str())
            .filter(|ru| *ru != word.ru && seen.insert(*ru))
            .collect();

        alternatives
            .choose_multiple(rng, self.distractors)
            .map(|ru| (*ru).to_string())
            .collect()
    }

    pub fn translate<R: Rng + ?Sized>(
        &self,
        word: &WordEntry,
        distractors: Vec<String>,
        rng: &mut R,
    ) -> TranslateQuestion {
        let mut options = Vec::with_capacity(distractors.len() + 1);
        options.push(word.ru.clone());
        options.extend(distractors);
        options.shuffle(rng);

        TranslateQuestion {
            prompt: word.cs.clone(),
            transcription: word.transcription().map(str::to_string),
            correct_answer: word.ru.clone(),
            options,
        }
    }

    /// Letter pool: the word's lowercase letters (duplicates kept, spaces
    /// dropped) plus up to `max_decoys` letters the word does not use
    ///
    /// Decoy count is 20% of the letter count, rounded up. If the word starts
    /// with a capital, exactly one matching tile is marked for capital display.
    pub fn construct<R: Rng + ?Sized>(&self, word: &WordEntry, rng: &mut R) -> ConstructQuestion {
        let letters: Vec<char> = letters_of(&word.cs).collect();
        let decoy_count = letters.len().div_ceil(5).min(self.max_decoys);

        let mut pool: Vec<LetterTile> = letters.iter().copied().map(LetterTile::new).collect();
        pool.extend(
            self.alphabet
                .excluding(&letters)
                .choose_multiple(rng, decoy_count)
                .copied()
                .map(LetterTile::new),
        );
        pool.shuffle(rng);

        if let Some(first) = word.cs.chars().next()
            && first.is_uppercase()
            && let Some(tile) = pool.iter_mut().find(|t| t.letter == fold_letter(first))
        {
            tile.capitalized = true;
        }

        ConstructQuestion {
            prompt: word.ru.clone(),
            target_word: word.cs.clone(),
            letter_pool: pool,
        }
    }
}

fn letters_of(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().filter(|&c| c != ' ').map(fold_letter)
}
