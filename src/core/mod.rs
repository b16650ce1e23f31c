//! Core domain types for vocabulary drills
//!
//! Word entries, questions and answers. Everything here is plain data with
//! small pure helpers; randomness and persistence live in other modules.

pub mod alphabet;
mod question;
mod word;

pub use alphabet::Alphabet;
pub use question::{
    Answer, ConstructQuestion, LetterTile, Question, TranslateQuestion, Variant, fold_letter,
};
pub use word::{SessionWord, WordEntry};
