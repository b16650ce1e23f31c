//! Session assembly
//!
//! Shuffles the selected candidates and keeps as many as the learner asked for.

use crate::core::{SessionWord, WordEntry};
use crate::error::DrillError;
use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;
use std::str::FromStr;

/// How many words a session should contain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSize {
    All,
    Limit(usize),
}

impl Default for SessionSize {
    fn default() -> Self {
        Self::Limit(20)
    }
}

impl SessionSize {
    /// Number of words a session built from `available` candidates will hold
    #[must_use]
    pub fn resolve(self, available: usize) -> usize {
        match self {
            Self::All => available,
            Self::Limit(n) => n.min(available),
        }
    }
}

impl FromStr for SessionSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        match s.parse::<usize>() {
            Ok(0) => Err("session size must be at least 1".to_string()),
            Ok(n) => Ok(Self::Limit(n)),
            Err(_) => Err(format!("invalid session size '{s}' (expected a number or 'all')")),
        }
    }
}

impl fmt::Display for SessionSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Limit(n) => write!(f, "{n}"),
        }
    }
}

/// Build the session word list
///
/// Candidates are shuffled uniformly (Fisher-Yates), then the first
/// `size` of them become unanswered session words.
///
/// # Errors
///
/// Returns `DrillError::EmptyPool` if there are no candidates.
pub fn build_session<R: Rng + ?Sized>(
    candidates: &[&WordEntry],
    size: SessionSize,
    rng: &mut R,
) -> Result<Vec<SessionWord>, DrillError> {
    if candidates.is_empty() {
        return Err(DrillError::EmptyPool);
    }

    let mut shuffled = candidates.to_vec();
    shuffled.shuffle(rng);

    Ok(shuffled
        .into_iter()
        .take(size.resolve(candidates.len()))
        .map(SessionWord::from)
        .collect())
}
