//! Word selection strategies
//!
//! Defines the Strategy trait and concrete implementations. A strategy maps a
//! word pool to an ordered candidate list without touching the pool.

use crate::core::WordEntry;
use rand::RngCore;
use rand::seq::SliceRandom;
use std::fmt;

/// A strategy for choosing which words a session should draw from
pub trait Strategy {
    /// Select and order candidates from `pool`
    ///
    /// Every returned reference points into `pool`, and no entry appears twice.
    /// An empty result means no word is eligible.
    fn select<'a>(&self, pool: &'a [WordEntry], rng: &mut dyn RngCore) -> Vec<&'a WordEntry>;
}

/// Selection modes offered to the learner
///
/// Allows runtime selection of a strategy while keeping static dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionMode {
    /// Weakest and least recently seen words first
    #[default]
    Smart,
    /// Uniformly shuffled pool
    Random,
    /// Only words answered wrong at least half the time
    Problematic,
    /// Only words never answered
    New,
    /// Pool unchanged
    Unfiltered,
}

impl SelectionMode {
    /// Create a mode from its name
    ///
    /// Supported names: "smart", "random", "problematic", "new".
    /// Any other name selects the whole pool unchanged.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "smart" => Self::Smart,
            "random" => Self::Random,
            "problematic" => Self::Problematic,
            "new" => Self::New,
            _ => Self::Unfiltered,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Smart => "smart",
            Self::Random => "random",
            Self::Problematic => "problematic",
            Self::New => "new",
            Self::Unfiltered => "all",
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Strategy for SelectionMode {
    fn select<'a>(&self, pool: &'a [WordEntry], rng: &mut dyn RngCore) -> Vec<&'a WordEntry> {
        match self {
            Self::Smart => SmartStrategy::default().select(pool, rng),
            Self::Random => RandomStrategy.select(pool, rng),
            Self::Problematic => ProblematicStrategy::default().select(pool, rng),
            Self::New => NewWordsStrategy.select(pool, rng),
            Self::Unfiltered => pool.iter().collect(),
        }
    }
}

fn rate(word: &WordEntry) -> f64 {
    word.success_rate().unwrap_or(0.0)
}

/// Mastery-ordered strategy
///
/// Never-answered words come first in pool order. Answered words follow by
/// ascending success rate; rates within `tie_window` of each other count as
/// tied and are ordered by last review, oldest (or never) first.
pub struct SmartStrategy {
    pub tie_window: f64,
}

impl SmartStrategy {
    #[must_use]
    pub const fn new(tie_window: f64) -> Self {
        Self { tie_window }
    }
}

impl Default for SmartStrategy {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl Strategy for SmartStrategy {
    fn select<'a>(&self, pool: &'a [WordEntry], _rng: &mut dyn RngCore) -> Vec<&'a WordEntry> {
        let (mut ordered, mut seen): (Vec<&WordEntry>, Vec<&WordEntry>) =
            pool.iter().partition(|w| w.is_new());

        seen.sort_by(|a, b| rate(a).total_cmp(&rate(b)));

        // Each tie group spans at most `tie_window` above its lowest rate, so
        // every pair inside a group is within the window.
        let mut start = 0;
        while start < seen.len() {
            let floor = rate(seen[start]);
            let len = seen[start..]
                .iter()
                .take_while(|w| rate(w) - floor <= self.tie_window)
                .count();
            seen[start..start + len].sort_by_key(|w| w.last_review);
            start += len;
        }

        ordered.extend(seen);
        ordered
    }
}

/// Uniform random permutation of the pool
pub struct RandomStrategy;

impl Strategy for RandomStrategy {
    fn select<'a>(&self, pool: &'a [WordEntry], rng: &mut dyn RngCore) -> Vec<&'a WordEntry> {
        let mut words: Vec<&WordEntry> = pool.iter().collect();
        words.shuffle(rng);
        words
    }
}

/// Words the learner gets wrong at least half of the time, weakest first
pub struct ProblematicStrategy {
    /// Success rate strictly below this is problematic
    pub threshold: f64,
}

impl Default for ProblematicStrategy {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

impl Strategy for ProblematicStrategy {
    fn select<'a>(&self, pool: &'a [WordEntry], _rng: &mut dyn RngCore) -> Vec<&'a WordEntry> {
        let mut words: Vec<&WordEntry> = pool
            .iter()
            .filter(|w| w.success_rate().is_some_and(|r| r < self.threshold))
            .collect();
        words.sort_by(|a, b| rate(a).total_cmp(&rate(b)));
        words
    }
}

/// Words that were never answered, pool order preserved
pub struct NewWordsStrategy;

impl Strategy for NewWordsStrategy {
    fn select<'a>(&self, pool: &'a [WordEntry], _rng: &mut dyn RngCore) -> Vec<&'a WordEntry> {
        pool.iter().filter(|w| w.is_new()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const ALL_MODES: [SelectionMode; 5] = [
        SelectionMode::Smart,
        SelectionMode::Random,
        SelectionMode::Problematic,
        SelectionMode::New,
        SelectionMode::Unfiltered,
    ];

    fn reviewed(cs: &str, correct: u32, incorrect: u32, day: Option<u32>) -> WordEntry {
        let mut word = WordEntry::new(cs, format!("{cs}-ru")).with_history(correct, incorrect);
        word.last_review = day.map(|d| Utc.with_ymd_and_hms(2024, 5, d, 12, 0, 0).unwrap());
        word
    }

    fn mixed_pool() -> Vec<WordEntry> {
        vec![
            reviewed("strong", 9, 1, Some(3)),
            reviewed("fresh1", 0, 0, None),
            reviewed("weak", 1, 4, Some(2)),
            reviewed("half", 1, 1, Some(1)),
            reviewed("fresh2", 0, 0, None),
            reviewed("lost", 0, 3, Some(5)),
        ]
    }

    fn names(words: &[&WordEntry]) -> Vec<String> {
        words.iter().map(|w| w.cs.clone()).collect()
    }

    #[test]
    fn from_name_recognizes_modes() {
        assert_eq!(SelectionMode::from_name("smart"), SelectionMode::Smart);
        assert_eq!(SelectionMode::from_name("random"), SelectionMode::Random);
        assert_eq!(SelectionMode::from_name("Problematic"), SelectionMode::Problematic);
        assert_eq!(SelectionMode::from_name("new"), SelectionMode::New);
    }

    #[test]
    fn from_name_unknown_is_unfiltered() {
        assert_eq!(SelectionMode::from_name("whatever"), SelectionMode::Unfiltered);
        assert_eq!(SelectionMode::from_name(""), SelectionMode::Unfiltered);
    }

    #[test]
    fn every_mode_returns_distinct_pool_members() {
        let pool = mixed_pool();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            for mode in ALL_MODES {
                let selected = mode.select(&pool, &mut rng);
                for (i, word) in selected.iter().enumerate() {
                    assert!(pool.iter().any(|p| std::ptr::eq(p, *word)), "{mode}: foreign entry");
                    assert!(
                        selected[i + 1..].iter().all(|other| !std::ptr::eq(*other, *word)),
                        "{mode}: duplicate entry {}",
                        word.cs
                    );
                }
            }
        }
    }

    #[test]
    fn smart_puts_unattempted_first_in_pool_order() {
        let pool = mixed_pool();
        let selected = SelectionMode::Smart.select(&pool, &mut StdRng::seed_from_u64(1));

        assert_eq!(selected.len(), pool.len());
        assert_eq!(names(&selected[..2]), vec!["fresh1", "fresh2"]);
        assert!(selected[2..].iter().all(|w| !w.is_new()));
    }

    #[test]
    fn smart_orders_attempted_by_success_rate() {
        let pool = mixed_pool();
        let selected = SelectionMode::Smart.select(&pool, &mut StdRng::seed_from_u64(1));

        assert_eq!(names(&selected[2..]), vec!["lost", "weak", "half", "strong"]);
    }

    #[test]
    fn smart_breaks_near_ties_by_last_review() {
        let pool = vec![
            reviewed("recent", 5, 5, Some(20)),   // 0.50
            reviewed("older", 11, 9, Some(10)),   // 0.55
            reviewed("never", 14, 11, None),      // 0.56
        ];
        let selected = SelectionMode::Smart.select(&pool, &mut StdRng::seed_from_u64(1));

        assert_eq!(names(&selected), vec!["never", "older", "recent"]);
    }

    #[test]
    fn smart_ignores_input_order_for_new_words() {
        let mut pool = mixed_pool();
        pool.reverse();
        let selected = SelectionMode::Smart.select(&pool, &mut StdRng::seed_from_u64(2));

        let first_attempted = selected.iter().position(|w| !w.is_new()).unwrap();
        assert!(selected[first_attempted..].iter().all(|w| !w.is_new()));
        assert_eq!(first_attempted, 2);
    }

    #[test]
    fn problematic_keeps_only_rates_below_half() {
        let pool = mixed_pool();
        let selected = SelectionMode::Problematic.select(&pool, &mut StdRng::seed_from_u64(1));

        assert_eq!(names(&selected), vec!["lost", "weak"]);
        for word in selected {
            assert!(word.success_rate().unwrap() < 0.5);
        }
    }

    #[test]
    fn new_keeps_only_unattempted_in_order() {
        let pool = mixed_pool();
        let selected = SelectionMode::New.select(&pool, &mut StdRng::seed_from_u64(1));

        assert_eq!(names(&selected), vec!["fresh1", "fresh2"]);
        assert!(selected.iter().all(|w| w.correct == 0 && w.incorrect == 0));
    }

    #[test]
    fn random_is_a_permutation() {
        let pool = mixed_pool();
        let mut selected = names(&SelectionMode::Random.select(&pool, &mut StdRng::seed_from_u64(9)));
        let mut expected: Vec<String> = pool.iter().map(|w| w.cs.clone()).collect();
        selected.sort();
        expected.sort();
        assert_eq!(selected, expected);
    }

    #[test]
    fn unfiltered_is_identity() {
        let pool = mixed_pool();
        let selected = SelectionMode::Unfiltered.select(&pool, &mut StdRng::seed_from_u64(1));
        assert_eq!(
            names(&selected),
            pool.iter().map(|w| w.cs.clone()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn filters_can_return_nothing() {
        let pool = vec![reviewed("known", 3, 0, Some(1))];
        let mut rng = StdRng::seed_from_u64(1);
        assert!(SelectionMode::New.select(&pool, &mut rng).is_empty());
        assert!(SelectionMode::Problematic.select(&pool, &mut rng).is_empty());
    }
}
