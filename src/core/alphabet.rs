//! Target-language alphabet used for decoy letters

use rustc_hash::FxHashSet;

/// Czech alphabet, lowercase, including every diacritic form
pub const CZECH: &str = "aábcčdďeéěfghiíjklmnňoópqrřsštťuúůvwxyýzž";

/// A set of lowercase letters that decoys are drawn from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    letters: Vec<char>,
}

impl Alphabet {
    /// Build an alphabet from a string of letters
    ///
    /// Letters are lowercased and deduplicated, keeping first-seen order.
    #[must_use]
    pub fn new(letters: &str) -> Self {
        let mut seen = FxHashSet::default();
        let letters = letters
            .chars()
            .flat_map(char::to_lowercase)
            .filter(|c| !c.is_whitespace() && seen.insert(*c))
            .collect();
        Self { letters }
    }

    #[must_use]
    pub fn czech() -> Self {
        Self::new(CZECH)
    }

    #[inline]
    #[must_use]
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Letters of the alphabet that do not occur in `used`
    #[must_use]
    pub fn excluding(&self, used: &[char]) -> Vec<char> {
        let used: FxHashSet<char> = used.iter().copied().collect();
        self.letters
            .iter()
            .copied()
            .filter(|c| !used.contains(c))
            .collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::czech()
    }
}
