//! Session bookkeeping: answer counters, accuracy and progress

/// Answers graded during the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    pub correct: u32,
    pub incorrect: u32,
}

impl SessionStats {
    #[inline]
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.correct + self.incorrect
    }

    /// Rounded percentage of correct answers, 0 when nothing was answered
    #[must_use]
    pub fn accuracy(&self) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        (f64::from(self.correct) / f64::from(total) * 100.0).round() as u32
    }

    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            correct: self.correct,
            incorrect: self.incorrect,
            accuracy: self.accuracy(),
        }
    }

    pub(crate) fn record(&mut self, is_correct: bool) {
        if is_correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
    }
}

/// Final results of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub correct: u32,
    pub incorrect: u32,
    /// Percentage, 0-100
    pub accuracy: u32,
}

/// Position within the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
    pub remaining: usize,
}

impl Progress {
    /// Rounded percentage of words answered correctly so far
    #[must_use]
    pub fn percent(&self) -> u16 {
        if self.total == 0 {
            return 0;
        }
        (self.answered as f64 / self.total as f64 * 100.0).round() as u16
    }
}
