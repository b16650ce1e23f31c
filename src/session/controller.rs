//! Session controller
//!
//! Owns one practice session from start to finish. Front ends call `start`,
//! then `submit_answer`/`submit_letters` until a `Step::Complete` comes back,
//! or `abandon` to leave early.

use super::builder::{SessionSize, build_session};
use super::evaluator::AnswerEvaluator;
use super::generator::{Next, QuestionGenerator};
use super::stats::{Progress, SessionStats, SessionSummary};
use crate::core::{Answer, Question, SessionWord, WordEntry};
use crate::error::DrillError;
use crate::selection::{SelectionMode, Strategy};
use crate::store::WordStore;
use rand::Rng;
use rand::rngs::ThreadRng;
use std::fmt;

/// Which words a session draws from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SetFilter {
    /// Every stored word
    #[default]
    All,
    /// Only words imported under this set name
    Named(String),
}

impl SetFilter {
    #[must_use]
    pub fn includes(&self, word: &WordEntry) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => word.set_name.as_deref() == Some(name.as_str()),
        }
    }
}

impl fmt::Display for SetFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all sets"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

/// Parameters for a new session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionRequest {
    pub set: SetFilter,
    pub mode: SelectionMode,
    pub size: SessionSize,
}

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Building,
    Questioning,
    Grading,
    Complete,
}

/// What the front end shows next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Question(Question),
    Complete(SessionSummary),
}

/// Result of a submitted answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub is_correct: bool,
    /// The correct answer to the question just graded
    pub expected: String,
    /// Whether the statistics update reached the store
    pub persisted: bool,
    pub requeued_to: Option<usize>,
    pub next: Step,
}

/// Drives a practice session over a word store
pub struct SessionController<S: WordStore, R: Rng = ThreadRng> {
    store: S,
    rng: R,
    generator: QuestionGenerator,
    phase: Phase,
    pool: Vec<WordEntry>,
    words: Vec<SessionWord>,
    stats: SessionStats,
    current: Option<(usize, Question)>,
}

impl<S: WordStore> SessionController<S> {
    pub fn new(store: S) -> Self {
        Self::with_rng(store, rand::rng())
    }
}

impl<S: WordStore, R: Rng> SessionController<S, R> {
    pub fn with_rng(store: S, rng: R) -> Self {
        Self {
            store,
            rng,
            generator: QuestionGenerator::default(),
            phase: Phase::Idle,
            pool: Vec::new(),
            words: Vec::new(),
            stats: SessionStats::default(),
            current: None,
        }
    }

    #[must_use]
    pub fn with_generator(mut self, generator: QuestionGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Start a new session, replacing any session in progress
    ///
    /// Loads the pool from the store, keeps the requested set, applies the
    /// selection mode, builds the session and asks the first question.
    ///
    /// # Errors
    ///
    /// - `DrillError::EmptyPool` if the requested set holds no words
    /// - `DrillError::NoEligibleWords` if the mode filters every word out
    /// - `DrillError::Store` if the pool cannot be loaded
    ///
    /// The controller is back in `Phase::Idle` after any error.
    pub fn start(&mut self, request: &SessionRequest) -> Result<Step, DrillError> {
        self.reset();
        self.phase = Phase::Building;

        match self.build(request) {
            Ok(()) => {
                tracing::info!(
                    set = %request.set,
                    mode = %request.mode,
                    size = %request.size,
                    words = self.words.len(),
                    "session started"
                );
                Ok(self.advance())
            }
            Err(e) => {
                tracing::debug!(error = %e, "session could not start");
                self.reset();
                Err(e)
            }
        }
    }

    fn build(&mut self, request: &SessionRequest) -> Result<(), DrillError> {
        self.pool = self.store.load_words()?;

        let scoped: Vec<WordEntry> = self
            .pool
            .iter()
            .filter(|w| request.set.includes(w))
            .cloned()
            .collect();
        if scoped.is_empty() {
            return Err(DrillError::EmptyPool);
        }

        let candidates = request.mode.select(&scoped, &mut self.rng);
        if candidates.is_empty() {
            return Err(DrillError::NoEligibleWords { mode: request.mode });
        }

        self.words = build_session(&candidates, request.size, &mut self.rng)?;
        Ok(())
    }

    /// Ask for the next question or finish the session
    fn advance(&mut self) -> Step {
        match self.generator.next(&self.words, &self.pool, &mut self.rng) {
            Next::Ask { index, question } => {
                tracing::debug!(index, variant = %question.variant(), "asking question");
                self.current = Some((index, question.clone()));
                self.phase = Phase::Questioning;
                Step::Question(question)
            }
            Next::Complete => {
                let summary = self.stats.summary();
                tracing::info!(
                    correct = summary.correct,
                    incorrect = summary.incorrect,
                    accuracy = summary.accuracy,
                    "session complete"
                );
                self.current = None;
                self.phase = Phase::Complete;
                Step::Complete(summary)
            }
        }
    }

    /// Grade an answer to the current question and move on
    ///
    /// # Errors
    ///
    /// - `DrillError::NoActiveQuestion` if no question is open
    /// - `DrillError::AnswerMismatch` if the answer kind does not fit the
    ///   question; the question stays open
    pub fn submit(&mut self, answer: &Answer) -> Result<Feedback, DrillError> {
        let Some((index, question)) = self.current.take() else {
            return Err(DrillError::NoActiveQuestion);
        };
        self.phase = Phase::Grading;

        let evaluation = AnswerEvaluator::new(&mut self.pool, &self.store).evaluate(
            &mut self.words,
            index,
            &question,
            answer,
            &mut self.stats,
            &mut self.rng,
        );

        let evaluation = match evaluation {
            Ok(evaluation) => evaluation,
            Err(e) => {
                self.current = Some((index, question));
                self.phase = Phase::Questioning;
                return Err(e);
            }
        };

        Ok(Feedback {
            is_correct: evaluation.is_correct,
            expected: question.expected().to_string(),
            persisted: evaluation.persisted,
            requeued_to: evaluation.requeued_to,
            next: self.advance(),
        })
    }

    /// Submit the chosen translation option
    ///
    /// # Errors
    ///
    /// See [`SessionController::submit`].
    pub fn submit_answer(&mut self, choice: &str) -> Result<Feedback, DrillError> {
        self.submit(&Answer::Choice(choice.to_string()))
    }

    /// Submit letters in the order they were placed
    ///
    /// # Errors
    ///
    /// See [`SessionController::submit`].
    pub fn submit_letters(&mut self, letters: &[char]) -> Result<Feedback, DrillError> {
        self.submit(&Answer::Letters(letters.to_vec()))
    }

    /// Leave the session early
    ///
    /// Statistics already written to the store stay there. Returns the
    /// session's counters at the moment it was left, or `None` if no session
    /// was running or it had already completed.
    pub fn abandon(&mut self) -> Option<SessionSummary> {
        match self.phase {
            Phase::Idle => return None,
            Phase::Complete => {
                self.reset();
                return None;
            }
            _ => {}
        }
        let summary = self.stats.summary();
        tracing::info!(
            correct = summary.correct,
            incorrect = summary.incorrect,
            "session abandoned"
        );
        self.reset();
        Some(summary)
    }

    fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.words.clear();
        self.stats = SessionStats::default();
        self.current = None;
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref().map(|(_, question)| question)
    }

    #[must_use]
    pub const fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Words answered so far out of the session total
    #[must_use]
    pub fn progress(&self) -> Progress {
        let total = self.words.len();
        let answered = self.words.iter().filter(|w| w.answered).count();
        Progress {
            answered,
            total,
            remaining: total - answered,
        }
    }

    /// Session words in their current order
    #[must_use]
    pub fn words(&self) -> &[SessionWord] {
        &self.words
    }

    /// Final results, once the session is complete
    #[must_use]
    pub fn summary(&self) -> Option<SessionSummary> {
        (self.phase == Phase::Complete).then(|| self.stats.summary())
    }

    /// The full word pool as last loaded and updated
    #[must_use]
    pub fn pool(&self) -> &[WordEntry] {
        &self.pool
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }
}
