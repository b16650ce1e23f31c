//! Practice session engine
//!
//! Builds sessions from selected words, generates questions, grades answers
//! and tracks results.

mod builder;
mod controller;
mod evaluator;
mod generator;
mod stats;

pub use builder::{SessionSize, build_session};
pub use controller::{Feedback, Phase, SessionController, SessionRequest, SetFilter, Step};
pub use evaluator::{AnswerEvaluator, Evaluation, REQUEUE_OFFSET, grade, requeue};
pub use generator::{Next, QuestionGenerator};
pub use stats::{Progress, SessionStats, SessionSummary};
