//! Error types
//!
//! `DrillError` covers everything a session can refuse to do. `StoreError`
//! covers persistence and word-set import failures.

use crate::selection::SelectionMode;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the session engine
#[derive(Debug, Error)]
pub enum DrillError {
    /// The requested set has no words at all
    #[error("no words available for this session")]
    EmptyPool,

    /// Words exist, but none match the selection mode
    #[error("no words match the '{mode}' selection mode")]
    NoEligibleWords { mode: SelectionMode },

    /// An answer arrived while no question was open
    #[error("no question is awaiting an answer")]
    NoActiveQuestion,

    /// A choice was submitted for a construct question or vice versa
    #[error("answer does not fit a {expected} question")]
    AnswerMismatch { expected: crate::core::Variant },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DrillError {
    /// Whether this error means the session could not start for lack of words
    #[must_use]
    pub const fn is_empty_pool(&self) -> bool {
        matches!(self, Self::EmptyPool | Self::NoEligibleWords { .. })
    }
}

/// Errors raised by word stores and word-set import
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid word set: {0}")]
    InvalidFormat(String),

    /// Write refused by the backing store
    #[error("store rejected the write: {0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pool_classification() {
        assert!(DrillError::EmptyPool.is_empty_pool());
        assert!(
            DrillError::NoEligibleWords {
                mode: SelectionMode::New
            }
            .is_empty_pool()
        );
        assert!(!DrillError::NoActiveQuestion.is_empty_pool());
    }

    #[test]
    fn messages_name_the_mode() {
        let err = DrillError::NoEligibleWords {
            mode: SelectionMode::Problematic,
        };
        assert_eq!(err.to_string(), "no words match the 'problematic' selection mode");
    }
}
