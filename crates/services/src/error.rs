//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{HistoryEntryError, Round};
use storage::repository::StorageError;

/// Errors emitted by the quiz state machine.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("quiz already completed")]
    Completed,
    #[error("quiz is not completed yet")]
    NotComplete,
    #[error("action belongs to round {expected:?}, current round is {actual:?}")]
    WrongRound { expected: Round, actual: Round },
}

/// Errors emitted by quiz and history services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Entry(#[from] HistoryEntryError),
    #[error("history unavailable: {0}")]
    HistoryUnavailable(#[from] StorageError),
}

impl QuizError {
    /// True when the failure came from the history store rather than the quiz itself.
    #[must_use]
    pub fn is_history_unavailable(&self) -> bool {
        matches!(self, Self::HistoryUnavailable(_))
    }
}
