use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{HistoryEntryId, max_score};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HistoryEntryError {
    #[error("score {score} exceeds the maximum of {max}")]
    ScoreOutOfRange { score: u32, max: u32 },
}

/// A completed session's score, before the store assigns it an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewHistoryEntry {
    recorded_at: DateTime<Utc>,
    score: u32,
}

impl NewHistoryEntry {
    /// # Errors
    ///
    /// Returns `HistoryEntryError::ScoreOutOfRange` if `score` is above `max_score()`.
    pub fn new(recorded_at: DateTime<Utc>, score: u32) -> Result<Self, HistoryEntryError> {
        check_score(score)?;
        Ok(Self { recorded_at, score })
    }

    #[must_use]
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }
}

/// Durable record of one completed session. Immutable once stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    id: HistoryEntryId,
    recorded_at: DateTime<Utc>,
    score: u32,
}

impl HistoryEntry {
    /// Rehydrate an entry from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `HistoryEntryError::ScoreOutOfRange` if the stored score is above `max_score()`.
    pub fn from_persisted(
        id: HistoryEntryId,
        recorded_at: DateTime<Utc>,
        score: u32,
    ) -> Result<Self, HistoryEntryError> {
        check_score(score)?;
        Ok(Self {
            id,
            recorded_at,
            score,
        })
    }

    /// Attach a freshly assigned id to a new entry.
    #[must_use]
    pub fn assigned(id: HistoryEntryId, entry: NewHistoryEntry) -> Self {
        Self {
            id,
            recorded_at: entry.recorded_at,
            score: entry.score,
        }
    }

    #[must_use]
    pub fn id(&self) -> HistoryEntryId {
        self.id
    }

    #[must_use]
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }
}

fn check_score(score: u32) -> Result<(), HistoryEntryError> {
    let max = max_score();
    if score > max {
        return Err(HistoryEntryError::ScoreOutOfRange { score, max });
    }
    Ok(())
}
