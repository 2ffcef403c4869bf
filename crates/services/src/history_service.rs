use chrono::{DateTime, Utc};
use std::sync::Arc;

use quiz_core::model::{HistoryEntry, HistoryEntryId, NewHistoryEntry};
use storage::repository::HistoryRepository;

use crate::Clock;
use crate::error::QuizError;

/// Presentation-agnostic history row.
///
/// No pre-formatted strings; the UI decides how to render the timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryListItem {
    pub id: HistoryEntryId,
    pub recorded_at: DateTime<Utc>,
    pub score: u32,
}

impl From<&HistoryEntry> for HistoryListItem {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id(),
            recorded_at: entry.recorded_at(),
            score: entry.score(),
        }
    }
}

/// History facade that hides the repository and the time source from the UI.
#[derive(Clone)]
pub struct HistoryService {
    clock: Clock,
    history: Arc<dyn HistoryRepository>,
}

impl HistoryService {
    #[must_use]
    pub fn new(clock: Clock, history: Arc<dyn HistoryRepository>) -> Self {
        Self { clock, history }
    }

    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::new(
            clock,
            Arc::new(storage::repository::InMemoryRepository::new()),
        )
    }

    /// Ensure the history log exists.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::HistoryUnavailable` on repository failures.
    pub async fn initialize(&self) -> Result<(), QuizError> {
        self.history.initialize().await?;
        Ok(())
    }

    /// Append a completed session's score, stamped with the service clock.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Entry` for an out-of-range score and
    /// `QuizError::HistoryUnavailable` on repository failures.
    pub async fn record(&self, score: u32) -> Result<HistoryEntryId, QuizError> {
        let entry = NewHistoryEntry::new(self.clock.now(), score)?;
        let id = self.history.append(&entry).await.inspect_err(|err| {
            tracing::warn!(score, error = %err, "failed to append history entry");
        })?;
        tracing::info!(%id, score, "quiz score recorded");
        Ok(id)
    }

    /// Every stored entry in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::HistoryUnavailable` on repository failures.
    pub async fn list_all(&self) -> Result<Vec<HistoryListItem>, QuizError> {
        let entries = self.history.list_all().await?;
        Ok(entries.iter().map(HistoryListItem::from).collect())
    }

    /// Remove every entry.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::HistoryUnavailable` on repository failures.
    pub async fn clear_all(&self) -> Result<(), QuizError> {
        self.history.clear_all().await?;
        tracing::info!("quiz history cleared");
        Ok(())
    }
}
