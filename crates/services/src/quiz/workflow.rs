use quiz_core::model::HistoryEntryId;

use super::service::{Advance, QuizSession, Tick};
use crate::error::{QuizError, SessionError};
use crate::history_service::{HistoryListItem, HistoryService};

/// Persisted end of a quiz run plus the refreshed history list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizCompletion {
    pub entry_id: HistoryEntryId,
    pub score: u32,
    pub history: Vec<HistoryListItem>,
}

/// Result of advancing through the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvanceOutcome {
    pub advance: Advance,
    pub completion: Option<QuizCompletion>,
}

/// Result of a countdown tick through the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Counting(u32),
    Expired(AdvanceOutcome),
}

/// Orchestrates state-machine steps and history persistence on completion.
#[derive(Clone)]
pub struct QuizLoopService {
    history: HistoryService,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(history: HistoryService) -> Self {
        Self { history }
    }

    #[must_use]
    pub fn history(&self) -> &HistoryService {
        &self.history
    }

    /// Advance the session and persist the score when it completes.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Session` if the quiz already ended. Returns
    /// `QuizError::HistoryUnavailable` if the final score could not be stored;
    /// the session still ends up completed and `finish` can retry.
    pub async fn advance(&self, session: &mut QuizSession) -> Result<AdvanceOutcome, QuizError> {
        let advance = session.advance()?;
        self.after_advance(session, advance).await
    }

    /// Count down one second, advancing on expiry.
    ///
    /// # Errors
    ///
    /// Same as [`QuizLoopService::advance`].
    pub async fn tick(&self, session: &mut QuizSession) -> Result<TickOutcome, QuizError> {
        match session.tick()? {
            Tick::Counting(remaining) => Ok(TickOutcome::Counting(remaining)),
            Tick::Expired(advance) => {
                tracing::debug!(?advance, "question time expired");
                let outcome = self.after_advance(session, advance).await?;
                Ok(TickOutcome::Expired(outcome))
            }
        }
    }

    async fn after_advance(
        &self,
        session: &mut QuizSession,
        advance: Advance,
    ) -> Result<AdvanceOutcome, QuizError> {
        let completion = match advance {
            Advance::Completed { .. } => Some(self.finish(session).await?),
            Advance::NextQuestion | Advance::NextRound => None,
        };
        Ok(AdvanceOutcome {
            advance,
            completion,
        })
    }

    /// Store the final score once, then re-read the full history.
    ///
    /// Calling it again after a successful append only refreshes the list.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotComplete` while the quiz is still running and
    /// `QuizError::HistoryUnavailable` on storage failures.
    pub async fn finish(&self, session: &mut QuizSession) -> Result<QuizCompletion, QuizError> {
        if !session.is_complete() {
            return Err(SessionError::NotComplete.into());
        }

        let score = session.score();
        let entry_id = match session.history_entry_id() {
            Some(id) => id,
            None => {
                let id = self.history.record(score).await?;
                session.set_history_entry_id(id);
                id
            }
        };
        let history = self.history.list_all().await?;

        tracing::info!(%entry_id, score, entries = history.len(), "quiz completed");
        Ok(QuizCompletion {
            entry_id,
            score,
            history,
        })
    }
}
