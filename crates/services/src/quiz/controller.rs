use std::sync::Arc;

use quiz_core::model::Feedback;
use tokio::sync::mpsc;

use super::service::{Advance, QuizSession};
use super::settings::QuizSettings;
use super::timer::{QuestionTimer, TickReceiver, TimerTick};
use super::workflow::{AdvanceOutcome, QuizCompletion, QuizLoopService, TickOutcome};
use crate::error::QuizError;

/// What a controller call changed, for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    Answered(Feedback),
    InputChanged,
    Ticked(u32),
    Advanced(Advance),
    Completed(QuizCompletion),
    Restarted,
    /// A tick from a timer that has since been replaced.
    Ignored,
}

impl From<AdvanceOutcome> for QuizEvent {
    fn from(outcome: AdvanceOutcome) -> Self {
        match outcome.completion {
            Some(completion) => Self::Completed(completion),
            None => Self::Advanced(outcome.advance),
        }
    }
}

/// Drives a `QuizSession` and owns its countdown.
///
/// Every call re-syncs the timer: a new question gets a freshly started
/// timer, completion stops it. Ticks arrive on the receiver returned by
/// [`QuizController::new`] and must be fed back through [`QuizController::on_tick`].
pub struct QuizController {
    session: QuizSession,
    workflow: Arc<QuizLoopService>,
    settings: QuizSettings,
    ticks: mpsc::UnboundedSender<TimerTick>,
    timer: Option<QuestionTimer>,
    generation: u64,
}

impl QuizController {
    #[must_use]
    pub fn new(workflow: Arc<QuizLoopService>, settings: QuizSettings) -> (Self, TickReceiver) {
        let (ticks, rx) = mpsc::unbounded_channel();
        let controller = Self {
            session: QuizSession::new(settings.time_limit_secs()),
            workflow,
            settings,
            ticks,
            timer: None,
            generation: 0,
        };
        (controller, rx)
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn timer_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Arm the countdown for the current question. Needs a tokio runtime.
    pub fn start(&mut self) {
        self.sync_timer();
    }

    /// # Errors
    ///
    /// Returns `QuizError::Session` outside the multiple-choice round.
    pub fn select_option(&mut self, option: &str) -> Result<QuizEvent, QuizError> {
        let feedback = self.session.select_option(option)?;
        Ok(QuizEvent::Answered(feedback))
    }

    /// # Errors
    ///
    /// Returns `QuizError::Session` outside the numeric round.
    pub fn set_numeric_input(&mut self, text: impl Into<String>) -> Result<QuizEvent, QuizError> {
        self.session.set_numeric_input(text)?;
        Ok(QuizEvent::InputChanged)
    }

    /// # Errors
    ///
    /// Returns `QuizError::Session` outside the numeric round.
    pub fn submit_numeric(&mut self) -> Result<QuizEvent, QuizError> {
        let feedback = self.session.submit_numeric()?;
        Ok(QuizEvent::Answered(feedback))
    }

    /// User-requested advance.
    ///
    /// # Errors
    ///
    /// See [`QuizLoopService::advance`]. The timer is re-synced either way.
    pub async fn advance(&mut self) -> Result<QuizEvent, QuizError> {
        let result = self.workflow.advance(&mut self.session).await;
        self.sync_timer();
        result.map(QuizEvent::from)
    }

    /// Apply a tick from the receiver. Ticks from replaced timers are ignored.
    ///
    /// # Errors
    ///
    /// See [`QuizLoopService::tick`]. The timer is re-synced either way.
    pub async fn on_tick(&mut self, tick: TimerTick) -> Result<QuizEvent, QuizError> {
        let current = self.timer.as_ref().map(QuestionTimer::generation);
        if current != Some(tick.generation) {
            tracing::trace!(generation = tick.generation, "stale tick ignored");
            return Ok(QuizEvent::Ignored);
        }

        let result = self.workflow.tick(&mut self.session).await;
        self.sync_timer();
        result.map(|outcome| match outcome {
            TickOutcome::Counting(remaining) => QuizEvent::Ticked(remaining),
            TickOutcome::Expired(outcome) => QuizEvent::from(outcome),
        })
    }

    /// Retry storing the final score after a history failure.
    ///
    /// # Errors
    ///
    /// See [`QuizLoopService::finish`].
    pub async fn retry_history(&mut self) -> Result<QuizCompletion, QuizError> {
        self.workflow.finish(&mut self.session).await
    }

    /// Start over from the first question with a fresh countdown.
    pub fn restart(&mut self) -> QuizEvent {
        self.session.restart();
        self.timer = None;
        self.sync_timer();
        QuizEvent::Restarted
    }

    fn sync_timer(&mut self) {
        let Some(key) = self.session.question_key() else {
            self.timer = None;
            return;
        };
        if self.timer.as_ref().map(QuestionTimer::key) == Some(key) {
            return;
        }
        // Drop the old task before spawning the next one.
        self.timer = None;
        self.generation += 1;
        self.timer = Some(QuestionTimer::start(
            self.generation,
            key,
            self.settings.tick_period(),
            self.ticks.clone(),
        ));
    }
}
