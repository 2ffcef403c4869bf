use std::sync::Arc;

use quiz_core::model::Question;
use services::{
    QuizController, QuizError, QuizEvent, QuizLoopService, QuizSettings, TickReceiver, TimerTick,
};

use crate::views::ViewError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    SelectOption(String),
    InputChanged(String),
    SubmitNumeric,
    Next,
    Restart,
    RetryHistory,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizOutcome {
    Continue,
    /// The final score was stored and the history list should be reloaded.
    Completed { score: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerVm {
    Options(Vec<OptionVm>),
    Numeric { input: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub round_title: &'static str,
    pub progress_label: String,
    pub timer_label: String,
    pub prompt: &'static str,
    pub answer: AnswerVm,
    pub feedback: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreCardVm {
    pub score_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizScreen {
    Question(QuestionVm),
    Completed(ScoreCardVm),
}

/// Presentation wrapper around a running `QuizController`.
pub struct QuizVm {
    controller: QuizController,
}

impl QuizVm {
    #[must_use]
    pub fn new(controller: QuizController) -> Self {
        Self { controller }
    }

    #[must_use]
    pub fn screen(&self) -> QuizScreen {
        let session = self.controller.session();
        let progress = session.progress();
        let (Some(round), Some(question)) = (progress.round, session.current_question()) else {
            return QuizScreen::Completed(ScoreCardVm {
                score_label: format!("Your Score: {}/{}", progress.score, progress.max_score),
            });
        };

        let selected = session.selected_answer();
        let answer = match question {
            Question::MultipleChoice(_) => AnswerVm::Options(
                question
                    .options()
                    .iter()
                    .copied()
                    .map(|label| OptionVm {
                        label,
                        selected: selected == Some(label),
                    })
                    .collect(),
            ),
            Question::Numeric(_) => AnswerVm::Numeric {
                input: selected.unwrap_or_default().to_string(),
            },
        };

        QuizScreen::Question(QuestionVm {
            round_title: round.title(),
            progress_label: format!(
                "Question {} of {}",
                progress.index + 1,
                progress.total_in_round
            ),
            timer_label: format!("⏳ Time Left: {}s", session.remaining_secs()),
            prompt: question.prompt(),
            answer,
            feedback: session.feedback().map(|feedback| feedback.message()),
        })
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.controller.session().is_complete()
    }

    /// Apply an intent.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::HistoryUnavailable` when the final score could not be
    /// stored and `ViewError::Unknown` for other failures.
    pub async fn apply(&mut self, intent: QuizIntent) -> Result<QuizOutcome, ViewError> {
        let event = match intent {
            QuizIntent::SelectOption(option) => self.controller.select_option(&option),
            QuizIntent::InputChanged(text) => self.controller.set_numeric_input(text),
            QuizIntent::SubmitNumeric => self.controller.submit_numeric(),
            QuizIntent::Next => self.controller.advance().await,
            QuizIntent::Restart => Ok(self.controller.restart()),
            QuizIntent::RetryHistory => self
                .controller
                .retry_history()
                .await
                .map(QuizEvent::Completed),
        };
        event.map(outcome_for).map_err(view_error)
    }

    /// Feed a countdown tick back into the controller.
    ///
    /// # Errors
    ///
    /// Same as [`QuizVm::apply`].
    pub async fn on_tick(&mut self, tick: TimerTick) -> Result<QuizOutcome, ViewError> {
        self.controller
            .on_tick(tick)
            .await
            .map(outcome_for)
            .map_err(view_error)
    }
}

fn outcome_for(event: QuizEvent) -> QuizOutcome {
    match event {
        QuizEvent::Completed(completion) => QuizOutcome::Completed {
            score: completion.score,
        },
        _ => QuizOutcome::Continue,
    }
}

fn view_error(err: QuizError) -> ViewError {
    tracing::debug!(error = %err, "quiz intent rejected");
    ViewError::from(err)
}

/// Build the controller and arm the first countdown. Needs a tokio runtime.
#[must_use]
pub fn start_quiz(
    quiz_loop: Arc<QuizLoopService>,
    settings: QuizSettings,
) -> (QuizVm, TickReceiver) {
    let (mut controller, ticks) = QuizController::new(quiz_loop, settings);
    controller.start();
    (QuizVm::new(controller), ticks)
}
