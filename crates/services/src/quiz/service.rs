use quiz_core::model::{Feedback, HistoryEntryId, Question, Round, max_score};

use super::progress::QuizProgress;
use crate::error::SessionError;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    InRound(Round),
    Completed,
}

/// Identifies the active question. Changes exactly when the countdown must restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuestionKey {
    pub round: Round,
    pub index: usize,
}

/// What an advance did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    NextQuestion,
    NextRound,
    Completed { score: u32 },
}

/// Result of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Counting(u32),
    Expired(Advance),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory two-round quiz.
///
/// Steps through the multiple-choice round and then the numeric round, scoring
/// answers by exact string equality. Persistence is left to `QuizLoopService`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    phase: QuizPhase,
    index: usize,
    selected: Option<String>,
    feedback: Option<Feedback>,
    credited: bool,
    score: u32,
    remaining_secs: u32,
    time_limit_secs: u32,
    history_entry_id: Option<HistoryEntryId>,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(super::settings::DEFAULT_TIME_LIMIT_SECS)
    }
}

impl QuizSession {
    /// Fresh session at the first multiple-choice question.
    #[must_use]
    pub fn new(time_limit_secs: u32) -> Self {
        let time_limit_secs = time_limit_secs.max(1);
        Self {
            phase: QuizPhase::InRound(Round::MultipleChoice),
            index: 0,
            selected: None,
            feedback: None,
            credited: false,
            score: 0,
            remaining_secs: time_limit_secs,
            time_limit_secs,
            history_entry_id: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn round(&self) -> Option<Round> {
        match self.phase {
            QuizPhase::InRound(round) => Some(round),
            QuizPhase::Completed => None,
        }
    }

    #[must_use]
    pub fn question_index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn current_question(&self) -> Option<Question<'static>> {
        self.round().and_then(|round| round.question(self.index))
    }

    #[must_use]
    pub fn question_key(&self) -> Option<QuestionKey> {
        self.round().map(|round| QuestionKey {
            round,
            index: self.index,
        })
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn max_score(&self) -> u32 {
        max_score()
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == QuizPhase::Completed
    }

    /// Id of the history entry written for this run, once persisted.
    #[must_use]
    pub fn history_entry_id(&self) -> Option<HistoryEntryId> {
        self.history_entry_id
    }

    pub(crate) fn set_history_entry_id(&mut self, id: HistoryEntryId) {
        self.history_entry_id = Some(id);
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            round: self.round(),
            index: self.index,
            total_in_round: self.round().map_or(0, Round::question_count),
            score: self.score,
            max_score: max_score(),
            is_complete: self.is_complete(),
        }
    }

    // ─── Answers ───────────────────────────────────────────────────────────────

    /// Record a multiple-choice selection and score it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after the quiz ended and
    /// `SessionError::WrongRound` outside the multiple-choice round.
    pub fn select_option(&mut self, option: &str) -> Result<Feedback, SessionError> {
        let question = self.question_for(Round::MultipleChoice)?;
        self.selected = Some(option.to_owned());
        Ok(self.score_answer(question, option))
    }

    /// Store the text typed into the numeric input. Does not score.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after the quiz ended and
    /// `SessionError::WrongRound` outside the numeric round.
    pub fn set_numeric_input(&mut self, text: impl Into<String>) -> Result<(), SessionError> {
        self.question_for(Round::Numeric)?;
        self.selected = Some(text.into());
        Ok(())
    }

    /// Score the stored numeric input verbatim against the answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after the quiz ended and
    /// `SessionError::WrongRound` outside the numeric round.
    pub fn submit_numeric(&mut self) -> Result<Feedback, SessionError> {
        let question = self.question_for(Round::Numeric)?;
        let candidate = self.selected.clone().unwrap_or_default();
        Ok(self.score_answer(question, &candidate))
    }

    fn question_for(&self, expected: Round) -> Result<Question<'static>, SessionError> {
        let QuizPhase::InRound(actual) = self.phase else {
            return Err(SessionError::Completed);
        };
        if actual != expected {
            return Err(SessionError::WrongRound { expected, actual });
        }
        actual.question(self.index).ok_or(SessionError::Completed)
    }

    fn score_answer(&mut self, question: Question<'static>, candidate: &str) -> Feedback {
        let feedback = Feedback::from_correct(question.is_correct(candidate));
        // One point per question, however many times it is answered correctly.
        if feedback.is_correct() && !self.credited {
            self.credited = true;
            self.score += 1;
        }
        self.feedback = Some(feedback);
        feedback
    }

    // ─── Transitions ───────────────────────────────────────────────────────────

    /// Move to the next question, the next round, or completion.
    ///
    /// Entering round 2 keeps the previous selection and feedback in place.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if the quiz already ended.
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        let QuizPhase::InRound(round) = self.phase else {
            return Err(SessionError::Completed);
        };

        if self.index + 1 < round.question_count() {
            self.index += 1;
            self.selected = None;
            self.feedback = None;
            self.credited = false;
            self.remaining_secs = self.time_limit_secs;
            return Ok(Advance::NextQuestion);
        }

        match round.next() {
            Some(next) => {
                self.phase = QuizPhase::InRound(next);
                self.index = 0;
                self.credited = false;
                self.remaining_secs = self.time_limit_secs;
                Ok(Advance::NextRound)
            }
            None => {
                self.phase = QuizPhase::Completed;
                Ok(Advance::Completed { score: self.score })
            }
        }
    }

    /// Count down one second; on expiry advance and reset the countdown.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if the quiz already ended.
    pub fn tick(&mut self) -> Result<Tick, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if self.remaining_secs <= 1 {
            let advance = self.advance()?;
            self.remaining_secs = self.time_limit_secs;
            return Ok(Tick::Expired(advance));
        }
        self.remaining_secs -= 1;
        Ok(Tick::Counting(self.remaining_secs))
    }

    /// Back to the first question with a zero score. History is not touched.
    pub fn restart(&mut self) {
        *self = Self::new(self.time_limit_secs);
    }
}
