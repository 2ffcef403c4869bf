use serde::{Deserialize, Serialize};

use crate::model::bank::{MCQ_QUESTIONS, NUMERIC_QUESTIONS};
use crate::model::Question;

/// One of the two fixed phases of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Round {
    MultipleChoice,
    Numeric,
}

impl Round {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Round::MultipleChoice => "🧠 Multiple-Choice Questions",
            Round::Numeric => "🔢 Integer-Type Questions",
        }
    }

    /// The round that follows this one, if any.
    #[must_use]
    pub const fn next(self) -> Option<Round> {
        match self {
            Round::MultipleChoice => Some(Round::Numeric),
            Round::Numeric => None,
        }
    }

    #[must_use]
    pub fn question_count(self) -> usize {
        match self {
            Round::MultipleChoice => MCQ_QUESTIONS.len(),
            Round::Numeric => NUMERIC_QUESTIONS.len(),
        }
    }

    /// Question at `index` within this round.
    #[must_use]
    pub fn question(self, index: usize) -> Option<Question<'static>> {
        match self {
            Round::MultipleChoice => MCQ_QUESTIONS.get(index).map(Question::MultipleChoice),
            Round::Numeric => NUMERIC_QUESTIONS.get(index).map(Question::Numeric),
        }
    }
}
