pub mod bank;
mod feedback;
mod history;
mod ids;
mod question;
mod round;

pub use bank::{MCQ_QUESTIONS, NUMERIC_QUESTIONS, max_score};
pub use feedback::Feedback;
pub use history::{HistoryEntry, HistoryEntryError, NewHistoryEntry};
pub use ids::{HistoryEntryId, QuestionId};
pub use question::{McqQuestion, NumericQuestion, Question};
pub use round::Round;
