#![forbid(unsafe_code)]

pub mod error;
pub mod history_service;
pub mod quiz;

pub use quiz_core::Clock;

pub use error::{QuizError, SessionError};
pub use history_service::{HistoryListItem, HistoryService};

pub use quiz::{
    Advance, AdvanceOutcome, DEFAULT_TIME_LIMIT_SECS, QuestionKey, QuestionTimer, QuizCompletion,
    QuizController, QuizEvent, QuizLoopService, QuizPhase, QuizProgress, QuizSession,
    QuizSettings, Tick, TickOutcome, TickReceiver, TimerTick,
};
