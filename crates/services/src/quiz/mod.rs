mod controller;
mod progress;
mod service;
mod settings;
mod timer;
mod workflow;

// Public API of the quiz subsystem.
pub use controller::{QuizController, QuizEvent};
pub use progress::QuizProgress;
pub use service::{Advance, QuestionKey, QuizPhase, QuizSession, Tick};
pub use settings::{DEFAULT_TIME_LIMIT_SECS, QuizSettings};
pub use timer::{QuestionTimer, TickReceiver, TimerTick};
pub use workflow::{AdvanceOutcome, QuizCompletion, QuizLoopService, TickOutcome};
