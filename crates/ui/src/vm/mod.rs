mod history_vm;
mod quiz_vm;
mod time_fmt;

pub use history_vm::{HistoryItemVm, map_history_items};
pub use quiz_vm::{
    AnswerVm, OptionVm, QuestionVm, QuizIntent, QuizOutcome, QuizScreen, QuizVm, ScoreCardVm,
    start_quiz,
};
pub use time_fmt::format_datetime;
