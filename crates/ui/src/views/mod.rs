mod history;
mod quiz;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use history::HistoryPanel;
pub use quiz::{QuizPage, QuizView};
pub use state::{ViewError, ViewState, view_state_from_resource};
