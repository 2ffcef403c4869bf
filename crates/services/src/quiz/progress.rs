use quiz_core::model::Round;

/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// `None` once the quiz is completed.
    pub round: Option<Round>,
    pub index: usize,
    pub total_in_round: usize,
    pub score: u32,
    pub max_score: u32,
    pub is_complete: bool,
}
