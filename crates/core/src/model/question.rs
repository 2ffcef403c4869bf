use crate::model::QuestionId;

/// A multiple-choice question with four labeled options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct McqQuestion {
    pub id: QuestionId,
    pub prompt: &'static str,
    pub options: [&'static str; 4],
    pub answer: &'static str,
}

/// A question answered by typing a number.
///
/// The answer is kept as text and compared verbatim, so `"007"` does not match `"7"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericQuestion {
    pub id: QuestionId,
    pub prompt: &'static str,
    pub answer: &'static str,
}

/// Borrowed view over either question kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Question<'a> {
    MultipleChoice(&'a McqQuestion),
    Numeric(&'a NumericQuestion),
}

impl<'a> Question<'a> {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        match self {
            Question::MultipleChoice(q) => q.id,
            Question::Numeric(q) => q.id,
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &'a str {
        match self {
            Question::MultipleChoice(q) => q.prompt,
            Question::Numeric(q) => q.prompt,
        }
    }

    #[must_use]
    pub fn answer(&self) -> &'a str {
        match self {
            Question::MultipleChoice(q) => q.answer,
            Question::Numeric(q) => q.answer,
        }
    }

    /// Options for multiple-choice questions; empty for numeric ones.
    #[must_use]
    pub fn options(&self) -> &'a [&'static str] {
        match self {
            Question::MultipleChoice(q) => &q.options,
            Question::Numeric(_) => &[],
        }
    }

    /// Exact string equality with the stored answer. No trimming, no numeric parsing.
    #[must_use]
    pub fn is_correct(&self, candidate: &str) -> bool {
        candidate == self.answer()
    }
}
