use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome shown after an answer is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    Correct,
    Wrong,
}

impl Feedback {
    #[must_use]
    pub const fn from_correct(correct: bool) -> Self {
        if correct { Self::Correct } else { Self::Wrong }
    }

    #[must_use]
    pub const fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }

    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Correct => "✅ Correct!",
            Self::Wrong => "❌ Wrong answer!",
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
