//! The fixed question bank. Round 1 draws from [`MCQ_QUESTIONS`], round 2 from
//! [`NUMERIC_QUESTIONS`], always in declaration order.

use crate::model::{McqQuestion, NumericQuestion, QuestionId};

pub static MCQ_QUESTIONS: [McqQuestion; 5] = [
    McqQuestion {
        id: QuestionId::new(1),
        prompt: "Which planet is closest to the Sun?",
        options: ["A) Venus", "B) Mercury", "C) Earth", "D) Mars"],
        answer: "B) Mercury",
    },
    McqQuestion {
        id: QuestionId::new(2),
        prompt: "Which data structure organizes items in a FIFO manner?",
        options: ["A) Stack", "B) Queue", "C) Tree", "D) Graph"],
        answer: "B) Queue",
    },
    McqQuestion {
        id: QuestionId::new(3),
        prompt: "Which of the following is primarily used for structuring web pages?",
        options: ["A) Python", "B) Java", "C) HTML", "D) C++"],
        answer: "C) HTML",
    },
    McqQuestion {
        id: QuestionId::new(4),
        prompt: "Which chemical symbol stands for Gold?",
        options: ["A) Au", "B) Gd", "C) Ag", "D) Pt"],
        answer: "A) Au",
    },
    McqQuestion {
        id: QuestionId::new(5),
        prompt: "Which process is not typically involved in refining petroleum?",
        options: [
            "A) Fractional distillation",
            "B) Cracking",
            "C) Polymerization",
            "D) Filtration",
        ],
        answer: "D) Filtration",
    },
];

pub static NUMERIC_QUESTIONS: [NumericQuestion; 5] = [
    NumericQuestion {
        id: QuestionId::new(6),
        prompt: "What is the value of 12 + 28?",
        answer: "40",
    },
    NumericQuestion {
        id: QuestionId::new(7),
        prompt: "How many states are there in the United States?",
        answer: "50",
    },
    NumericQuestion {
        id: QuestionId::new(8),
        prompt: "In which year was the Declaration of Independence signed?",
        answer: "1776",
    },
    NumericQuestion {
        id: QuestionId::new(9),
        prompt: "What is the value of pi rounded to the nearest integer?",
        answer: "3",
    },
    NumericQuestion {
        id: QuestionId::new(10),
        prompt: "If a car travels at 60 mph for 2 hours, how many miles does it travel?",
        answer: "120",
    },
];

/// Highest score a single session can reach.
#[must_use]
pub fn max_score() -> u32 {
    u32::try_from(MCQ_QUESTIONS.len() + NUMERIC_QUESTIONS.len()).unwrap_or(u32::MAX)
}
