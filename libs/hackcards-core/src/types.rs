//! Shared types for the quiz library.

use serde::{Deserialize, Serialize};

use crate::matching::DEFAULT_THRESHOLD;

/// A single flashcard. Cards have no identity beyond their content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub question: String,
    pub answer: String,
    /// Optional path to an illustration shown alongside the question.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Card {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            image: None,
        }
    }
}

/// Which face of the current card is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardView {
    Question,
    Answer,
}

impl Default for CardView {
    fn default() -> Self {
        Self::Question
    }
}

/// Feedback from grading a typed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    Correct,
    Incorrect,
}

/// Quiz-wide settings supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSettings {
    /// Minimum similarity ratio for a fuzzy match to count as correct.
    pub fuzzy_threshold: f64,
    /// Optional cap on answer length, bounding the O(m*n) distance cost.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_answer_chars: Option<usize>,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_THRESHOLD,
            max_answer_chars: None,
        }
    }
}
