//! Error types for hackcards-core.

use thiserror::Error;

/// Result type alias using MatchError.
pub type Result<T> = std::result::Result<T, MatchError>;

/// Errors that can occur while grading an answer.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("threshold {value} is outside [0.0, 1.0]")]
    ThresholdOutOfRange { value: f64 },

    #[error("answer is {length} characters long, limit is {limit}")]
    AnswerTooLong { length: usize, limit: usize },
}

/// Errors that can occur while parsing a deck file.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("missing question at line {line}")]
    MissingQuestion { line: usize },

    #[error("missing answer at line {line}")]
    MissingAnswer { line: usize },
}
