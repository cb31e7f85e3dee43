//! Core library for the hackcards quiz.
//!
//! Provides:
//! - Fuzzy answer matching (Levenshtein distance + similarity threshold)
//! - In-memory study session state (navigation, streaks, mastered flags)
//! - Deck file parser
//! - Shared types (Card, QuizSettings, Feedback, ...)

pub mod deck;
pub mod error;
pub mod matching;
pub mod session;
pub mod types;

pub use deck::parse_deck;
pub use error::{DeckError, MatchError, Result};
pub use matching::{
    compare_answers, compare_answers_with_limit, grade, is_approximately_correct,
    levenshtein_distance, normalized_similarity, MatchResult, DEFAULT_THRESHOLD,
};
pub use session::{SessionCard, SessionStats, StudySession};
pub use types::{Card, CardView, Feedback, QuizSettings};
