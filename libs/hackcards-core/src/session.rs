//! In-memory study session state.
//!
//! Owns the deck order, the cursor, streak counters, and per-card mastered
//! flags. Every method is a plain state transition over the card list;
//! rendering and input handling belong to the caller. Nothing here survives
//! the session.

use crate::error::Result;
use crate::matching::{grade, MatchResult};
use crate::types::{Card, CardView, Feedback, QuizSettings};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A card plus its session-local mastered flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCard {
    pub card: Card,
    pub mastered: bool,
}

/// Snapshot of session progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_cards: usize,
    pub mastered_cards: usize,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub started_at: DateTime<Utc>,
}

/// A study session over an ordered, static card list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudySession {
    cards: Vec<SessionCard>,
    current: usize,
    view: CardView,
    feedback: Option<Feedback>,
    current_streak: u32,
    longest_streak: u32,
    started_at: DateTime<Utc>,
}

impl StudySession {
    /// Start a session over the given cards, in the given order.
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards: cards
                .into_iter()
                .map(|card| SessionCard {
                    card,
                    mastered: false,
                })
                .collect(),
            current: 0,
            view: CardView::Question,
            feedback: None,
            current_streak: 0,
            longest_streak: 0,
            started_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn view(&self) -> CardView {
        self.view
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn longest_streak(&self) -> u32 {
        self.longest_streak
    }

    /// The card under the cursor, or `None` for an empty deck.
    pub fn current_card(&self) -> Option<&SessionCard> {
        self.cards.get(self.current)
    }

    /// Grade a typed answer against the current card and record the outcome.
    ///
    /// A correct answer extends the streak (and the longest-streak high-water
    /// mark); an incorrect one resets it. Either way the card flips to its
    /// answer face. Returns `None` on an empty deck.
    pub fn submit_answer(
        &mut self,
        guess: &str,
        settings: &QuizSettings,
    ) -> Result<Option<MatchResult>> {
        let Some(card) = self.cards.get(self.current) else {
            return Ok(None);
        };

        let result = grade(guess, &card.card.answer, settings)?;

        if result.is_correct {
            self.feedback = Some(Feedback::Correct);
            self.current_streak += 1;
            self.longest_streak = self.longest_streak.max(self.current_streak);
        } else {
            self.feedback = Some(Feedback::Incorrect);
            self.current_streak = 0;
        }
        self.view = CardView::Answer;

        Ok(Some(result))
    }

    /// Advance to the next card, wrapping at the end of the deck.
    pub fn next_card(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.current = (self.current + 1) % self.cards.len();
        self.reset_prompt();
    }

    /// Step back to the previous card, wrapping at the start of the deck.
    pub fn previous_card(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.current = if self.current == 0 {
            self.cards.len() - 1
        } else {
            self.current - 1
        };
        self.reset_prompt();
    }

    /// Jump to an arbitrary card. Out-of-range indexes are ignored.
    pub fn jump_to(&mut self, index: usize) {
        if index >= self.cards.len() {
            return;
        }
        self.current = index;
        self.reset_prompt();
    }

    /// Set the mastered flag on the current card.
    pub fn set_mastered(&mut self, mastered: bool) {
        if let Some(card) = self.cards.get_mut(self.current) {
            card.mastered = mastered;
        }
    }

    pub fn mastered_count(&self) -> usize {
        self.cards.iter().filter(|c| c.mastered).count()
    }

    /// Cards marked as mastered, in deck order.
    pub fn mastered_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.mastered).map(|c| &c.card)
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            total_cards: self.cards.len(),
            mastered_cards: self.mastered_count(),
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
            started_at: self.started_at,
        }
    }

    fn reset_prompt(&mut self) {
        self.view = CardView::Question;
        self.feedback = None;
    }
}
