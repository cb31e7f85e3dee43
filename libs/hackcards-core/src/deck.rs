//! Markdown parser for deck files.
//!
//! # Format
//! ```markdown
//! Q: Type of attacks that occur in the Transport layer?
//! A: SYN flood, TCP/IP hijacking
//! I: assets/transport.png
//!
//! Q: What is Transmission Control Protocol (TCP)?
//! A: TCP is a connection-oriented protocol.
//! Multiple lines are supported.
//! ```
//!
//! Cards are separated by the next `Q:` line. The `I:` image line is
//! optional. Cards carry no IDs; deck order is file order.

use crate::error::DeckError;
use crate::types::Card;

/// Parse deck file content into cards.
pub fn parse_deck(content: &str) -> Result<Vec<Card>, DeckError> {
    if content.trim().is_empty() {
        return Ok(vec![]);
    }

    let mut parser = Parser::new();
    for (idx, line) in content.lines().enumerate() {
        parser.process_line(line, idx + 1)?;
    }
    parser.finish()
}

enum LineType<'a> {
    Question(&'a str),
    Answer(&'a str),
    Image(&'a str),
    Text(&'a str),
    Empty,
}

fn parse_line(line: &str) -> LineType<'_> {
    let trimmed = line.trim();

    if let Some(rest) = trimmed.strip_prefix("Q:") {
        LineType::Question(rest.trim())
    } else if let Some(rest) = trimmed.strip_prefix("A:") {
        LineType::Answer(rest.trim())
    } else if let Some(rest) = trimmed.strip_prefix("I:") {
        LineType::Image(rest.trim())
    } else if trimmed.is_empty() {
        LineType::Empty
    } else {
        LineType::Text(line)
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Field {
    Question,
    Answer,
}

struct CardBuilder {
    question: Option<String>,
    answer: Option<String>,
    image: Option<String>,
    start_line: usize,
}

impl CardBuilder {
    fn new(start_line: usize) -> Self {
        Self {
            question: None,
            answer: None,
            image: None,
            start_line,
        }
    }

    fn build(self) -> Result<Card, DeckError> {
        let question = self.question.ok_or(DeckError::MissingQuestion {
            line: self.start_line,
        })?;
        let answer = self.answer.ok_or(DeckError::MissingAnswer {
            line: self.start_line,
        })?;

        Ok(Card {
            question: question.trim().to_string(),
            answer: answer.trim().to_string(),
            image: self.image,
        })
    }
}

struct Parser {
    cards: Vec<Card>,
    current: Option<CardBuilder>,
    current_field: Option<Field>,
    buffer: Vec<String>,
}

impl Parser {
    fn new() -> Self {
        Self {
            cards: Vec::new(),
            current: None,
            current_field: None,
            buffer: Vec::new(),
        }
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> Result<(), DeckError> {
        match parse_line(line) {
            LineType::Question(text) => self.handle_question(text, line_num)?,
            LineType::Answer(text) => self.handle_answer(text, line_num)?,
            LineType::Image(path) => self.handle_image(path, line_num)?,
            LineType::Text(text) => self.buffer.push(text.to_string()),
            LineType::Empty => self.buffer.push(String::new()),
        }
        Ok(())
    }

    // A `Q:` line closes the card before it.
    fn handle_question(&mut self, text: &str, line_num: usize) -> Result<(), DeckError> {
        self.flush_buffer();
        if let Some(done) = self.current.take() {
            self.cards.push(done.build()?);
        }

        self.current = Some(CardBuilder::new(line_num));
        self.current_field = Some(Field::Question);
        self.buffer.push(text.to_string());
        Ok(())
    }

    fn handle_answer(&mut self, text: &str, line_num: usize) -> Result<(), DeckError> {
        if self.current.is_none() {
            return Err(DeckError::MissingQuestion { line: line_num });
        }
        self.flush_buffer();
        self.current_field = Some(Field::Answer);
        self.buffer.push(text.to_string());
        Ok(())
    }

    fn handle_image(&mut self, path: &str, line_num: usize) -> Result<(), DeckError> {
        self.flush_buffer();
        match self.current {
            Some(ref mut card) => {
                card.image = Some(path.to_string());
                self.current_field = None;
                Ok(())
            }
            None => Err(DeckError::MissingQuestion { line: line_num }),
        }
    }

    fn flush_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let content = self.buffer.join("\n");
        self.buffer.clear();

        if let Some(ref mut card) = self.current {
            match self.current_field {
                Some(Field::Question) => card.question = Some(content),
                Some(Field::Answer) => card.answer = Some(content),
                None => {}
            }
        }
    }

    fn finish(mut self) -> Result<Vec<Card>, DeckError> {
        self.flush_buffer();
        if let Some(done) = self.current.take() {
            self.cards.push(done.build()?);
        }
        Ok(self.cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_single_card() {
        let input = "Q: What is TCP?\nA: A connection-oriented protocol.";
        let cards = parse_deck(input).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question, "What is TCP?");
        assert_eq!(cards[0].answer, "A connection-oriented protocol.");
        assert_eq!(cards[0].image, None);
    }

    #[test]
    fn parse_card_with_image() {
        let input = "Q: Transport layer attacks?\nA: SYN flood\nI: assets/transport.png";
        let cards = parse_deck(input).unwrap();
        assert_eq!(cards[0].image.as_deref(), Some("assets/transport.png"));
    }

    #[test]
    fn parse_multiline_answer() {
        let input = "Q: Explain\nA: Line 1\nLine 2\n\nLine 4";
        let cards = parse_deck(input).unwrap();
        assert_eq!(cards[0].answer, "Line 1\nLine 2\n\nLine 4");
    }

    #[test]
    fn parse_multiple_cards() {
        let input = "Q: Q1\nA: A1\n\nQ: Q2\nA: A2\nI: two.png";
        let cards = parse_deck(input).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].question, "Q1");
        assert_eq!(cards[1].question, "Q2");
        assert_eq!(cards[1].image.as_deref(), Some("two.png"));
    }

    #[test]
    fn reject_answer_before_question() {
        let input = "A: Answer only";
        let result = parse_deck(input);
        assert!(matches!(result, Err(DeckError::MissingQuestion { line: 1 })));
    }

    #[test]
    fn reject_missing_answer() {
        let input = "Q: Question only\n\nQ: Next\nA: Answer";
        let result = parse_deck(input);
        assert!(matches!(result, Err(DeckError::MissingAnswer { line: 1 })));
    }

    #[test]
    fn reject_missing_answer_at_eof() {
        let result = parse_deck("Q: Question only");
        assert!(matches!(result, Err(DeckError::MissingAnswer { line: 1 })));
    }

    #[test]
    fn parse_empty_content() {
        let cards = parse_deck("").unwrap();
        assert!(cards.is_empty());
        let cards = parse_deck("   \n\n").unwrap();
        assert!(cards.is_empty());
    }

    #[test]
    fn image_before_question_is_rejected() {
        let result = parse_deck("I: orphan.png\nQ: Q\nA: A");
        assert!(matches!(result, Err(DeckError::MissingQuestion { line: 1 })));
    }
}
