//! Terminal quiz runner over hackcards-core.
//!
//! All grading and session bookkeeping lives in the core library; this
//! binary only reads lines, dispatches commands, and prints results.

use anyhow::{ensure, Context, Result};
use clap::Parser;
use colored::Colorize;
use hackcards_core::{parse_deck, QuizSettings, StudySession};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Cybersecurity starter deck, compiled into the binary.
const SAMPLE_DECK: &str = include_str!("../decks/cybersecurity.md");

/// Flashcard quiz with fuzzy answer matching.
#[derive(Debug, Parser)]
#[command(name = "hackcards", version, about)]
struct Cli {
    /// Deck file to study (defaults to the built-in cybersecurity deck).
    deck: Option<PathBuf>,

    /// Minimum similarity ratio for an answer to count as correct.
    #[arg(long, default_value_t = hackcards_core::DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Shuffle the deck before starting.
    #[arg(long)]
    shuffle: bool,

    /// Reject answers longer than this many characters.
    #[arg(long)]
    max_answer_chars: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    ensure!(
        (0.0..=1.0).contains(&cli.threshold),
        "--threshold must be between 0.0 and 1.0"
    );

    let content = match &cli.deck {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read deck {}", path.display()))?,
        None => SAMPLE_DECK.to_string(),
    };
    let mut cards = parse_deck(&content).context("failed to parse deck")?;
    ensure!(!cards.is_empty(), "deck has no cards");

    if cli.shuffle {
        cards.shuffle(&mut rand::thread_rng());
    }

    let settings = QuizSettings {
        fuzzy_threshold: cli.threshold,
        max_answer_chars: cli.max_answer_chars,
    };

    run(StudySession::new(cards), &settings)
}

fn run(mut session: StudySession, settings: &QuizSettings) -> Result<()> {
    println!("{}", "Learn to hack. Ethically.".bold());
    println!(
        "{} cards loaded. Type an answer, or {} for commands.\n",
        session.len(),
        ":h".bold()
    );

    let stdin = io::stdin();
    let mut rng = rand::thread_rng();
    let mut show_question = true;

    loop {
        if show_question {
            let Some(card) = session.current_card() else {
                break;
            };
            println!(
                "{} {}",
                format!("[{}/{}]", session.current_index() + 1, session.len()).dimmed(),
                card.card.question.cyan()
            );
            if let Some(image) = &card.card.image {
                println!("{} {}", "see:".dimmed(), image);
            }
        }
        show_question = false;

        print!("{} ", ">".bold());
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        match line.trim() {
            "" => {}
            ":q" | ":quit" => break,
            ":n" | ":next" => {
                session.next_card();
                show_question = true;
            }
            ":p" | ":prev" => {
                session.previous_card();
                show_question = true;
            }
            ":r" | ":random" => {
                session.jump_to(rng.gen_range(0..session.len()));
                show_question = true;
            }
            ":m" | ":master" => {
                session.set_mastered(true);
                println!(
                    "marked as mastered ({} of {})",
                    session.mastered_count(),
                    session.len()
                );
            }
            ":f" | ":forget" => {
                session.set_mastered(false);
                println!("unmarked");
            }
            ":s" | ":stats" => print_stats(&session),
            ":h" | ":help" => print_help(),
            cmd if cmd.starts_with(':') => {
                println!("unknown command {}, try {}", cmd, ":h".bold());
            }
            guess => {
                let correct_answer = session
                    .current_card()
                    .map(|c| c.card.answer.clone())
                    .unwrap_or_default();
                match session.submit_answer(guess, settings) {
                    Ok(Some(result)) => {
                        if result.is_correct {
                            println!("{}", "Correct!".green().bold());
                        } else {
                            println!("{}", "Incorrect!".red().bold());
                        }
                        println!("{} {}", "answer:".dimmed(), correct_answer);
                        println!(
                            "{} {:.0}%  {} {} (best {})",
                            "similarity:".dimmed(),
                            result.similarity * 100.0,
                            "streak:".dimmed(),
                            session.current_streak(),
                            session.longest_streak()
                        );
                    }
                    Ok(None) => break,
                    Err(err) => println!("{} {}", "error:".red(), err),
                }
            }
        }
    }

    print_summary(&session);
    Ok(())
}

fn print_stats(session: &StudySession) {
    let stats = session.stats();
    println!(
        "cards: {}  mastered: {}  streak: {}  best: {}",
        stats.total_cards, stats.mastered_cards, stats.current_streak, stats.longest_streak
    );
}

fn print_help() {
    println!("type an answer to have it graded, or:");
    println!("  {}  next card", ":n".bold());
    println!("  {}  previous card", ":p".bold());
    println!("  {}  jump to a random card", ":r".bold());
    println!("  {}  mark the current card as mastered", ":m".bold());
    println!("  {}  unmark the current card", ":f".bold());
    println!("  {}  session statistics", ":s".bold());
    println!("  {}  quit", ":q".bold());
}

fn print_summary(session: &StudySession) {
    let stats = session.stats();
    println!("\n{}", "Session summary".bold());
    println!(
        "cards: {}  longest streak: {}",
        stats.total_cards, stats.longest_streak
    );
    if stats.mastered_cards == 0 {
        println!("No mastered cards yet.");
    } else {
        println!("Mastered cards:");
        for card in session.mastered_cards() {
            println!("  {} {}", "*".green(), card.question);
        }
    }
}
