//! Fuzzy answer matching for typed quiz answers.
//!
//! Grading is a two-step pipeline: compute the Levenshtein distance between
//! the normalized answers, then turn it into a similarity ratio and compare
//! against an acceptance threshold.

use crate::error::{MatchError, Result};
use crate::types::QuizSettings;
use serde::{Deserialize, Serialize};

/// Acceptance threshold used when the caller does not supply one.
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// Result of grading a typed answer against the correct answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the answer counts as correct.
    pub is_correct: bool,
    /// Similarity ratio between 0.0 and 1.0.
    pub similarity: f64,
    /// Normalized typed answer (for display).
    pub typed_normalized: String,
    /// Normalized correct answer (for display).
    pub correct_normalized: String,
}

/// Trim surrounding whitespace and case-fold. Internal whitespace is kept
/// as-is, so "ssl  stripping" and "ssl stripping" remain one edit apart.
fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Levenshtein distance between two strings, case-insensitive.
///
/// Counts the minimum number of single-character insertions, deletions, and
/// substitutions needed to turn one string into the other. Operates on
/// Unicode scalar values, not bytes. The result is symmetric, zero exactly
/// when the case-folded strings are identical, and never exceeds the longer
/// string's length.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.to_lowercase().chars().collect();
    let b_chars: Vec<char> = b.to_lowercase().chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows are enough; each row of the DP table only reads the previous one.
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Similarity ratio in [0.0, 1.0]: `(max_len - distance) / max_len` over
/// case-folded character counts. Two empty strings are identical.
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let a_folded = a.to_lowercase();
    let b_folded = b.to_lowercase();
    let max_len = a_folded.chars().count().max(b_folded.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein_distance(&a_folded, &b_folded);
    (max_len - distance) as f64 / max_len as f64
}

/// Grade a typed answer against the correct answer.
///
/// Both answers are trimmed and case-folded before comparison. Two answers
/// that both normalize to empty match unconditionally. Otherwise the answer
/// is correct when the similarity ratio reaches `threshold`.
///
/// Fails with [`MatchError::ThresholdOutOfRange`] when `threshold` is not in
/// [0.0, 1.0].
pub fn compare_answers(typed: &str, correct: &str, threshold: f64) -> Result<MatchResult> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(MatchError::ThresholdOutOfRange { value: threshold });
    }

    let typed_normalized = normalize(typed);
    let correct_normalized = normalize(correct);

    // Two empty answers match vacuously, whatever the threshold.
    if typed_normalized.is_empty() && correct_normalized.is_empty() {
        return Ok(MatchResult {
            is_correct: true,
            similarity: 1.0,
            typed_normalized,
            correct_normalized,
        });
    }

    let distance = levenshtein_distance(&typed_normalized, &correct_normalized);
    let max_len = typed_normalized
        .chars()
        .count()
        .max(correct_normalized.chars().count());

    // Unreachable past the both-empty branch; kept so the division below can
    // never see zero.
    if max_len == 0 {
        return Ok(MatchResult {
            is_correct: true,
            similarity: 1.0,
            typed_normalized,
            correct_normalized,
        });
    }

    let similarity = (max_len - distance) as f64 / max_len as f64;

    Ok(MatchResult {
        is_correct: similarity >= threshold,
        similarity,
        typed_normalized,
        correct_normalized,
    })
}

/// Like [`compare_answers`], but rejects answers longer than `max_chars`
/// before running the O(m*n) distance computation.
pub fn compare_answers_with_limit(
    typed: &str,
    correct: &str,
    threshold: f64,
    max_chars: usize,
) -> Result<MatchResult> {
    for s in [typed, correct] {
        let length = s.chars().count();
        if length > max_chars {
            return Err(MatchError::AnswerTooLong {
                length,
                limit: max_chars,
            });
        }
    }
    compare_answers(typed, correct, threshold)
}

/// Grade a typed answer under the given settings.
pub fn grade(typed: &str, correct: &str, settings: &QuizSettings) -> Result<MatchResult> {
    match settings.max_answer_chars {
        Some(limit) => compare_answers_with_limit(typed, correct, settings.fuzzy_threshold, limit),
        None => compare_answers(typed, correct, settings.fuzzy_threshold),
    }
}

/// Boolean decision over [`compare_answers`]. A `None` threshold uses
/// [`DEFAULT_THRESHOLD`].
pub fn is_approximately_correct(
    typed: &str,
    correct: &str,
    threshold: Option<f64>,
) -> Result<bool> {
    let threshold = threshold.unwrap_or(DEFAULT_THRESHOLD);
    Ok(compare_answers(typed, correct, threshold)?.is_correct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn distance_basics() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("saturday", "sunday"), 3);
    }

    #[test]
    fn distance_is_case_insensitive() {
        assert_eq!(levenshtein_distance("TCP", "tcp"), 0);
        assert_eq!(levenshtein_distance("Kitten", "SITTING"), 3);
    }

    #[test]
    fn distance_is_symmetric() {
        for (a, b) in [
            ("kitten", "sitting"),
            ("", "abc"),
            ("SYN flood", "SYN flood, TCP/IP hijacking"),
            ("naïve", "naive"),
        ] {
            assert_eq!(levenshtein_distance(a, b), levenshtein_distance(b, a));
        }
    }

    #[test]
    fn distance_bounded_by_longer_length() {
        for (a, b) in [("abc", "xyzw"), ("", "hello"), ("short", "a much longer answer")] {
            let bound = a.chars().count().max(b.chars().count());
            assert!(levenshtein_distance(a, b) <= bound);
        }
    }

    #[test]
    fn distance_counts_unicode_chars_not_bytes() {
        assert_eq!(levenshtein_distance("naïve", "naive"), 1);
        assert_eq!(levenshtein_distance("héllo", "hello"), 1);
    }

    #[test]
    fn similarity_basics() {
        assert_eq!(normalized_similarity("abc", "abc"), 1.0);
        assert_eq!(normalized_similarity("", ""), 1.0);
        assert!(normalized_similarity("kitten", "sitting") > 0.5);
        assert!(normalized_similarity("abc", "xyz") < 0.5);
    }

    #[test]
    fn identity_matches_at_any_threshold() {
        for s in ["TCP", "SYN flood", "", "a longer free-text answer"] {
            assert!(is_approximately_correct(s, s, Some(1.0)).unwrap());
            assert!(is_approximately_correct(s, s, None).unwrap());
        }
    }

    #[test]
    fn both_empty_is_vacuous_match() {
        let result = compare_answers("", "", 1.0).unwrap();
        assert!(result.is_correct);
        assert_eq!(result.similarity, 1.0);

        // Whitespace-only answers trim to empty.
        assert!(is_approximately_correct("   ", "  ", None).unwrap());
    }

    #[test]
    fn one_empty_is_zero_similarity() {
        let result = compare_answers("", "TCP is a protocol", 0.8).unwrap();
        assert!(!result.is_correct);
        assert_eq!(result.similarity, 0.0);
    }

    #[test]
    fn case_and_surrounding_whitespace_are_ignored() {
        assert!(is_approximately_correct("TCP", "tcp", None).unwrap());
        assert!(is_approximately_correct("  SQL injection  ", "sql injection", None).unwrap());
    }

    #[test]
    fn internal_whitespace_is_not_collapsed() {
        // One extra internal space is one edit; still close enough at 0.8.
        let result = compare_answers("SSL stripping", "ssl  stripping", 0.8).unwrap();
        assert!(result.is_correct);
        assert!(result.similarity < 1.0);
        assert_eq!(result.correct_normalized, "ssl  stripping");
    }

    #[test]
    fn short_answer_against_long_reference_fails() {
        // Prefix of the reference, but the length gap dwarfs the ratio.
        let result = compare_answers("SYN flood", "SYN flood, TCP/IP hijacking", 0.8).unwrap();
        assert!(!result.is_correct);
        assert!(result.similarity < 0.5);
    }

    #[test]
    fn single_typo_does_not_rescue_partial_answer() {
        // "mac spofing" is one edit from "mac spoofing", but the reference
        // answer lists a second attack the user never typed.
        let result = compare_answers("mac spofing", "MAC Spoofing, MITM attacks", 0.8).unwrap();
        assert!(!result.is_correct);
    }

    #[test]
    fn single_typo_in_short_answer_passes() {
        // 1 edit over 5 chars: similarity exactly 0.8.
        let result = compare_answers("helo", "hello", 0.8).unwrap();
        assert!(result.is_correct);
        assert_eq!(result.similarity, 0.8);
    }

    #[test]
    fn lower_threshold_never_turns_a_match_into_a_miss() {
        let cases = [
            ("helo", "hello"),
            ("SSL stripping", "ssl  stripping"),
            ("sql injection", "SQL injection"),
        ];
        for (typed, correct) in cases {
            let at_high = is_approximately_correct(typed, correct, Some(0.8)).unwrap();
            if at_high {
                assert!(is_approximately_correct(typed, correct, Some(0.5)).unwrap());
                assert!(is_approximately_correct(typed, correct, Some(0.0)).unwrap());
            }
        }
    }

    #[test]
    fn threshold_bounds_are_inclusive() {
        assert!(compare_answers("a", "b", 0.0).is_ok());
        assert!(compare_answers("a", "b", 1.0).is_ok());
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        assert!(matches!(
            compare_answers("a", "b", 1.5),
            Err(MatchError::ThresholdOutOfRange { .. })
        ));
        assert!(matches!(
            compare_answers("a", "b", -0.1),
            Err(MatchError::ThresholdOutOfRange { .. })
        ));
        assert!(matches!(
            is_approximately_correct("a", "b", Some(2.0)),
            Err(MatchError::ThresholdOutOfRange { .. })
        ));
    }

    #[test]
    fn answer_length_cap_is_enforced() {
        let long = "x".repeat(100);
        let result = compare_answers_with_limit(&long, "short", 0.8, 50);
        assert!(matches!(
            result,
            Err(MatchError::AnswerTooLong { length: 100, limit: 50 })
        ));

        // Under the cap, grading proceeds normally.
        assert!(compare_answers_with_limit("tcp", "TCP", 0.8, 50)
            .unwrap()
            .is_correct);
    }

    #[test]
    fn grade_applies_settings() {
        let settings = QuizSettings::default();
        assert!(grade("tcp", "TCP", &settings).unwrap().is_correct);

        let capped = QuizSettings {
            fuzzy_threshold: 0.8,
            max_answer_chars: Some(4),
        };
        assert!(matches!(
            grade("too long", "answer", &capped),
            Err(MatchError::AnswerTooLong { .. })
        ));
    }

    #[test]
    fn match_result_serializes() {
        let result = compare_answers("helo", "hello", 0.8).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["is_correct"], true);
        assert_eq!(json["typed_normalized"], "helo");
        assert_eq!(json["correct_normalized"], "hello");
    }
}
