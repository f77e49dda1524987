//! Plain subsequence matcher
//!
//! Matches when every query character appears in the candidate in order,
//! ignoring case. Leftmost greedy, no allocation for a lowercase copy of the
//! candidate; ASCII candidates take a cheaper per-char fold. Useful when nucleo's pattern syntax is unwanted (query
//! characters like `!` or `^` are matched literally here).

use super::{FuzzyMatch, FuzzyMatcher};

/// Points for every matched character
const MATCH_SCORE: i64 = 16;
/// Bonus when a match directly follows the previous one
const CONSECUTIVE_BONUS: i64 = 8;
/// Bonus when a match starts a word
const BOUNDARY_BONUS: i64 = 8;

/// Perform fuzzy matching without allocating a lowercase copy of haystack.
/// `pattern_lower` must already be lowercase.
/// Returns (matched, indices) where matched is true if all pattern chars found in order.
/// The indices are char positions in the original haystack.
#[inline]
pub fn fuzzy_match_with_indices_ascii(haystack: &str, pattern_lower: &str) -> (bool, Vec<usize>) {
    let mut indices = Vec::new();
    let mut pattern_chars = pattern_lower.chars().peekable();

    for (idx, ch) in haystack.chars().enumerate() {
        if let Some(&p) = pattern_chars.peek() {
            if ch.to_ascii_lowercase() == p {
                indices.push(idx);
                pattern_chars.next();
            }
        }
    }

    let matched = pattern_chars.peek().is_none();
    (matched, if matched { indices } else { Vec::new() })
}

/// Like `fuzzy_match_with_indices_ascii`, but folds the haystack with full
/// Unicode lowercasing so it agrees with `str::to_lowercase` on the pattern.
pub fn fuzzy_match_with_indices(haystack: &str, pattern_lower: &str) -> (bool, Vec<usize>) {
    let mut indices = Vec::new();
    let mut pattern_chars = pattern_lower.chars().peekable();

    for (idx, ch) in haystack.chars().enumerate() {
        for folded in ch.to_lowercase() {
            if pattern_chars.peek() == Some(&folded) {
                if indices.last() != Some(&idx) {
                    indices.push(idx);
                }
                pattern_chars.next();
            }
        }
    }

    let matched = pattern_chars.peek().is_none();
    (matched, if matched { indices } else { Vec::new() })
}

fn is_word_start(chars: &[char], idx: usize) -> bool {
    if idx == 0 {
        return true;
    }
    let prev = chars[idx - 1];
    let cur = chars[idx];
    !prev.is_alphanumeric() || (prev.is_lowercase() && cur.is_uppercase())
}

/// Score matched positions: base per char plus word-start and run bonuses
fn score_indices(haystack: &str, indices: &[usize]) -> i64 {
    let chars: Vec<char> = haystack.chars().collect();
    let mut score = 0;
    let mut prev: Option<usize> = None;

    for &idx in indices {
        score += MATCH_SCORE;
        if is_word_start(&chars, idx) {
            score += BOUNDARY_BONUS;
        }
        if prev.is_some_and(|p| p + 1 == idx) {
            score += CONSECUTIVE_BONUS;
        }
        prev = Some(idx);
    }

    score
}

/// In-order character matcher with simple run/boundary scoring
#[derive(Debug, Default, Clone, Copy)]
pub struct SubsequenceMatcher;

impl FuzzyMatcher for SubsequenceMatcher {
    fn fuzzy_match(&self, query: &str, candidate: &str) -> Option<FuzzyMatch> {
        if query.is_empty() {
            return Some(FuzzyMatch::default());
        }
        let (matched, indices) = if candidate.is_ascii() {
            fuzzy_match_with_indices_ascii(candidate, query)
        } else {
            fuzzy_match_with_indices(candidate, query)
        };
        if !matched {
            return None;
        }
        Some(FuzzyMatch {
            score: score_indices(candidate, &indices),
            indices,
        })
    }
}
