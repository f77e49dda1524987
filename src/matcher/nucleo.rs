//! nucleo-backed fuzzy matcher
//!
//! Queries use nucleo's pattern syntax: whitespace separates atoms that must
//! all match, `^`/`$` anchor, `'` forces substring and `!` negates.

use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use parking_lot::Mutex;

use super::{FuzzyMatch, FuzzyMatcher};

/// Matcher state reused across calls.
///
/// Re-parses the pattern only when the query changes, which is once per
/// search since every candidate of a query is scored back to back.
struct NucleoCtx {
    query: String,
    pattern: Pattern,
    matcher: Matcher,
    buf: Vec<char>,
    indices: Vec<u32>,
}

impl NucleoCtx {
    fn new() -> Self {
        NucleoCtx {
            query: String::new(),
            pattern: Pattern::parse("", CaseMatching::Ignore, Normalization::Smart),
            matcher: Matcher::new(Config::DEFAULT),
            buf: Vec::with_capacity(64),
            indices: Vec::new(),
        }
    }

    fn set_query(&mut self, query: &str) {
        if self.query != query {
            self.pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);
            self.query.clear();
            self.query.push_str(query);
        }
    }

    fn indices(&mut self, haystack: &str) -> Option<FuzzyMatch> {
        self.buf.clear();
        self.indices.clear();
        let utf32 = Utf32Str::new(haystack, &mut self.buf);
        let score = self
            .pattern
            .indices(utf32, &mut self.matcher, &mut self.indices)?;

        // Multiple atoms report overlapping, unsorted indices
        self.indices.sort_unstable();
        self.indices.dedup();

        Some(FuzzyMatch {
            score: i64::from(score),
            indices: self.indices.iter().map(|&i| i as usize).collect(),
        })
    }
}

/// Default matcher built on `nucleo-matcher`
pub struct NucleoMatcher {
    ctx: Mutex<NucleoCtx>,
}

impl NucleoMatcher {
    pub fn new() -> Self {
        NucleoMatcher {
            ctx: Mutex::new(NucleoCtx::new()),
        }
    }
}

impl Default for NucleoMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyMatcher for NucleoMatcher {
    fn fuzzy_match(&self, query: &str, candidate: &str) -> Option<FuzzyMatch> {
        let mut ctx = self.ctx.lock();
        ctx.set_query(query);
        ctx.indices(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subsequence_matches() {
        let matcher = NucleoMatcher::new();
        let m = matcher.fuzzy_match("ad", "Add").unwrap();
        assert!(m.score > 0);
        assert_eq!(m.indices.len(), 2);
        assert_eq!(m.indices[0], 0);
    }

    #[test]
    fn test_non_match_returns_none() {
        let matcher = NucleoMatcher::new();
        assert!(matcher.fuzzy_match("xyz", "Add").is_none());
    }

    #[test]
    fn test_case_insensitive() {
        let matcher = NucleoMatcher::new();
        assert!(matcher.fuzzy_match("sub", "SUBTRACT").is_some());
    }

    #[test]
    fn test_prefix_scores_higher_than_scattered() {
        let matcher = NucleoMatcher::new();
        let prefix = matcher.fuzzy_match("add", "Add Vectors").unwrap();
        let scattered = matcher.fuzzy_match("add", "a dead dog").unwrap();
        assert!(prefix.score > scattered.score);
    }

    #[test]
    fn test_query_change_reparses_pattern() {
        let matcher = NucleoMatcher::new();
        assert!(matcher.fuzzy_match("add", "Add").is_some());
        assert!(matcher.fuzzy_match("sub", "Add").is_none());
        assert!(matcher.fuzzy_match("sub", "Subtract").is_some());
    }

    #[test]
    fn test_multi_word_query_requires_every_atom() {
        let matcher = NucleoMatcher::new();
        let m = matcher.fuzzy_match("math add", "Math Add").unwrap();
        assert_eq!(m.indices, vec![0, 1, 2, 3, 5, 6, 7]);
        assert!(matcher.fuzzy_match("math sub", "Math Add").is_none());
    }
}
