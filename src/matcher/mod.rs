//! Fuzzy matching
//!
//! The search index only needs to know whether a candidate string matches a
//! query, how well, and which characters to highlight. Anything that can
//! answer that implements `FuzzyMatcher`.
//!
//! - `nucleo` - `NucleoMatcher`, the default, using nucleo's pattern syntax
//! - `subsequence` - `SubsequenceMatcher`, plain in-order character matching

mod nucleo;
mod subsequence;

pub use nucleo::NucleoMatcher;
pub use subsequence::{
    fuzzy_match_with_indices, fuzzy_match_with_indices_ascii, SubsequenceMatcher,
};

/// A successful match of a query against one candidate string
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FuzzyMatch {
    /// Higher is better
    pub score: i64,
    /// Char positions in the candidate, ascending
    pub indices: Vec<usize>,
}

/// Scores candidate strings against a query.
///
/// `query` is already lower-cased. Results must be deterministic for a given
/// (query, candidate) pair.
pub trait FuzzyMatcher: Send + Sync {
    fn fuzzy_match(&self, query: &str, candidate: &str) -> Option<FuzzyMatch>;
}
