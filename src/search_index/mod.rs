//! Per-source search index
//!
//! One `SearchIndex` wraps one item source. It indexes lazily on the first
//! search, filters through a small round-robin cache and records per-item
//! match metadata for the most recent query only.
//!
//! # Module Structure
//!
//! - `cache` - `FilterCache`, the round-robin (filter, result) cache
//! - `parallel` - sequential / fork-join `perform_filter`

mod cache;
mod parallel;

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::filter::Filter;
use crate::items::Searchable;
use crate::matcher::{FuzzyMatcher, NucleoMatcher};

pub use cache::FilterCache;
pub use parallel::{partition_size, perform_filter, FilterStrategy};

/// Identity of an indexed item.
///
/// Derived from the `Arc` allocation, so two equal items from different
/// sources (or the same source listed twice) never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemKey(usize);

impl ItemKey {
    pub fn of<T>(item: &Arc<T>) -> Self {
        ItemKey(Arc::as_ptr(item) as usize)
    }
}

/// Match metadata for one item and the current query
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchMatch {
    /// Matcher score scaled by the term group's weight
    pub score: i64,
    /// The term that produced `score`
    pub matched_string: String,
    /// Char positions in `matched_string` for highlighting
    pub matched_indices: Vec<usize>,
}

fn weighted_score(raw: i64, weight: f32) -> i64 {
    (raw as f64 * f64::from(weight)) as i64
}

pub struct SearchIndex<T: Searchable> {
    id: usize,
    unindexed: VecDeque<T>,
    /// Items built so far by an indexing pass that hasn't finished
    staged: Vec<Arc<T>>,
    indexed: Option<Vec<Arc<T>>>,
    current_filter: Option<Arc<dyn Filter<T>>>,
    filter_cache: FilterCache<T>,
    strategy: FilterStrategy,
    matcher: Arc<dyn FuzzyMatcher>,
    last_search_data: HashMap<ItemKey, SearchMatch>,
}

impl<T: Searchable> SearchIndex<T> {
    /// Create an index with default config and the nucleo matcher
    pub fn new(id: usize, items: impl IntoIterator<Item = T>) -> Self {
        Self::with_config(
            id,
            items,
            &SearchConfig::default(),
            Arc::new(NucleoMatcher::new()),
        )
    }

    pub fn with_config(
        id: usize,
        items: impl IntoIterator<Item = T>,
        config: &SearchConfig,
        matcher: Arc<dyn FuzzyMatcher>,
    ) -> Self {
        SearchIndex {
            id,
            unindexed: items.into_iter().collect(),
            staged: Vec::new(),
            indexed: None,
            current_filter: None,
            filter_cache: FilterCache::new(config.get_filter_cache_capacity()),
            strategy: FilterStrategy::from_config(config),
            matcher,
            last_search_data: HashMap::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn is_indexed(&self) -> bool {
        self.indexed.is_some()
    }

    /// Indexed items in source order, if indexing has happened
    pub fn indexed(&self) -> Option<&[Arc<T>]> {
        self.indexed.as_deref()
    }

    /// Build every source item once and publish the indexed snapshot.
    ///
    /// No-op once indexed. `build` runs at most once per item: if it fails,
    /// the item is dropped from the source and the error is returned. Items
    /// built before it are kept, so the next call resumes with the item after
    /// the failed one.
    pub fn index_if_needed(&mut self) -> Result<()> {
        if self.indexed.is_some() {
            return Ok(());
        }

        while let Some(mut item) = self.unindexed.pop_front() {
            if let Err(source) = item.build() {
                let full_name = item.full_name();
                warn!(
                    source = self.id,
                    full_name = %full_name,
                    remaining = self.unindexed.len(),
                    "Item build failed, dropping it from the source"
                );
                return Err(SearchError::ItemBuild { full_name, source });
            }
            self.staged.push(Arc::new(item));
        }

        let indexed = std::mem::take(&mut self.staged);
        debug!(source = self.id, count = indexed.len(), "Indexed source");
        self.indexed = Some(indexed);
        Ok(())
    }

    /// Filter applied by subsequent searches. Nothing is recomputed here.
    pub fn set_filter(&mut self, filter: Option<Arc<dyn Filter<T>>>) {
        self.current_filter = filter;
    }

    pub fn filter(&self) -> Option<&Arc<dyn Filter<T>>> {
        self.current_filter.as_ref()
    }

    pub fn filter_cache(&self) -> &FilterCache<T> {
        &self.filter_cache
    }

    /// Matches for `query` among the (filtered) indexed items, in source order.
    ///
    /// Indexes on first use; a build failure propagates.
    #[instrument(level = "debug", skip_all, fields(source = self.id, query_len = query.len()))]
    pub fn search(&mut self, query: &str) -> Result<Vec<Arc<T>>> {
        self.index_if_needed()?;

        let indexed = match self.indexed.as_deref() {
            Some(items) if !items.is_empty() => items,
            _ => {
                self.last_search_data.clear();
                return Ok(Vec::new());
            }
        };

        let filtered = self.filter_cache.filter_and_cache(
            self.current_filter.as_ref(),
            indexed,
            self.strategy,
        );

        self.last_search_data.clear();
        Ok(self.perform_search(query, &filtered))
    }

    /// Filter `items`, reusing the cached result for the same filter instance
    pub fn filter_and_cache(
        &mut self,
        filter: Option<&Arc<dyn Filter<T>>>,
        items: &[Arc<T>],
    ) -> Vec<Arc<T>> {
        self.filter_cache
            .filter_and_cache(filter, items, self.strategy)
    }

    /// Fuzzy-match `items` against `query`, recording metadata for each hit.
    ///
    /// Every string of every weighted term group is tried; each hit
    /// overwrites the item's entry, so the last matching group wins. An
    /// empty query matches everything with score 0.
    pub fn perform_search(&mut self, query: &str, items: &[Arc<T>]) -> Vec<Arc<T>> {
        let query = query.to_lowercase();

        if query.trim().is_empty() {
            for item in items {
                self.last_search_data
                    .insert(ItemKey::of(item), SearchMatch::default());
            }
            return items.to_vec();
        }

        let mut results = Vec::new();
        for item in items {
            let mut matched = false;
            for group in item.search_terms() {
                for term in group.terms {
                    let Some(m) = self.matcher.fuzzy_match(&query, &term) else {
                        continue;
                    };
                    self.last_search_data.insert(
                        ItemKey::of(item),
                        SearchMatch {
                            score: weighted_score(m.score, group.weight),
                            matched_string: term,
                            matched_indices: m.indices,
                        },
                    );
                    matched = true;
                }
            }
            if matched {
                results.push(Arc::clone(item));
            }
        }

        debug!(
            source = self.id,
            candidates = items.len(),
            matches = results.len(),
            "Search complete"
        );
        results
    }

    /// Metadata recorded by the most recent `search`
    pub fn last_search_data(&self) -> &HashMap<ItemKey, SearchMatch> {
        &self.last_search_data
    }

    pub fn search_data(&self, item: &Arc<T>) -> Option<&SearchMatch> {
        self.last_search_data.get(&ItemKey::of(item))
    }
}

impl<T: Searchable> std::fmt::Debug for SearchIndex<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndex")
            .field("id", &self.id)
            .field("unindexed", &self.unindexed.len())
            .field("indexed", &self.indexed.as_ref().map(Vec::len))
            .field("has_filter", &self.current_filter.is_some())
            .field("strategy", &self.strategy)
            .finish()
    }
}

#[cfg(test)]
#[path = "search_index_tests.rs"]
mod tests;
