//! Library - searches several item sources as one
//!
//! A `Library` owns one `SearchIndex` per source, runs each query across all
//! of them, merges the per-source matches and orders the combined list:
//!
//! - **Empty query**: by item priority (lower first), ties broken by the
//!   adapter's `sort_comparison`.
//! - **Non-empty query**: by weighted match score, highest first.
//!
//! It also exposes favorites and collapsed categories backed by a
//! `Preferences` store. The favorites view is resolved against a
//! `full name -> item` map built on the first search and never rebuilt, so
//! create a new `Library` if the sources change.
//!
//! # Module Structure
//!
//! - `adapter` - `Adapter` trait and the default `NameOrderAdapter`

mod adapter;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, instrument};

use crate::config::SearchConfig;
use crate::error::Result;
use crate::filter::Filter;
use crate::items::Searchable;
use crate::logging::log_perf;
use crate::matcher::{FuzzyMatcher, NucleoMatcher};
use crate::preferences::Preferences;
use crate::search_index::{ItemKey, SearchIndex, SearchMatch};

pub use adapter::{Adapter, NameOrderAdapter};

type ScoreMap = HashMap<ItemKey, SearchMatch>;

fn score_of<T>(scores: &ScoreMap, item: &Arc<T>) -> Option<i64> {
    scores.get(&ItemKey::of(item)).map(|m| m.score)
}

/// Highest recorded score among one source's results (None when empty)
fn local_max<T>(results: &[Arc<T>], scores: &ScoreMap) -> Option<i64> {
    let mut best = None;
    for item in results {
        let score = score_of(scores, item);
        if score > best {
            best = score;
        }
    }
    best
}

/// Put `local[0]` at the front of `results`, moving the old front to the
/// end, then append the rest of `local`.
///
/// Every query ends in a full sort, so this ordering never reaches callers.
fn splice_best_first<T>(results: &mut Vec<Arc<T>>, local: Vec<Arc<T>>) {
    let mut local = local.into_iter();
    let Some(new_first) = local.next() else {
        return;
    };
    match results.first().cloned() {
        Some(previous_first) => {
            results.push(previous_first);
            results[0] = new_first;
        }
        None => results.push(new_first),
    }
    results.extend(local);
}

pub struct Library<T: Searchable> {
    indexes: Vec<SearchIndex<T>>,
    adapter: Arc<dyn Adapter<T>>,
    preferences: Arc<dyn Preferences>,
    context: String,
    /// Match metadata from every source for the current query
    scores: ScoreMap,
    lookup: Option<HashMap<String, Arc<T>>>,
    favorites: Option<Vec<Arc<T>>>,
    slow_search_threshold_ms: u64,
}

impl<T: Searchable> Library<T> {
    /// Create a library over `sources` with default config and the nucleo matcher.
    ///
    /// Sources get ids 0..N-1 in the order given.
    pub fn new<S, I>(
        sources: S,
        adapter: Arc<dyn Adapter<T>>,
        preferences: Arc<dyn Preferences>,
        context: &str,
    ) -> Self
    where
        S: IntoIterator<Item = I>,
        I: IntoIterator<Item = T>,
    {
        Self::with_config(
            sources,
            adapter,
            preferences,
            context,
            &SearchConfig::default(),
            Arc::new(NucleoMatcher::new()),
        )
    }

    pub fn with_config<S, I>(
        sources: S,
        adapter: Arc<dyn Adapter<T>>,
        preferences: Arc<dyn Preferences>,
        context: &str,
        config: &SearchConfig,
        matcher: Arc<dyn FuzzyMatcher>,
    ) -> Self
    where
        S: IntoIterator<Item = I>,
        I: IntoIterator<Item = T>,
    {
        let indexes = sources
            .into_iter()
            .enumerate()
            .map(|(id, items)| SearchIndex::with_config(id, items, config, Arc::clone(&matcher)))
            .collect();

        Library {
            indexes,
            adapter,
            preferences,
            context: context.to_string(),
            scores: HashMap::new(),
            lookup: None,
            favorites: None,
            slow_search_threshold_ms: config.slow_search_threshold_ms,
        }
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn indexes(&self) -> &[SearchIndex<T>] {
        &self.indexes
    }

    /// Source by id, e.g. to give it its own filter
    pub fn index_mut(&mut self, id: usize) -> Option<&mut SearchIndex<T>> {
        self.indexes.get_mut(id)
    }

    /// Apply the same filter to every source
    pub fn set_filter(&mut self, filter: Option<Arc<dyn Filter<T>>>) {
        for index in &mut self.indexes {
            index.set_filter(filter.clone());
        }
    }

    pub fn adapter(&self) -> &Arc<dyn Adapter<T>> {
        &self.adapter
    }

    pub fn preferences(&self) -> &Arc<dyn Preferences> {
        &self.preferences
    }

    /// Search every source and return the merged, ordered matches.
    ///
    /// The first call, whatever the query, also resolves the favorites view.
    /// A failing item build in any source aborts the search.
    #[instrument(level = "debug", skip_all, fields(context = %self.context, query_len = query.len()))]
    pub fn search(&mut self, query: &str) -> Result<Vec<Arc<T>>> {
        let started = Instant::now();
        self.scores.clear();
        let lowered = query.to_lowercase();

        let mut results: Vec<Arc<T>> = Vec::new();
        let mut best_score: Option<i64> = None;

        for index in &mut self.indexes {
            let local = index.search(&lowered)?;
            self.scores.extend(
                index
                    .last_search_data()
                    .iter()
                    .map(|(key, data)| (*key, data.clone())),
            );

            let local_best = local_max(&local, &self.scores);
            if local_best > best_score {
                best_score = local_best;
                splice_best_first(&mut results, local);
            } else {
                results.extend(local);
            }
        }

        if query.is_empty() {
            let adapter = &self.adapter;
            results.sort_by(|a, b| {
                a.priority()
                    .cmp(&b.priority())
                    .then_with(|| adapter.sort_comparison(a, b))
            });
        } else {
            let scores = &self.scores;
            if let Some(missing) = results.iter().find(|i| score_of(scores, *i).is_none()) {
                crate::debug_panic!("No search data for '{}'", missing.full_name());
            }
            results.sort_by(|a, b| score_of(scores, b).cmp(&score_of(scores, a)));
        }

        if self.lookup.is_none() {
            self.build_favorites(query, &results)?;
        }

        debug!(
            sources = self.indexes.len(),
            results = results.len(),
            best_score,
            "Library search complete"
        );
        log_perf(
            "library_search",
            started.elapsed().as_millis() as u64,
            self.slow_search_threshold_ms,
        );
        Ok(results)
    }

    /// Build the `full name -> item` map and the favorites view, once.
    ///
    /// An empty query's results are used directly; otherwise an empty-query
    /// search is run first. The current query's scores are kept either way.
    fn build_favorites(&mut self, query: &str, results: &[Arc<T>]) -> Result<()> {
        if !query.is_empty() {
            let scores = std::mem::take(&mut self.scores);
            let outcome = self.search("");
            self.scores = scores;
            return outcome.map(|_| ());
        }

        let lookup: HashMap<String, Arc<T>> = results
            .iter()
            .map(|item| (item.full_name(), Arc::clone(item)))
            .collect();

        let stored = self.preferences.get_favorites(&self.context);
        let favorites: Vec<Arc<T>> = stored
            .iter()
            .filter_map(|name| lookup.get(name).cloned())
            .collect();

        debug!(
            stored = stored.len(),
            resolved = favorites.len(),
            "Resolved favorites"
        );
        self.lookup = Some(lookup);
        self.favorites = Some(favorites);
        Ok(())
    }

    /// Match metadata for `item` from the most recent search
    pub fn search_data(&self, item: &Arc<T>) -> Option<&SearchMatch> {
        self.scores.get(&ItemKey::of(item))
    }

    /// Favorites resolved to items; empty until the first search
    pub fn favorites(&self) -> &[Arc<T>] {
        self.favorites.as_deref().unwrap_or(&[])
    }

    /// Item by full name, once the first search has built the lookup
    pub fn find(&self, full_name: &str) -> Option<&Arc<T>> {
        self.lookup.as_ref()?.get(full_name)
    }

    pub fn is_favorite(&self, item: &T) -> bool {
        let full_name = item.full_name();
        self.preferences
            .get_favorites(&self.context)
            .iter()
            .any(|name| *name == full_name)
    }

    pub fn set_favorite(&mut self, item: &Arc<T>, favorite: bool) {
        let full_name = item.full_name();
        self.preferences
            .set_favorite(&self.context, &full_name, favorite);

        if let Some(favorites) = self.favorites.as_mut() {
            let present = favorites.iter().any(|f| f.full_name() == full_name);
            if favorite && !present {
                favorites.push(Arc::clone(item));
            } else if !favorite {
                favorites.retain(|f| f.full_name() != full_name);
            }
        }
    }

    pub fn clear_favorites(&mut self) {
        self.preferences.clear_favorites(&self.context);
        if let Some(favorites) = self.favorites.as_mut() {
            favorites.clear();
        }
    }

    pub fn is_collapsed(&self, category_path: &str) -> bool {
        self.preferences
            .get_collapsed(&self.context)
            .iter()
            .any(|path| path == category_path)
    }

    pub fn set_collapsed(&self, category_path: &str, collapsed: bool) {
        self.preferences
            .set_collapsed(&self.context, category_path, collapsed);
    }

    /// Display style for `item`: its own style name, else the adapter's style
    /// for its category path or the nearest parent category that has one.
    pub fn style_name<'a>(&'a self, item: &'a T) -> Option<&'a str> {
        let entry = item.item();
        if let Some(style) = entry.style_name.as_deref() {
            return Some(style);
        }

        let styles = self.adapter.category_path_style_names();
        let mut path = entry.category_path.as_str();
        while !path.is_empty() {
            if let Some(style) = styles.get(path) {
                return Some(style);
            }
            path = match path.rfind('/') {
                Some(pos) => &path[..pos],
                None => "",
            };
        }
        None
    }
}

#[cfg(test)]
#[path = "library_tests.rs"]
mod tests;
