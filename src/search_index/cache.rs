//! Round-robin filter result cache
//!
//! A fixed number of slots and a write cursor. A miss overwrites the slot
//! under the cursor and advances it, no matter how recently or how often
//! that slot was hit. An entry that was just computed is evicted again once
//! the cursor wraps back to it.

use std::sync::Arc;

use tracing::debug;

use crate::filter::{same_filter, Filter};

use super::parallel::{perform_filter, FilterStrategy};

struct CacheEntry<T> {
    filter: Arc<dyn Filter<T>>,
    items: Vec<Arc<T>>,
}

pub struct FilterCache<T> {
    slots: Vec<Option<CacheEntry<T>>>,
    cursor: usize,
}

impl<T: Send + Sync> FilterCache<T> {
    pub fn new(capacity: usize) -> Self {
        FilterCache {
            slots: (0..capacity.max(1)).map(|_| None).collect(),
            cursor: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slot the next miss will overwrite
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, filter: &Arc<dyn Filter<T>>) -> Option<&[Arc<T>]> {
        self.slots
            .iter()
            .flatten()
            .find(|entry| same_filter(&entry.filter, filter))
            .map(|entry| entry.items.as_slice())
    }

    pub fn contains(&self, filter: &Arc<dyn Filter<T>>) -> bool {
        self.get(filter).is_some()
    }

    /// Store a result at the cursor and advance it
    pub fn insert(&mut self, filter: Arc<dyn Filter<T>>, items: Vec<Arc<T>>) {
        let slot = self.cursor;
        self.slots[slot] = Some(CacheEntry { filter, items });
        self.cursor = (self.cursor + 1) % self.slots.len();
    }

    /// Filter `items`, reusing a cached result for the same filter instance.
    ///
    /// No filter means every item passes; that path is never cached.
    pub fn filter_and_cache(
        &mut self,
        filter: Option<&Arc<dyn Filter<T>>>,
        items: &[Arc<T>],
        strategy: FilterStrategy,
    ) -> Vec<Arc<T>> {
        let Some(filter) = filter else {
            return items.to_vec();
        };

        if let Some(cached) = self.get(filter) {
            debug!(count = cached.len(), "Filter cache hit");
            return cached.to_vec();
        }

        let filtered = perform_filter(filter.as_ref(), items, strategy);
        debug!(
            slot = self.cursor,
            input = items.len(),
            output = filtered.len(),
            "Filter cache miss"
        );
        self.insert(Arc::clone(filter), filtered.clone());
        filtered
    }
}
