//! Item filters
//!
//! A filter is a predicate applied to a source's indexed items before the
//! fuzzy search runs. Search indexes cache filter results keyed by the
//! filter's `Arc` identity, so hand the same `Arc` back to reuse a result;
//! two structurally equal filters in different `Arc`s are cached separately.

use std::sync::Arc;

/// Boolean predicate over items.
///
/// Must be pure: large sources are filtered from several worker threads.
pub trait Filter<T>: Send + Sync {
    fn matches(&self, item: &T) -> bool;
}

impl<T, F> Filter<T> for F
where
    F: Fn(&T) -> bool + Send + Sync,
{
    fn matches(&self, item: &T) -> bool {
        self(item)
    }
}

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Conjunction of predicate closures, evaluated in insertion order.
///
/// A functor filter with no predicates matches everything.
pub struct FunctorFilter<T> {
    predicates: Vec<Predicate<T>>,
}

impl<T> FunctorFilter<T> {
    pub fn new() -> Self {
        FunctorFilter {
            predicates: Vec::new(),
        }
    }

    pub fn with_filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.predicates.push(Box::new(predicate));
        self
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl<T> Default for FunctorFilter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Filter<T> for FunctorFilter<T> {
    fn matches(&self, item: &T) -> bool {
        self.predicates.iter().all(|predicate| predicate(item))
    }
}

impl<T> std::fmt::Debug for FunctorFilter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctorFilter")
            .field("predicates", &self.predicates.len())
            .finish()
    }
}

/// Identity comparison for shared filters.
///
/// Compares data pointers only; vtable pointers for the same type can differ
/// between codegen units.
pub fn same_filter<T>(a: &Arc<dyn Filter<T>>, b: &Arc<dyn Filter<T>>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
