//! Sequential / fork-join filtering
//!
//! Small sources are filtered on the calling thread. Larger ones are split
//! into one contiguous partition per worker; each worker fills its own list
//! and the lists are joined in partition order, so both paths return the
//! passing items in their original order.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use crate::config::SearchConfig;
use crate::filter::Filter;

/// When and how wide to filter in parallel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterStrategy {
    /// Inputs with at most this many items stay sequential
    pub parallel_threshold: usize,
    /// Number of partitions on the parallel path
    pub workers: usize,
}

impl FilterStrategy {
    pub fn new(parallel_threshold: usize, workers: usize) -> Self {
        FilterStrategy {
            parallel_threshold,
            workers: workers.max(1),
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.parallel_filter_threshold, config.get_filter_workers())
    }
}

impl Default for FilterStrategy {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

/// Items per partition: `len` split into `workers` ceil-sized chunks
pub fn partition_size(len: usize, workers: usize) -> usize {
    len.div_ceil(workers.max(1)).max(1)
}

pub fn perform_filter<T: Send + Sync>(
    filter: &dyn Filter<T>,
    items: &[Arc<T>],
    strategy: FilterStrategy,
) -> Vec<Arc<T>> {
    if items.len() <= strategy.parallel_threshold {
        return filter_sequential(filter, items);
    }

    let chunk = partition_size(items.len(), strategy.workers);
    debug!(
        items = items.len(),
        workers = strategy.workers,
        chunk,
        "Filtering in parallel"
    );

    let partitions: Vec<Vec<Arc<T>>> = items
        .par_chunks(chunk)
        .map(|partition| filter_sequential(filter, partition))
        .collect();

    partitions.concat()
}

fn filter_sequential<T>(filter: &dyn Filter<T>, items: &[Arc<T>]) -> Vec<Arc<T>> {
    items
        .iter()
        .filter(|item| filter.matches(item))
        .cloned()
        .collect()
}
