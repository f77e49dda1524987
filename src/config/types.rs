//! Configuration type definitions

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults::*;

/// Tuning knobs for indexing, filtering and preferences storage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    /// Sources larger than this are filtered in parallel (default: 100)
    #[serde(default = "default_parallel_filter_threshold")]
    pub parallel_filter_threshold: usize,
    /// Filter results remembered per source (default: 5)
    #[serde(default = "default_filter_cache_capacity")]
    pub filter_cache_capacity: usize,
    /// Partition count for parallel filtering (None = available parallelism)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_workers: Option<usize>,
    /// Threshold above which a search is logged as slow (default: 16)
    #[serde(default = "default_slow_search_threshold_ms")]
    pub slow_search_threshold_ms: u64,
    /// Override for the preferences directory (tilde is expanded)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences_dir: Option<String>,
}

fn default_parallel_filter_threshold() -> usize {
    DEFAULT_PARALLEL_FILTER_THRESHOLD
}
fn default_filter_cache_capacity() -> usize {
    DEFAULT_FILTER_CACHE_CAPACITY
}
fn default_slow_search_threshold_ms() -> u64 {
    DEFAULT_SLOW_SEARCH_THRESHOLD_MS
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            parallel_filter_threshold: DEFAULT_PARALLEL_FILTER_THRESHOLD,
            filter_cache_capacity: DEFAULT_FILTER_CACHE_CAPACITY,
            filter_workers: None,
            slow_search_threshold_ms: DEFAULT_SLOW_SEARCH_THRESHOLD_MS,
            preferences_dir: None,
        }
    }
}

impl SearchConfig {
    /// Cache capacity, never less than one slot
    pub fn get_filter_cache_capacity(&self) -> usize {
        self.filter_cache_capacity.max(1)
    }

    /// Number of partitions used by the parallel filter path
    pub fn get_filter_workers(&self) -> usize {
        self.filter_workers
            .filter(|&w| w > 0)
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(4)
            })
    }

    /// Directory holding per-tool preferences files, tilde-expanded
    pub fn get_preferences_dir(&self) -> PathBuf {
        let dir = self
            .preferences_dir
            .as_deref()
            .unwrap_or(DEFAULT_PREFERENCES_DIR);
        PathBuf::from(shellexpand::tilde(dir).as_ref())
    }
}
