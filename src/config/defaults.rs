//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Sources with at most this many items are filtered on the calling thread
pub const DEFAULT_PARALLEL_FILTER_THRESHOLD: usize = 100;

/// Number of (filter, result) pairs each search index remembers
pub const DEFAULT_FILTER_CACHE_CAPACITY: usize = 5;

/// Searches slower than this are logged as warnings
pub const DEFAULT_SLOW_SEARCH_THRESHOLD_MS: u64 = 16;

/// Location of the optional config file
pub const DEFAULT_CONFIG_PATH: &str = "~/.quickpick/config.json";

/// Directory holding one preferences file per tool
pub const DEFAULT_PREFERENCES_DIR: &str = "~/.quickpick/preferences";
