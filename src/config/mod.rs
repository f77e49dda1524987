//! Configuration module - search tuning and storage locations
//!
//! This module provides functionality for:
//! - Loading configuration from ~/.quickpick/config.json
//! - Default values for all settings
//! - Type definitions for config structures
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - Configuration struct definitions
//! - `loader` - File system loading and parsing

mod defaults;
mod loader;
mod types;

pub use defaults::{
    DEFAULT_FILTER_CACHE_CAPACITY, DEFAULT_PARALLEL_FILTER_THRESHOLD,
    DEFAULT_SLOW_SEARCH_THRESHOLD_MS,
};

pub use types::SearchConfig;

pub use loader::{default_config_path, load_config, load_config_from};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
