//! Quick Pick - fuzzy search over categorized items
//!
//! This library provides the search side of a quick-pick box: items grouped
//! into independent sources, optional per-source filters with a small result
//! cache, fuzzy matching with weighted terms, and favorites backed by a
//! preferences store.

pub mod config;
pub mod error;
pub mod filter;
pub mod items;
pub mod library;
pub mod logging;
pub mod matcher;
pub mod preferences;
pub mod search_index;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use filter::{Filter, FunctorFilter};
pub use items::{SearchItem, Searchable};
pub use library::{Adapter, Library, NameOrderAdapter};
pub use matcher::{FuzzyMatcher, NucleoMatcher, SubsequenceMatcher};
pub use preferences::{InMemoryPreferences, JsonPreferences, Preferences};
pub use search_index::{SearchIndex, SearchMatch};
