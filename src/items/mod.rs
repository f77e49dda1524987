//! Searchable items
//!
//! - `types` - `SearchItem` record and the `Searchable` trait
//! - `full_name` - parsing of `category/path/name` strings

mod full_name;
mod types;

pub use full_name::{split_full_name, ParsedFullName};
pub use types::{SearchItem, SearchTerms, Searchable, NAME_WEIGHT, SECONDARY_WEIGHT};
