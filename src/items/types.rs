//! Item type definitions
//!
//! `SearchItem` is the plain record every source produces. Sources that need
//! to do expensive work before the item is searchable (fetching children,
//! rendering help text) wrap it in their own type and implement `Searchable`.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, SearchError};

use super::full_name::split_full_name;

/// Weight applied to a match against the item's own name
pub const NAME_WEIGHT: f32 = 1.0;
/// Weight applied to matches against the full path and synonyms
pub const SECONDARY_WEIGHT: f32 = 0.5;

/// A single searchable entry
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
    /// Slash-separated category, e.g. "Math/Trig". Empty for top-level items.
    #[serde(default)]
    pub category_path: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_name: Option<String>,
    /// Lower sorts first when the query is empty
    #[serde(default)]
    pub priority: i32,
}

/// A group of strings matched with the same weight
#[derive(Clone, Debug, PartialEq)]
pub struct SearchTerms {
    pub terms: Vec<String>,
    pub weight: f32,
}

impl SearchItem {
    pub fn new(category_path: impl Into<String>, name: impl Into<String>) -> Self {
        SearchItem {
            category_path: category_path.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Build an item from `category/path/name`.
    ///
    /// Malformed input is logged and the best-effort split is kept.
    pub fn from_full_name(full_name: &str) -> Self {
        let mut item = SearchItem::default();
        if let Err(e) = item.set_full_name(full_name) {
            warn!(error = %e, "Item created from malformed full name");
        }
        item
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms = Some(synonyms.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_style_name(mut self, style_name: impl Into<String>) -> Self {
        self.style_name = Some(style_name.into());
        self
    }

    /// `category_path/name`, or whichever half is non-empty
    pub fn full_name(&self) -> String {
        if self.category_path.is_empty() {
            self.name.clone()
        } else if self.name.is_empty() {
            self.category_path.clone()
        } else {
            format!("{}/{}", self.category_path, self.name)
        }
    }

    /// Full name with separators turned into spaces, for matching
    pub fn searchable_full_name(&self) -> String {
        self.full_name().replace('/', " ")
    }

    pub fn parent_categories(&self) -> Vec<&str> {
        if self.category_path.is_empty() {
            return Vec::new();
        }
        self.category_path.split('/').collect()
    }

    /// Assign name and category path from a full name.
    ///
    /// The split on the last `/` is always applied. An error is returned when
    /// the input is malformed so the caller can report it.
    pub fn set_full_name(&mut self, full_name: &str) -> Result<()> {
        let parsed = split_full_name(full_name);
        self.category_path = parsed.category_path.to_string();
        self.name = parsed.name.to_string();

        match parsed.problem {
            Some(reason) => Err(SearchError::MalformedFullName {
                full_name: full_name.to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }

    /// Weighted term groups: name, searchable full name, synonyms
    pub fn search_terms(&self) -> Vec<SearchTerms> {
        vec![
            SearchTerms {
                terms: vec![self.name.clone()],
                weight: NAME_WEIGHT,
            },
            SearchTerms {
                terms: vec![self.searchable_full_name()],
                weight: SECONDARY_WEIGHT,
            },
            SearchTerms {
                terms: self.synonyms.clone().unwrap_or_default(),
                weight: SECONDARY_WEIGHT,
            },
        ]
    }
}

/// Anything a search index can hold.
///
/// `build` runs once per item while its source is indexed and may fill in
/// expensive fields; an error aborts the query that triggered indexing.
pub trait Searchable: Send + Sync + 'static {
    fn item(&self) -> &SearchItem;

    fn build(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn search_terms(&self) -> Vec<SearchTerms> {
        self.item().search_terms()
    }

    fn full_name(&self) -> String {
        self.item().full_name()
    }

    fn priority(&self) -> i32 {
        self.item().priority
    }
}

impl Searchable for SearchItem {
    fn item(&self) -> &SearchItem {
        self
    }
}
