//! Preferences - favorites, collapsed categories and generic settings
//!
//! A preferences store is scoped to one tool; favorites and collapsed
//! categories are further keyed by a context string so one tool can keep
//! separate sets per search box.
//!
//! - `memory` - `InMemoryPreferences`, nothing is persisted
//! - `json` - `JsonPreferences`, one JSON file per tool

mod json;
mod memory;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use json::JsonPreferences;
pub use memory::InMemoryPreferences;

/// Key/value facility consumed by the library.
///
/// Setters take `&self`; implementations use interior mutability and are
/// responsible for their own durability.
pub trait Preferences: Send + Sync {
    /// Favorite full names for `context`, in the order they were added
    fn get_favorites(&self, context: &str) -> Vec<String>;
    fn set_favorite(&self, context: &str, full_name: &str, favorite: bool);
    fn clear_favorites(&self, context: &str);

    /// Collapsed category paths for `context`
    fn get_collapsed(&self, context: &str) -> Vec<String>;
    fn set_collapsed(&self, context: &str, category_path: &str, collapsed: bool);

    fn get_bool(&self, key: &str, default: bool) -> bool;
    fn set_bool(&self, key: &str, value: bool);
    fn get_int(&self, key: &str, default: i64) -> i64;
    fn set_int(&self, key: &str, value: i64);
    fn get_string(&self, key: &str, default: &str) -> String;
    fn set_string(&self, key: &str, value: &str);
}

/// Everything a preferences store holds for one tool.
///
/// Mutators return whether anything changed so stores can skip writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferencesData {
    #[serde(default)]
    pub favorites: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub collapsed: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub bools: BTreeMap<String, bool>,
    #[serde(default)]
    pub ints: BTreeMap<String, i64>,
    #[serde(default)]
    pub strings: BTreeMap<String, String>,
}

/// Add or remove `value` from an ordered set stored as a list
fn toggle_member(list: &mut Vec<String>, value: &str, present: bool) -> bool {
    let position = list.iter().position(|v| v == value);
    match (position, present) {
        (None, true) => {
            list.push(value.to_string());
            true
        }
        (Some(pos), false) => {
            list.remove(pos);
            true
        }
        _ => false,
    }
}

fn set_member(
    map: &mut BTreeMap<String, Vec<String>>,
    context: &str,
    value: &str,
    present: bool,
) -> bool {
    let list = map.entry(context.to_string()).or_default();
    let changed = toggle_member(list, value, present);
    if list.is_empty() {
        map.remove(context);
    }
    changed
}

impl PreferencesData {
    pub fn favorites(&self, context: &str) -> Vec<String> {
        self.favorites.get(context).cloned().unwrap_or_default()
    }

    pub fn set_favorite(&mut self, context: &str, full_name: &str, favorite: bool) -> bool {
        set_member(&mut self.favorites, context, full_name, favorite)
    }

    pub fn clear_favorites(&mut self, context: &str) -> bool {
        self.favorites.remove(context).is_some()
    }

    pub fn collapsed(&self, context: &str) -> Vec<String> {
        self.collapsed.get(context).cloned().unwrap_or_default()
    }

    pub fn set_collapsed(&mut self, context: &str, category_path: &str, collapsed: bool) -> bool {
        set_member(&mut self.collapsed, context, category_path, collapsed)
    }

    pub fn set_bool(&mut self, key: &str, value: bool) -> bool {
        self.bools.insert(key.to_string(), value) != Some(value)
    }

    pub fn set_int(&mut self, key: &str, value: i64) -> bool {
        self.ints.insert(key.to_string(), value) != Some(value)
    }

    pub fn set_string(&mut self, key: &str, value: &str) -> bool {
        self.strings
            .insert(key.to_string(), value.to_string())
            .as_deref()
            != Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_favorite_keeps_insertion_order_without_duplicates() {
        let mut data = PreferencesData::default();
        assert!(data.set_favorite("graph", "Math/Add", true));
        assert!(data.set_favorite("graph", "Logic/And", true));
        assert!(!data.set_favorite("graph", "Math/Add", true));
        assert_eq!(data.favorites("graph"), vec!["Math/Add", "Logic/And"]);
    }

    #[test]
    fn test_unset_favorite_removes_and_drops_empty_context() {
        let mut data = PreferencesData::default();
        data.set_favorite("graph", "Math/Add", true);
        assert!(data.set_favorite("graph", "Math/Add", false));
        assert!(!data.set_favorite("graph", "Math/Add", false));
        assert!(data.favorites("graph").is_empty());
        assert!(data.favorites.is_empty());
    }

    #[test]
    fn test_contexts_are_independent() {
        let mut data = PreferencesData::default();
        data.set_favorite("graph", "Math/Add", true);
        data.set_collapsed("graph", "Math", true);
        assert!(data.favorites("shader").is_empty());
        assert!(data.collapsed("shader").is_empty());
        assert!(data.clear_favorites("graph"));
        assert!(!data.clear_favorites("graph"));
        assert_eq!(data.collapsed("graph"), vec!["Math"]);
    }

    #[test]
    fn test_scalar_setters_report_changes() {
        let mut data = PreferencesData::default();
        assert!(data.set_bool("show_help", true));
        assert!(!data.set_bool("show_help", true));
        assert!(data.set_int("max_results", 50));
        assert!(!data.set_int("max_results", 50));
        assert!(data.set_string("last_query", "add"));
        assert!(!data.set_string("last_query", "add"));
        assert!(data.set_string("last_query", "sub"));
    }

    #[test]
    fn test_missing_sections_deserialize_to_empty() {
        let data: PreferencesData = serde_json::from_str(r#"{"bools": {"a": true}}"#).unwrap();
        assert!(data.favorites.is_empty());
        assert_eq!(data.bools.get("a"), Some(&true));
    }
}
