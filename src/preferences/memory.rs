//! Non-persistent preferences store

use parking_lot::Mutex;

use super::{Preferences, PreferencesData};

/// Preferences kept in memory for the lifetime of the process
#[derive(Debug, Default)]
pub struct InMemoryPreferences {
    data: Mutex<PreferencesData>,
}

impl InMemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: PreferencesData) -> Self {
        InMemoryPreferences {
            data: Mutex::new(data),
        }
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> PreferencesData {
        self.data.lock().clone()
    }
}

impl Preferences for InMemoryPreferences {
    fn get_favorites(&self, context: &str) -> Vec<String> {
        self.data.lock().favorites(context)
    }

    fn set_favorite(&self, context: &str, full_name: &str, favorite: bool) {
        self.data.lock().set_favorite(context, full_name, favorite);
    }

    fn clear_favorites(&self, context: &str) {
        self.data.lock().clear_favorites(context);
    }

    fn get_collapsed(&self, context: &str) -> Vec<String> {
        self.data.lock().collapsed(context)
    }

    fn set_collapsed(&self, context: &str, category_path: &str, collapsed: bool) {
        self.data
            .lock()
            .set_collapsed(context, category_path, collapsed);
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.data.lock().bools.get(key).copied().unwrap_or(default)
    }

    fn set_bool(&self, key: &str, value: bool) {
        self.data.lock().set_bool(key, value);
    }

    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.data.lock().ints.get(key).copied().unwrap_or(default)
    }

    fn set_int(&self, key: &str, value: i64) {
        self.data.lock().set_int(key, value);
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        self.data
            .lock()
            .strings
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn set_string(&self, key: &str, value: &str) {
        self.data.lock().set_string(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let prefs = InMemoryPreferences::new();
        assert!(prefs.get_bool("flag", true));
        assert_eq!(prefs.get_int("count", 7), 7);
        assert_eq!(prefs.get_string("name", "none"), "none");
        assert!(prefs.get_favorites("ctx").is_empty());
    }

    #[test]
    fn test_round_trip_through_trait() {
        let prefs = InMemoryPreferences::new();
        prefs.set_bool("flag", false);
        prefs.set_int("count", -3);
        prefs.set_string("name", "graph");
        prefs.set_favorite("ctx", "Math/Add", true);
        prefs.set_collapsed("ctx", "Math", true);

        assert!(!prefs.get_bool("flag", true));
        assert_eq!(prefs.get_int("count", 0), -3);
        assert_eq!(prefs.get_string("name", ""), "graph");
        assert_eq!(prefs.get_favorites("ctx"), vec!["Math/Add"]);
        assert_eq!(prefs.get_collapsed("ctx"), vec!["Math"]);

        prefs.clear_favorites("ctx");
        assert!(prefs.snapshot().favorites.is_empty());
    }
}
