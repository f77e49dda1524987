//! JSON file-backed preferences store
//!
//! One file per tool (`<preferences dir>/<tool>.json`). Every change is
//! written through immediately using write-temp-then-rename; a failed write
//! is logged and the in-memory value is kept.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, info, instrument};

use crate::config::SearchConfig;
use crate::error::{Result, ResultExt, SearchError};

use super::{Preferences, PreferencesData};

#[derive(Debug)]
pub struct JsonPreferences {
    tool: String,
    file_path: PathBuf,
    data: Mutex<PreferencesData>,
}

/// File name for a tool, with path separators neutralized
fn tool_file_name(tool: &str) -> String {
    let safe: String = tool
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    format!("{}.json", safe)
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SearchError {
    let path = path.to_path_buf();
    move |source| SearchError::Preferences { path, source }
}

impl JsonPreferences {
    /// Store for `tool` under the configured preferences directory
    pub fn for_tool(tool: &str, config: &SearchConfig) -> Self {
        let file_path = config.get_preferences_dir().join(tool_file_name(tool));
        Self::with_path(tool, file_path)
    }

    /// Store backed by an explicit file (for testing)
    pub fn with_path(tool: &str, file_path: PathBuf) -> Self {
        JsonPreferences {
            tool: tool.to_string(),
            file_path,
            data: Mutex::new(PreferencesData::default()),
        }
    }

    /// Create the store and load it, starting empty if loading fails
    pub fn open(tool: &str, config: &SearchConfig) -> Self {
        let prefs = Self::for_tool(tool, config);
        prefs.load().log_err();
        prefs
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Load preferences from disk.
    ///
    /// A missing file leaves the store empty.
    #[instrument(name = "preferences_load", skip(self), fields(tool = %self.tool))]
    pub fn load(&self) -> Result<()> {
        if !self.file_path.exists() {
            info!(path = %self.file_path.display(), "Preferences file not found, starting fresh");
            return Ok(());
        }

        let content =
            std::fs::read_to_string(&self.file_path).map_err(io_error(&self.file_path))?;
        let data: PreferencesData = serde_json::from_str(&content)?;

        info!(
            path = %self.file_path.display(),
            contexts = data.favorites.len(),
            "Loaded preferences"
        );
        *self.data.lock() = data;
        Ok(())
    }

    /// Save preferences to disk using atomic write (write temp + rename)
    #[instrument(name = "preferences_save", skip(self), fields(tool = %self.tool))]
    pub fn save(&self) -> Result<()> {
        let data = self.data.lock();
        self.write_file(&data)
    }

    /// Write `data` out; callers hold the data lock so writes never interleave
    fn write_file(&self, data: &PreferencesData) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error(parent))?;
        }

        let json = serde_json::to_string_pretty(data)?;

        let temp_path = self.file_path.with_extension("json.tmp");
        std::fs::write(&temp_path, &json).map_err(io_error(&temp_path))?;
        std::fs::rename(&temp_path, &self.file_path).map_err(io_error(&self.file_path))?;

        debug!(
            path = %self.file_path.display(),
            bytes = json.len(),
            "Saved preferences (atomic)"
        );
        Ok(())
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> PreferencesData {
        self.data.lock().clone()
    }

    /// Apply a mutation and persist it if anything changed, under one lock
    fn update(&self, mutate: impl FnOnce(&mut PreferencesData) -> bool) {
        let mut data = self.data.lock();
        if mutate(&mut *data) {
            self.write_file(&data).log_err();
        }
    }
}

impl Preferences for JsonPreferences {
    fn get_favorites(&self, context: &str) -> Vec<String> {
        self.data.lock().favorites(context)
    }

    fn set_favorite(&self, context: &str, full_name: &str, favorite: bool) {
        self.update(|data| data.set_favorite(context, full_name, favorite));
    }

    fn clear_favorites(&self, context: &str) {
        self.update(|data| data.clear_favorites(context));
    }

    fn get_collapsed(&self, context: &str) -> Vec<String> {
        self.data.lock().collapsed(context)
    }

    fn set_collapsed(&self, context: &str, category_path: &str, collapsed: bool) {
        self.update(|data| data.set_collapsed(context, category_path, collapsed));
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.data.lock().bools.get(key).copied().unwrap_or(default)
    }

    fn set_bool(&self, key: &str, value: bool) {
        self.update(|data| data.set_bool(key, value));
    }

    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.data.lock().ints.get(key).copied().unwrap_or(default)
    }

    fn set_int(&self, key: &str, value: i64) {
        self.update(|data| data.set_int(key, value));
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
        self.update(|data| data.set_string(key, value));
    }
}
