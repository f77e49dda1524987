//! Configuration loading from file system

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, instrument, warn};

use super::defaults::DEFAULT_CONFIG_PATH;
use super::types::SearchConfig;

/// Path of the user config file (~/.quickpick/config.json)
pub fn default_config_path() -> PathBuf {
    PathBuf::from(shellexpand::tilde(DEFAULT_CONFIG_PATH).as_ref())
}

/// Load configuration from ~/.quickpick/config.json
///
/// Returns `SearchConfig::default()` if the file is missing or invalid.
#[instrument(name = "load_config")]
pub fn load_config() -> SearchConfig {
    load_config_from(&default_config_path())
}

/// Load configuration from an explicit path, falling back to defaults.
pub fn load_config_from(path: &Path) -> SearchConfig {
    if !path.exists() {
        info!(path = %path.display(), "Config file not found, using defaults");
        return SearchConfig::default();
    }

    match read_config(path) {
        Ok(config) => {
            info!(path = %path.display(), "Successfully loaded config");
            config
        }
        Err(e) => {
            warn!(
                error = %format!("{:#}", e),
                path = %path.display(),
                "Failed to load config, using defaults"
            );
            SearchConfig::default()
        }
    }
}

fn read_config(path: &Path) -> Result<SearchConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: SearchConfig =
        serde_json::from_str(&content).context("Failed to parse config JSON")?;
    Ok(config)
}
