//! Configuration types.
//!
//! Configuration lives in `config.toml` under the platform config directory
//! (`~/.config/menu-search/config.toml` on Linux). Every key is optional.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Default delay between the last keystroke and the search.
pub const DEFAULT_DEBOUNCE_MS: u64 = 50;

/// Runtime configuration for a search session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period after a keystroke before searching, in milliseconds.
    pub debounce_ms: u64,

    /// Keep at most this many results. None keeps all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<usize>,

    /// Treat `/` as a segment boundary when scoring.
    pub match_paths: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            max_results: None,
            match_paths: true,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load configuration from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        tracing::info!("Loading config from {:?}", path);
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&text, path)
    }

    /// Load configuration from the default location.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = config_path().ok_or(ConfigError::NoConfigDir)?;
        Self::load(&path)
    }
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("menu-search"))
}

/// Get the path to config.toml.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}
