//! Scorer configuration, loaded from `jackpot.toml`.
//!
//! Every field has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! default_theme = "light"
//!
//! [storage]
//! dir = "/home/me/.local/share/jackpot-scorer"
//! history_limit = 5
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::config::Theme;
use crate::store::DEFAULT_HISTORY_LIMIT;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    /// Where games are saved.
    pub storage: StorageConfig,

    /// Theme for a brand-new game when nothing was saved.
    pub default_theme: Theme,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            default_theme: Theme::Dark,
        }
    }
}

/// File-store layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding both files. Created on first save.
    pub dir: PathBuf,
    /// File name for the game in progress.
    pub current_file: String,
    /// File name for the recent-games list.
    pub history_file: String,
    /// Number of recent games kept.
    pub history_limit: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".jackpot-scorer"),
            current_file: "current.json".to_string(),
            history_file: "history.json".to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl StorageConfig {
    /// Storage rooted at `dir` with default file names.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    #[must_use]
    pub fn current_path(&self) -> PathBuf {
        self.dir.join(&self.current_file)
    }

    #[must_use]
    pub fn history_path(&self) -> PathBuf {
        self.dir.join(&self.history_file)
    }
}

impl ScorerConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Read configuration from a file if it exists, else use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Log warnings for settings that will behave oddly.
    pub fn validate(&self) {
        let storage = &self.storage;
        if storage.history_limit == 0 {
            tracing::warn!("storage.history_limit is 0; no games will be kept in history");
        }
        if storage.current_file.trim().is_empty() || storage.history_file.trim().is_empty() {
            tracing::error!("storage file names must not be empty");
        }
        if storage.current_file == storage.history_file {
            tracing::error!(
                file = %storage.current_file,
                "storage.current_file and storage.history_file must differ"
            );
        }
    }
}
