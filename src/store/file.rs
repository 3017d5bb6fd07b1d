//! JSON files on local disk.
//!
//! Two files live in the configured directory: the game in progress and the
//! recent-games list. Writes go to a sibling temp file first and are renamed
//! into place, so a crash mid-write leaves the previous version intact.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use super::{upsert_history, GameStore, HistoryEntry, StoreError};
use crate::config::StorageConfig;
use crate::core::ids::GameId;
use crate::core::state::{GamePatch, GameState};

#[derive(Clone, Debug)]
pub struct JsonFileStore {
    config: StorageConfig,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Store in `dir` with default file names and history size.
    #[must_use]
    pub fn in_dir(dir: impl Into<std::path::PathBuf>) -> Self {
        Self::new(StorageConfig::in_dir(dir))
    }

    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    fn write_history(&self, history: &[HistoryEntry]) -> Result<(), StoreError> {
        write_json(&self.config.history_path(), &history)
    }

    /// History to rewrite. An unparseable file counts as empty so the next
    /// write replaces it.
    fn history_for_update(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        match self.list_recent() {
            Err(StoreError::Json(err)) => {
                warn!(
                    %err,
                    path = %self.config.history_path().display(),
                    "discarding unreadable game history"
                );
                Ok(Vec::new())
            }
            other => other,
        }
    }
}

impl GameStore for JsonFileStore {
    fn load(&self) -> Result<Option<GamePatch>, StoreError> {
        read_json(&self.config.current_path())
    }

    fn save(&mut self, state: &GameState) -> Result<(), StoreError> {
        write_json(&self.config.current_path(), state)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(self.config.current_path()) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }

    fn list_recent(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        Ok(read_json(&self.config.history_path())?.unwrap_or_default())
    }

    fn record_history(&mut self, entry: HistoryEntry) -> Result<(), StoreError> {
        let mut history = self.history_for_update()?;
        upsert_history(&mut history, entry, self.config.history_limit);
        self.write_history(&history)
    }

    fn delete_entry(&mut self, game_id: &GameId) -> Result<(), StoreError> {
        let mut history = self.history_for_update()?;
        let before = history.len();
        history.retain(|e| e.game_id() != Some(game_id));
        if history.len() == before {
            return Ok(());
        }
        self.write_history(&history)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    Ok(Some(serde_json::from_str(&text)?))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_vec(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
