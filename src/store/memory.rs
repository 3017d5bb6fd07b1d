//! In-process store.
//!
//! Keeps the current game as serialized JSON, the same shape a file or
//! browser store would hold, so loads go through the lenient `GamePatch`
//! path exactly like the file-backed store.

use super::{upsert_history, GameStore, HistoryEntry, StoreError, DEFAULT_HISTORY_LIMIT};
use crate::core::ids::GameId;
use crate::core::state::{GamePatch, GameState};

#[derive(Clone, Debug)]
pub struct MemoryStore {
    current: Option<String>,
    history: Vec<HistoryEntry>,
    history_limit: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    #[must_use]
    pub fn with_history_limit(history_limit: usize) -> Self {
        Self {
            current: None,
            history: Vec::new(),
            history_limit,
        }
    }

    /// Seed the current slot with raw JSON, as if written by another process.
    #[must_use]
    pub fn with_raw_current(mut self, json: impl Into<String>) -> Self {
        self.current = Some(json.into());
        self
    }

    /// Raw JSON of the current game, if saved.
    #[must_use]
    pub fn raw_current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

impl GameStore for MemoryStore {
    fn load(&self) -> Result<Option<GamePatch>, StoreError> {
        match &self.current {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, state: &GameState) -> Result<(), StoreError> {
        self.current = Some(serde_json::to_string(state)?);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.current = None;
        Ok(())
    }

    fn list_recent(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        Ok(self.history.clone())
    }

    fn record_history(&mut self, entry: HistoryEntry) -> Result<(), StoreError> {
        upsert_history(&mut self.history, entry, self.history_limit);
        Ok(())
    }

    fn delete_entry(&mut self, game_id: &GameId) -> Result<(), StoreError> {
        self.history.retain(|e| e.game_id() != Some(game_id));
        Ok(())
    }
}
