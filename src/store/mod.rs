//! Snapshot persistence and the recent-games history.
//!
//! ## Key Types
//!
//! - `GameStore`: load/save/clear the current game, plus the history list
//! - `HistoryEntry`: a stored game with the time it was last saved
//! - `MemoryStore`: in-process store, mainly for embedding and tests
//! - `JsonFileStore`: two JSON files in a configured directory
//!
//! Stores report failures as `StoreError`; deciding whether a failure matters
//! is left to the caller (`GameSession` logs and carries on).

pub mod memory;
pub mod file;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::ids::GameId;
use crate::core::state::{GamePatch, GameState};

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Number of games kept in history by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 5;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// A game in the recent-games list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub game: GameState,

    /// Milliseconds since the Unix epoch at the last save.
    pub last_updated: u64,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(game: GameState, last_updated: u64) -> Self {
        Self { game, last_updated }
    }

    #[must_use]
    pub fn game_id(&self) -> Option<&GameId> {
        self.game.game_id.as_ref()
    }

    /// Rounds completed when the entry was saved.
    #[must_use]
    pub fn rounds_played(&self) -> usize {
        self.game.rounds.len()
    }

    /// Player names in join order, for a one-line summary.
    #[must_use]
    pub fn player_names(&self) -> Vec<&str> {
        self.game.players.iter().map(|p| p.name.as_str()).collect()
    }
}

/// Persistence collaborator for a single local user.
pub trait GameStore {
    /// Read back the current game, if one was saved.
    fn load(&self) -> Result<Option<GamePatch>, StoreError>;

    /// Overwrite the current game.
    fn save(&mut self, state: &GameState) -> Result<(), StoreError>;

    /// Forget the current game. History is untouched.
    fn clear(&mut self) -> Result<(), StoreError>;

    /// Recent games, most recently saved first.
    fn list_recent(&self) -> Result<Vec<HistoryEntry>, StoreError>;

    /// Insert or replace a history entry by game id.
    fn record_history(&mut self, entry: HistoryEntry) -> Result<(), StoreError>;

    /// Drop a game from history. Unknown ids are ignored.
    fn delete_entry(&mut self, game_id: &GameId) -> Result<(), StoreError>;
}

/// Upsert `entry` into `history` and trim it to `limit`.
///
/// An entry whose game id is already present replaces it in place; a new one
/// is put at the front. Entries without a game id are always new.
pub fn upsert_history(history: &mut Vec<HistoryEntry>, entry: HistoryEntry, limit: usize) {
    let existing = entry
        .game_id()
        .and_then(|id| history.iter().position(|e| e.game_id() == Some(id)));

    match existing {
        Some(index) => history[index] = entry,
        None => history.insert(0, entry),
    }
    history.truncate(limit);
}
