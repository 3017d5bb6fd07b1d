//! # jackpot-scorer
//!
//! Score keeping for Jackpot, a multi-round elimination card game, and its
//! seven-round Secret Seven variant.
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: Every change goes through
//!    `reduce(state, action, ids)`. Invalid actions return the input
//!    unchanged; the reducer never fails and never touches storage.
//!
//! 2. **Derived, Not Stored**: The current round number, standings and the
//!    winner are computed from the snapshot, so they cannot drift.
//!
//! 3. **Validate Before Dispatch**: Round sheets and roster checks report
//!    user-facing messages up front. The state machine trusts its input.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Snapshots share unchanged players and
//!   rounds via `im-rs`, so each transition is a cheap clone.
//!
//! - **Best-Effort Persistence**: `GameSession` saves after each transition
//!   and keeps the five most recent games. Store failures are logged with
//!   `tracing` and never reach the caller.
//!
//! ## Modules
//!
//! - `core`: Players, rounds, ids, actions, game state
//! - `rules`: Scoring constants, validation, the round sheet
//! - `machine`: The reducer and derived standings
//! - `store`: Snapshot and history persistence
//! - `config`: TOML configuration
//! - `session`: A live game wired to its store

pub mod core;
pub mod rules;
pub mod machine;
pub mod store;
pub mod config;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Action, DropLevel, GameId, GameMode, GamePatch, GameState, IdGenerator, IdSource, Player,
    PlayerId, PlayerStatus, Round, RoundScores, ScoreEntry, Theme,
};

pub use crate::rules::{NameError, RoundRejected, RoundSheet, SheetCell, StartError};

pub use crate::machine::{is_game_over, leaderboard, reduce, winner, PlayerLabel, Standing};

pub use crate::store::{GameStore, HistoryEntry, JsonFileStore, MemoryStore, StoreError};

pub use crate::config::{ConfigError, ScorerConfig, StorageConfig};

pub use crate::session::GameSession;
