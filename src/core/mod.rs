//! Core types: players, rounds, game snapshots, actions, id generation.
//!
//! Everything here is plain data. Rules live in `rules`, transitions in
//! `machine`.

pub mod player;
pub mod round;
pub mod config;
pub mod ids;
pub mod action;
pub mod state;

pub use player::{Player, PlayerId, PlayerStatus};
pub use round::{DropLevel, Round, RoundScores, ScoreEntry};
pub use config::{GameMode, Theme};
pub use ids::{GameId, IdGenerator, IdSource};
pub use action::Action;
pub use state::{GamePatch, GameState};
