//! The game state machine and the views derived from its snapshots.
//!
//! - `reducer`: `reduce(state, action, ids) -> state`, total and pure
//! - `standings`: leaderboard, game-over and winner detection, running totals

pub mod reducer;
pub mod standings;

pub use reducer::reduce;
pub use standings::{
    in_danger_zone, is_game_over, leaderboard, player_label, running_totals, winner, PlayerLabel,
    Standing,
};
