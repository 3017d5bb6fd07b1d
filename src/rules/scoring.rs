//! Scoring constants and pure scoring rules.

use crate::core::config::GameMode;
use crate::core::player::Player;
use crate::core::round::DropLevel;

/// Cumulative score at which a player is eliminated.
pub const ELIMINATION_THRESHOLD: u32 = 250;

/// Highest counted score a player can record in one round.
pub const MAX_ROUND_SCORE: i32 = 80;

/// Penalty for a player's first drop.
pub const FIRST_DROP_PENALTY: u32 = 25;

/// Penalty for every later drop.
pub const REPEAT_DROP_PENALTY: u32 = 40;

/// Active players at or above this total are flagged as in danger.
pub const DANGER_ZONE: u32 = 200;

/// Number of rounds in a Secret Seven game.
pub const SECRET_SEVEN_ROUNDS: u32 = 7;

/// Penalty for a player's next drop, given drops already taken.
#[must_use]
pub const fn drop_penalty(current_drop_count: u32) -> u32 {
    drop_level_for(current_drop_count).penalty()
}

/// Level recorded for a player's next drop, given drops already taken.
///
/// Levels beyond 2 are not distinguished.
#[must_use]
pub const fn drop_level_for(current_drop_count: u32) -> DropLevel {
    if current_drop_count == 0 {
        DropLevel::First
    } else {
        DropLevel::Repeat
    }
}

#[must_use]
pub const fn should_eliminate(total_score: u32) -> bool {
    total_score >= ELIMINATION_THRESHOLD
}

/// Highest total among active players, or 0 if none are active.
#[must_use]
pub fn highest_active_score<'a>(players: impl IntoIterator<Item = &'a Player>) -> u32 {
    players
        .into_iter()
        .filter(|p| p.is_active())
        .map(|p| p.total_score)
        .max()
        .unwrap_or(0)
}

/// Lowest total among active players, or 0 if none are active.
#[must_use]
pub fn lowest_active_score<'a>(players: impl IntoIterator<Item = &'a Player>) -> u32 {
    players
        .into_iter()
        .filter(|p| p.is_active())
        .map(|p| p.total_score)
        .min()
        .unwrap_or(0)
}

/// Factor applied to counted scores in a round.
///
/// Secret Seven doubles the first and the last round.
#[must_use]
pub const fn round_multiplier(mode: GameMode, round_number: u32) -> u32 {
    match mode {
        GameMode::SecretSeven if round_number == 1 || round_number == SECRET_SEVEN_ROUNDS => 2,
        _ => 1,
    }
}

/// Maximum number of rounds for a mode, if capped.
#[must_use]
pub const fn round_limit(mode: GameMode) -> Option<u32> {
    match mode {
        GameMode::Standard => None,
        GameMode::SecretSeven => Some(SECRET_SEVEN_ROUNDS),
    }
}

/// Whether a game in `mode` with `rounds_played` rounds may record another.
#[must_use]
pub const fn can_play_round(mode: GameMode, rounds_played: u32) -> bool {
    match round_limit(mode) {
        Some(limit) => rounds_played < limit,
        None => true,
    }
}

/// Add a signed delta to a total, clamping at zero.
#[must_use]
pub fn apply_delta(total: u32, delta: i64) -> u32 {
    (i64::from(total) + delta).clamp(0, i64::from(u32::MAX)) as u32
}
