//! Read-only views derived from a snapshot.
//!
//! Presentation reads these instead of recomputing rules: leaderboard order,
//! game-over detection, the winner, and per-round running totals.

use crate::core::player::{Player, PlayerId};
use crate::core::state::GameState;
use crate::rules::scoring::{can_play_round, lowest_active_score, DANGER_ZONE};

/// How a player is shown on the leaderboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerLabel {
    Active,
    Reentered,
    Eliminated,
}

/// One leaderboard line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Standing<'a> {
    /// 1-based rank among active players; `None` when eliminated.
    pub rank: Option<usize>,
    pub player: &'a Player,
    pub label: PlayerLabel,
    pub in_danger: bool,
}

#[must_use]
pub fn player_label(player: &Player) -> PlayerLabel {
    if player.is_eliminated() {
        PlayerLabel::Eliminated
    } else if player.has_reentered {
        PlayerLabel::Reentered
    } else {
        PlayerLabel::Active
    }
}

/// Active player close to elimination.
#[must_use]
pub fn in_danger_zone(player: &Player) -> bool {
    player.is_active() && player.total_score >= DANGER_ZONE
}

/// Active players first, then eliminated; lowest total first within each.
///
/// Ties keep join order.
#[must_use]
pub fn leaderboard(state: &GameState) -> Vec<Standing<'_>> {
    let mut players: Vec<&Player> = state.players.iter().collect();
    players.sort_by_key(|p| (p.is_eliminated(), p.total_score));

    players
        .into_iter()
        .enumerate()
        .map(|(i, player)| Standing {
            rank: player.is_active().then_some(i + 1),
            player,
            label: player_label(player),
            in_danger: in_danger_zone(player),
        })
        .collect()
}

/// Whether play has finished.
///
/// A game is over once at least one round is recorded and fewer than two
/// players remain active, or when a capped mode has played all its rounds.
#[must_use]
pub fn is_game_over(state: &GameState) -> bool {
    if !state.game_started || state.rounds.is_empty() {
        return false;
    }
    state.active_count() < 2 || !can_play_round(state.game_mode, state.rounds.len() as u32)
}

/// The winner of a finished game, if one is decided.
///
/// The last active player wins by elimination. When a capped game runs out of
/// rounds, the unique lowest total among active players wins; a tie has no
/// winner.
#[must_use]
pub fn winner(state: &GameState) -> Option<&Player> {
    if !is_game_over(state) {
        return None;
    }

    let mut active = state.active_players();
    let first = active.next()?;
    if active.next().is_none() {
        return Some(first);
    }

    let low = lowest_active_score(&state.players);
    let mut leaders = state.active_players().filter(|p| p.total_score == low);
    let leader = leaders.next()?;
    match leaders.next() {
        Some(_) => None,
        None => Some(leader),
    }
}

/// Cumulative points for a player after each recorded round.
///
/// Rebuilt from round entries alone, so a re-entry reset is not reflected.
#[must_use]
pub fn running_totals(state: &GameState, player: &PlayerId) -> Vec<i64> {
    state
        .rounds
        .iter()
        .scan(0i64, |total, round| {
            *total += round.points_for(player);
            Some(*total)
        })
        .collect()
}
