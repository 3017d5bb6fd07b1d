//! Advisory validation run by callers before dispatching.
//!
//! The state machine never re-validates; these checks exist so a submit
//! workflow can show the player what is wrong before anything changes.

use thiserror::Error;

use super::scoring::MAX_ROUND_SCORE;
use crate::core::player::Player;
use crate::core::round::RoundScores;

/// Message reported when the round has zero or several winners.
pub const WINNER_REQUIRED: &str = "Exactly one player must have a score of 0 (round winner)";

/// Why a player name was refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("Name cannot be empty")]
    Empty,
    #[error("Player already exists")]
    Duplicate,
    #[error("Players cannot join a game in progress")]
    RosterLocked,
}

/// Why a game cannot start yet.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StartError {
    #[error("Need at least 2 players")]
    NotEnoughPlayers,
    #[error("Game already started")]
    AlreadyStarted,
}

/// Check a round's scores, returning one message per violation.
///
/// An empty result means the round may be submitted. Entries for ids that
/// are not among `active_players` are skipped by the range checks.
pub fn validate_round_scores<'a>(
    scores: &RoundScores,
    active_players: impl IntoIterator<Item = &'a Player>,
) -> Vec<String> {
    let mut errors = Vec::new();

    let winners = scores.values().filter(|entry| entry.is_winning()).count();
    if winners != 1 {
        errors.push(WINNER_REQUIRED.to_string());
    }

    let active: Vec<&Player> = active_players.into_iter().collect();
    for (player_id, entry) in scores.iter() {
        let Some(player) = active.iter().find(|p| &p.id == player_id) else {
            continue;
        };

        if entry.is_drop {
            continue;
        }

        if entry.score < 0 {
            errors.push(format!("{}: Score cannot be negative", player.name));
        }
        if entry.score > MAX_ROUND_SCORE {
            errors.push(format!("{}: Score cannot exceed {}", player.name, MAX_ROUND_SCORE));
        }
    }

    errors
}

/// Trim a prospective name and check it against the roster.
pub fn check_player_name<'a>(
    name: &str,
    players: impl IntoIterator<Item = &'a Player>,
) -> Result<String, NameError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if players.into_iter().any(|p| p.has_name(name)) {
        return Err(NameError::Duplicate);
    }
    Ok(name.to_string())
}

/// Check whether a roster may start a game.
pub fn check_can_start(player_count: usize, already_started: bool) -> Result<(), StartError> {
    if already_started {
        return Err(StartError::AlreadyStarted);
    }
    if player_count < 2 {
        return Err(StartError::NotEnoughPlayers);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::PlayerId;
    use crate::core::round::{DropLevel, ScoreEntry};
    use im::OrdMap;

    fn roster(names: &[&str]) -> Vec<Player> {
        names
            .iter()
            .map(|n| Player::new(PlayerId::new(n.to_lowercase()), n))
            .collect()
    }

    fn scores(entries: &[(&str, ScoreEntry)]) -> RoundScores {
        entries
            .iter()
            .map(|(id, e)| (PlayerId::new(*id), *e))
            .collect::<OrdMap<_, _>>()
    }

    #[test]
    fn test_single_winner_passes() {
        let players = roster(&["Ann", "Ben", "Cal"]);
        let round = scores(&[
            ("ann", ScoreEntry::points(30)),
            ("ben", ScoreEntry::points(30)),
            ("cal", ScoreEntry::points(0)),
        ]);

        assert!(validate_round_scores(&round, &players).is_empty());
    }

    #[test]
    fn test_missing_winner_fails() {
        let players = roster(&["Ann", "Ben", "Cal"]);
        let round = scores(&[
            ("ann", ScoreEntry::points(30)),
            ("ben", ScoreEntry::points(30)),
            ("cal", ScoreEntry::points(12)),
        ]);

        assert_eq!(validate_round_scores(&round, &players), vec![WINNER_REQUIRED.to_string()]);
    }

    #[test]
    fn test_two_winners_fail() {
        let players = roster(&["Ann", "Ben"]);
        let round = scores(&[("ann", ScoreEntry::points(0)), ("ben", ScoreEntry::points(0))]);

        assert_eq!(validate_round_scores(&round, &players), vec![WINNER_REQUIRED.to_string()]);
    }

    #[test]
    fn test_out_of_range_scores_named_per_player() {
        let players = roster(&["Ann", "Ben", "Cal"]);
        let round = scores(&[
            ("ann", ScoreEntry::points(0)),
            ("ben", ScoreEntry::points(-5)),
            ("cal", ScoreEntry::points(81)),
        ]);

        let errors = validate_round_scores(&round, &players);
        assert_eq!(
            errors,
            vec![
                "Ben: Score cannot be negative".to_string(),
                "Cal: Score cannot exceed 80".to_string(),
            ]
        );
    }

    #[test]
    fn test_drops_always_accepted() {
        let players = roster(&["Ann", "Ben"]);
        let mut odd_drop = ScoreEntry::drop(DropLevel::Repeat);
        odd_drop.score = 500;
        let round = scores(&[("ann", ScoreEntry::points(0)), ("ben", odd_drop)]);

        assert!(validate_round_scores(&round, &players).is_empty());
    }

    #[test]
    fn test_zero_score_drop_is_not_a_winner() {
        let players = roster(&["Ann", "Ben"]);
        let mut zero_drop = ScoreEntry::drop(DropLevel::First);
        zero_drop.score = 0;
        let round = scores(&[("ann", zero_drop), ("ben", ScoreEntry::points(20))]);

        assert_eq!(validate_round_scores(&round, &players), vec![WINNER_REQUIRED.to_string()]);
    }

    #[test]
    fn test_unknown_ids_skip_range_checks() {
        let players = roster(&["Ann"]);
        let round = scores(&[("ann", ScoreEntry::points(0)), ("ghost", ScoreEntry::points(999))]);

        assert!(validate_round_scores(&round, &players).is_empty());
    }

    #[test]
    fn test_check_player_name() {
        let players = roster(&["Ann"]);

        assert_eq!(check_player_name("  Ben ", &players), Ok("Ben".to_string()));
        assert_eq!(check_player_name("   ", &players), Err(NameError::Empty));
        assert_eq!(check_player_name("ANN", &players), Err(NameError::Duplicate));
        assert_eq!(NameError::Duplicate.to_string(), "Player already exists");
    }

    #[test]
    fn test_check_can_start() {
        assert_eq!(check_can_start(1, false), Err(StartError::NotEnoughPlayers));
        assert_eq!(check_can_start(2, true), Err(StartError::AlreadyStarted));
        assert!(check_can_start(2, false).is_ok());
        assert_eq!(StartError::NotEnoughPlayers.to_string(), "Need at least 2 players");
    }
}
