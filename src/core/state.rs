//! Game state snapshots.
//!
//! ## GameState
//!
//! The complete, immutable picture of one game:
//! - Roster in join order
//! - Round history
//! - Start flag, mode, game id
//! - Theme preference
//!
//! Uses `im` persistent collections, so every transition can produce a new
//! snapshot while sharing unchanged players and rounds with the old one.
//!
//! ## GamePatch
//!
//! A partially-populated snapshot, as read back from storage. Present fields
//! are merged over a fresh default state.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::{GameMode, Theme};
use super::ids::GameId;
use super::player::{Player, PlayerId};
use super::round::Round;

/// Immutable game snapshot.
///
/// `current_round` is derived from the round history and is written to JSON
/// for readers only; it is ignored when a snapshot is read back.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Snapshot", from = "Snapshot")]
pub struct GameState {
    /// Roster in join order. Frozen once the game starts.
    pub players: Vector<Player>,

    /// Completed rounds, oldest first.
    pub rounds: Vector<Round>,

    /// Set by `StartGame`; freezes the roster.
    pub game_started: bool,

    /// Rule variant.
    pub game_mode: GameMode,

    /// Assigned at start.
    pub game_id: Option<GameId>,

    /// Presentation preference.
    pub theme: Theme,
}

impl GameState {
    /// Create an empty, unstarted game.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty game that keeps the given theme.
    #[must_use]
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    /// The round that will be recorded next (1-based).
    #[must_use]
    pub fn current_round(&self) -> u32 {
        self.rounds.len() as u32 + 1
    }

    /// Number of players on the roster.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Look up a player by id.
    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Iterate over active players in join order.
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_active())
    }

    /// Number of active players.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active_players().count()
    }

    /// True once there is something worth persisting.
    #[must_use]
    pub fn has_progress(&self) -> bool {
        !self.players.is_empty() || !self.rounds.is_empty()
    }

    /// The most recent round, if any.
    #[must_use]
    pub fn last_round(&self) -> Option<&Round> {
        self.rounds.last()
    }
}

/// Wire form of `GameState`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Snapshot {
    players: Vector<Player>,
    rounds: Vector<Round>,
    game_started: bool,
    game_mode: GameMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    game_id: Option<GameId>,
    theme: Theme,
    #[serde(skip_deserializing)]
    current_round: u32,
}

impl From<GameState> for Snapshot {
    fn from(state: GameState) -> Self {
        let current_round = state.current_round();
        Self {
            players: state.players,
            rounds: state.rounds,
            game_started: state.game_started,
            game_mode: state.game_mode,
            game_id: state.game_id,
            theme: state.theme,
            current_round,
        }
    }
}

impl From<Snapshot> for GameState {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            players: snapshot.players,
            rounds: snapshot.rounds,
            game_started: snapshot.game_started,
            game_mode: snapshot.game_mode,
            game_id: snapshot.game_id,
            theme: snapshot.theme,
        }
    }
}

/// Partial snapshot merged over defaults by `LoadGame`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GamePatch {
    pub players: Option<Vector<Player>>,
    pub rounds: Option<Vector<Round>>,
    pub game_started: Option<bool>,
    pub game_mode: Option<GameMode>,
    pub game_id: Option<GameId>,
    pub theme: Option<Theme>,
}

impl GamePatch {
    /// Merge present fields over a fresh default state.
    #[must_use]
    pub fn apply_to_default(&self) -> GameState {
        let base = GameState::default();
        GameState {
            players: self.players.clone().unwrap_or(base.players),
            rounds: self.rounds.clone().unwrap_or(base.rounds),
            game_started: self.game_started.unwrap_or(base.game_started),
            game_mode: self.game_mode.unwrap_or(base.game_mode),
            game_id: self.game_id.clone().or(base.game_id),
            theme: self.theme.unwrap_or(base.theme),
        }
    }
}

impl From<GameState> for GamePatch {
    fn from(state: GameState) -> Self {
        Self {
            players: Some(state.players),
            rounds: Some(state.rounds),
            game_started: Some(state.game_started),
            game_mode: Some(state.game_mode),
            game_id: state.game_id,
            theme: Some(state.theme),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::round::ScoreEntry;
    use im::OrdMap;

    fn two_players() -> GameState {
        let mut state = GameState::new();
        state.players.push_back(Player::new(PlayerId::new("a"), "Ann"));
        state.players.push_back(Player::new(PlayerId::new("b"), "Ben"));
        state
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new();

        assert!(state.players.is_empty());
        assert!(state.rounds.is_empty());
        assert!(!state.game_started);
        assert_eq!(state.current_round(), 1);
        assert_eq!(state.theme, Theme::Dark);
        assert!(!state.has_progress());
    }

    #[test]
    fn test_current_round_follows_history() {
        let mut state = two_players();
        state.rounds.push_back(Round {
            round_number: 1,
            scores: OrdMap::unit(PlayerId::new("a"), ScoreEntry::points(0)),
            winner_id: Some(PlayerId::new("a")),
            multiplier: 1,
        });

        assert_eq!(state.current_round(), 2);
        assert!(state.has_progress());
    }

    #[test]
    fn test_snapshot_writes_current_round() {
        let state = two_players();
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["currentRound"], 1);
        assert_eq!(json["gameStarted"], false);
        assert_eq!(json["gameMode"], "standard");
        assert_eq!(json["players"][1]["name"], "Ben");
    }

    #[test]
    fn test_snapshot_ignores_stored_current_round() {
        let state: GameState =
            serde_json::from_str(r#"{"players":[],"rounds":[],"currentRound":9}"#).unwrap();
        assert_eq!(state.current_round(), 1);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut state = two_players();
        state.game_started = true;
        state.game_id = Some(GameId::new("1700000000000"));
        state.game_mode = GameMode::SecretSeven;

        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, restored);
    }

    #[test]
    fn test_patch_merges_over_defaults() {
        let patch = GamePatch {
            theme: Some(Theme::Light),
            game_started: Some(true),
            ..GamePatch::default()
        };

        let state = patch.apply_to_default();
        assert_eq!(state.theme, Theme::Light);
        assert!(state.game_started);
        assert!(state.players.is_empty());
        assert_eq!(state.game_mode, GameMode::Standard);
    }

    #[test]
    fn test_patch_from_partial_json() {
        let patch: GamePatch = serde_json::from_str(r#"{"theme":"light"}"#).unwrap();
        assert_eq!(patch.theme, Some(Theme::Light));
        assert_eq!(patch.players, None);
    }

    #[test]
    fn test_active_players() {
        let mut state = two_players();
        state.players[1].status = crate::core::PlayerStatus::Eliminated;

        let active: Vec<_> = state.active_players().map(|p| p.name.as_str()).collect();
        assert_eq!(active, vec!["Ann"]);
        assert_eq!(state.active_count(), 1);
    }
}
