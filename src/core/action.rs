//! Actions accepted by the state machine.
//!
//! Each variant carries exactly the payload its transition needs. The state
//! machine is total over `Action`: inapplicable actions leave the state as is.

use serde::{Deserialize, Serialize};

use super::config::{GameMode, Theme};
use super::player::PlayerId;
use super::round::RoundScores;
use super::state::{GamePatch, GameState};

/// A discrete request to change the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Join a player before the game starts.
    AddPlayer(String),

    /// Remove a player before the game starts.
    RemovePlayer(PlayerId),

    /// Freeze the roster and begin play.
    StartGame(GameMode),

    /// Record a round.
    SubmitRound(RoundScores),

    /// Revert the most recent round.
    UndoRound,

    /// Bring an eliminated player back at the leader's score.
    ReenterPlayer(PlayerId),

    /// Discard everything except the theme.
    NewGame,

    /// Replace the game with a stored snapshot, keeping the theme.
    ResumeGame(Box<GameState>),

    /// Merge a stored partial snapshot over defaults.
    LoadGame(Box<GamePatch>),

    /// Change the presentation theme.
    SetTheme(Theme),
}

impl Action {
    /// Short name for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Action::AddPlayer(_) => "add_player",
            Action::RemovePlayer(_) => "remove_player",
            Action::StartGame(_) => "start_game",
            Action::SubmitRound(_) => "submit_round",
            Action::UndoRound => "undo_round",
            Action::ReenterPlayer(_) => "reenter_player",
            Action::NewGame => "new_game",
            Action::ResumeGame(_) => "resume_game",
            Action::LoadGame(_) => "load_game",
            Action::SetTheme(_) => "set_theme",
        }
    }
}
