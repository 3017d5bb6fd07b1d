//! The owner of a live game.
//!
//! `GameSession` holds the current snapshot, the id source and the store. It
//! is the only place where transitions and persistence meet:
//!
//! 1. `dispatch` runs the pure reducer
//! 2. if the snapshot changed, it is saved (best effort)
//! 3. started games with progress are upserted into history
//! 4. `NewGame` clears the stored snapshot instead
//!
//! Store failures are logged and swallowed; the in-memory state stays
//! authoritative.

use tracing::{debug, error, info, warn};

use crate::core::action::Action;
use crate::core::config::{GameMode, Theme};
use crate::core::ids::{GameId, IdGenerator, IdSource};
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::machine::reducer::reduce;
use crate::rules::scoring::can_play_round;
use crate::rules::sheet::{RoundRejected, RoundSheet};
use crate::rules::validation::{check_can_start, check_player_name, NameError, StartError};
use crate::store::{GameStore, HistoryEntry};

/// Message for a sheet filled in for a round that is no longer current.
pub const STALE_SHEET: &str = "Scores were entered for a different round";

/// Message for a sheet submitted before the game has started.
pub const NOT_STARTED: &str = "Game has not started";

/// Message for a sheet submitted once no further round can be played.
pub const GAME_OVER: &str = "Game is over";

/// A single user's game, wired to its store.
pub struct GameSession<S: GameStore, I: IdSource = IdGenerator> {
    state: GameState,
    store: S,
    ids: I,
}

impl<S: GameStore> GameSession<S, IdGenerator> {
    /// Open a session on the system clock, restoring any saved game.
    pub fn open(store: S, default_theme: Theme) -> Self {
        Self::open_with_ids(store, IdGenerator::from_entropy(), default_theme)
    }
}

impl<S: GameStore, I: IdSource> GameSession<S, I> {
    /// Start from an empty game without reading the store.
    pub fn new(store: S, ids: I) -> Self {
        Self {
            state: GameState::new(),
            store,
            ids,
        }
    }

    /// Restore the saved game, if any, through `LoadGame`.
    ///
    /// A missing or unreadable snapshot yields an empty game in
    /// `default_theme`. A saved snapshot without a theme also takes
    /// `default_theme`.
    pub fn open_with_ids(store: S, ids: I, default_theme: Theme) -> Self {
        let mut session = Self {
            state: GameState::with_theme(default_theme),
            store,
            ids,
        };

        match session.store.load() {
            Ok(Some(mut patch)) => {
                info!("restoring saved game");
                patch.theme.get_or_insert(default_theme);
                session.dispatch(Action::LoadGame(Box::new(patch)));
            }
            Ok(None) => debug!("no saved game"),
            Err(err) => error!(%err, "failed to load saved game; starting fresh"),
        }

        session
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Tear the session down, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Apply an action and persist the result.
    pub fn dispatch(&mut self, action: Action) -> &GameState {
        let kind = action.kind();
        let next = reduce(&self.state, &action, &mut self.ids);

        if matches!(action, Action::NewGame) {
            self.state = next;
            if let Err(err) = self.store.clear() {
                error!(%err, "failed to clear saved game");
            }
            return &self.state;
        }

        if next == self.state {
            debug!(action = kind, "state unchanged");
            return &self.state;
        }

        self.state = next;
        self.persist();
        &self.state
    }

    fn persist(&mut self) {
        if !self.state.has_progress() {
            return;
        }

        if let Err(err) = self.store.save(&self.state) {
            error!(%err, "failed to save game");
        }

        if self.state.game_started {
            let now = self.ids.now_millis();
            let mut game = self.state.clone();
            if game.game_id.is_none() {
                game.game_id = Some(GameId::new(now.to_string()));
            }
            if let Err(err) = self.store.record_history(HistoryEntry::new(game, now)) {
                warn!(%err, "failed to update game history");
            }
        }
    }

    /// Validate a name, then add the player.
    pub fn add_player(&mut self, name: &str) -> Result<PlayerId, NameError> {
        if self.state.game_started {
            return Err(NameError::RosterLocked);
        }
        let name = check_player_name(name, &self.state.players)?;
        self.dispatch(Action::AddPlayer(name.clone()));
        self.state
            .players
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.id.clone())
            .ok_or(NameError::Empty)
    }

    /// Check the roster, then start the game.
    pub fn start(&mut self, mode: GameMode) -> Result<(), StartError> {
        check_can_start(self.state.player_count(), self.state.game_started)?;
        self.dispatch(Action::StartGame(mode));
        Ok(())
    }

    /// A blank sheet for the current round.
    #[must_use]
    pub fn sheet(&self) -> RoundSheet {
        RoundSheet::for_state(&self.state)
    }

    /// Finalize a sheet and, if it is valid, record the round.
    ///
    /// `Ok` means the round was recorded.
    pub fn submit_sheet(&mut self, sheet: &RoundSheet) -> Result<(), RoundRejected> {
        if !self.state.game_started {
            return Err(RoundRejected(vec![NOT_STARTED.to_string()]));
        }
        let played = self.state.rounds.len() as u32;
        if self.state.active_count() < 2 || !can_play_round(self.state.game_mode, played) {
            return Err(RoundRejected(vec![GAME_OVER.to_string()]));
        }
        if sheet.round_number() != self.state.current_round() {
            return Err(RoundRejected(vec![STALE_SHEET.to_string()]));
        }
        let scores = sheet.finalize()?;
        self.dispatch(Action::SubmitRound(scores));
        Ok(())
    }

    /// Recent games, most recent first. Empty if history cannot be read.
    #[must_use]
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.store.list_recent().unwrap_or_else(|err| {
            warn!(%err, "failed to read game history");
            Vec::new()
        })
    }

    /// Remove a game from history.
    pub fn delete_history(&mut self, game_id: &GameId) {
        if let Err(err) = self.store.delete_entry(game_id) {
            warn!(%err, %game_id, "failed to delete history entry");
        }
    }

    /// Resume a game from history. Returns false if the id is not there.
    pub fn resume(&mut self, game_id: &GameId) -> bool {
        let Some(entry) = self
            .history()
            .into_iter()
            .find(|e| e.game_id() == Some(game_id))
        else {
            debug!(%game_id, "resume refused: not in history");
            return false;
        };

        self.dispatch(Action::ResumeGame(Box::new(entry.game)));
        true
    }

    /// Flip between dark and light.
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.state.theme.toggled();
        self.dispatch(Action::SetTheme(theme));
        theme
    }
}
