//! The game state machine.
//!
//! `reduce` maps `(state, action)` to a new state. It never mutates its
//! input and never fails: an action whose precondition does not hold yields
//! an unchanged copy of the input (cheap, thanks to `im` structural sharing).
//!
//! The only external input is the `IdSource`, consulted when a player joins
//! and when a game starts.

use im::Vector;
use tracing::{debug, info};

use crate::core::action::Action;
use crate::core::config::{GameMode, Theme};
use crate::core::ids::IdSource;
use crate::core::player::{Player, PlayerId, PlayerStatus};
use crate::core::round::{Round, RoundScores};
use crate::core::state::{GamePatch, GameState};
use crate::rules::scoring::{
    apply_delta, can_play_round, highest_active_score, round_multiplier, should_eliminate,
    ELIMINATION_THRESHOLD,
};
use crate::rules::validation::{check_can_start, check_player_name};

/// Apply one action to a snapshot, producing the next snapshot.
pub fn reduce(state: &GameState, action: &Action, ids: &mut dyn IdSource) -> GameState {
    match action {
        Action::AddPlayer(name) => add_player(state, name, ids),
        Action::RemovePlayer(id) => remove_player(state, id),
        Action::StartGame(mode) => start_game(state, *mode, ids),
        Action::SubmitRound(scores) => submit_round(state, scores),
        Action::UndoRound => undo_round(state),
        Action::ReenterPlayer(id) => reenter_player(state, id),
        Action::NewGame => new_game(state),
        Action::ResumeGame(snapshot) => resume_game(state, snapshot),
        Action::LoadGame(patch) => load_game(patch),
        Action::SetTheme(theme) => set_theme(state, *theme),
    }
}

fn add_player(state: &GameState, name: &str, ids: &mut dyn IdSource) -> GameState {
    if state.game_started {
        debug!(name, "add_player ignored: game already started");
        return state.clone();
    }

    let name = match check_player_name(name, &state.players) {
        Ok(name) => name,
        Err(err) => {
            debug!(name, %err, "add_player ignored");
            return state.clone();
        }
    };

    let player = Player::new(ids.next_player_id(), &name);
    debug!(id = %player.id, name = %player.name, "player added");

    let mut next = state.clone();
    next.players.push_back(player);
    next
}

fn remove_player(state: &GameState, id: &PlayerId) -> GameState {
    if state.game_started {
        debug!(%id, "remove_player ignored: game already started");
        return state.clone();
    }
    if state.player(id).is_none() {
        debug!(%id, "remove_player ignored: unknown player");
        return state.clone();
    }

    let mut next = state.clone();
    next.players.retain(|p| &p.id != id);
    next
}

fn start_game(state: &GameState, mode: GameMode, ids: &mut dyn IdSource) -> GameState {
    if let Err(err) = check_can_start(state.player_count(), state.game_started) {
        debug!(%err, "start_game ignored");
        return state.clone();
    }

    let game_id = ids.next_game_id();
    info!(%game_id, %mode, players = state.player_count(), "game started");

    let mut next = state.clone();
    next.game_started = true;
    next.game_mode = mode;
    next.game_id = Some(game_id);
    next
}

fn submit_round(state: &GameState, scores: &RoundScores) -> GameState {
    if state.active_count() < 2 {
        debug!("submit_round ignored: fewer than 2 active players");
        return state.clone();
    }
    let played = state.rounds.len() as u32;
    if !can_play_round(state.game_mode, played) {
        debug!(played, "submit_round ignored: round limit reached");
        return state.clone();
    }

    let round_number = state.current_round();
    let multiplier = round_multiplier(state.game_mode, round_number);

    let mut applied = RoundScores::new();
    let mut players = Vector::new();
    for player in &state.players {
        let entry = match scores.get(&player.id) {
            Some(entry) if player.is_active() && entry.applied_points(multiplier) >= 0 => *entry,
            Some(entry) if player.is_active() => {
                // Undo must reverse every recorded delta exactly
                debug!(id = %player.id, score = entry.score, "negative score skipped");
                players.push_back(player.clone());
                continue;
            }
            _ => {
                players.push_back(player.clone());
                continue;
            }
        };

        let mut next = player.clone();
        next.total_score = apply_delta(player.total_score, entry.applied_points(multiplier));
        if entry.is_drop {
            next.drop_count = player.drop_count.saturating_add(1);
        }
        next.status = if should_eliminate(next.total_score) {
            PlayerStatus::Eliminated
        } else {
            PlayerStatus::Active
        };
        if next.is_eliminated() {
            info!(id = %next.id, total = next.total_score, round = round_number, "player eliminated");
        }

        applied.insert(player.id.clone(), entry);
        players.push_back(next);
    }

    let winner_id = applied
        .iter()
        .find(|(_, entry)| entry.is_winning())
        .map(|(id, _)| id.clone());

    debug!(round = round_number, multiplier, entries = applied.len(), "round recorded");

    let mut next = state.clone();
    next.players = players;
    next.rounds.push_back(Round {
        round_number,
        scores: applied,
        winner_id,
        multiplier,
    });
    next
}

fn undo_round(state: &GameState) -> GameState {
    let Some(last) = state.last_round() else {
        debug!("undo_round ignored: no rounds");
        return state.clone();
    };

    let players = state
        .players
        .iter()
        .map(|player| {
            let Some(entry) = last.entry(&player.id) else {
                return player.clone();
            };

            let mut next = player.clone();
            next.total_score = apply_delta(player.total_score, -entry.applied_points(last.multiplier));
            if entry.is_drop {
                next.drop_count = player.drop_count.saturating_sub(1);
            }

            let eliminated_by_this_round = player.is_eliminated()
                && player.total_score >= ELIMINATION_THRESHOLD
                && next.total_score < ELIMINATION_THRESHOLD;
            if eliminated_by_this_round {
                next.status = PlayerStatus::Active;
            }
            next
        })
        .collect();

    debug!(round = last.round_number, "round undone");

    let mut next = state.clone();
    next.players = players;
    next.rounds.pop_back();
    next
}

fn reenter_player(state: &GameState, id: &PlayerId) -> GameState {
    let Some(index) = state.players.iter().position(|p| &p.id == id) else {
        debug!(%id, "reenter_player ignored: unknown player");
        return state.clone();
    };
    if !state.players[index].is_eliminated() {
        debug!(%id, "reenter_player ignored: player is active");
        return state.clone();
    }

    let leader = highest_active_score(&state.players);
    info!(%id, total = leader, "player re-entered");

    let mut next = state.clone();
    let player = &mut next.players[index];
    player.status = PlayerStatus::Active;
    player.total_score = leader;
    player.has_reentered = true;
    next
}

fn new_game(state: &GameState) -> GameState {
    info!("new game");
    GameState::with_theme(state.theme)
}

fn resume_game(state: &GameState, snapshot: &GameState) -> GameState {
    info!(game_id = ?snapshot.game_id, rounds = snapshot.rounds.len(), "game resumed");
    GameState {
        theme: state.theme,
        ..snapshot.clone()
    }
}

fn load_game(patch: &GamePatch) -> GameState {
    patch.apply_to_default()
}

fn set_theme(state: &GameState, theme: Theme) -> GameState {
    let mut next = state.clone();
    next.theme = theme;
    next
}
