//! Draft score sheet for the round being entered.
//!
//! A `RoundSheet` holds one row per active player while scores are typed in.
//! `finalize` applies the table conventions before anything is dispatched:
//!
//! - A single blank row is the round winner and becomes a 0
//! - Drops are sized from the player's drop count at the time of the round
//! - The completed map must pass `validate_round_scores`

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::scoring::{drop_level_for, MAX_ROUND_SCORE};
use super::validation::validate_round_scores;
use crate::core::player::{Player, PlayerId};
use crate::core::round::{RoundScores, ScoreEntry};
use crate::core::state::GameState;

pub const NOTHING_ENTERED: &str = "At least one player must have a score or drop";
pub const TOO_MANY_BLANKS: &str = "All players except one must have a score or drop";

/// A round that cannot be submitted, with every reason.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("round rejected: {}", .0.join("; "))]
pub struct RoundRejected(pub Vec<String>);

impl RoundRejected {
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

/// What has been entered for one player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SheetCell {
    #[default]
    Blank,
    Entered(ScoreEntry),
}

#[derive(Clone, Debug)]
struct SheetRow {
    player: Player,
    cell: SheetCell,
}

/// Score entry form for one round.
#[derive(Clone, Debug)]
pub struct RoundSheet {
    round_number: u32,
    rows: Vec<SheetRow>,
    index: FxHashMap<PlayerId, usize>,
}

impl RoundSheet {
    /// Blank sheet covering the active players of `state`, in join order.
    #[must_use]
    pub fn for_state(state: &GameState) -> Self {
        let rows: Vec<SheetRow> = state
            .active_players()
            .map(|p| SheetRow {
                player: p.clone(),
                cell: SheetCell::Blank,
            })
            .collect();

        let index = rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row.player.id.clone(), i))
            .collect();

        Self {
            round_number: state.current_round(),
            rows,
            index,
        }
    }

    /// Round this sheet is for.
    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Number of rows (active players).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Current cell for a player, or `None` if they are not on the sheet.
    #[must_use]
    pub fn cell(&self, player: &PlayerId) -> Option<SheetCell> {
        self.row(player).map(|row| row.cell)
    }

    /// Enter a counted score, clamped to the legal range. Replaces a drop.
    ///
    /// Returns false if the player is not on the sheet.
    pub fn set_score(&mut self, player: &PlayerId, score: i32) -> bool {
        let Some(row) = self.row_mut(player) else {
            return false;
        };
        row.cell = SheetCell::Entered(ScoreEntry::points(score.clamp(0, MAX_ROUND_SCORE)));
        true
    }

    /// Mark the player as dropping; returns the entry that was recorded.
    pub fn set_drop(&mut self, player: &PlayerId) -> Option<ScoreEntry> {
        let row = self.row_mut(player)?;
        let entry = ScoreEntry::drop(drop_level_for(row.player.drop_count));
        row.cell = SheetCell::Entered(entry);
        Some(entry)
    }

    /// Reset a row to blank.
    pub fn clear(&mut self, player: &PlayerId) -> bool {
        let Some(row) = self.row_mut(player) else {
            return false;
        };
        row.cell = SheetCell::Blank;
        true
    }

    /// Number of rows still blank.
    #[must_use]
    pub fn blank_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.cell == SheetCell::Blank)
            .count()
    }

    /// Produce the score map to submit, or every reason it cannot be.
    pub fn finalize(&self) -> Result<RoundScores, RoundRejected> {
        let blanks = self.blank_count();
        if blanks == self.rows.len() {
            return Err(RoundRejected(vec![NOTHING_ENTERED.to_string()]));
        }
        if blanks > 1 {
            return Err(RoundRejected(vec![TOO_MANY_BLANKS.to_string()]));
        }

        let scores: RoundScores = self
            .rows
            .iter()
            .map(|row| {
                let entry = match row.cell {
                    SheetCell::Entered(entry) => entry,
                    SheetCell::Blank => ScoreEntry::points(0),
                };
                (row.player.id.clone(), entry)
            })
            .collect();

        let errors = validate_round_scores(&scores, self.rows.iter().map(|row| &row.player));
        if !errors.is_empty() {
            return Err(RoundRejected(errors));
        }

        Ok(scores)
    }

    fn row(&self, player: &PlayerId) -> Option<&SheetRow> {
        self.index.get(player).map(|&i| &self.rows[i])
    }

    fn row_mut(&mut self, player: &PlayerId) -> Option<&mut SheetRow> {
        let i = *self.index.get(player)?;
        self.rows.get_mut(i)
    }
}
