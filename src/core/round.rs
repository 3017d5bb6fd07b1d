//! Round records and per-player round entries.
//!
//! A round stores one `ScoreEntry` per participating player. An entry is
//! either a counted score or a drop; drops carry their level so that undo can
//! reverse exactly the penalty that was charged.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::rules::scoring::{FIRST_DROP_PENALTY, REPEAT_DROP_PENALTY};

/// Round scores keyed by player.
pub type RoundScores = OrdMap<PlayerId, ScoreEntry>;

/// Drop tier recorded on a round entry.
///
/// Serialized as the integers `0`, `1` and `2`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DropLevel {
    /// Not a drop.
    #[default]
    None,
    /// First drop a player takes.
    First,
    /// Any later drop.
    Repeat,
}

impl DropLevel {
    /// Penalty charged for a drop at this level.
    ///
    /// Level 2 charges the repeat penalty; anything else charges the first.
    #[must_use]
    pub const fn penalty(self) -> u32 {
        match self {
            DropLevel::Repeat => REPEAT_DROP_PENALTY,
            DropLevel::None | DropLevel::First => FIRST_DROP_PENALTY,
        }
    }
}

impl From<DropLevel> for u8 {
    fn from(level: DropLevel) -> Self {
        match level {
            DropLevel::None => 0,
            DropLevel::First => 1,
            DropLevel::Repeat => 2,
        }
    }
}

impl TryFrom<u8> for DropLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DropLevel::None),
            1 => Ok(DropLevel::First),
            2 => Ok(DropLevel::Repeat),
            other => Err(format!("invalid drop level {other}")),
        }
    }
}

/// One player's result for one round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    /// Points scored. For drops this holds the penalty shown to the player.
    pub score: i32,

    /// Whether the player dropped this round.
    #[serde(default)]
    pub is_drop: bool,

    /// Drop tier. `None` for counted scores.
    #[serde(default)]
    pub drop_level: DropLevel,
}

impl ScoreEntry {
    /// A counted (non-drop) score.
    #[must_use]
    pub const fn points(score: i32) -> Self {
        Self {
            score,
            is_drop: false,
            drop_level: DropLevel::None,
        }
    }

    /// A drop at the given level; `score` carries the level's penalty.
    #[must_use]
    pub const fn drop(level: DropLevel) -> Self {
        Self {
            score: level.penalty() as i32,
            is_drop: true,
            drop_level: level,
        }
    }

    /// True for a counted score of exactly zero.
    #[must_use]
    pub const fn is_winning(&self) -> bool {
        !self.is_drop && self.score == 0
    }

    /// Signed change this entry makes to a running total.
    ///
    /// Drops charge the level penalty regardless of `score`; counted scores
    /// are scaled by the round multiplier.
    #[must_use]
    pub fn applied_points(&self, multiplier: u32) -> i64 {
        if self.is_drop {
            i64::from(self.drop_level.penalty())
        } else {
            i64::from(self.score) * i64::from(multiplier)
        }
    }
}

fn default_multiplier() -> u32 {
    1
}

/// A completed round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// 1-based round number.
    pub round_number: u32,

    /// Entries applied in this round.
    pub scores: RoundScores,

    /// The non-drop zero scorer, if there was one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<PlayerId>,

    /// Factor applied to counted scores in this round.
    #[serde(default = "default_multiplier")]
    pub multiplier: u32,
}

impl Round {
    /// Get a player's entry for this round.
    #[must_use]
    pub fn entry(&self, player: &PlayerId) -> Option<&ScoreEntry> {
        self.scores.get(player)
    }

    /// Points this round added to a player's total (0 if they had no entry).
    #[must_use]
    pub fn points_for(&self, player: &PlayerId) -> i64 {
        self.entry(player)
            .map(|e| e.applied_points(self.multiplier))
            .unwrap_or(0)
    }
}
