//! Player identification and per-player score data.
//!
//! ## PlayerId
//!
//! Opaque string identifier, generated once when a player joins and never
//! changed afterwards. Stored snapshots key round scores by this id.
//!
//! ## Player
//!
//! Running totals for one seat at the table: cumulative score, drops taken,
//! elimination status and the sticky re-entry flag.

use serde::{Deserialize, Serialize};

/// Opaque, unique player identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Wrap a raw id string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a player still takes part in rounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    #[default]
    Active,
    Eliminated,
}

/// A player and their running totals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Immutable identifier.
    pub id: PlayerId,

    /// Display name, trimmed and non-empty.
    pub name: String,

    /// Cumulative score. Never negative.
    pub total_score: u32,

    /// Number of drop penalties taken.
    pub drop_count: u32,

    /// Active or eliminated.
    pub status: PlayerStatus,

    /// Set once the player has re-entered after elimination. Never cleared.
    #[serde(default)]
    pub has_reentered: bool,
}

impl Player {
    /// Create a fresh, active player with no score.
    #[must_use]
    pub fn new(id: PlayerId, name: &str) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            total_score: 0,
            drop_count: 0,
            status: PlayerStatus::Active,
            has_reentered: false,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    #[must_use]
    pub fn is_eliminated(&self) -> bool {
        self.status == PlayerStatus::Eliminated
    }

    /// Case-insensitive name comparison used for roster uniqueness.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}
