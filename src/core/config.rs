//! Game-level settings chosen by the table.
//!
//! - `GameMode`: standard play or the seven-round Secret Seven variant
//! - `Theme`: presentation preference carried in the same state object

use serde::{Deserialize, Serialize};

/// Which rule variant a game is played under.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Play continues until fewer than two players remain active.
    #[default]
    Standard,
    /// Capped at seven rounds; counted scores on rounds 1 and 7 are doubled.
    SecretSeven,
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameMode::Standard => f.write_str("standard"),
            GameMode::SecretSeven => f.write_str("secret_seven"),
        }
    }
}

/// Display theme. The engine never interprets it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}
