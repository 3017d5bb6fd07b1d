//! Id and timestamp generation.
//!
//! ## Key Features
//!
//! - **Unique per call**: player ids combine a millisecond timestamp with a
//!   random suffix; game ids are strictly increasing per generator
//! - **Deterministic on demand**: a seeded ChaCha8 stream plus a manual clock
//!   makes every id reproducible in tests
//!
//! ```
//! use jackpot_scorer::core::{IdGenerator, IdSource};
//!
//! let mut ids = IdGenerator::with_manual_clock(42, 1_700_000_000_000);
//! let a = ids.next_player_id();
//! let b = ids.next_player_id();
//! assert_ne!(a, b);
//!
//! let mut again = IdGenerator::with_manual_clock(42, 1_700_000_000_000);
//! assert_eq!(again.next_player_id(), a);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use super::player::PlayerId;

/// Identifier of a started game; the persistence and history key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of fresh ids and timestamps for state transitions.
pub trait IdSource {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&mut self) -> u64;

    /// A player id never returned before by this source.
    fn next_player_id(&mut self) -> PlayerId;

    /// A game id never returned before by this source.
    fn next_game_id(&mut self) -> GameId;
}

#[derive(Clone, Debug)]
enum Clock {
    System,
    /// Starts at the given instant and ticks one millisecond per read.
    Manual(u64),
}

impl Clock {
    fn read(&mut self) -> u64 {
        match self {
            Clock::System => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0),
            Clock::Manual(now) => {
                let t = *now;
                *now += 1;
                t
            }
        }
    }
}

/// Default `IdSource`: clock plus ChaCha8 random suffixes.
#[derive(Clone, Debug)]
pub struct IdGenerator {
    rng: ChaCha8Rng,
    clock: Clock,
    last_game_millis: u64,
}

impl IdGenerator {
    /// Generator on the system clock with the given random seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            clock: Clock::System,
            last_game_millis: 0,
        }
    }

    /// Generator on the system clock, seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            clock: Clock::System,
            last_game_millis: 0,
        }
    }

    /// Fully deterministic generator; the clock starts at `start_millis`.
    #[must_use]
    pub fn with_manual_clock(seed: u64, start_millis: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            clock: Clock::Manual(start_millis),
            last_game_millis: 0,
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl IdSource for IdGenerator {
    fn now_millis(&mut self) -> u64 {
        self.clock.read()
    }

    fn next_player_id(&mut self) -> PlayerId {
        let millis = self.clock.read();
        let suffix: u64 = self.rng.gen();
        PlayerId::new(format!("{}{}", to_base36(millis), to_base36(suffix)))
    }

    fn next_game_id(&mut self) -> GameId {
        let millis = self.clock.read().max(self.last_game_millis + 1);
        self.last_game_millis = millis;
        GameId::new(millis.to_string())
    }
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}
