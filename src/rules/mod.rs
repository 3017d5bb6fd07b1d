//! Scoring rules and round validation.
//!
//! Everything here is a pure function of its inputs:
//! - `scoring`: thresholds, drop penalties, Secret Seven multipliers
//! - `validation`: advisory checks run before dispatching
//! - `sheet`: the draft form a round is entered on
//!
//! The state machine uses `scoring` for every round and `validation` only for
//! roster checks; round scores are validated by the caller.

pub mod scoring;
pub mod validation;
pub mod sheet;

pub use scoring::{
    apply_delta, can_play_round, drop_level_for, drop_penalty, highest_active_score,
    lowest_active_score, round_limit, round_multiplier, should_eliminate, DANGER_ZONE,
    ELIMINATION_THRESHOLD, FIRST_DROP_PENALTY, MAX_ROUND_SCORE, REPEAT_DROP_PENALTY,
    SECRET_SEVEN_ROUNDS,
};
pub use validation::{check_can_start, check_player_name, validate_round_scores, NameError, StartError};
pub use sheet::{RoundRejected, RoundSheet, SheetCell};
