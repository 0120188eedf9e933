//! The rules layer: exposure, move evaluation, and state transitions.
//!
//! Split the way the data flows: `exposure` answers "what is playable",
//! `evaluator` answers "is this play legal and what would it clear",
//! and `engine` turns a verdict into the next snapshot. Evaluation
//! never mutates; application never judges.

pub mod engine;
pub mod evaluator;
pub mod exposure;

pub use engine::{
    apply_play, combo_multiplier, draw, hold, select_powerup, toggle_wrap, BASE_POINTS,
    STOCK_BONUS,
};
pub use evaluator::{playable_positions, propose_play, Play, PlayMode, Rejection};
pub use exposure::{exposed_positions, is_exposed};
