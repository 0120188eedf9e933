//! # tripeaks-engine
//!
//! A seed-deterministic rules engine for a Tri-Peaks-style card-clearing
//! game with a combo-driven powerup economy.
//!
//! ## Design Principles
//!
//! 1. **Immutable snapshots**: `GameState` is a value. Every transition
//!    clones it, rewrites the clone, and returns it — never mutating in
//!    place. Piles use persistent structures so the clones are cheap.
//!
//! 2. **Total transitions, no faults**: illegal input never errors.
//!    Plays are refused with a typed `Rejection`; everything else
//!    no-ops by returning a structurally equal snapshot, which the
//!    history stack declines to record.
//!
//! 3. **Deterministic deals**: a seed string fully determines the
//!    shuffle, the tableau, and the stock order, bit-for-bit across
//!    runs and platforms.
//!
//! The engine is presentation-free: rendering, input, and feedback
//! belong to the caller, which drives either the [`Game`] session or
//! the underlying pure functions directly.
//!
//! ## Modules
//!
//! - `core`: cards, the seeded deal RNG, snapshots, inventory
//! - `layout`: the static 28-slot board graph (coverers, neighbors)
//! - `deal`: deck shuffling and the initial deal
//! - `rules`: exposure resolution, move evaluation, state transitions
//! - `history`: the undo log over committed snapshots
//! - `game`: the session facade tying it all together

pub mod core;
pub mod deal;
pub mod game;
pub mod history;
pub mod layout;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    standard_deck, Card, CardId, DealRng, GameState, Inventory, Pile, Powerup, Rank, Status, Suit,
    Tableau, DECK_SIZE,
};

pub use crate::layout::{layout, Layout, PositionId, Slot, TABLEAU_SIZE};

pub use crate::deal::deal;

pub use crate::rules::{
    apply_play, combo_multiplier, draw, exposed_positions, hold, is_exposed, playable_positions,
    propose_play, select_powerup, toggle_wrap, Play, PlayMode, Rejection, BASE_POINTS, STOCK_BONUS,
};

pub use crate::history::History;

pub use crate::game::Game;
