//! Core value types: cards, the seeded deal RNG, and game state snapshots.
//!
//! Everything here is plain data. The rules layer consumes these types
//! but the dependencies never point back.

pub mod card;
pub mod rng;
pub mod state;

pub use card::{standard_deck, Card, CardId, Rank, Suit, DECK_SIZE, RANKS_PER_SUIT};
pub use rng::DealRng;
pub use state::{GameState, Inventory, Pile, Powerup, Status, Tableau};
