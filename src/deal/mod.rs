//! Deck shuffling and the initial deal.
//!
//! `deal` is the only constructor of a fresh `GameState`: canonical deck,
//! seeded Fisher–Yates shuffle, 28 cards onto the tableau in layout
//! order, the rest to stock, and one card flipped to waste as the
//! initial up-card. There is no failure path — a 52-card deck always
//! fills a 28-slot board.

use im::Vector;

use crate::core::card::standard_deck;
use crate::core::rng::DealRng;
use crate::core::state::{GameState, Inventory, Status, Tableau};
use crate::layout::TABLEAU_SIZE;

/// Deal a fresh game from a seed string.
///
/// The same seed always produces the same tableau, stock order, and
/// initial up-card.
///
/// ```
/// use tripeaks_engine::deal::deal;
///
/// let state = deal("test-1");
/// assert_eq!(state.tableau_count(), 28);
/// assert_eq!(state.stock.len(), 23);
/// assert_eq!(state.waste.len(), 1);
/// ```
#[must_use]
pub fn deal(seed: &str) -> GameState {
    let mut cards = standard_deck();
    let mut rng = DealRng::new(seed);

    // Fisher–Yates, walking down from the last index.
    for i in (1..cards.len()).rev() {
        let j = rng.next_index(i + 1);
        cards.swap(i, j);
    }

    let mut tableau: Tableau = [None; TABLEAU_SIZE];
    for (slot, card) in tableau.iter_mut().zip(&cards) {
        *slot = Some(*card);
    }

    // Remaining shuffle order becomes the stock, 29th shuffled card on
    // top, then the top card is flipped to start the waste.
    let mut stock: Vector<_> = cards[TABLEAU_SIZE..].iter().rev().copied().collect();
    let mut waste = Vector::new();
    if let Some(up_card) = stock.pop_back() {
        waste.push_back(up_card);
    }

    GameState {
        seed: seed.to_string(),
        tableau,
        stock,
        waste,
        hold: None,
        score: 0,
        combo: 0,
        powerups: Inventory::new(),
        active_powerup: None,
        powerup_cycle: 0,
        wrap_enabled: true,
        status: Status::Playing,
        bonus_awarded: false,
    }
}
