//! Playing cards: ranks, suits, and the canonical 52-card deck.
//!
//! ## Identity
//!
//! Every card carries a `CardId` — its index in the canonical deck order
//! (suits Hearts, Diamonds, Clubs, Spades; ranks Ace through King within
//! each suit). IDs are unique per deal and make card tracking trivial for
//! callers that key animations or tests off a specific card.

use serde::{Deserialize, Serialize};

/// Number of cards in a deck.
pub const DECK_SIZE: usize = 52;

/// Number of ranks per suit.
pub const RANKS_PER_SUIT: u8 = 13;

/// Unique identifier for a card within a deck.
///
/// Equal to the card's index in canonical deck order, so IDs are dense
/// in `0..52`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// All suits in canonical deck order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// One-character symbol for display.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Card rank: 1 = Ace, 11/12/13 = Jack/Queen/King.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rank(pub u8);

impl Rank {
    pub const ACE: Rank = Rank(1);
    pub const JACK: Rank = Rank(11);
    pub const QUEEN: Rank = Rank(12);
    pub const KING: Rank = Rank(13);

    /// Create a new rank. Valid ranks are `1..=13`.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Get the numeric rank value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Check whether two ranks may be matched on the waste pile.
    ///
    /// Ranks match when they differ by exactly one. With `wrap` enabled
    /// the Ace/King pair also matches, closing the rank cycle.
    ///
    /// ```
    /// use tripeaks_engine::core::Rank;
    ///
    /// assert!(Rank(5).is_adjacent(Rank(6), false));
    /// assert!(!Rank(5).is_adjacent(Rank(7), false));
    /// assert!(Rank::ACE.is_adjacent(Rank::KING, true));
    /// assert!(!Rank::ACE.is_adjacent(Rank::KING, false));
    /// ```
    #[must_use]
    pub fn is_adjacent(self, other: Rank, wrap: bool) -> bool {
        let delta = self.0.abs_diff(other.0);
        delta == 1 || (wrap && delta == 12)
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            1 => write!(f, "A"),
            11 => write!(f, "J"),
            12 => write!(f, "Q"),
            13 => write!(f, "K"),
            n => write!(f, "{}", n),
        }
    }
}

/// An immutable playing card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Identity within the deck (index in canonical order).
    pub id: CardId,
    /// Rank, `1..=13`.
    pub rank: Rank,
    /// Suit.
    pub suit: Suit,
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Build the 52-card deck in canonical order.
///
/// Canonical order is suits Hearts, Diamonds, Clubs, Spades, each running
/// Ace through King. A card's `CardId` equals its index in this order.
#[must_use]
pub fn standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for (suit_index, &suit) in Suit::ALL.iter().enumerate() {
        for value in 1..=RANKS_PER_SUIT {
            deck.push(Card {
                id: CardId(suit_index as u8 * RANKS_PER_SUIT + (value - 1)),
                rank: Rank(value),
                suit,
            });
        }
    }
    deck
}
