//! Game state snapshots: piles, powerup inventory, terminal status.
//!
//! ## Snapshot Discipline
//!
//! `GameState` is the single source of truth and is never mutated in
//! place by the rules layer: every transition clones the snapshot,
//! rewrites the clone, and returns it. Piles use `im::Vector` so those
//! clones are O(1) per pile, which is what makes whole-state history
//! entries affordable.
//!
//! ## State Machine
//!
//! `status` starts at `Playing` and latches at `Won` or `Lost`; once
//! terminal, no card-moving transition is accepted until a fresh deal.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::Card;
use crate::layout::TABLEAU_SIZE;

/// An ordered pile of cards. The back of the vector is the top.
pub type Pile = Vector<Card>;

/// Tableau occupancy, indexed by `PositionId`.
pub type Tableau = [Option<Card>; TABLEAU_SIZE];

/// The three powerup kinds, in grant-rotation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Powerup {
    /// Clear any exposed card, ignoring rank.
    Wild,
    /// Clear an exposed card plus the neighbors its removal frees.
    Bomb,
    /// Clear every exposed card sharing the target's rank.
    Rainbow,
}

impl Powerup {
    /// Grant rotation: combo milestones award these kinds in a fixed cycle.
    pub const ROTATION: [Powerup; 3] = [Powerup::Wild, Powerup::Bomb, Powerup::Rainbow];

    /// The kind granted at a given rotation cursor.
    #[must_use]
    pub fn for_cycle(cycle: u32) -> Self {
        Self::ROTATION[(cycle % 3) as usize]
    }
}

impl std::fmt::Display for Powerup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Powerup::Wild => write!(f, "wild"),
            Powerup::Bomb => write!(f, "bomb"),
            Powerup::Rainbow => write!(f, "rainbow"),
        }
    }
}

/// Per-kind powerup counts. Counts never go below zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Inventory {
    wild: u32,
    bomb: u32,
    rainbow: u32,
}

impl Inventory {
    /// Create an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the count for a kind.
    #[must_use]
    pub fn count(&self, kind: Powerup) -> u32 {
        match kind {
            Powerup::Wild => self.wild,
            Powerup::Bomb => self.bomb,
            Powerup::Rainbow => self.rainbow,
        }
    }

    /// Add to the count for a kind.
    pub fn add(&mut self, kind: Powerup, amount: u32) {
        let slot = match kind {
            Powerup::Wild => &mut self.wild,
            Powerup::Bomb => &mut self.bomb,
            Powerup::Rainbow => &mut self.rainbow,
        };
        *slot += amount;
    }

    /// Spend one unit of a kind, flooring at zero.
    pub fn consume(&mut self, kind: Powerup) {
        let slot = match kind {
            Powerup::Wild => &mut self.wild,
            Powerup::Bomb => &mut self.bomb,
            Powerup::Rainbow => &mut self.rainbow,
        };
        *slot = slot.saturating_sub(1);
    }

    /// Total units across all kinds.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.wild + self.bomb + self.rainbow
    }

    /// Check whether every count is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Game status. `Won` and `Lost` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Playing,
    Won,
    Lost,
}

/// One immutable snapshot of a deal in progress.
///
/// Across `tableau`, `stock`, `waste`, and `hold` the 52 cards of the
/// deal partition exactly once at deal time; cleared cards leave play.
/// Transitions replace the whole value, so `PartialEq` doubles as the
/// "was this transition effectful" check the history stack relies on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Seed this deal was generated from ("replay this deal").
    pub seed: String,
    /// Board occupancy, indexed by position ID.
    pub tableau: Tableau,
    /// Face-down draw pile.
    pub stock: Pile,
    /// Face-up discard pile; its top is the current up-card.
    pub waste: Pile,
    /// Card set aside by the hold action, if any.
    pub hold: Option<Card>,
    /// Accumulated score.
    pub score: u32,
    /// Current clear streak. Reset by draw and hold.
    pub combo: u32,
    /// Earned, unspent powerups.
    pub powerups: Inventory,
    /// Powerup armed for the next play, if any.
    pub active_powerup: Option<Powerup>,
    /// Grant rotation cursor, advanced once per granted powerup.
    pub powerup_cycle: u32,
    /// Whether Ace and King count as adjacent ranks.
    pub wrap_enabled: bool,
    /// Current status. Terminal values latch.
    pub status: Status,
    /// Whether the win bonus has been granted for this deal.
    pub bonus_awarded: bool,
}

impl GameState {
    /// Get the occupant of a tableau position.
    #[must_use]
    pub fn tableau_card(&self, index: usize) -> Option<Card> {
        self.tableau.get(index).copied().flatten()
    }

    /// Count the cards remaining on the tableau.
    #[must_use]
    pub fn tableau_count(&self) -> usize {
        self.tableau.iter().filter(|slot| slot.is_some()).count()
    }

    /// Check whether the tableau has been fully cleared.
    #[must_use]
    pub fn tableau_is_empty(&self) -> bool {
        self.tableau.iter().all(|slot| slot.is_none())
    }

    /// The current up-card, if the waste pile is non-empty.
    #[must_use]
    pub fn waste_top(&self) -> Option<Card> {
        self.waste.last().copied()
    }

    /// Check whether any powerup could still be brought to bear:
    /// one is armed, or the inventory holds at least one unit.
    #[must_use]
    pub fn powerup_available(&self) -> bool {
        self.active_powerup.is_some() || !self.powerups.is_empty()
    }

    /// Every card still in play, across tableau, stock, waste, and hold.
    #[must_use]
    pub fn all_cards(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.tableau.iter().filter_map(|slot| *slot).collect();
        cards.extend(self.stock.iter().copied());
        cards.extend(self.waste.iter().copied());
        cards.extend(self.hold);
        cards
    }
}
