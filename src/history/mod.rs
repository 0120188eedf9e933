//! The undo log: a linear stack of prior snapshots.
//!
//! Only *effectful* transitions are recorded. `commit` compares the
//! prior and next snapshots structurally and refuses to push when a
//! transition turned out to be a no-op, so one `undo` always reverses
//! exactly one real change — score, combo, inventory, toggles and all.
//! Snapshots are cheap to keep: the piles inside them are persistent
//! structures.

use crate::core::state::GameState;

/// Linear undo log over whole game snapshots.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<GameState>,
}

impl History {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transition, keeping `prior` only if `next` differs.
    ///
    /// Returns `next` either way, so callers can write
    /// `state = history.commit(&state, transition(&state))`.
    pub fn commit(&mut self, prior: &GameState, next: GameState) -> GameState {
        if next != *prior {
            self.entries.push(prior.clone());
        }
        next
    }

    /// Pop the most recent snapshot, or `None` when there is nothing
    /// left to undo.
    pub fn undo(&mut self) -> Option<GameState> {
        self.entries.pop()
    }

    /// Drop every entry. Run on every new deal.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of undoable transitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether there is anything to undo.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
