//! The game session: one deal, its current snapshot, and its undo log.
//!
//! `Game` is the surface a presentation layer drives. Every mutating
//! method runs the corresponding pure transition, commits the result to
//! history only when it actually changed something, and reports that
//! effectfulness back so the caller can surface invalid-move feedback
//! itself. The underlying pure functions stay public for callers that
//! prefer to manage snapshots directly.

use serde::{Deserialize, Serialize};

use crate::core::state::{GameState, Powerup};
use crate::deal;
use crate::history::History;
use crate::layout::PositionId;
use crate::rules::engine;
use crate::rules::evaluator::{self, Play, Rejection};

/// A deal in progress: current snapshot plus undo history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Game {
    state: GameState,
    #[serde(skip)]
    history: History,
}

impl Game {
    /// Start a new game from a seed string.
    #[must_use]
    pub fn deal(seed: &str) -> Self {
        Self {
            state: deal::deal(seed),
            history: History::new(),
        }
    }

    /// Replace this game with a fresh deal, clearing the undo history
    /// unconditionally.
    pub fn redeal(&mut self, seed: &str) {
        self.state = deal::deal(seed);
        self.history.clear();
    }

    /// The current snapshot, for rendering.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The seed this deal was generated from.
    #[must_use]
    pub fn seed(&self) -> &str {
        &self.state.seed
    }

    /// Check whether an undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Evaluate a play without applying it.
    pub fn propose_play(&self, target: PositionId) -> Result<Play, Rejection> {
        evaluator::propose_play(&self.state, target)
    }

    /// Exposed positions a plain match would accept right now.
    #[must_use]
    pub fn playable_positions(&self) -> Vec<PositionId> {
        evaluator::playable_positions(&self.state)
    }

    /// Evaluate and apply a play on the given target.
    ///
    /// On success the transition is committed to history and the
    /// resolved play is returned; on rejection nothing changes.
    pub fn play(&mut self, target: PositionId) -> Result<Play, Rejection> {
        let play = evaluator::propose_play(&self.state, target)?;
        self.commit(engine::apply_play(&self.state, &play));
        Ok(play)
    }

    /// Apply an already-evaluated play.
    pub fn apply(&mut self, play: &Play) -> bool {
        self.commit(engine::apply_play(&self.state, play))
    }

    /// Flip the top stock card onto the waste.
    pub fn draw(&mut self) -> bool {
        self.commit(engine::draw(&self.state))
    }

    /// Move the up-card to the hold slot (swapping with any held card).
    pub fn hold(&mut self) -> bool {
        self.commit(engine::hold(&self.state))
    }

    /// Set the Ace/King wrap rule.
    pub fn set_wrap(&mut self, enabled: bool) -> bool {
        self.commit(engine::toggle_wrap(&self.state, enabled))
    }

    /// Arm or disarm a powerup for the next play.
    pub fn select_powerup(&mut self, kind: Powerup) -> bool {
        self.commit(engine::select_powerup(&self.state, kind))
    }

    /// Undo the most recent committed transition.
    ///
    /// Restores the entire prior snapshot — score, combo, inventory,
    /// and toggles included. Returns false when there is nothing to
    /// undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(prior) => {
                self.state = prior;
                true
            }
            None => false,
        }
    }

    /// Commit a transition, reporting whether it changed anything.
    fn commit(&mut self, next: GameState) -> bool {
        let changed = next != self.state;
        self.state = self.history.commit(&self.state, next);
        changed
    }
}
