//! State transitions: applying plays, drawing, holding, toggles, and
//! terminal detection.
//!
//! ## Transition Discipline
//!
//! Every transition is total: it accepts any snapshot and returns a new
//! one. When a precondition fails the result is structurally equal to
//! the input — the recognizable no-op the history stack refuses to
//! commit. Nothing here mutates the caller's snapshot and nothing can
//! fail; the worst outcome is a no-op.
//!
//! ## Terminal Detection
//!
//! Win/loss evaluation runs inside every card-moving transition, in
//! priority order: an empty tableau wins (granting the stock bonus at
//! most once); otherwise an empty stock loses when no exposed card is
//! playable and no powerup remains to force one.

use crate::core::state::{GameState, Powerup, Status};
use crate::rules::evaluator::Play;
use crate::rules::exposure::exposed_positions;

/// Points for clearing a single card before the combo multiplier.
pub const BASE_POINTS: u32 = 100;

/// Win bonus per card left in the stock.
pub const STOCK_BONUS: u32 = 50;

/// Combo multiplier: steps 1.0 → 1.5 → 2.0 → 2.5 → 3.0 every three
/// combo points, capped at 3.0.
#[must_use]
pub fn combo_multiplier(combo: u32) -> f64 {
    if combo == 0 {
        1.0
    } else {
        1.0 + (f64::from(combo / 3) * 0.5).min(2.0)
    }
}

/// Apply a legal play produced by the evaluator.
///
/// Clears every position in the play's clear set, pushes the target's
/// former occupant onto the waste as the new up-card, advances combo and
/// score, spends the play's powerup, grants combo-milestone powerups,
/// and re-evaluates terminal status.
#[must_use]
pub fn apply_play(state: &GameState, play: &Play) -> GameState {
    let mut next = state.clone();
    if state.status != Status::Playing {
        return next;
    }
    let Some(target_card) = next.tableau.get(play.target.index()).copied().flatten() else {
        return next;
    };

    for &id in &play.cleared {
        next.tableau[id.index()] = None;
    }
    next.waste.push_back(target_card);

    let previous_combo = next.combo;
    next.combo += play.cleared.len() as u32;

    let gain = play.cleared.len() as f64 * f64::from(BASE_POINTS) * combo_multiplier(next.combo);
    next.score += gain.round() as u32;

    if let Some(kind) = play.mode.powerup() {
        next.powerups.consume(kind);
    }

    // Every combo milestone crossed by this clear grants the next
    // powerup in the rotation; a multi-card clear can cross several.
    for milestone in (previous_combo + 1)..=next.combo {
        if milestone % 3 == 0 {
            next.powerups.add(Powerup::for_cycle(next.powerup_cycle), 1);
            next.powerup_cycle += 1;
        }
    }

    next.active_powerup = None;
    resolve_status(&mut next);
    next
}

/// Flip the top stock card onto the waste.
///
/// Resets the combo and disarms any active powerup. No-op when the
/// stock is empty or the game is over.
#[must_use]
pub fn draw(state: &GameState) -> GameState {
    let mut next = state.clone();
    if state.status != Status::Playing {
        return next;
    }
    let Some(card) = next.stock.pop_back() else {
        return next;
    };
    next.waste.push_back(card);
    next.combo = 0;
    next.active_powerup = None;
    resolve_status(&mut next);
    next
}

/// Move the waste up-card to the hold slot, swapping with any card
/// already held.
///
/// Resets the combo and disarms any active powerup. No-op when the
/// waste is empty or the game is over.
#[must_use]
pub fn hold(state: &GameState) -> GameState {
    let mut next = state.clone();
    if state.status != Status::Playing {
        return next;
    }
    let Some(card) = next.waste.pop_back() else {
        return next;
    };
    if let Some(held) = next.hold.take() {
        next.waste.push_back(held);
    }
    next.hold = Some(card);
    next.combo = 0;
    next.active_powerup = None;
    resolve_status(&mut next);
    next
}

/// Set the Ace/King wrap rule.
///
/// A pure field update: combo, inventory, and the armed powerup are
/// untouched, and the deal is not reshuffled. Legal in any status;
/// setting the current value yields a structural no-op.
#[must_use]
pub fn toggle_wrap(state: &GameState, enabled: bool) -> GameState {
    let mut next = state.clone();
    next.wrap_enabled = enabled;
    next
}

/// Arm a powerup for the next play, or disarm it if already armed.
///
/// No-op when the inventory for `kind` is empty or the game is over.
#[must_use]
pub fn select_powerup(state: &GameState, kind: Powerup) -> GameState {
    let mut next = state.clone();
    if state.status != Status::Playing {
        return next;
    }
    if next.active_powerup == Some(kind) {
        next.active_powerup = None;
    } else if next.powerups.count(kind) > 0 {
        next.active_powerup = Some(kind);
    }
    next
}

/// Terminal-condition check, run after every card-moving transition.
fn resolve_status(state: &mut GameState) {
    // 1. Board cleared: the deal is won. The stock bonus lands once.
    if state.tableau_is_empty() {
        state.status = Status::Won;
        if !state.bonus_awarded {
            state.score += state.stock.len() as u32 * STOCK_BONUS;
            state.bonus_awarded = true;
        }
        return;
    }

    // 2. Dead position checks only arm once the stock runs dry.
    if !state.stock.is_empty() {
        return;
    }
    let exposed = exposed_positions(&state.tableau);
    if exposed.is_empty() {
        state.status = Status::Lost;
        return;
    }

    // A powerup in hand counts as an out, even when no powerup play
    // actually exists for this position. Deliberate leniency.
    if state.powerup_available() {
        return;
    }
    let up_rank = state.waste_top().map(|card| card.rank);
    let any_playable = up_rank.is_some_and(|up| {
        exposed.iter().any(|id| {
            state.tableau[id.index()]
                .is_some_and(|card| card.rank.is_adjacent(up, state.wrap_enabled))
        })
    });
    if !any_playable {
        state.status = Status::Lost;
    }
}
