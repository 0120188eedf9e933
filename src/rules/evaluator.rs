//! Move evaluation: is a proposed play legal, and what would it clear?
//!
//! The four action shapes — plain match and the three powerup modes —
//! are one tagged `PlayMode` dispatched through a single
//! [`propose_play`] function, mirroring how the snapshot's armed
//! powerup selects the rule set. The evaluator only *computes* the clear
//! set; applying it is the transition engine's job, so a rejection never
//! leaves partial effects behind.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::exposure::{exposed_positions, is_exposed};
use crate::core::state::{GameState, Powerup, Status};
use crate::layout::PositionId;

/// How a play clears cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayMode {
    /// Rank-adjacent match against the waste up-card.
    Plain,
    /// Wild powerup: any exposed card, no rank check.
    Wild,
    /// Bomb powerup: the target plus the neighbors its removal frees.
    Bomb,
    /// Rainbow powerup: every exposed card of the target's rank.
    Rainbow,
}

impl PlayMode {
    /// The mode an armed powerup selects.
    #[must_use]
    pub fn from_active(active: Option<Powerup>) -> Self {
        match active {
            None => PlayMode::Plain,
            Some(Powerup::Wild) => PlayMode::Wild,
            Some(Powerup::Bomb) => PlayMode::Bomb,
            Some(Powerup::Rainbow) => PlayMode::Rainbow,
        }
    }

    /// The powerup this mode spends, if any.
    #[must_use]
    pub fn powerup(self) -> Option<Powerup> {
        match self {
            PlayMode::Plain => None,
            PlayMode::Wild => Some(Powerup::Wild),
            PlayMode::Bomb => Some(Powerup::Bomb),
            PlayMode::Rainbow => Some(Powerup::Rainbow),
        }
    }
}

/// A legal play: the target, the mode it resolves under, and the full
/// set of positions it clears (target included, duplicates removed).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    /// The position the player acted on.
    pub target: PositionId,
    /// Rule set the play resolves under.
    pub mode: PlayMode,
    /// Every position cleared by this play. The target is always first.
    pub cleared: SmallVec<[PositionId; 8]>,
}

/// Why a proposed play was refused. Rejections carry no effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rejection {
    /// Empty, covered, or non-existent target position.
    IllegalTarget,
    /// Wrong game status, or a powerup mode without inventory.
    IllegalMode,
    /// Plain match with no up-card or a non-adjacent rank.
    IllegalMatch,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::IllegalTarget => write!(f, "position is empty or covered"),
            Rejection::IllegalMode => write!(f, "action unavailable in this state"),
            Rejection::IllegalMatch => write!(f, "rank does not match the up-card"),
        }
    }
}

/// Evaluate a proposed play against the current snapshot.
///
/// Returns the full clear set a legal play would produce, or the reason
/// it is refused. Never mutates the snapshot.
pub fn propose_play(state: &GameState, target: PositionId) -> Result<Play, Rejection> {
    if state.status != Status::Playing {
        return Err(Rejection::IllegalMode);
    }
    let Some(target_card) = state.tableau.get(target.index()).copied().flatten() else {
        return Err(Rejection::IllegalTarget);
    };
    if !is_exposed(&state.tableau, target) {
        return Err(Rejection::IllegalTarget);
    }

    let mode = PlayMode::from_active(state.active_powerup);
    if let Some(kind) = mode.powerup() {
        if state.powerups.count(kind) == 0 {
            return Err(Rejection::IllegalMode);
        }
    }

    let mut cleared: SmallVec<[PositionId; 8]> = SmallVec::new();
    cleared.push(target);

    match mode {
        PlayMode::Plain => {
            let Some(up_card) = state.waste_top() else {
                return Err(Rejection::IllegalMatch);
            };
            if !target_card.rank.is_adjacent(up_card.rank, state.wrap_enabled) {
                return Err(Rejection::IllegalMatch);
            }
        }
        PlayMode::Wild => {}
        PlayMode::Bomb => {
            // The blast resolves simultaneously with the target's
            // removal: a neighbor is caught when it holds a card and no
            // slot other than the target still covers it. (A neighbor of
            // an exposed target can never be exposed *before* the blast —
            // its coverers include the target or are already empty slots.)
            let layout = crate::layout::layout();
            for &neighbor in layout.neighbors(target) {
                let occupied = state.tableau[neighbor.index()].is_some();
                let freed = layout
                    .coverers(neighbor)
                    .iter()
                    .all(|&c| c == target || state.tableau[c.index()].is_none());
                if occupied && freed {
                    cleared.push(neighbor);
                }
            }
        }
        PlayMode::Rainbow => {
            let exposed = exposed_positions(&state.tableau);
            let mut twins: Vec<PositionId> = exposed
                .into_iter()
                .filter(|&id| {
                    id != target
                        && state.tableau[id.index()]
                            .is_some_and(|card| card.rank == target_card.rank)
                })
                .collect();
            twins.sort();
            cleared.extend(twins);
        }
    }

    Ok(Play {
        target,
        mode,
        cleared,
    })
}

/// Exposed positions a plain match would accept right now.
///
/// Uses the same adjacency rule as the loss check; intended for UI
/// hinting. Returned in layout order.
#[must_use]
pub fn playable_positions(state: &GameState) -> Vec<PositionId> {
    let Some(up_card) = state.waste_top() else {
        return Vec::new();
    };
    PositionId::all()
        .filter(|&id| {
            is_exposed(&state.tableau, id)
                && state.tableau[id.index()]
                    .is_some_and(|card| card.rank.is_adjacent(up_card.rank, state.wrap_enabled))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Card, CardId, Rank, Suit};
    use crate::core::state::{Inventory, Pile, Tableau};
    use crate::layout::TABLEAU_SIZE;

    fn card(id: u8, rank: u8, suit: Suit) -> Card {
        Card {
            id: CardId(id),
            rank: Rank(rank),
            suit,
        }
    }

    /// A hand-built position: only the base row is occupied, holding
    /// ranks 5,6,...,13,A left to right; the rows above are empty.
    fn test_state() -> GameState {
        let mut tableau: Tableau = [None; TABLEAU_SIZE];
        for (offset, slot) in (18..28).enumerate() {
            let rank = (4 + offset as u8) % 13 + 1;
            tableau[slot] = Some(card(offset as u8, rank, Suit::Clubs));
        }

        let mut waste = Pile::new();
        waste.push_back(card(50, 6, Suit::Hearts));

        GameState {
            seed: "evaluator".to_string(),
            tableau,
            stock: Pile::new(),
            waste,
            hold: None,
            score: 0,
            combo: 0,
            powerups: Inventory::new(),
            active_powerup: None,
            powerup_cycle: 0,
            wrap_enabled: false,
            status: Status::Playing,
            bonus_awarded: false,
        }
    }

    #[test]
    fn test_plain_match_adjacent_rank() {
        let state = test_state();
        // Base slot 18 holds rank 5; up-card is rank 6.
        let play = propose_play(&state, PositionId(18)).unwrap();

        assert_eq!(play.mode, PlayMode::Plain);
        assert_eq!(play.cleared.as_slice(), &[PositionId(18)]);
    }

    #[test]
    fn test_plain_match_rejects_non_adjacent_rank() {
        let state = test_state();
        // Base slot 21 holds rank 8 against an up-card of 6.
        assert_eq!(
            propose_play(&state, PositionId(21)),
            Err(Rejection::IllegalMatch)
        );
    }

    #[test]
    fn test_plain_match_rejects_empty_waste() {
        let mut state = test_state();
        state.waste = Pile::new();
        assert_eq!(
            propose_play(&state, PositionId(18)),
            Err(Rejection::IllegalMatch)
        );
    }

    #[test]
    fn test_wrap_allows_ace_king_match() {
        let mut state = test_state();
        state.tableau[18] = Some(card(40, 13, Suit::Spades));
        state.waste = Pile::new();
        state.waste.push_back(card(41, 1, Suit::Hearts));

        assert_eq!(
            propose_play(&state, PositionId(18)),
            Err(Rejection::IllegalMatch)
        );

        state.wrap_enabled = true;
        assert!(propose_play(&state, PositionId(18)).is_ok());
    }

    #[test]
    fn test_covered_target_rejected() {
        let mut state = test_state();
        // Occupy slot 9 (row 2); its coverers 18 and 19 hold cards, so it
        // is covered even though occupied.
        state.tableau[9] = Some(card(42, 6, Suit::Diamonds));
        assert_eq!(
            propose_play(&state, PositionId(9)),
            Err(Rejection::IllegalTarget)
        );
    }

    #[test]
    fn test_empty_and_out_of_range_targets_rejected() {
        let state = test_state();
        assert_eq!(
            propose_play(&state, PositionId(0)),
            Err(Rejection::IllegalTarget)
        );
        assert_eq!(
            propose_play(&state, PositionId(99)),
            Err(Rejection::IllegalTarget)
        );
    }

    #[test]
    fn test_terminal_status_rejects_everything() {
        let mut state = test_state();
        state.status = Status::Won;
        assert_eq!(
            propose_play(&state, PositionId(18)),
            Err(Rejection::IllegalMode)
        );
    }

    #[test]
    fn test_wild_ignores_rank_but_needs_inventory() {
        let mut state = test_state();
        state.active_powerup = Some(Powerup::Wild);

        // Armed without inventory: refused as a mode error.
        assert_eq!(
            propose_play(&state, PositionId(21)),
            Err(Rejection::IllegalMode)
        );

        state.powerups.add(Powerup::Wild, 1);
        let play = propose_play(&state, PositionId(21)).unwrap();
        assert_eq!(play.mode, PlayMode::Wild);
        assert_eq!(play.cleared.as_slice(), &[PositionId(21)]);
    }

    #[test]
    fn test_bomb_alone_clears_only_the_target() {
        let mut state = test_state();
        state.powerups.add(Powerup::Bomb, 1);
        state.active_powerup = Some(Powerup::Bomb);

        // Slot 19's neighbors (row-2 slots 9 and 10) are empty here, so
        // the blast catches nothing extra.
        let play = propose_play(&state, PositionId(19)).unwrap();
        assert_eq!(play.mode, PlayMode::Bomb);
        assert_eq!(play.cleared.as_slice(), &[PositionId(19)]);
    }

    #[test]
    fn test_bomb_frees_and_clears_pinned_neighbors() {
        let mut state = test_state();
        state.powerups.add(Powerup::Bomb, 1);
        state.active_powerup = Some(Powerup::Bomb);

        // Base slot 19 covers row-2 slots 9 and 10. Occupy both; slot 9's
        // other coverer (18) is emptied so the blast frees it, while slot
        // 10 stays pinned by base slot 20.
        state.tableau[18] = None;
        state.tableau[9] = Some(card(43, 2, Suit::Diamonds));
        state.tableau[10] = Some(card(47, 9, Suit::Hearts));

        let play = propose_play(&state, PositionId(19)).unwrap();
        assert_eq!(play.cleared.as_slice(), &[PositionId(19), PositionId(9)]);
    }

    #[test]
    fn test_bomb_two_neighbor_blast() {
        let mut state = test_state();
        state.powerups.add(Powerup::Bomb, 1);
        state.active_powerup = Some(Powerup::Bomb);

        // Clear the base except slot 19, occupy both of its children:
        // each child's other coverer is now empty, so the blast takes
        // the target plus both neighbors.
        state.tableau[18] = None;
        state.tableau[20] = None;
        state.tableau[9] = Some(card(43, 2, Suit::Diamonds));
        state.tableau[10] = Some(card(47, 9, Suit::Hearts));

        let play = propose_play(&state, PositionId(19)).unwrap();
        assert_eq!(
            play.cleared.as_slice(),
            &[PositionId(19), PositionId(9), PositionId(10)]
        );
    }

    #[test]
    fn test_rainbow_clears_exposed_rank_twins() {
        let mut state = test_state();
        state.powerups.add(Powerup::Rainbow, 1);
        state.active_powerup = Some(Powerup::Rainbow);

        // Give base slots 22 and 26 the same rank as slot 18.
        state.tableau[22] = Some(card(44, 5, Suit::Hearts));
        state.tableau[26] = Some(card(45, 5, Suit::Diamonds));

        let play = propose_play(&state, PositionId(18)).unwrap();
        assert_eq!(play.mode, PlayMode::Rainbow);
        assert_eq!(
            play.cleared.as_slice(),
            &[PositionId(18), PositionId(22), PositionId(26)]
        );
    }

    #[test]
    fn test_rainbow_skips_buried_twins() {
        let mut state = test_state();
        state.powerups.add(Powerup::Rainbow, 1);
        state.active_powerup = Some(Powerup::Rainbow);

        // A rank twin on a covered slot must not join the clear set.
        state.tableau[9] = Some(card(46, 5, Suit::Hearts));

        let play = propose_play(&state, PositionId(18)).unwrap();
        assert_eq!(play.cleared.as_slice(), &[PositionId(18)]);
    }

    #[test]
    fn test_playable_positions_hint() {
        let state = test_state();
        // Up-card rank 6: base ranks 5 (slot 18) and 7 (slot 20) match.
        assert_eq!(
            playable_positions(&state),
            vec![PositionId(18), PositionId(20)]
        );

        let mut empty_waste = state.clone();
        empty_waste.waste = Pile::new();
        assert!(playable_positions(&empty_waste).is_empty());
    }

    #[test]
    fn test_evaluator_never_mutates() {
        let state = test_state();
        let before = state.clone();
        let _ = propose_play(&state, PositionId(18));
        let _ = propose_play(&state, PositionId(99));
        let _ = playable_positions(&state);
        assert_eq!(state, before);
    }
}
