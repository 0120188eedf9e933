//! Exposure resolution: which tableau positions are currently playable.
//!
//! A position is **exposed** when it holds a card and none of its
//! coverers do. Coverers are checked directly, not transitively — a
//! coverer that has already left the board breaks the overlap chain at
//! that level. Base-row slots have no coverers and are exposed whenever
//! occupied.
//!
//! The resolver is a pure function over the tableau and is recomputed
//! after every mutation; at 28 slots there is nothing worth caching.

use rustc_hash::FxHashSet;

use crate::core::state::Tableau;
use crate::layout::{layout, PositionId};

/// Check whether a single position is exposed.
#[must_use]
pub fn is_exposed(tableau: &Tableau, id: PositionId) -> bool {
    if !id.is_valid() || tableau[id.index()].is_none() {
        return false;
    }
    layout()
        .coverers(id)
        .iter()
        .all(|coverer| tableau[coverer.index()].is_none())
}

/// Collect every exposed position.
#[must_use]
pub fn exposed_positions(tableau: &Tableau) -> FxHashSet<PositionId> {
    PositionId::all()
        .filter(|&id| is_exposed(tableau, id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deal::deal;
    use crate::layout::TABLEAU_SIZE;

    #[test]
    fn test_fresh_deal_exposes_exactly_the_base_row() {
        let state = deal("exposure");
        let exposed = exposed_positions(&state.tableau);

        assert_eq!(exposed.len(), 10);
        for id in PositionId::all() {
            let base_row = layout().slot(id).unwrap().row == 3;
            assert_eq!(exposed.contains(&id), base_row);
        }
    }

    #[test]
    fn test_covered_position_is_never_exposed() {
        let state = deal("covered");
        // Peak 0 is covered by slots 3 and 4; with either occupied it
        // stays buried.
        let mut tableau = state.tableau;
        tableau[4] = None;
        assert!(!is_exposed(&tableau, PositionId(0)));
    }

    #[test]
    fn test_clearing_both_coverers_exposes() {
        let state = deal("uncovering");
        let mut tableau = state.tableau;

        assert!(!is_exposed(&tableau, PositionId(0)));
        tableau[3] = None;
        tableau[4] = None;
        assert!(is_exposed(&tableau, PositionId(0)));
    }

    #[test]
    fn test_empty_slot_is_not_exposed() {
        let state = deal("empty-slot");
        let mut tableau = state.tableau;
        tableau[20] = None;

        assert!(!is_exposed(&tableau, PositionId(20)));
        assert!(!exposed_positions(&tableau).contains(&PositionId(20)));
    }

    #[test]
    fn test_out_of_range_id_is_not_exposed() {
        let state = deal("bounds");
        assert!(!is_exposed(&state.tableau, PositionId(TABLEAU_SIZE as u8)));
    }

    #[test]
    fn test_empty_tableau_exposes_nothing() {
        let tableau: Tableau = [None; TABLEAU_SIZE];
        assert!(exposed_positions(&tableau).is_empty());
    }
}
