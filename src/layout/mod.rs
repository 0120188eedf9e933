//! The static three-peaks board graph.
//!
//! ## Geometry
//!
//! The board is a fixed 28-slot layout: three pyramids sharing a base.
//! Row 0 holds the 3 peaks, rows 1 and 2 widen to 6 and 9 slots, and
//! row 3 is the fully-exposed 10-slot base. Columns sit on a half-step
//! grid so that the two slots physically overlapping a slot — its
//! **coverers** — are exactly the slots in the next row down at
//! `column - 1` and `column + 1`. Base slots have no coverers.
//!
//! ## Derived Relations
//!
//! - `coverers(id)`: the ≤2 slots that must empty before `id` is playable
//! - `neighbors(id)`: coverers plus covered children — the symmetric
//!   closure used by the bomb powerup's blast radius
//!
//! Both tables are precomputed once and shared as `&'static` data for
//! the life of the process; queries never recompute the graph.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Number of tableau slots on the board.
pub const TABLEAU_SIZE: usize = 28;

/// Columns per row, bottom of each pyramid widest. Rows are listed top
/// (peaks) to bottom (base); a slot's coverers live in the next row down.
const ROW_COLUMNS: [&[u8]; 4] = [
    &[3, 9, 15],
    &[2, 4, 8, 10, 14, 16],
    &[1, 3, 5, 7, 9, 11, 13, 15, 17],
    &[0, 2, 4, 6, 8, 10, 12, 14, 16, 18],
];

/// Identifier for a tableau slot, dense in `0..28` in layout order
/// (row by row, left to right).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PositionId(pub u8);

impl PositionId {
    /// Create a new position ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the slot index for table lookups.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check whether this ID names a real slot.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        (self.0 as usize) < TABLEAU_SIZE
    }

    /// Iterate over every slot ID in layout order.
    pub fn all() -> impl Iterator<Item = PositionId> {
        (0..TABLEAU_SIZE as u8).map(PositionId)
    }
}

impl std::fmt::Display for PositionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pos({})", self.0)
    }
}

/// A fixed board slot: where it sits, not what occupies it.
///
/// Occupancy lives in the game snapshot's tableau; slots are shared
/// static data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Dense slot ID.
    pub id: PositionId,
    /// Row, 0 (peaks) through 3 (base).
    pub row: u8,
    /// Column on the half-step grid.
    pub column: u8,
}

/// The precomputed board graph: slots plus coverer/neighbor tables.
#[derive(Debug)]
pub struct Layout {
    slots: [Slot; TABLEAU_SIZE],
    coverers: [SmallVec<[PositionId; 2]>; TABLEAU_SIZE],
    neighbors: [SmallVec<[PositionId; 4]>; TABLEAU_SIZE],
}

impl Layout {
    fn build() -> Self {
        let mut slots = Vec::with_capacity(TABLEAU_SIZE);
        for (row, columns) in ROW_COLUMNS.iter().enumerate() {
            for &column in *columns {
                slots.push(Slot {
                    id: PositionId(slots.len() as u8),
                    row: row as u8,
                    column,
                });
            }
        }
        let slots: [Slot; TABLEAU_SIZE] = slots
            .try_into()
            .expect("row table describes exactly 28 slots");

        let mut coverers: [SmallVec<[PositionId; 2]>; TABLEAU_SIZE] =
            std::array::from_fn(|_| SmallVec::new());
        for slot in &slots {
            for other in &slots {
                if other.row == slot.row + 1 && slot.column.abs_diff(other.column) == 1 {
                    coverers[slot.id.index()].push(other.id);
                }
            }
        }

        let mut neighbors: [SmallVec<[PositionId; 4]>; TABLEAU_SIZE] =
            std::array::from_fn(|_| SmallVec::new());
        for slot in &slots {
            for &coverer in &coverers[slot.id.index()] {
                neighbors[slot.id.index()].push(coverer);
                neighbors[coverer.index()].push(slot.id);
            }
        }

        Self {
            slots,
            coverers,
            neighbors,
        }
    }

    /// All slots in layout order.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Look up a slot by ID.
    #[must_use]
    pub fn slot(&self, id: PositionId) -> Option<&Slot> {
        self.slots.get(id.index())
    }

    /// The slots that must empty before `id` becomes playable (≤2).
    #[must_use]
    pub fn coverers(&self, id: PositionId) -> &[PositionId] {
        &self.coverers[id.index()]
    }

    /// The symmetric closure of the coverer relation: coverers plus
    /// covered children. This is the bomb powerup's blast radius.
    #[must_use]
    pub fn neighbors(&self, id: PositionId) -> &[PositionId] {
        &self.neighbors[id.index()]
    }
}

/// The process-wide board graph, built on first use.
#[must_use]
pub fn layout() -> &'static Layout {
    static LAYOUT: OnceLock<Layout> = OnceLock::new();
    LAYOUT.get_or_init(Layout::build)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_count_and_rows() {
        let layout = layout();
        assert_eq!(layout.slots().len(), TABLEAU_SIZE);

        let row_sizes: Vec<usize> = (0..4)
            .map(|row| layout.slots().iter().filter(|s| s.row == row).count())
            .collect();
        assert_eq!(row_sizes, vec![3, 6, 9, 10]);
    }

    #[test]
    fn test_ids_are_dense_in_layout_order() {
        let layout = layout();
        for (index, slot) in layout.slots().iter().enumerate() {
            assert_eq!(slot.id.index(), index);
        }
        // Rows never interleave.
        for pair in layout.slots().windows(2) {
            assert!(pair[0].row <= pair[1].row);
        }
    }

    #[test]
    fn test_base_row_has_no_coverers() {
        let layout = layout();
        for slot in layout.slots().iter().filter(|s| s.row == 3) {
            assert!(layout.coverers(slot.id).is_empty());
        }
    }

    #[test]
    fn test_upper_rows_have_two_coverers() {
        let layout = layout();
        for slot in layout.slots().iter().filter(|s| s.row < 3) {
            let coverers = layout.coverers(slot.id);
            assert_eq!(coverers.len(), 2, "slot {} has {:?}", slot.id, coverers);
            for &coverer in coverers {
                let covering_slot = layout.slot(coverer).unwrap();
                assert_eq!(covering_slot.row, slot.row + 1);
                assert_eq!(covering_slot.column.abs_diff(slot.column), 1);
            }
        }
    }

    #[test]
    fn test_peak_coverers() {
        let layout = layout();
        // Peak 0 sits at column 3; its coverers are row-1 columns 2 and 4,
        // which are the first two row-1 slots (IDs 3 and 4).
        assert_eq!(
            layout.coverers(PositionId(0)),
            &[PositionId(3), PositionId(4)]
        );
    }

    #[test]
    fn test_neighbors_are_symmetric() {
        let layout = layout();
        for slot in layout.slots() {
            for &neighbor in layout.neighbors(slot.id) {
                assert!(
                    layout.neighbors(neighbor).contains(&slot.id),
                    "{} -> {} not symmetric",
                    slot.id,
                    neighbor
                );
            }
        }
    }

    #[test]
    fn test_neighbor_counts() {
        let layout = layout();
        // Peaks touch only their two coverers; interior row-2 slots touch
        // two coverers and two children.
        assert_eq!(layout.neighbors(PositionId(0)).len(), 2);
        let max = layout
            .slots()
            .iter()
            .map(|s| layout.neighbors(s.id).len())
            .max()
            .unwrap();
        assert_eq!(max, 4);
    }

    #[test]
    fn test_layout_is_shared() {
        assert!(std::ptr::eq(layout(), layout()));
    }

    #[test]
    fn test_position_id_validity() {
        assert!(PositionId(0).is_valid());
        assert!(PositionId(27).is_valid());
        assert!(!PositionId(28).is_valid());
        assert_eq!(PositionId::all().count(), TABLEAU_SIZE);
    }
}
