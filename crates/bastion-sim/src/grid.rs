//! Placement grid occupancy.
//!
//! Towers claim a 2x2 block of cells, buildings 4x4, anchored at their
//! top-left cell. Claims are all-or-nothing so a failed placement never
//! leaves partial cells behind.

use std::collections::HashSet;

use bastion_core::types::GridPos;

/// Tracks which grid cells are occupied by towers and buildings.
#[derive(Debug, Default)]
pub struct OccupancyGrid {
    occupied: HashSet<GridPos>,
}

impl OccupancyGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every cell in the footprint is free.
    pub fn is_free(&self, anchor: GridPos, footprint: i32) -> bool {
        cells(anchor, footprint).all(|cell| !self.occupied.contains(&cell))
    }

    /// Claim every cell in the footprint. Returns false (claiming
    /// nothing) if any cell is already taken.
    pub fn claim(&mut self, anchor: GridPos, footprint: i32) -> bool {
        if !self.is_free(anchor, footprint) {
            return false;
        }
        for cell in cells(anchor, footprint) {
            self.occupied.insert(cell);
        }
        true
    }

    /// Release every cell in the footprint.
    pub fn release(&mut self, anchor: GridPos, footprint: i32) {
        for cell in cells(anchor, footprint) {
            self.occupied.remove(&cell);
        }
    }
}

fn cells(anchor: GridPos, footprint: i32) -> impl Iterator<Item = GridPos> {
    (0..footprint).flat_map(move |dc| {
        (0..footprint).map(move |dr| GridPos::new(anchor.col + dc, anchor.row + dr))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_and_release() {
        let mut grid = OccupancyGrid::new();
        assert!(grid.claim(GridPos::new(0, 0), 2));
        // Overlapping 2x2 at (1,1) shares cell (1,1).
        assert!(!grid.claim(GridPos::new(1, 1), 2));
        grid.release(GridPos::new(0, 0), 2);
        assert!(grid.claim(GridPos::new(1, 1), 2));
    }

    #[test]
    fn test_failed_claim_leaves_no_cells() {
        let mut grid = OccupancyGrid::new();
        assert!(grid.claim(GridPos::new(2, 2), 2));
        // 4x4 at (0,0) collides with the tower at (2,2).
        assert!(!grid.claim(GridPos::new(0, 0), 4));
        // Cell (0,0) must still be free for a 2x2 claim.
        assert!(grid.claim(GridPos::new(0, 0), 2));
    }
}
