//! Tracker of non-empty cell indices.
//!
//! Aggregation iterates only these indices instead of the full grid. The grid
//! stays authoritative: the tracked set always equals the set of non-empty
//! cells because there is no demolition, so indices are only ever added.

use bevy::prelude::*;

use crate::config::CELL_COUNT;
use crate::grid::TileGrid;

#[derive(Resource, Debug, Clone)]
pub struct ActiveCells {
    /// Indices in insertion order.
    indices: Vec<usize>,
    /// Membership bitmap, one entry per grid cell.
    present: Vec<bool>,
}

impl Default for ActiveCells {
    fn default() -> Self {
        Self::with_capacity(CELL_COUNT)
    }
}

impl ActiveCells {
    pub fn with_capacity(cell_count: usize) -> Self {
        Self {
            indices: Vec::new(),
            present: vec![false; cell_count],
        }
    }

    /// Insert an index. Returns `false` if it was already tracked.
    pub fn add(&mut self, index: usize) -> bool {
        if index >= self.present.len() {
            self.present.resize(index + 1, false);
        }
        if self.present[index] {
            return false;
        }
        self.present[index] = true;
        self.indices.push(index);
        true
    }

    /// Clear and repopulate from a full scan of `grid`.
    pub fn rebuild_from(&mut self, grid: &TileGrid) {
        self.indices.clear();
        self.present.clear();
        self.present.resize(grid.len(), false);
        for (i, tile) in grid.cells.iter().enumerate() {
            if !tile.is_empty() {
                self.present[i] = true;
                self.indices.push(i);
            }
        }
    }

    pub fn from_grid(grid: &TileGrid) -> Self {
        let mut cells = Self::with_capacity(grid.len());
        cells.rebuild_from(grid);
        cells
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.present.get(index).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Every tracked index holds a non-empty tile and every non-empty tile is tracked.
    pub fn matches_grid(&self, grid: &TileGrid) -> bool {
        let non_empty = grid.cells.iter().filter(|t| !t.is_empty()).count();
        non_empty == self.indices.len() && self.iter().all(|i| !grid.at(i).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::TileType;

    #[test]
    fn test_add_is_idempotent() {
        let mut cells = ActiveCells::with_capacity(16);
        assert!(cells.add(3));
        assert!(!cells.add(3));
        assert_eq!(cells.len(), 1);
        assert!(cells.contains(3));
        assert!(!cells.contains(4));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cells = ActiveCells::with_capacity(16);
        for i in [9, 2, 14, 2, 5] {
            cells.add(i);
        }
        assert_eq!(cells.iter().collect::<Vec<_>>(), vec![9, 2, 14, 5]);
    }

    #[test]
    fn test_size_never_decreases_on_add() {
        let mut cells = ActiveCells::with_capacity(64);
        let mut last = 0;
        for i in [1, 1, 7, 63, 7, 0, 0, 12] {
            cells.add(i);
            assert!(cells.len() >= last);
            last = cells.len();
        }
    }

    #[test]
    fn test_rebuild_from_grid() {
        let mut grid = TileGrid::new(8);
        grid.set(4, TileType::Road);
        grid.set(10, TileType::Residential);
        grid.set(63, TileType::PowerWind);

        let mut cells = ActiveCells::with_capacity(64);
        cells.add(20); // stale entry, cleared by rebuild
        cells.rebuild_from(&grid);

        assert_eq!(cells.iter().collect::<Vec<_>>(), vec![4, 10, 63]);
        assert!(!cells.contains(20));
        assert!(cells.matches_grid(&grid));
    }

    #[test]
    fn test_matches_grid_detects_drift() {
        let mut grid = TileGrid::new(8);
        let cells = ActiveCells::from_grid(&grid);
        assert!(cells.matches_grid(&grid));
        grid.set(1, TileType::Road);
        assert!(!cells.matches_grid(&grid));
    }
}
