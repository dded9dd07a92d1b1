//! Road connectivity index.
//!
//! A cell has road access iff it is a road or one of its in-bounds cardinal
//! neighbors is a road. Access is one hop only: a road segment grants access to
//! its own neighbors and there is no notion of a network reaching the map edge.
//! The map is always recomputed in full from the current grid.

use bevy::prelude::*;

use crate::grid::TileGrid;
use crate::tiles::TileType;

/// One flag per grid cell, same length and order as [`TileGrid::cells`].
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct RoadAccessMap {
    pub cells: Vec<bool>,
}

impl RoadAccessMap {
    /// Full two-pass recompute: collect road cells, then mark their neighbors.
    pub fn recompute(grid: &TileGrid) -> Self {
        let mut cells = vec![false; grid.len()];
        let mut roads = Vec::new();

        for (i, &tile) in grid.cells.iter().enumerate() {
            if tile == TileType::Road {
                cells[i] = true;
                roads.push(i);
            }
        }

        for &road in &roads {
            let (neighbors, count) = grid.neighbors4(road);
            for &n in &neighbors[..count] {
                cells[n] = true;
            }
        }

        Self { cells }
    }

    /// Out-of-range indices have no access.
    #[inline]
    pub fn has_access(&self, index: usize) -> bool {
        self.cells.get(index).copied().unwrap_or(false)
    }

    pub fn connected_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// Recompute the access map whenever the grid was mutated since the last run.
///
/// Runs in `PreSim` after queued actions are applied, so aggregation in the
/// same tick never reads a stale map.
pub fn rebuild_road_access(grid: Res<TileGrid>, mut access: ResMut<RoadAccessMap>) {
    if !grid.is_changed() && access.cells.len() == grid.len() {
        return;
    }
    *access = RoadAccessMap::recompute(&grid);
    debug!(
        "Road access recomputed: {} of {} cells connected",
        access.connected_count(),
        grid.len()
    );
}
