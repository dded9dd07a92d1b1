//! Placement validator.
//!
//! Placement is gated by bounds, unlock level and funds, in that order. There
//! is no occupancy check: placing on an occupied cell overwrites it and charges
//! the full cost again. The caller must recompute road access before the next
//! aggregation reads it; in the running app `rebuild_road_access` does this in
//! the same `PreSim` phase.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::active_cells::ActiveCells;
use crate::grid::TileGrid;
use crate::stats::CityStats;
use crate::tiles::{TileCatalog, TileType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementError {
    OutOfBounds { x: usize, y: usize },
    /// The empty marker cannot be placed; there is no demolition.
    NothingToPlace,
    LevelLocked { required: u32, current: u32 },
    InsufficientFunds { cost: i64, available: i64 },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::OutOfBounds { x, y } => write!(f, "({x}, {y}) is outside the map"),
            PlacementError::NothingToPlace => write!(f, "nothing to place"),
            PlacementError::LevelLocked { required, current } => {
                write!(f, "requires level {required} (city is level {current})")
            }
            PlacementError::InsufficientFunds { cost, available } => {
                write!(f, "insufficient funds: costs ${cost}, treasury has ${available}")
            }
        }
    }
}

impl std::error::Error for PlacementError {}

/// Validate a placement without mutating anything. Returns the grid index.
pub fn check_placement(
    grid: &TileGrid,
    stats: &CityStats,
    catalog: &TileCatalog,
    x: usize,
    y: usize,
    tile: TileType,
) -> Result<usize, PlacementError> {
    if !grid.in_bounds(x, y) {
        return Err(PlacementError::OutOfBounds { x, y });
    }
    if tile.is_empty() {
        return Err(PlacementError::NothingToPlace);
    }
    let data = catalog.get(tile);
    if stats.level < data.unlock_level {
        return Err(PlacementError::LevelLocked {
            required: data.unlock_level,
            current: stats.level,
        });
    }
    if stats.money < data.cost {
        return Err(PlacementError::InsufficientFunds {
            cost: data.cost,
            available: stats.money,
        });
    }
    Ok(grid.index(x, y))
}

/// Write an already validated placement: grid, active set, treasury.
pub fn apply_placement(
    grid: &mut TileGrid,
    active: &mut ActiveCells,
    stats: &mut CityStats,
    catalog: &TileCatalog,
    index: usize,
    tile: TileType,
) {
    grid.set(index, tile);
    active.add(index);
    stats.money -= catalog.get(tile).cost;
}

/// Validate and apply in one step. On error nothing is modified.
pub fn place_tile(
    grid: &mut TileGrid,
    active: &mut ActiveCells,
    stats: &mut CityStats,
    catalog: &TileCatalog,
    x: usize,
    y: usize,
    tile: TileType,
) -> Result<usize, PlacementError> {
    let index = check_placement(grid, stats, catalog, x, y, tile)?;
    apply_placement(grid, active, stats, catalog, index, tile);
    Ok(index)
}
