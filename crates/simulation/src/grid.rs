use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::GRID_SIZE;
use crate::tiles::TileType;

/// The authoritative square grid of tiles, stored row-major.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    pub cells: Vec<TileType>,
    pub size: usize,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::new(GRID_SIZE)
    }
}

impl TileGrid {
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![TileType::Empty; size * size],
            size,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.size, index / self.size)
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> TileType {
        self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn at(&self, index: usize) -> TileType {
        self.cells[index]
    }

    #[inline]
    pub fn set(&mut self, index: usize, tile: TileType) {
        self.cells[index] = tile;
    }

    /// Returns up to 4 cardinal neighbor indices and the count of valid entries.
    /// Use `&result[..count]` to iterate over valid neighbors.
    pub fn neighbors4(&self, index: usize) -> ([usize; 4], usize) {
        let (x, y) = self.coords(index);
        let mut result = [0; 4];
        let mut count = 0;
        if x > 0 {
            result[count] = index - 1;
            count += 1;
        }
        if x + 1 < self.size {
            result[count] = index + 1;
            count += 1;
        }
        if y > 0 {
            result[count] = index - self.size;
            count += 1;
        }
        if y + 1 < self.size {
            result[count] = index + self.size;
            count += 1;
        }
        (result, count)
    }

    pub fn count(&self, tile: TileType) -> usize {
        self.cells.iter().filter(|&&t| t == tile).count()
    }

    /// Per-type counts of every non-empty tile.
    pub fn tile_counts(&self) -> BTreeMap<TileType, u32> {
        let mut counts = BTreeMap::new();
        for &tile in self.cells.iter().filter(|t| !t.is_empty()) {
            *counts.entry(tile).or_insert(0) += 1;
        }
        counts
    }
}
