// ---------------------------------------------------------------------------
// Save structs and version constants
// ---------------------------------------------------------------------------

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use simulation::stats::CityStats;

/// Current `SaveData` schema version.
/// v1 = grid tile codes, city stats, camera view
pub const CURRENT_SAVE_VERSION: u32 = 1;

/// Camera position and zoom. Persisted with the city but never read by the
/// simulation.
#[derive(Resource, Serialize, Deserialize, Encode, Decode, Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub x: f32,
    pub y: f32,
    pub zoom: f32,
}

impl Default for CameraView {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// Persisted copy of [`CityStats`]. Kept separate so the in-memory snapshot
/// can change without silently changing the file layout.
#[derive(Serialize, Deserialize, Encode, Decode, Debug, Clone, PartialEq)]
pub struct SavedStats {
    pub money: i64,
    pub population: u32,
    pub jobs: u32,
    pub employed: u32,
    pub workforce: u32,
    pub happiness: f64,
    pub health: f64,
    pub education: f64,
    pub pollution: f64,
    pub power_capacity: i64,
    pub power_usage: i64,
    pub water_capacity: i64,
    pub water_usage: i64,
    pub demand_r: f64,
    pub demand_c: f64,
    pub demand_i: f64,
    pub day: f64,
    pub level: u32,
}

impl From<&CityStats> for SavedStats {
    fn from(s: &CityStats) -> Self {
        Self {
            money: s.money,
            population: s.population,
            jobs: s.jobs,
            employed: s.employed,
            workforce: s.workforce,
            happiness: s.happiness,
            health: s.health,
            education: s.education,
            pollution: s.pollution,
            power_capacity: s.power_capacity,
            power_usage: s.power_usage,
            water_capacity: s.water_capacity,
            water_usage: s.water_usage,
            demand_r: s.demand_r,
            demand_c: s.demand_c,
            demand_i: s.demand_i,
            day: s.day,
            level: s.level,
        }
    }
}

impl From<SavedStats> for CityStats {
    fn from(s: SavedStats) -> Self {
        Self {
            money: s.money,
            population: s.population,
            jobs: s.jobs,
            employed: s.employed,
            workforce: s.workforce,
            happiness: s.happiness,
            health: s.health,
            education: s.education,
            pollution: s.pollution,
            power_capacity: s.power_capacity,
            power_usage: s.power_usage,
            water_capacity: s.water_capacity,
            water_usage: s.water_usage,
            demand_r: s.demand_r,
            demand_c: s.demand_c,
            demand_i: s.demand_i,
            day: s.day,
            level: s.level,
        }
    }
}

/// Top-level save record.
#[derive(Serialize, Deserialize, Encode, Decode, Debug, Clone, PartialEq)]
pub struct SaveData {
    pub version: u32,
    /// Side length of the square grid.
    pub grid_size: u32,
    /// Row-major tile codes, `grid_size²` entries.
    pub grid: Vec<u8>,
    pub stats: SavedStats,
    pub view: CameraView,
}
