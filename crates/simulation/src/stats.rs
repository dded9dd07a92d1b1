use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::active_cells::ActiveCells;
use crate::aggregation::aggregate;
use crate::derivation::derive_stats;
use crate::game_params::GameParams;
use crate::grid::TileGrid;
use crate::hyper_speed::HyperSpeed;
use crate::road_access::RoadAccessMap;
use crate::scheduler::TickScheduler;
use crate::tiles::TileCatalog;

/// Authoritative snapshot of derived city state, replaced every tick.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityStats {
    pub money: i64,
    pub population: u32,
    pub jobs: u32,
    pub employed: u32,
    pub workforce: u32,
    /// 0..=100
    pub happiness: f64,
    /// 0..=100
    pub health: f64,
    /// Lower-bounded at 0 only.
    pub education: f64,
    /// Normalized city-wide pollution level; negative when sinks dominate.
    pub pollution: f64,
    pub power_capacity: i64,
    pub power_usage: i64,
    pub water_capacity: i64,
    pub water_usage: i64,
    pub demand_r: f64,
    pub demand_c: f64,
    pub demand_i: f64,
    /// Fractional under time scaling.
    pub day: f64,
    pub level: u32,
}

impl Default for CityStats {
    fn default() -> Self {
        Self {
            money: 100_000,
            population: 0,
            jobs: 0,
            employed: 0,
            workforce: 0,
            happiness: 80.0,
            health: 80.0,
            education: 15.0,
            pollution: 0.0,
            power_capacity: 0,
            power_usage: 0,
            water_capacity: 0,
            water_usage: 0,
            demand_r: 50.0,
            demand_c: 30.0,
            demand_i: 20.0,
            day: 1.0,
            level: 1,
        }
    }
}

impl CityStats {
    /// Fresh city with the configured starting treasury.
    pub fn new_city(params: &GameParams) -> Self {
        Self {
            money: params.economy.starting_money,
            ..Self::default()
        }
    }

    /// Power usage exceeds capacity. Zero usage on zero capacity is not an overload.
    pub fn is_overloaded(&self) -> bool {
        self.power_usage > self.power_capacity
    }

    pub fn unemployed(&self) -> u32 {
        self.workforce.saturating_sub(self.employed)
    }
}

/// Aggregate the active cells and derive the next snapshot.
#[allow(clippy::too_many_arguments)]
pub fn run_city_tick(
    grid: Res<TileGrid>,
    active: Res<ActiveCells>,
    catalog: Res<TileCatalog>,
    road_access: Res<RoadAccessMap>,
    scheduler: Res<TickScheduler>,
    hyper: Res<HyperSpeed>,
    params: Res<GameParams>,
    mut stats: ResMut<CityStats>,
) {
    if scheduler.paused {
        return;
    }
    let economy_scale = scheduler.economy_scale(&hyper, &params.scheduler);
    let totals = aggregate(
        &grid,
        &active,
        &catalog,
        &road_access,
        &stats,
        economy_scale,
    );
    let next = derive_stats(&totals, &stats, &params, economy_scale);
    debug!(
        "Tick day {:.2}: pop {} jobs {} money {} ({} active, {} idle buildings)",
        next.day,
        next.population,
        next.jobs,
        next.money,
        totals.active_buildings,
        totals.inactive_buildings
    );
    *stats = next;
}
