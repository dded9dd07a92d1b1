use bevy::prelude::*;

pub mod active_cells;
pub mod advisors;
pub mod aggregation;
pub mod config;
pub mod derivation;
pub mod game_actions;
pub mod game_params;
pub mod grid;
pub mod hyper_speed;
pub mod notifications;
pub mod placement;
pub mod post_load_rebuild;
pub mod road_access;
pub mod scheduler;
pub mod simulation_sets;
pub mod stats;
pub mod tiles;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use simulation_sets::SimulationSet;

use active_cells::ActiveCells;
use game_params::GameParams;
use grid::TileGrid;
use hyper_speed::HyperSpeed;
use notifications::{CityNotification, StatWatch};
use road_access::RoadAccessMap;
use scheduler::TickScheduler;
use stats::CityStats;
use tiles::TileCatalog;

// ---------------------------------------------------------------------------
// Core resources
// ---------------------------------------------------------------------------

/// Global tick counter incremented each FixedUpdate, including paused ticks.
#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

pub fn advance_tick_counter(mut tick: ResMut<TickCounter>) {
    tick.0 = tick.0.wrapping_add(1);
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(game_params::GameParamsPlugin);

        // Stats and scheduler start from the configured parameters unless the
        // caller already inserted its own.
        let (starting_stats, starting_scheduler) = {
            let params = app.world().resource::<GameParams>();
            (
                CityStats::new_city(params),
                TickScheduler::from_params(&params.scheduler),
            )
        };
        if !app.world().contains_resource::<CityStats>() {
            app.insert_resource(starting_stats);
        }
        if !app.world().contains_resource::<TickScheduler>() {
            app.insert_resource(starting_scheduler);
        }

        app.init_resource::<TickCounter>()
            .init_resource::<TileCatalog>()
            .init_resource::<TileGrid>()
            .init_resource::<ActiveCells>()
            .init_resource::<RoadAccessMap>()
            .init_resource::<HyperSpeed>()
            .init_resource::<StatWatch>()
            .add_event::<CityNotification>();

        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::PreSim,
                SimulationSet::Simulation,
                SimulationSet::PostSim,
            )
                .chain(),
        );

        app.add_plugins((
            game_actions::GameActionsPlugin,
            post_load_rebuild::PostLoadRebuildPlugin,
            advisors::AdvisorPlugin,
        ));

        // Pre-sim: count the tick, apply queued actions, then refresh road
        // access so this tick's aggregation never sees a stale map.
        app.add_systems(
            FixedUpdate,
            (
                advance_tick_counter.before(game_actions::execute_queued_actions),
                road_access::rebuild_road_access
                    .after(game_actions::execute_queued_actions),
            )
                .in_set(SimulationSet::PreSim),
        );

        app.add_systems(
            FixedUpdate,
            stats::run_city_tick.in_set(SimulationSet::Simulation),
        );

        app.add_systems(
            FixedUpdate,
            (
                hyper_speed::advance_hyper_speed,
                notifications::detect_stat_changes,
            )
                .chain()
                .before(advisors::relay_notifications)
                .in_set(SimulationSet::PostSim),
        );

        app.add_systems(Update, scheduler::sync_fixed_timestep);
    }
}
