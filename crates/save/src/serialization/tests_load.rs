//! Applying saves to a running simulation.

use bevy::prelude::*;

use super::*;

use crate::{load_into_world, LastSave, LoadGameEvent, LoadOutcome, SaveGameEvent, SavePlugin};
use simulation::active_cells::ActiveCells;
use simulation::game_actions::{ActionQueue, ActionSource, GameAction};
use simulation::grid::TileGrid;
use simulation::road_access::RoadAccessMap;
use simulation::stats::CityStats;
use simulation::tiles::TileType;
use simulation::SimulationPlugin;

fn city_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, SimulationPlugin, SavePlugin));
    app.update();
    app
}

fn place(app: &mut App, x: u32, y: u32, tile: TileType) {
    app.world_mut()
        .resource_mut::<ActionQueue>()
        .submit(0, ActionSource::Player, GameAction::PlaceTile { x, y, tile });
}

fn tick(app: &mut App, n: u32) {
    for _ in 0..n {
        app.world_mut().run_schedule(FixedUpdate);
    }
}

fn build_small_city(app: &mut App) {
    place(app, 0, 0, TileType::PowerWind);
    for x in 30..36 {
        place(app, x, 30, TileType::Road);
        place(app, x, 31, TileType::Residential);
    }
    tick(app, 3);
}

fn save_bytes(app: &mut App) -> Vec<u8> {
    app.world_mut().send_event(SaveGameEvent);
    app.update();
    app.world_mut()
        .resource_mut::<LastSave>()
        .0
        .take()
        .expect("save produced bytes")
}

#[test]
fn test_save_event_stores_bytes() {
    let mut app = city_app();
    build_small_city(&mut app);
    let bytes = save_bytes(&mut app);

    let data = decode_save(&bytes).expect("decode");
    assert_eq!(data.stats.population, 60);
    assert_eq!(data.grid.iter().filter(|&&c| c != 0).count(), 13);
}

#[test]
fn test_load_replaces_city_and_rebuilds_derived_state() {
    let mut source = city_app();
    build_small_city(&mut source);
    let saved_stats = source.world().resource::<CityStats>().clone();
    let bytes = save_bytes(&mut source);

    let mut target = city_app();
    place(&mut target, 100, 100, TileType::Road);
    tick(&mut target, 1);

    load_into_world(target.world_mut(), &bytes).expect("load");

    let world = target.world();
    let grid = world.resource::<TileGrid>();
    assert_eq!(grid.get(100, 100), TileType::Empty);
    assert_eq!(grid.get(32, 31), TileType::Residential);
    assert_eq!(*world.resource::<CityStats>(), saved_stats);
    let active = world.resource::<ActiveCells>();
    assert!(active.matches_grid(grid));
    assert_eq!(active.len(), 13);
    assert_eq!(
        *world.resource::<RoadAccessMap>(),
        RoadAccessMap::recompute(grid)
    );

    // The loaded snapshot is the baseline for the next tick.
    tick(&mut target, 1);
    assert_eq!(target.world().resource::<CityStats>().population, 60);
}

#[test]
fn test_failed_load_leaves_world_untouched() {
    let mut app = city_app();
    build_small_city(&mut app);
    let grid_before = app.world().resource::<TileGrid>().clone();
    let stats_before = app.world().resource::<CityStats>().clone();

    let mut bytes = save_bytes(&mut app);
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;

    app.world_mut().send_event(LoadGameEvent(bytes));
    app.update();

    let outcome = app.world_mut().resource_mut::<LoadOutcome>().0.take();
    assert!(matches!(outcome, Some(Err(crate::SaveError::Corrupted(_)))));
    assert_eq!(*app.world().resource::<TileGrid>(), grid_before);
    assert_eq!(*app.world().resource::<CityStats>(), stats_before);
}

#[test]
fn test_load_event_applies_save() {
    let mut source = city_app();
    build_small_city(&mut source);
    let bytes = save_bytes(&mut source);

    let mut app = city_app();
    app.world_mut().send_event(LoadGameEvent(bytes));
    app.update();

    let outcome = app.world_mut().resource_mut::<LoadOutcome>().0.take();
    assert!(matches!(outcome, Some(Ok(()))));
    assert_eq!(app.world().resource::<CityStats>().population, 60);
    assert_eq!(app.world().resource::<ActiveCells>().len(), 13);
}
