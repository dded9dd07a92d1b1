//! Building and driving the headless city `App`.

use bevy::log::LogPlugin;
use bevy::prelude::*;

use simulation::game_actions::{ActionQueue, ActionSource, GameAction};
use simulation::game_params::GameParams;
use simulation::tiles::TileType;
use simulation::TickCounter;

/// Headless app: no window, no renderer, logging to stderr.
pub fn build_app(params: GameParams) -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        // RUST_LOG overrides the filter at runtime.
        LogPlugin {
            filter: "info".to_string(),
            level: bevy::log::Level::INFO,
            ..default()
        },
    ));
    app.insert_resource(params);
    app.add_plugins((simulation::SimulationPlugin, save::SavePlugin));

    // First frame initializes resources; virtual time has not advanced, so
    // no simulation tick runs yet.
    app.update();
    app
}

/// Run `n` simulation ticks back to back, independent of wall-clock time.
pub fn tick(app: &mut App, n: u32) {
    for _ in 0..n {
        app.world_mut().run_schedule(FixedUpdate);
        std::thread::yield_now();
    }
}

/// Actions that lay out a small powered neighbourhood around the map centre.
pub fn starter_city_actions() -> Vec<GameAction> {
    let place = |x: u32, y: u32, tile: TileType| GameAction::PlaceTile { x, y, tile };
    let mut actions = vec![
        place(2, 2, TileType::PowerCoal),
        place(3, 2, TileType::WaterTower),
    ];
    actions.extend((44..=84).map(|x| place(x, 64, TileType::Road)));
    actions.extend((44..=63).map(|x| place(x, 63, TileType::Residential)));
    actions.extend((44..=53).map(|x| place(x, 65, TileType::Commercial)));
    actions.push(place(64, 63, TileType::ParkSmall));
    actions
}

pub fn seed_starter_city(app: &mut App) {
    let tick_now = app.world().resource::<TickCounter>().0;
    let mut queue = app.world_mut().resource_mut::<ActionQueue>();
    for action in starter_city_actions() {
        queue.submit(tick_now, ActionSource::Player, action);
    }
}
