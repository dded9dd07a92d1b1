use std::process::ExitCode;

use bevy::prelude::*;

use save::{load_into_world, read_save_file, write_save_file, LastSave, SaveGameEvent};
use simulation::game_actions::{ActionQueue, ActionSource, GameAction};
use simulation::stats::CityStats;
use simulation::TickCounter;

mod agent_mode;
mod agent_protocol;
mod city_app;
mod run_config;

use city_app::{build_app, seed_starter_city, tick};
use run_config::RunConfig;

/// Ticks between progress log lines in batch mode.
const LOG_EVERY: u32 = 50;

fn main() -> ExitCode {
    let config = RunConfig::from_env();
    let mut app = build_app(config.params.clone());
    config.log_warnings();

    if std::env::args().any(|arg| arg == "--agent") {
        agent_mode::run_agent_mode(app);
        return ExitCode::SUCCESS;
    }

    match run_batch(&mut app, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Load or seed a city, simulate `config.ticks` ticks, and optionally save.
fn run_batch(app: &mut App, config: &RunConfig) -> Result<(), save::SaveError> {
    match &config.load_path {
        Some(path) => {
            let bytes = read_save_file(path)?;
            load_into_world(app.world_mut(), &bytes)?;
            info!("Loaded {}", path.display());
        }
        None => seed_starter_city(app),
    }

    if let Some(millis) = config.refresh_ms {
        let tick_now = app.world().resource::<TickCounter>().0;
        app.world_mut().resource_mut::<ActionQueue>().submit(
            tick_now,
            ActionSource::Player,
            GameAction::SetRefreshRate { millis },
        );
    }

    let mut done = 0;
    while done < config.ticks {
        let step = LOG_EVERY.min(config.ticks - done);
        tick(app, step);
        done += step;
        log_stats(app);
    }

    if let Some(path) = &config.save_path {
        app.world_mut().send_event(SaveGameEvent);
        app.update();
        let bytes = app
            .world_mut()
            .resource_mut::<LastSave>()
            .0
            .take()
            .ok_or(save::SaveError::NoData)?;
        write_save_file(path, &bytes)?;
        info!("Saved {} bytes to {}", bytes.len(), path.display());
    }
    Ok(())
}

fn log_stats(app: &App) {
    let tick_now = app.world().resource::<TickCounter>().0;
    let s = app.world().resource::<CityStats>();
    info!(
        "tick {tick_now} day {:.1}: level {} pop {} jobs {} money ${} happiness {:.0}% power {}/{}",
        s.day,
        s.level,
        s.population,
        s.jobs,
        s.money,
        s.happiness,
        s.power_usage,
        s.power_capacity
    );
}
