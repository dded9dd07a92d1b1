//! Headless `--agent` mode: a blocking synchronous loop that reads JSON
//! commands from stdin and writes JSON responses to stdout.
//!
//! Logging goes to stderr, so stdout carries only protocol lines.

use std::io::{BufRead, Write};
use std::path::Path;

use bevy::prelude::*;

use save::serialization::{create_save_data, encode_save};
use save::{load_into_world, read_save_file, write_save_file, SaveSettings};
use simulation::advisors::{AdvisorSender, RequestAdvice};
use simulation::game_actions::{ActionQueue, ActionResultLog, ActionSource};
use simulation::stats::CityStats;
use simulation::TickCounter;

use crate::agent_protocol::{
    make_response, AgentCommand, AgentResponse, ResponsePayload, MAX_STEP_TICKS,
    PROTOCOL_VERSION,
};
use crate::city_app::tick;

/// Ticks to wait for an advisor reply before giving up.
const ADVICE_TICK_LIMIT: u32 = 2_000;

pub fn run_agent_mode(mut app: App) {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();

    emit(&mut stdout, &make_response(ResponsePayload::Ready));
    info!("Agent mode v{PROTOCOL_VERSION} ready, waiting for commands on stdin");

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!("stdin read error: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<AgentCommand>(&line) {
            Ok(cmd) => process_command(cmd, &mut app),
            Err(e) => make_response(ResponsePayload::Error {
                message: format!("Parse error: {e}"),
            }),
        };
        let is_goodbye = matches!(response.payload, ResponsePayload::Goodbye);
        emit(&mut stdout, &response);
        if is_goodbye {
            break;
        }
    }

    info!("Agent mode shutting down");
}

fn emit(out: &mut impl Write, response: &AgentResponse) {
    match serde_json::to_string(response) {
        Ok(json) => {
            if writeln!(out, "{json}").and_then(|_| out.flush()).is_err() {
                error!("stdout closed, dropping response");
            }
        }
        Err(e) => error!("Cannot serialize response: {e}"),
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

fn process_command(cmd: AgentCommand, app: &mut App) -> AgentResponse {
    let payload = match cmd {
        AgentCommand::Observe => observe(app),
        AgentCommand::Act { action } => {
            let tick_now = app.world().resource::<TickCounter>().0;
            let ticket = app
                .world_mut()
                .resource_mut::<ActionQueue>()
                .submit(tick_now, ActionSource::Agent, action);
            tick(app, 1);
            match app.world().resource::<ActionResultLog>().result_for(ticket) {
                Some(result) => ResponsePayload::ActionResult {
                    result: result.clone(),
                },
                None => ResponsePayload::Error {
                    message: "action was not applied".to_string(),
                },
            }
        }
        AgentCommand::Step { ticks } => {
            tick(app, ticks.min(MAX_STEP_TICKS));
            observe(app)
        }
        AgentCommand::Advise => advise(app),
        AgentCommand::Save { path } => save_to(app, Path::new(&path)),
        AgentCommand::Load { path } => {
            match read_save_file(Path::new(&path))
                .and_then(|bytes| load_into_world(app.world_mut(), &bytes))
            {
                Ok(()) => ResponsePayload::Loaded,
                Err(e) => ResponsePayload::Error {
                    message: format!("Load failed: {e}"),
                },
            }
        }
        AgentCommand::Quit => ResponsePayload::Goodbye,
    };
    make_response(payload)
}

fn observe(app: &App) -> ResponsePayload {
    ResponsePayload::Stats {
        tick: app.world().resource::<TickCounter>().0,
        stats: app.world().resource::<CityStats>().clone(),
    }
}

fn advise(app: &mut App) -> ResponsePayload {
    let advisor_count = |app: &App| {
        app.world()
            .resource::<simulation::advisors::AdvisorMessages>()
            .from_sender(AdvisorSender::Advisor)
            .count()
    };
    let before = advisor_count(app);
    app.world_mut().send_event(RequestAdvice);
    for _ in 0..ADVICE_TICK_LIMIT {
        tick(app, 1);
        if advisor_count(app) > before {
            let text = app
                .world()
                .resource::<simulation::advisors::AdvisorMessages>()
                .from_sender(AdvisorSender::Advisor)
                .next()
                .map(|m| m.text.clone())
                .unwrap_or_default();
            return ResponsePayload::Advice { text };
        }
        std::thread::sleep(std::time::Duration::from_millis(1));
    }
    ResponsePayload::Error {
        message: "Advisor did not answer in time".into(),
    }
}

/// Saves synchronously rather than through `SaveGameEvent`, so no frame (and
/// no stray fixed tick) runs between the command and the write.
fn save_to(app: &App, path: &Path) -> ResponsePayload {
    let world = app.world();
    let compress = world.resource::<SaveSettings>().compress;
    let written = create_save_data(world)
        .and_then(|data| encode_save(&data, compress))
        .and_then(|bytes| write_save_file(path, &bytes).map(|()| bytes.len()));
    match written {
        Ok(bytes) => ResponsePayload::Saved { bytes },
        Err(e) => ResponsePayload::Error {
            message: format!("Cannot save to {}: {e}", path.display()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simulation::game_actions::{ActionError, ActionResult, GameAction};
    use simulation::game_params::GameParams;
    use simulation::tiles::TileType;

    use crate::city_app::build_app;

    fn act(app: &mut App, action: GameAction) -> ResponsePayload {
        process_command(AgentCommand::Act { action }, app).payload
    }

    #[test]
    fn test_act_reports_its_own_result() {
        let mut app = build_app(GameParams::default());
        // A player action queued alongside must not be mistaken for ours.
        app.world_mut().resource_mut::<ActionQueue>().submit(
            0,
            ActionSource::Player,
            GameAction::PlaceTile {
                x: 0,
                y: 0,
                tile: TileType::Road,
            },
        );

        let payload = act(
            &mut app,
            GameAction::PlaceTile {
                x: 5,
                y: 5,
                tile: TileType::ResidentialLuxury,
            },
        );
        assert_eq!(
            payload,
            ResponsePayload::ActionResult {
                result: ActionResult::Error(ActionError::LevelLocked {
                    required: 2,
                    current: 1
                })
            }
        );

        let payload = act(&mut app, GameAction::SetPaused { paused: true });
        assert_eq!(
            payload,
            ResponsePayload::ActionResult {
                result: ActionResult::Success
            }
        );
    }
}
