//! JSON line protocol for `--agent` mode.
//!
//! Each stdin line is one [`AgentCommand`]; each stdout line is one
//! [`AgentResponse`]. Enums use serde's default external tagging, e.g.
//! `{"Act":{"action":{"PlaceTile":{"x":3,"y":4,"tile":"Road"}}}}` or `"Observe"`.

use serde::{Deserialize, Serialize};

use simulation::game_actions::{ActionResult, GameAction};
use simulation::stats::CityStats;

pub const PROTOCOL_VERSION: u32 = 1;

/// Largest `Step` honoured in one command.
pub const MAX_STEP_TICKS: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AgentCommand {
    /// Report the current stats without ticking.
    Observe,
    /// Queue one action and run a tick so it is applied.
    Act { action: GameAction },
    /// Run `ticks` ticks.
    Step { ticks: u32 },
    /// Ask the advisor and wait for the reply.
    Advise,
    /// Encode the city and write it to `path`.
    Save { path: String },
    /// Replace the city with the save at `path`.
    Load { path: String },
    Quit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResponsePayload {
    Ready,
    Stats { tick: u64, stats: CityStats },
    ActionResult { result: ActionResult },
    Advice { text: String },
    Saved { bytes: usize },
    Loaded,
    Error { message: String },
    Goodbye,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub protocol_version: u32,
    pub payload: ResponsePayload,
}

pub fn make_response(payload: ResponsePayload) -> AgentResponse {
    AgentResponse {
        protocol_version: PROTOCOL_VERSION,
        payload,
    }
}
