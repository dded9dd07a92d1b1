use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::tiles::TileType;

/// A request to change the city, applied at the start of the next tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub enum GameAction {
    PlaceTile {
        x: u32,
        y: u32,
        tile: TileType,
    },
    TriggerHyperSpeed,
    SetRefreshRate {
        millis: u64,
    },
    SetPaused {
        paused: bool,
    },
}
