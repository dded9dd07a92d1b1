use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::grid::TileGrid;
use crate::stats::CityStats;
use crate::tiles::TileType;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Read-only view of the city handed to an advisor service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorSnapshot {
    pub stats: CityStats,
    /// Count of every non-empty tile type on the map.
    pub tile_counts: BTreeMap<TileType, u32>,
    pub overloaded: bool,
    pub unemployed: u32,
}

impl AdvisorSnapshot {
    pub fn capture(stats: &CityStats, grid: &TileGrid) -> Self {
        Self {
            stats: stats.clone(),
            tile_counts: grid.tile_counts(),
            overloaded: stats.is_overloaded(),
            unemployed: stats.unemployed(),
        }
    }

    /// Share of the workforce without a job, 0 when there is no workforce.
    pub fn unemployment_rate(&self) -> f64 {
        if self.stats.workforce == 0 {
            0.0
        } else {
            f64::from(self.unemployed) / f64::from(self.stats.workforce)
        }
    }

    pub fn count(&self, tile: TileType) -> u32 {
        self.tile_counts.get(&tile).copied().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure of an advisor service. Never escapes [`super::consult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    /// The service could not be reached or refused the request.
    Unavailable(String),
    /// The service answered with no usable text.
    EmptyResponse,
}

impl fmt::Display for AdvisorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvisorError::Unavailable(reason) => write!(f, "advisor unavailable: {reason}"),
            AdvisorError::EmptyResponse => write!(f, "advisor returned an empty response"),
        }
    }
}

impl std::error::Error for AdvisorError {}

// ---------------------------------------------------------------------------
// Message feed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdvisorSender {
    /// Output of an advisor consultation.
    Advisor,
    /// Engine notices: rejected placements, level-ups, power changes.
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorMessage {
    pub sender: AdvisorSender,
    pub text: String,
    pub tick: u64,
}

/// Maximum number of messages retained in the feed.
pub const MAX_MESSAGES: usize = 50;

/// Feed of advisor and system messages, newest first.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisorMessages {
    messages: VecDeque<AdvisorMessage>,
}

impl AdvisorMessages {
    pub fn push(&mut self, sender: AdvisorSender, text: impl Into<String>, tick: u64) {
        self.messages.push_front(AdvisorMessage {
            sender,
            text: text.into(),
            tick,
        });
        self.messages.truncate(MAX_MESSAGES);
    }

    pub fn latest(&self) -> Option<&AdvisorMessage> {
        self.messages.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AdvisorMessage> {
        self.messages.iter()
    }

    pub fn from_sender(&self, sender: AdvisorSender) -> impl Iterator<Item = &AdvisorMessage> {
        self.messages.iter().filter(move |m| m.sender == sender)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
