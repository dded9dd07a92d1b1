//! Outcome of recently applied actions, looked up by submission ticket.

use std::collections::VecDeque;

use bevy::prelude::*;

use super::{ActionResult, ActionSource, ActionTicket, GameAction, QueuedAction};

/// Older records are dropped once this many are held.
pub const ACTION_LOG_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct ActionRecord {
    pub ticket: ActionTicket,
    pub source: ActionSource,
    pub submitted_tick: u64,
    pub applied_tick: u64,
    pub action: GameAction,
    pub result: ActionResult,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct ActionResultLog {
    records: VecDeque<ActionRecord>,
}

impl ActionResultLog {
    pub fn record(&mut self, queued: QueuedAction, applied_tick: u64, result: ActionResult) {
        if self.records.len() == ACTION_LOG_CAPACITY {
            self.records.pop_front();
        }
        self.records.push_back(ActionRecord {
            ticket: queued.ticket,
            source: queued.source,
            submitted_tick: queued.submitted_tick,
            applied_tick,
            action: queued.action,
            result,
        });
    }

    /// Result of the action submitted under `ticket`, if it has been applied
    /// and not yet evicted.
    pub fn result_for(&self, ticket: ActionTicket) -> Option<&ActionResult> {
        self.records
            .iter()
            .rev()
            .find(|r| r.ticket == ticket)
            .map(|r| &r.result)
    }

    pub fn latest(&self) -> Option<&ActionRecord> {
        self.records.back()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &ActionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
