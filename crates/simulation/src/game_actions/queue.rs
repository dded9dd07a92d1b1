//! Pending actions, applied in submission order at the start of the next tick.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::GameAction;

/// Who asked for an action. Only used for logging and result lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionSource {
    Player,
    Agent,
}

/// Handle returned by [`ActionQueue::submit`]; identifies the action's entry
/// in [`super::ActionResultLog`] once it has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionTicket(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct QueuedAction {
    pub ticket: ActionTicket,
    /// `TickCounter` value when the action was submitted.
    pub submitted_tick: u64,
    pub source: ActionSource,
    pub action: GameAction,
}

#[derive(Resource, Debug, Default)]
pub struct ActionQueue {
    pending: Vec<QueuedAction>,
    next_ticket: u64,
}

impl ActionQueue {
    pub fn submit(&mut self, tick: u64, source: ActionSource, action: GameAction) -> ActionTicket {
        let ticket = ActionTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending.push(QueuedAction {
            ticket,
            submitted_tick: tick,
            source,
            action,
        });
        ticket
    }

    /// Remove every pending action, oldest first. Tickets keep counting up.
    pub fn take_pending(&mut self) -> Vec<QueuedAction> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::TileType;

    #[test]
    fn tickets_are_unique_across_drains() {
        let mut queue = ActionQueue::default();
        let a = queue.submit(3, ActionSource::Player, GameAction::TriggerHyperSpeed);
        let b = queue.submit(3, ActionSource::Agent, GameAction::SetPaused { paused: true });
        assert_ne!(a, b);
        assert_eq!(queue.len(), 2);

        let taken = queue.take_pending();
        assert!(queue.is_empty());
        assert_eq!(
            taken.iter().map(|q| q.ticket).collect::<Vec<_>>(),
            vec![a, b]
        );

        let c = queue.submit(
            4,
            ActionSource::Player,
            GameAction::PlaceTile {
                x: 1,
                y: 1,
                tile: TileType::Road,
            },
        );
        assert!(c > b);
        assert_eq!(queue.take_pending()[0].submitted_tick, 4);
    }
}
