//! Action executor system: drains the [`ActionQueue`] each fixed-update tick
//! and applies every queued [`GameAction`] to the world, recording results in
//! the [`ActionResultLog`].

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::active_cells::ActiveCells;
use crate::advisors::{AdvisorMessages, AdvisorSender};
use crate::game_params::GameParams;
use crate::grid::TileGrid;
use crate::hyper_speed::HyperSpeed;
use crate::notifications::CityNotification;
use crate::placement::{apply_placement, check_placement};
use crate::scheduler::TickScheduler;
use crate::stats::CityStats;
use crate::tiles::{TileCatalog, TileType};
use crate::TickCounter;

use super::result_log::ActionResultLog;
use super::{ActionError, ActionQueue, ActionResult, GameAction};

/// World state an action may touch.
#[derive(SystemParam)]
pub struct ActionTargets<'w> {
    grid: ResMut<'w, TileGrid>,
    active: ResMut<'w, ActiveCells>,
    stats: ResMut<'w, CityStats>,
    catalog: Res<'w, TileCatalog>,
    scheduler: ResMut<'w, TickScheduler>,
    hyper: ResMut<'w, HyperSpeed>,
    params: Res<'w, GameParams>,
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

/// Drains all pending actions from the queue and executes them in order.
pub fn execute_queued_actions(
    tick: Res<TickCounter>,
    mut queue: ResMut<ActionQueue>,
    mut log: ResMut<ActionResultLog>,
    mut targets: ActionTargets,
    mut messages: ResMut<AdvisorMessages>,
    mut notifications: EventWriter<CityNotification>,
) {
    if queue.is_empty() {
        return;
    }
    for queued in queue.take_pending() {
        let result = execute_single(&queued.action, &mut targets, &mut notifications);
        if let ActionResult::Error(err) = &result {
            debug!(
                "{:?} action {:?} rejected: {}",
                queued.source, queued.action, err
            );
            if matches!(queued.action, GameAction::PlaceTile { .. }) {
                messages.push(AdvisorSender::System, placement_notice(err), tick.0);
            }
        }
        log.record(queued, tick.0, result);
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

fn execute_single(
    action: &GameAction,
    targets: &mut ActionTargets,
    notifications: &mut EventWriter<CityNotification>,
) -> ActionResult {
    match action {
        GameAction::PlaceTile { x, y, tile } => execute_place_tile(*x, *y, *tile, targets),
        GameAction::TriggerHyperSpeed => execute_trigger_hyper_speed(targets, notifications),
        GameAction::SetRefreshRate { millis } => execute_set_refresh_rate(*millis, targets),
        GameAction::SetPaused { paused } => {
            targets.scheduler.paused = *paused;
            ActionResult::Success
        }
    }
}

// ---------------------------------------------------------------------------
// Execution functions
// ---------------------------------------------------------------------------

fn execute_place_tile(x: u32, y: u32, tile: TileType, t: &mut ActionTargets) -> ActionResult {
    // Validate against shared borrows first so a rejected placement does not
    // flag the grid as changed.
    let index = match check_placement(
        &t.grid,
        &t.stats,
        &t.catalog,
        x as usize,
        y as usize,
        tile,
    ) {
        Ok(index) => index,
        Err(err) => return ActionResult::Error(err.into()),
    };
    apply_placement(
        &mut t.grid,
        &mut t.active,
        &mut t.stats,
        &t.catalog,
        index,
        tile,
    );
    ActionResult::Success
}

fn execute_trigger_hyper_speed(
    t: &mut ActionTargets,
    notifications: &mut EventWriter<CityNotification>,
) -> ActionResult {
    if !t.hyper.trigger(&t.params.scheduler) {
        return ActionResult::Error(ActionError::HyperSpeedUnavailable);
    }
    info!(
        "Hyperspeed engaged for {}s",
        t.params.scheduler.hyper_duration_secs
    );
    notifications.send(CityNotification::HyperSpeedStarted);
    ActionResult::Success
}

fn execute_set_refresh_rate(millis: u64, t: &mut ActionTargets) -> ActionResult {
    let applied = t.scheduler.set_refresh_ms(millis, &t.params.scheduler);
    if applied != millis {
        ActionResult::SuccessWithWarning(format!(
            "refresh rate {millis} ms clamped to {applied} ms"
        ))
    } else {
        ActionResult::Success
    }
}

/// Short player-facing notice for a rejected placement.
fn placement_notice(err: &ActionError) -> String {
    match err {
        ActionError::LevelLocked { required, .. } => format!("Requires level {required}."),
        ActionError::InsufficientFunds { cost, .. } => {
            format!("Insufficient funds: this costs ${cost}.")
        }
        other => format!("Cannot build here: {other}."),
    }
}
