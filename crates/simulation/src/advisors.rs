//! Advisor boundary: snapshots the city for an external advice service and
//! keeps a feed of advisor and system messages.
//!
//! Split into sub-modules:
//! - `types`: snapshot, error and message feed types
//! - `service`: the service trait, prompt rendering and fallback handling
//! - `rules`: the offline rule-based service used by default

mod rules;
mod service;
mod types;

pub use rules::RuleBasedAdvisor;
pub use service::{
    advisor_prompt, consult, AdvisorService, FALLBACK_NO_COMMENT, FALLBACK_UNAVAILABLE,
};
pub use types::{
    AdvisorError, AdvisorMessage, AdvisorMessages, AdvisorSender, AdvisorSnapshot, MAX_MESSAGES,
};

use std::sync::Arc;

use bevy::prelude::*;
use bevy::tasks::{block_on, AsyncComputeTaskPool, Task};

use crate::grid::TileGrid;
use crate::notifications::CityNotification;
use crate::stats::CityStats;
use crate::{SimulationSet, TickCounter};

// ---------------------------------------------------------------------------
// Resources and events
// ---------------------------------------------------------------------------

/// Ask the configured service for advice on the current city state.
#[derive(Event, Debug, Clone, Default)]
pub struct RequestAdvice;

/// The service consulted on [`RequestAdvice`].
#[derive(Resource, Clone)]
pub struct AdvisorServiceHandle(pub Arc<dyn AdvisorService>);

impl Default for AdvisorServiceHandle {
    fn default() -> Self {
        Self(Arc::new(RuleBasedAdvisor::default()))
    }
}

/// At most one consultation runs at a time.
#[derive(Resource, Default)]
pub struct PendingConsultation {
    task: Option<Task<String>>,
}

impl PendingConsultation {
    pub fn is_busy(&self) -> bool {
        self.task.is_some()
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Start a consultation for the newest request if none is in flight.
pub fn start_consultation(
    mut requests: EventReader<RequestAdvice>,
    handle: Res<AdvisorServiceHandle>,
    stats: Res<CityStats>,
    grid: Res<TileGrid>,
    mut pending: ResMut<PendingConsultation>,
) {
    if requests.read().count() == 0 {
        return;
    }
    if pending.is_busy() {
        debug!("Advisor request ignored: consultation already in flight");
        return;
    }

    let snapshot = AdvisorSnapshot::capture(&stats, &grid);
    let service = Arc::clone(&handle.0);

    let pool = AsyncComputeTaskPool::get();
    pending.task = Some(pool.spawn(async move { consult(service.as_ref(), &snapshot) }));
}

/// Move a finished consultation into the message feed.
pub fn poll_consultation(
    tick: Res<TickCounter>,
    mut pending: ResMut<PendingConsultation>,
    mut messages: ResMut<AdvisorMessages>,
) {
    let Some(task) = pending.task.as_mut() else {
        return;
    };
    if let Some(text) = block_on(futures_lite::future::poll_once(task)) {
        messages.push(AdvisorSender::Advisor, text, tick.0);
        pending.task = None;
    }
}

/// Turn city notifications into system messages.
pub fn relay_notifications(
    tick: Res<TickCounter>,
    mut notifications: EventReader<CityNotification>,
    mut messages: ResMut<AdvisorMessages>,
) {
    for notification in notifications.read() {
        let text = match notification {
            CityNotification::LevelUp { level } => format!("The city reached level {level}!"),
            CityNotification::PowerOverload { usage, capacity } => {
                format!("Power overload! Usage {usage} exceeds capacity {capacity}.")
            }
            CityNotification::PowerRestored => "Power supply is stable again.".to_string(),
            CityNotification::HyperSpeedStarted => "Hyperspeed engaged.".to_string(),
            CityNotification::HyperSpeedEnded => {
                "Hyperspeed finished. Recharging.".to_string()
            }
            CityNotification::HyperSpeedReady => "Hyperspeed is ready.".to_string(),
        };
        messages.push(AdvisorSender::System, text, tick.0);
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct AdvisorPlugin;

impl Plugin for AdvisorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AdvisorMessages>()
            .init_resource::<AdvisorServiceHandle>()
            .init_resource::<PendingConsultation>()
            .add_event::<RequestAdvice>()
            .add_systems(
                FixedUpdate,
                (start_consultation, poll_consultation, relay_notifications)
                    .chain()
                    .in_set(SimulationSet::PostSim),
            );
    }
}
