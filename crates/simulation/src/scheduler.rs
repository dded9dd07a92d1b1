//! Tick cadence.
//!
//! The simulation ticks on `FixedUpdate`. Its timestep is the configured
//! refresh interval, or the fixed hyperspeed interval while the boost is
//! active. The economy scale keeps income per wall-clock second independent of
//! the refresh setting; hyperspeed ticks at scale 1 regardless, which is where
//! its throughput gain comes from.

use std::time::Duration;

use bevy::prelude::*;

use crate::game_params::{GameParams, SchedulerParams};
use crate::hyper_speed::HyperSpeed;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct TickScheduler {
    /// Player-selected refresh interval in milliseconds.
    pub refresh_ms: u64,
    /// While paused no city tick runs and hyperspeed does not count down.
    pub paused: bool,
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::from_params(&SchedulerParams::default())
    }
}

impl TickScheduler {
    pub fn new(refresh_ms: u64) -> Self {
        Self {
            refresh_ms,
            paused: false,
        }
    }

    /// Scheduler for a new city, starting at the clamped default refresh.
    pub fn from_params(params: &SchedulerParams) -> Self {
        Self::new(params.clamp_refresh(params.default_refresh_ms))
    }

    /// Effective interval between ticks.
    pub fn interval_ms(&self, hyper: &HyperSpeed, params: &SchedulerParams) -> u64 {
        if hyper.active {
            params.hyper_interval_ms
        } else {
            self.refresh_ms
        }
    }

    /// Multiplier applied to income and day accrual for one tick.
    pub fn economy_scale(&self, hyper: &HyperSpeed, params: &SchedulerParams) -> f64 {
        if hyper.active {
            1.0
        } else {
            self.refresh_ms as f64 / params.reference_interval_ms as f64
        }
    }

    /// Set the refresh interval, clamped to the allowed range. Returns the value applied.
    pub fn set_refresh_ms(&mut self, millis: u64, params: &SchedulerParams) -> u64 {
        self.refresh_ms = params.clamp_refresh(millis);
        self.refresh_ms
    }
}

/// Keep the `FixedUpdate` timestep in step with the scheduler.
pub fn sync_fixed_timestep(
    scheduler: Res<TickScheduler>,
    hyper: Res<HyperSpeed>,
    params: Res<GameParams>,
    mut time: ResMut<Time<Fixed>>,
) {
    let millis = scheduler.interval_ms(&hyper, &params.scheduler).max(1);
    let effective = Duration::from_millis(millis);
    if time.timestep() != effective {
        time.set_timestep(effective);
    }
}
