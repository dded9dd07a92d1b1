//! Hyperspeed: a timed, cooldown-gated time-compression mode.
//!
//! ```text
//! Idle --trigger--> Active(duration) --0--> Cooldown(cooldown) --0--> Idle
//! ```
//!
//! Triggering while active or cooling down is a no-op.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::game_params::{GameParams, SchedulerParams};
use crate::notifications::CityNotification;
use crate::scheduler::TickScheduler;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HyperSpeed {
    pub active: bool,
    /// Seconds of boosted mode remaining.
    pub time_left: f64,
    /// Seconds until the boost can be triggered again.
    pub cooldown: f64,
}

/// Phase boundary crossed during [`HyperSpeed::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HyperTransition {
    /// Boost finished, cooldown started.
    Ended,
    /// Cooldown elapsed, boost available again.
    Ready,
}

impl HyperSpeed {
    pub fn is_idle(&self) -> bool {
        !self.active && self.cooldown <= 0.0
    }

    /// Start the boost. Returns `false` when active or still cooling down.
    pub fn trigger(&mut self, params: &SchedulerParams) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.active = true;
        self.time_left = params.hyper_duration_secs;
        self.cooldown = 0.0;
        true
    }

    /// Count down by `secs` of wall-clock time.
    pub fn advance(&mut self, secs: f64, params: &SchedulerParams) -> Option<HyperTransition> {
        if self.active {
            self.time_left -= secs;
            if self.time_left <= 0.0 {
                self.active = false;
                self.time_left = 0.0;
                self.cooldown = params.hyper_cooldown_secs;
                return Some(HyperTransition::Ended);
            }
        } else if self.cooldown > 0.0 {
            self.cooldown -= secs;
            if self.cooldown <= 0.0 {
                self.cooldown = 0.0;
                return Some(HyperTransition::Ready);
            }
        }
        None
    }
}

/// Advance the hyperspeed countdown by the interval of the tick just run.
pub fn advance_hyper_speed(
    scheduler: Res<TickScheduler>,
    params: Res<GameParams>,
    mut hyper: ResMut<HyperSpeed>,
    mut notifications: EventWriter<CityNotification>,
) {
    if scheduler.paused || hyper.is_idle() {
        return;
    }
    let secs = scheduler.interval_ms(&hyper, &params.scheduler) as f64 / 1000.0;
    match hyper.advance(secs, &params.scheduler) {
        Some(HyperTransition::Ended) => {
            info!(
                "Hyperspeed ended, cooldown {}s",
                params.scheduler.hyper_cooldown_secs
            );
            notifications.send(CityNotification::HyperSpeedEnded);
        }
        Some(HyperTransition::Ready) => {
            info!("Hyperspeed ready");
            notifications.send(CityNotification::HyperSpeedReady);
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SchedulerParams {
        SchedulerParams::default()
    }

    #[test]
    fn test_trigger_from_idle() {
        let mut h = HyperSpeed::default();
        assert!(h.trigger(&params()));
        assert!(h.active);
        assert_eq!(h.time_left, 15.0);
        assert_eq!(h.cooldown, 0.0);
    }

    #[test]
    fn test_trigger_while_active_is_noop() {
        let mut h = HyperSpeed::default();
        h.trigger(&params());
        h.advance(5.0, &params());
        assert!(!h.trigger(&params()));
        assert_eq!(h.time_left, 10.0);
    }

    #[test]
    fn test_full_lifecycle() {
        let p = params();
        let mut h = HyperSpeed::default();
        h.trigger(&p);

        // 60 hyper ticks of 250 ms is exactly 15 s.
        for _ in 0..59 {
            assert_eq!(h.advance(0.25, &p), None);
        }
        assert_eq!(h.advance(0.25, &p), Some(HyperTransition::Ended));
        assert!(!h.active);
        assert_eq!(h.cooldown, 120.0);

        assert!(!h.trigger(&p), "cannot trigger during cooldown");

        for _ in 0..59 {
            assert_eq!(h.advance(2.0, &p), None);
        }
        assert_eq!(h.advance(2.0, &p), Some(HyperTransition::Ready));
        assert!(h.is_idle());
        assert!(h.trigger(&p));
    }

    #[test]
    fn test_idle_advance_does_nothing() {
        let mut h = HyperSpeed::default();
        assert_eq!(h.advance(100.0, &params()), None);
        assert_eq!(h, HyperSpeed::default());
    }

    #[test]
    fn test_overshoot_clamps_to_zero() {
        let p = params();
        let mut h = HyperSpeed::default();
        h.trigger(&p);
        assert_eq!(h.advance(20.0, &p), Some(HyperTransition::Ended));
        assert_eq!(h.time_left, 0.0);
        assert_eq!(h.advance(500.0, &p), Some(HyperTransition::Ready));
        assert_eq!(h.cooldown, 0.0);
    }
}
