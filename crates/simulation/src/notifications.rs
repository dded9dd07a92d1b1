//! City-level notifications raised when tracked stats cross a boundary.
//!
//! Emitted in `PostSim` and consumed by the advisor feed.

use bevy::prelude::*;

use crate::stats::CityStats;

#[derive(Event, Debug, Clone, PartialEq)]
pub enum CityNotification {
    LevelUp { level: u32 },
    PowerOverload { usage: i64, capacity: i64 },
    PowerRestored,
    HyperSpeedStarted,
    HyperSpeedEnded,
    HyperSpeedReady,
}

/// Values seen on the previous notification pass.
#[derive(Resource, Debug, Clone, Default)]
pub struct StatWatch {
    pub level: u32,
    pub overloaded: bool,
    pub primed: bool,
}

/// Compare the fresh snapshot with the last one seen and report crossings.
pub fn detect_stat_changes(
    stats: Res<CityStats>,
    mut watch: ResMut<StatWatch>,
    mut notifications: EventWriter<CityNotification>,
) {
    let overloaded = stats.is_overloaded();
    if !watch.primed {
        *watch = StatWatch {
            level: stats.level,
            overloaded,
            primed: true,
        };
        return;
    }

    if stats.level > watch.level {
        info!("City reached level {}", stats.level);
        notifications.send(CityNotification::LevelUp { level: stats.level });
    }
    if overloaded && !watch.overloaded {
        warn!(
            "Power overload: usage {} exceeds capacity {}",
            stats.power_usage, stats.power_capacity
        );
        notifications.send(CityNotification::PowerOverload {
            usage: stats.power_usage,
            capacity: stats.power_capacity,
        });
    } else if !overloaded && watch.overloaded {
        info!("Power supply restored");
        notifications.send(CityNotification::PowerRestored);
    }

    watch.level = stats.level;
    watch.overloaded = overloaded;
}
