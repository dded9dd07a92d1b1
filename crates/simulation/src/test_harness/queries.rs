//! Query and simulation-tick methods for `TestCity`.

use bevy::prelude::*;

use crate::active_cells::ActiveCells;
use crate::advisors::AdvisorMessages;
use crate::game_actions::{ActionRecord, ActionResultLog};
use crate::grid::TileGrid;
use crate::hyper_speed::HyperSpeed;
use crate::road_access::RoadAccessMap;
use crate::scheduler::TickScheduler;
use crate::stats::CityStats;
use crate::tiles::TileType;

use super::TestCity;

impl TestCity {
    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run N fixed-update ticks by directly executing the `FixedUpdate`
    /// schedule. This bypasses Bevy's time system entirely, so the refresh
    /// interval only matters through the economy scale.
    ///
    /// A `yield_now()` is inserted between ticks so that background threads
    /// (e.g. `AsyncComputeTaskPool`) get a chance to make progress even when
    /// the test drives the schedule in a tight loop.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
            std::thread::yield_now();
        }
    }

    /// Tick until `done` holds or `max_ticks` have run. Returns whether it held.
    pub fn tick_until(&mut self, max_ticks: u32, mut done: impl FnMut(&TestCity) -> bool) -> bool {
        for _ in 0..max_ticks {
            if done(self) {
                return true;
            }
            self.tick(1);
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        done(self)
    }

    /// Run a full frame (`Update`, plus `FixedUpdate` if virtual time allows).
    pub fn update(&mut self) {
        self.app.update();
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    /// Access any resource.
    pub fn resource<R: Resource>(&self) -> &R {
        self.app.world().resource::<R>()
    }

    pub fn stats(&self) -> &CityStats {
        self.resource::<CityStats>()
    }

    pub fn grid(&self) -> &TileGrid {
        self.resource::<TileGrid>()
    }

    pub fn tile(&self, x: usize, y: usize) -> TileType {
        self.grid().get(x, y)
    }

    pub fn road_access(&self) -> &RoadAccessMap {
        self.resource::<RoadAccessMap>()
    }

    pub fn is_connected(&self, x: usize, y: usize) -> bool {
        let index = self.grid().index(x, y);
        self.road_access().has_access(index)
    }

    pub fn active_cells(&self) -> &ActiveCells {
        self.resource::<ActiveCells>()
    }

    pub fn hyper(&self) -> &HyperSpeed {
        self.resource::<HyperSpeed>()
    }

    pub fn scheduler(&self) -> &TickScheduler {
        self.resource::<TickScheduler>()
    }

    pub fn messages(&self) -> &AdvisorMessages {
        self.resource::<AdvisorMessages>()
    }

    /// Most recently applied action.
    pub fn last_action(&self) -> Option<&ActionRecord> {
        self.resource::<ActionResultLog>().latest()
    }
}
