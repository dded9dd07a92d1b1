//! Assertion helpers for `TestCity` integration tests.

use crate::game_actions::ActionResult;
use crate::tiles::TileType;

use super::TestCity;

impl TestCity {
    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    pub fn assert_money(&self, expected: i64) {
        let money = self.stats().money;
        assert_eq!(money, expected, "Expected money {expected}, got {money}");
    }

    pub fn assert_population(&self, expected: u32) {
        let pop = self.stats().population;
        assert_eq!(pop, expected, "Expected population {expected}, got {pop}");
    }

    pub fn assert_tile(&self, x: usize, y: usize, expected: TileType) {
        let tile = self.tile(x, y);
        assert_eq!(tile, expected, "Expected {expected:?} at ({x}, {y}), found {tile:?}");
    }

    pub fn assert_connected(&self, x: usize, y: usize) {
        assert!(self.is_connected(x, y), "Expected road access at ({x}, {y})");
    }

    pub fn assert_not_connected(&self, x: usize, y: usize) {
        assert!(!self.is_connected(x, y), "Expected no road access at ({x}, {y})");
    }

    /// The active-cell tracker holds exactly the non-empty cells.
    pub fn assert_active_cells_match_grid(&self) {
        assert!(
            self.active_cells().matches_grid(self.grid()),
            "Active cells ({}) out of sync with grid",
            self.active_cells().len()
        );
    }

    /// Stats invariants that must hold after every tick.
    pub fn assert_stats_invariants(&self) {
        let s = self.stats();
        assert!(s.employed <= s.workforce, "employed {} > workforce {}", s.employed, s.workforce);
        assert!(s.employed <= s.jobs, "employed {} > jobs {}", s.employed, s.jobs);
        assert!((0.0..=100.0).contains(&s.happiness), "happiness {}", s.happiness);
        assert!((0.0..=100.0).contains(&s.health), "health {}", s.health);
        assert!(s.education >= 0.0, "education {}", s.education);
        assert!((1..=crate::config::MAX_LEVEL).contains(&s.level), "level {}", s.level);
    }

    pub fn assert_last_action(&self, expected: &ActionResult) {
        let record = self.last_action().expect("no action has run");
        assert_eq!(&record.result, expected, "unexpected result for {:?}", record.action);
    }
}
