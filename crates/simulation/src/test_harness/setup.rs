//! Builder methods for placing tiles and seeding city state in integration tests.

use crate::active_cells::ActiveCells;
use crate::game_actions::{ActionQueue, ActionSource, GameAction};
use crate::grid::TileGrid;
use crate::scheduler::TickScheduler;
use crate::stats::CityStats;
use crate::tiles::TileType;
use crate::TickCounter;

use super::TestCity;

impl TestCity {
    // -----------------------------------------------------------------------
    // Treasury and progression
    // -----------------------------------------------------------------------

    /// Set the city treasury to the given amount.
    pub fn with_money(mut self, money: i64) -> Self {
        self.app.world_mut().resource_mut::<CityStats>().money = money;
        self
    }

    /// Set the city level directly, unlocking higher-tier tiles.
    pub fn with_level(mut self, level: u32) -> Self {
        self.app.world_mut().resource_mut::<CityStats>().level = level;
        self
    }

    pub fn with_refresh_ms(mut self, millis: u64) -> Self {
        self.app.world_mut().resource_mut::<TickScheduler>().refresh_ms = millis;
        self
    }

    // -----------------------------------------------------------------------
    // Tiles
    // -----------------------------------------------------------------------

    /// Write a tile straight into the grid without charging for it or checking
    /// its unlock level. Road access is recomputed on the next tick.
    pub fn with_tile(mut self, x: usize, y: usize, tile: TileType) -> Self {
        self.set_tile(x, y, tile);
        self
    }

    /// Free placement of a straight road. The endpoints must share a row or column.
    pub fn with_road_line(mut self, x0: usize, y0: usize, x1: usize, y1: usize) -> Self {
        assert!(
            x0 == x1 || y0 == y1,
            "road line must be horizontal or vertical: ({x0},{y0})-({x1},{y1})"
        );
        for y in y0.min(y1)..=y0.max(y1) {
            for x in x0.min(x1)..=x0.max(x1) {
                self.set_tile(x, y, TileType::Road);
            }
        }
        self
    }

    fn set_tile(&mut self, x: usize, y: usize, tile: TileType) {
        let world = self.app.world_mut();
        let index = {
            let mut grid = world.resource_mut::<TileGrid>();
            let index = grid.index(x, y);
            grid.set(index, tile);
            index
        };
        if !tile.is_empty() {
            world.resource_mut::<ActiveCells>().add(index);
        }
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Queue an action as the player; it is applied on the next tick.
    pub fn queue(&mut self, action: GameAction) -> &mut Self {
        self.queue_from(ActionSource::Player, action)
    }

    pub fn queue_from(&mut self, source: ActionSource, action: GameAction) -> &mut Self {
        let world = self.app.world_mut();
        let tick = world.resource::<TickCounter>().0;
        world.resource_mut::<ActionQueue>().submit(tick, source, action);
        self
    }

    /// Queue a `PlaceTile` action and run one tick.
    pub fn place(&mut self, x: u32, y: u32, tile: TileType) -> &mut Self {
        self.queue(GameAction::PlaceTile { x, y, tile });
        self.tick(1);
        self
    }

    /// Replace the grid wholesale, as a load would, and request a rebuild of
    /// derived state on the next tick.
    pub fn replace_grid(&mut self, grid: TileGrid) -> &mut Self {
        let world = self.app.world_mut();
        world.insert_resource(grid);
        world.insert_resource(crate::post_load_rebuild::PostLoadRebuildPending);
        self
    }
}
