//! Post-load derived state rebuild.
//!
//! The grid and stats are the source of truth; the active-cell tracker and the
//! road access map are derived from the grid. Whenever the grid is replaced
//! wholesale (loading a save, a scripted scenario) both must be rebuilt before
//! the next aggregation reads them:
//!
//! - **Active cells**: cleared and repopulated by a full grid scan
//! - **Road access**: recomputed from the new grid
//! - **Stat watch**: re-primed so the loaded level is not reported as a level-up

use bevy::prelude::*;

use crate::active_cells::ActiveCells;
use crate::grid::TileGrid;
use crate::notifications::StatWatch;
use crate::road_access::RoadAccessMap;

/// Marker resource requesting a rebuild on the next `FixedUpdate` tick.
#[derive(Resource, Default)]
pub struct PostLoadRebuildPending;

pub struct PostLoadRebuildPlugin;

impl Plugin for PostLoadRebuildPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            post_load_rebuild_derived_state
                .run_if(resource_exists::<PostLoadRebuildPending>)
                .in_set(crate::SimulationSet::PreSim),
        );
    }
}

/// Rebuild everything derived from the grid, synchronously.
pub fn rebuild_derived_state(world: &mut World) {
    let Some(grid) = world.get_resource::<TileGrid>() else {
        warn!("Post-load rebuild skipped: no TileGrid in world");
        return;
    };
    let active = ActiveCells::from_grid(grid);
    let access = RoadAccessMap::recompute(grid);
    info!(
        "Post-load rebuild: {} active cells, {} road-connected cells",
        active.len(),
        access.connected_count()
    );
    world.insert_resource(active);
    world.insert_resource(access);
    world.insert_resource(StatWatch::default());
}

/// One-shot system form of [`rebuild_derived_state`], gated on the marker.
fn post_load_rebuild_derived_state(
    mut commands: Commands,
    grid: Res<TileGrid>,
    mut active: ResMut<ActiveCells>,
    mut access: ResMut<RoadAccessMap>,
    mut watch: ResMut<StatWatch>,
) {
    active.rebuild_from(&grid);
    *access = RoadAccessMap::recompute(&grid);
    *watch = StatWatch::default();
    info!(
        "Post-load rebuild: {} active cells, {} road-connected cells",
        active.len(),
        access.connected_count()
    );
    commands.remove_resource::<PostLoadRebuildPending>();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::TileType;

    #[test]
    fn test_rebuild_derived_state_from_replaced_grid() {
        let mut world = World::new();
        let mut grid = TileGrid::new(8);
        grid.set(grid.index(2, 2), TileType::Road);
        grid.set(grid.index(3, 2), TileType::Residential);
        world.insert_resource(grid);
        world.insert_resource(ActiveCells::with_capacity(64));
        world.insert_resource(RoadAccessMap::default());

        rebuild_derived_state(&mut world);

        let grid = world.resource::<TileGrid>();
        let active = world.resource::<ActiveCells>();
        assert_eq!(active.len(), 2);
        assert!(active.matches_grid(grid));
        let access = world.resource::<RoadAccessMap>();
        assert!(access.has_access(grid.index(3, 2)));
        assert_eq!(*access, RoadAccessMap::recompute(grid));
    }

    #[test]
    fn test_rebuild_without_grid_is_noop() {
        let mut world = World::new();
        rebuild_derived_state(&mut world);
        assert!(world.get_resource::<ActiveCells>().is_none());
    }
}
