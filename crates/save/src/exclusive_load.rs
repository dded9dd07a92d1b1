use bevy::prelude::*;

use simulation::post_load_rebuild::rebuild_derived_state;
use simulation::stats::CityStats;

use crate::save_codec::{decode_save, restore_grid};
use crate::save_error::SaveError;

/// Decode `bytes` and, only if every check passes, replace the grid, stats
/// and camera view in `world`, then rebuild everything derived from the grid.
///
/// On error the world is untouched.
pub fn load_into_world(world: &mut World, bytes: &[u8]) -> Result<(), SaveError> {
    let data = decode_save(bytes)?;
    let grid = restore_grid(&data)?;
    let view = data.view;
    let stats = CityStats::from(data.stats);

    info!(
        "Loading city: level {}, population {}, day {:.1}",
        stats.level, stats.population, stats.day
    );
    world.insert_resource(grid);
    world.insert_resource(stats);
    world.insert_resource(view);
    rebuild_derived_state(world);
    Ok(())
}
