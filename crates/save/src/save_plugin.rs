use bevy::prelude::*;

use crate::exclusive_load::load_into_world;
use crate::save_codec::{create_save_data, encode_save};
use crate::save_error::SaveError;
use crate::save_types::CameraView;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Encode the current city into [`LastSave`].
#[derive(Event, Debug, Clone, Default)]
pub struct SaveGameEvent;

/// Replace the current city with the given save file bytes.
#[derive(Event, Debug, Clone)]
pub struct LoadGameEvent(pub Vec<u8>);

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

#[derive(Resource, Debug, Clone)]
pub struct SaveSettings {
    /// LZ4-compress the payload.
    pub compress: bool,
}

impl Default for SaveSettings {
    fn default() -> Self {
        Self { compress: true }
    }
}

/// Bytes produced by the most recent successful save.
#[derive(Resource, Debug, Default)]
pub struct LastSave(pub Option<Vec<u8>>);

/// Result of the most recent load request.
#[derive(Resource, Debug, Default)]
pub struct LoadOutcome(pub Option<Result<(), SaveError>>);

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SaveGameEvent>()
            .add_event::<LoadGameEvent>()
            .init_resource::<SaveSettings>()
            .init_resource::<CameraView>()
            .init_resource::<LastSave>()
            .init_resource::<LoadOutcome>()
            .add_systems(Update, (exclusive_load, exclusive_save).chain());
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Apply the newest load request. Older requests in the same frame are
/// superseded.
fn exclusive_load(world: &mut World) {
    let Some(LoadGameEvent(bytes)) = world
        .resource_mut::<Events<LoadGameEvent>>()
        .drain()
        .last()
    else {
        return;
    };
    let outcome = load_into_world(world, &bytes);
    if let Err(e) = &outcome {
        warn!("Load failed, city left unchanged: {e}");
    }
    world.resource_mut::<LoadOutcome>().0 = Some(outcome);
}

fn exclusive_save(world: &mut World) {
    let requested = world
        .resource_mut::<Events<SaveGameEvent>>()
        .drain()
        .count()
        > 0;
    if !requested {
        return;
    }
    let compress = world.resource::<SaveSettings>().compress;
    match create_save_data(world).and_then(|data| encode_save(&data, compress)) {
        Ok(bytes) => {
            info!("City saved ({} bytes, compressed: {compress})", bytes.len());
            world.resource_mut::<LastSave>().0 = Some(bytes);
        }
        Err(e) => warn!("Save failed: {e}"),
    }
}
