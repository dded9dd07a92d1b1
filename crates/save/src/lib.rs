//! Persisted-state contract for the tile city: the save record, its binary
//! file format, and Bevy plumbing for save/load requests.

mod exclusive_load;
mod file_header;
mod save_codec;
mod save_error;
mod save_file;
mod save_plugin;
mod save_types;
pub mod serialization;

pub use exclusive_load::load_into_world;
pub use save_error::SaveError;
pub use save_file::{read_save_file, write_save_file};
pub use save_plugin::{
    LastSave, LoadGameEvent, LoadOutcome, SaveGameEvent, SavePlugin, SaveSettings,
};
pub use save_types::CameraView;
