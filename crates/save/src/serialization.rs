// ---------------------------------------------------------------------------
// Serialization: the public save/load surface, re-exported flat
// ---------------------------------------------------------------------------
//
// Save path:  World -> create_save_data -> encode_save -> bytes
// Load path:  bytes -> decode_save (header, checksum, LZ4, bitcode, grid
//             validation) -> restore_grid -> load_into_world

pub use crate::file_header::*;
pub use crate::save_codec::*;
pub use crate::save_types::*;

#[cfg(test)]
mod tests_corruption;
#[cfg(test)]
mod tests_load;
#[cfg(test)]
mod tests_roundtrip;
