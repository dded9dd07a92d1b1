// ---------------------------------------------------------------------------
// Save codec: SaveData <-> bytes, world -> SaveData
// ---------------------------------------------------------------------------

use bevy::prelude::*;

use simulation::config::{CELL_COUNT, GRID_SIZE};
use simulation::grid::TileGrid;
use simulation::stats::CityStats;
use simulation::tiles::TileType;

use crate::file_header::{unwrap_header, wrap_with_header, FLAG_LZ4};
use crate::save_error::SaveError;
use crate::save_types::{CameraView, SaveData, SavedStats, CURRENT_SAVE_VERSION};

/// Largest decompressed payload accepted: one byte per cell plus room for
/// stats, view and bitcode framing.
pub const MAX_DECOMPRESSED_LEN: usize = CELL_COUNT + 4 * 1024;

/// Capture the persisted state of `world`. A missing `CameraView` saves the
/// default view.
pub fn create_save_data(world: &World) -> Result<SaveData, SaveError> {
    let grid = world
        .get_resource::<TileGrid>()
        .ok_or(SaveError::MissingResource("TileGrid"))?;
    let stats = world
        .get_resource::<CityStats>()
        .ok_or(SaveError::MissingResource("CityStats"))?;
    let view = world.get_resource::<CameraView>().copied().unwrap_or_default();
    Ok(save_data_from(grid, stats, view))
}

pub fn save_data_from(grid: &TileGrid, stats: &CityStats, view: CameraView) -> SaveData {
    SaveData {
        version: CURRENT_SAVE_VERSION,
        grid_size: grid.size as u32,
        grid: grid.cells.iter().map(|t| t.code()).collect(),
        stats: SavedStats::from(stats),
        view,
    }
}

/// Encode `data` into a complete save file.
pub fn encode_save(data: &SaveData, compress: bool) -> Result<Vec<u8>, SaveError> {
    let encoded = bitcode::encode(data);
    if compress {
        let packed = lz4_flex::compress_prepend_size(&encoded);
        wrap_with_header(&packed, FLAG_LZ4)
    } else {
        wrap_with_header(&encoded, 0)
    }
}

/// Decode and fully validate a save file. Nothing here touches a world, so a
/// caller can apply the result knowing it is sound.
pub fn decode_save(bytes: &[u8]) -> Result<SaveData, SaveError> {
    if bytes.is_empty() {
        return Err(SaveError::NoData);
    }
    let (header, payload) = unwrap_header(bytes)?;

    let data: SaveData = if header.is_compressed() {
        let claimed = payload
            .get(..4)
            .map(|p| u32::from_le_bytes([p[0], p[1], p[2], p[3]]) as usize)
            .ok_or_else(|| SaveError::Corrupted("compressed payload too short".into()))?;
        if claimed > MAX_DECOMPRESSED_LEN {
            return Err(SaveError::Corrupted(format!(
                "decompressed size {claimed} exceeds limit {MAX_DECOMPRESSED_LEN}"
            )));
        }
        let raw = lz4_flex::decompress_size_prepended(payload)?;
        bitcode::decode(&raw)?
    } else {
        bitcode::decode(payload)?
    };

    if data.version > CURRENT_SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected_max: CURRENT_SAVE_VERSION,
            found: data.version,
        });
    }

    let expected = GRID_SIZE * GRID_SIZE;
    let size = data.grid_size as usize;
    if size != GRID_SIZE || data.grid.len() != expected {
        return Err(SaveError::GridSizeMismatch {
            expected,
            found: data.grid.len(),
        });
    }

    if let Some((index, code)) = data
        .grid
        .iter()
        .enumerate()
        .find(|(_, &code)| TileType::from_code(code).is_none())
    {
        return Err(SaveError::Decode(format!(
            "unknown tile code {code} at cell {index}"
        )));
    }

    Ok(data)
}

/// Rebuild the tile grid from validated save data.
pub fn restore_grid(data: &SaveData) -> Result<TileGrid, SaveError> {
    let mut grid = TileGrid::new(data.grid_size as usize);
    if grid.len() != data.grid.len() {
        return Err(SaveError::GridSizeMismatch {
            expected: grid.len(),
            found: data.grid.len(),
        });
    }
    for (index, &code) in data.grid.iter().enumerate() {
        let tile = TileType::from_code(code)
            .ok_or_else(|| SaveError::Decode(format!("unknown tile code {code} at cell {index}")))?;
        grid.set(index, tile);
    }
    Ok(grid)
}
