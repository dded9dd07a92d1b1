//! Save data roundtrip tests.

use super::*;

use simulation::config::GRID_SIZE;
use simulation::grid::TileGrid;
use simulation::stats::CityStats;
use simulation::tiles::TileType;

fn sample_grid() -> TileGrid {
    let mut grid = TileGrid::new(GRID_SIZE);
    for x in 10..20 {
        let i = grid.index(x, 10);
        grid.set(i, TileType::Road);
        let i = grid.index(x, 11);
        grid.set(i, TileType::Residential);
    }
    let i = grid.index(0, 0);
    grid.set(i, TileType::PowerFusion);
    grid
}

fn sample_stats() -> CityStats {
    CityStats {
        money: 12_345,
        population: 100,
        jobs: 8,
        employed: 8,
        workforce: 85,
        happiness: 72.5,
        level: 2,
        day: 40.25,
        ..CityStats::default()
    }
}

#[test]
fn test_roundtrip_uncompressed() {
    let view = CameraView {
        x: 12.0,
        y: -3.5,
        zoom: 2.0,
    };
    let data = save_data_from(&sample_grid(), &sample_stats(), view);
    let bytes = encode_save(&data, false).expect("encode");
    let (header, _) = unwrap_header(&bytes).expect("header");
    assert!(!header.is_compressed());

    let decoded = decode_save(&bytes).expect("decode");
    assert_eq!(decoded, data);
    assert_eq!(decoded.version, CURRENT_SAVE_VERSION);
    assert_eq!(decoded.view, view);
}

#[test]
fn test_roundtrip_compressed_is_smaller() {
    let data = save_data_from(&sample_grid(), &sample_stats(), CameraView::default());
    let raw = encode_save(&data, false).expect("encode raw");
    let packed = encode_save(&data, true).expect("encode packed");

    assert!(packed.len() < raw.len(), "{} >= {}", packed.len(), raw.len());
    assert_eq!(decode_save(&packed).expect("decode"), data);
}

#[test]
fn test_restore_grid_and_stats() {
    let grid = sample_grid();
    let stats = sample_stats();
    let data = save_data_from(&grid, &stats, CameraView::default());
    let decoded = decode_save(&encode_save(&data, true).expect("encode")).expect("decode");

    assert_eq!(restore_grid(&decoded).expect("grid"), grid);
    assert_eq!(CityStats::from(decoded.stats), stats);
}

#[test]
fn test_every_tile_code_survives() {
    let mut grid = TileGrid::new(GRID_SIZE);
    for (i, tile) in TileType::ALL.iter().enumerate() {
        grid.set(i, *tile);
    }
    let data = save_data_from(&grid, &CityStats::default(), CameraView::default());
    let decoded = decode_save(&encode_save(&data, false).expect("encode")).expect("decode");
    assert_eq!(restore_grid(&decoded).expect("grid"), grid);
}

#[test]
fn test_encoding_is_deterministic() {
    let data = save_data_from(&sample_grid(), &sample_stats(), CameraView::default());
    assert_eq!(
        encode_save(&data, true).expect("first"),
        encode_save(&data, true).expect("second")
    );
}
