//! Malformed save files are rejected before anything is applied.

use super::*;

use crate::SaveError;
use simulation::config::GRID_SIZE;
use simulation::grid::TileGrid;
use simulation::stats::CityStats;

fn valid_data() -> SaveData {
    save_data_from(
        &TileGrid::new(GRID_SIZE),
        &CityStats::default(),
        CameraView::default(),
    )
}

/// Wrap arbitrary save data without the validation `decode_save` performs.
fn raw_file(data: &SaveData) -> Vec<u8> {
    wrap_with_header(&bitcode::encode(data), 0).expect("wrap")
}

#[test]
fn test_empty_bytes_is_no_data() {
    assert!(matches!(decode_save(&[]), Err(SaveError::NoData)));
}

#[test]
fn test_flipped_byte_is_corrupted() {
    let mut bytes = encode_save(&valid_data(), true).expect("encode");
    let mid = HEADER_SIZE + (bytes.len() - HEADER_SIZE) / 2;
    bytes[mid] ^= 0x5A;
    let err = decode_save(&bytes).unwrap_err();
    assert!(matches!(err, SaveError::Corrupted(_)), "got {err:?}");
}

#[test]
fn test_garbage_payload_with_valid_checksum_fails_decode() {
    let bytes = wrap_with_header(b"definitely not bitcode", 0).expect("wrap");
    let err = decode_save(&bytes).unwrap_err();
    assert!(matches!(err, SaveError::Decode(_)), "got {err:?}");
}

#[test]
fn test_bad_lz4_block_fails_decode() {
    let bytes = wrap_with_header(&[0xFF, 0xFF, 0xFF, 0x7F, 1, 2, 3], FLAG_LZ4).expect("wrap");
    let err = decode_save(&bytes).unwrap_err();
    assert!(matches!(err, SaveError::Decode(_)), "got {err:?}");
}

#[test]
fn test_future_version_rejected() {
    let mut data = valid_data();
    data.version = CURRENT_SAVE_VERSION + 1;
    let err = decode_save(&raw_file(&data)).unwrap_err();
    assert!(matches!(
        err,
        SaveError::VersionMismatch { found, .. } if found == CURRENT_SAVE_VERSION + 1
    ));
}

#[test]
fn test_short_grid_rejected() {
    let mut data = valid_data();
    data.grid.truncate(100);
    let err = decode_save(&raw_file(&data)).unwrap_err();
    assert!(matches!(
        err,
        SaveError::GridSizeMismatch { found: 100, .. }
    ));
}

#[test]
fn test_other_map_size_rejected() {
    let mut data = valid_data();
    data.grid_size = 64;
    data.grid = vec![0; 64 * 64];
    let err = decode_save(&raw_file(&data)).unwrap_err();
    assert!(matches!(err, SaveError::GridSizeMismatch { .. }), "got {err:?}");
}

#[test]
fn test_unknown_tile_code_rejected() {
    let mut data = valid_data();
    data.grid[77] = 250;
    let err = decode_save(&raw_file(&data)).unwrap_err();
    match err {
        SaveError::Decode(msg) => {
            assert!(msg.contains("250"), "got: {msg}");
            assert!(msg.contains("77"), "got: {msg}");
        }
        other => panic!("expected Decode, got {other:?}"),
    }
}

#[test]
fn test_oversized_decompression_claim_is_rejected() {
    let mut payload = u32::MAX.to_le_bytes().to_vec();
    payload.extend_from_slice(&[0x10, 0x00]);
    let bytes = wrap_with_header(&payload, FLAG_LZ4).expect("wrap");
    let err = decode_save(&bytes).unwrap_err();
    assert!(
        matches!(&err, SaveError::Corrupted(msg) if msg.contains("exceeds limit")),
        "got {err:?}"
    );
}

#[test]
fn test_compressed_payload_shorter_than_size_prefix_is_corrupted() {
    let bytes = wrap_with_header(&[0x01, 0x02], FLAG_LZ4).expect("wrap");
    assert!(matches!(decode_save(&bytes), Err(SaveError::Corrupted(_))));
}

#[test]
fn test_real_save_fits_decompression_limit() {
    let encoded = bitcode::encode(&valid_data());
    assert!(encoded.len() <= MAX_DECOMPRESSED_LEN);
    assert!(decode_save(&encode_save(&valid_data(), true).expect("encode")).is_ok());
}
