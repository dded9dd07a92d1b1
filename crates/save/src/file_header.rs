// ---------------------------------------------------------------------------
// file_header – Save file header with magic bytes, version, and checksum
// ---------------------------------------------------------------------------
//
// Header format (20 bytes, fixed-size, little-endian):
//   [0..4]   Magic bytes: "TCTY"
//   [4..8]   Header format version (u32)
//   [8..12]  Flags (u32: bit 0 = payload is LZ4-compressed)
//   [12..16] Payload length in bytes (u32)
//   [16..20] xxHash32 checksum of the payload (everything after the header)
//
// On save: encode SaveData -> optionally compress -> prepend header
// On load: check magic -> check version -> check length -> verify checksum

use xxhash_rust::xxh32::xxh32;

use crate::save_error::SaveError;

/// Magic bytes identifying a tile city save file.
pub const MAGIC: [u8; 4] = *b"TCTY";

/// Size of the file header in bytes.
pub const HEADER_SIZE: usize = 20;

/// Current header layout version. Distinct from the `SaveData` version.
pub const HEADER_FORMAT_VERSION: u32 = 1;

/// Flag bit: payload is LZ4-compressed (size-prepended block format).
pub const FLAG_LZ4: u32 = 1;

/// Seed for xxHash32 checksum.
const XXHASH_SEED: u32 = 0;

/// Parsed file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub format_version: u32,
    pub flags: u32,
    pub payload_len: u32,
    pub checksum: u32,
}

impl FileHeader {
    pub fn is_compressed(&self) -> bool {
        self.flags & FLAG_LZ4 != 0
    }
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Wrap a payload with a file header.
///
/// Returns bytes: [header (20 bytes)] ++ [payload].
pub fn wrap_with_header(payload: &[u8], flags: u32) -> Result<Vec<u8>, SaveError> {
    let payload_len = u32::try_from(payload.len()).map_err(|_| {
        SaveError::Encode(format!("payload of {} bytes exceeds 4 GiB", payload.len()))
    })?;
    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&HEADER_FORMAT_VERSION.to_le_bytes());
    out.extend_from_slice(&flags.to_le_bytes());
    out.extend_from_slice(&payload_len.to_le_bytes());
    out.extend_from_slice(&xxh32(payload, XXHASH_SEED).to_le_bytes());
    out.extend_from_slice(payload);
    Ok(out)
}

/// Parse and validate the file header, returning it with the payload slice.
///
/// # Errors
///
/// - `Corrupted` if the magic is missing, the file is shorter than the header
///   or the recorded payload length, or the checksum does not match.
/// - `VersionMismatch` if the header layout is from a newer build.
pub fn unwrap_header(bytes: &[u8]) -> Result<(FileHeader, &[u8]), SaveError> {
    if bytes.len() < 4 || bytes[..4] != MAGIC {
        return Err(SaveError::Corrupted(
            "missing TCTY magic bytes, not a save file".into(),
        ));
    }
    if bytes.len() < HEADER_SIZE {
        return Err(SaveError::Corrupted(format!(
            "file too short ({} bytes, need at least {HEADER_SIZE} for header)",
            bytes.len()
        )));
    }

    let header = FileHeader {
        format_version: read_u32(bytes, 4),
        flags: read_u32(bytes, 8),
        payload_len: read_u32(bytes, 12),
        checksum: read_u32(bytes, 16),
    };

    if header.format_version > HEADER_FORMAT_VERSION {
        return Err(SaveError::VersionMismatch {
            expected_max: HEADER_FORMAT_VERSION,
            found: header.format_version,
        });
    }

    let payload = &bytes[HEADER_SIZE..];
    if payload.len() != header.payload_len as usize {
        return Err(SaveError::Corrupted(format!(
            "payload is {} bytes, header records {}",
            payload.len(),
            header.payload_len
        )));
    }

    let computed = xxh32(payload, XXHASH_SEED);
    if computed != header.checksum {
        return Err(SaveError::Corrupted(format!(
            "checksum mismatch (expected {:#010X}, got {computed:#010X})",
            header.checksum
        )));
    }

    Ok((header, payload))
}
