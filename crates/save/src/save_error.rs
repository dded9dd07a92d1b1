// ---------------------------------------------------------------------------
// SaveError: typed errors for save/load operations
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur while encoding, decoding, writing or applying a save.
///
/// Every load path decodes and validates completely before touching the
/// world, so any `SaveError` returned from a load means the world is
/// unchanged.
#[derive(Debug)]
pub enum SaveError {
    /// I/O error (file not found, permission denied, disk full, etc.)
    Io(std::io::Error),
    /// The save could not be encoded.
    Encode(String),
    /// Bitcode or LZ4 decoding failed, or the payload holds invalid values.
    Decode(String),
    /// The header is missing, truncated, or the checksum does not match.
    Corrupted(String),
    /// Save file version is newer than this build supports.
    VersionMismatch { expected_max: u32, found: u32 },
    /// The stored grid does not match this build's map size.
    GridSizeMismatch { expected: usize, found: usize },
    /// No save data was available to load.
    NoData,
    /// A required resource was missing from the ECS world.
    MissingResource(&'static str),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "I/O error: {e}"),
            SaveError::Encode(msg) => write!(f, "Encoding error: {msg}"),
            SaveError::Decode(msg) => write!(f, "Decoding error: {msg}"),
            SaveError::Corrupted(msg) => write!(f, "Save file is corrupted: {msg}"),
            SaveError::VersionMismatch {
                expected_max,
                found,
            } => write!(
                f,
                "Version mismatch: save is v{found}, but this build only supports up to v{expected_max}"
            ),
            SaveError::GridSizeMismatch { expected, found } => write!(
                f,
                "Grid size mismatch: expected {expected} cells, save holds {found}"
            ),
            SaveError::NoData => write!(f, "No save data available to load"),
            SaveError::MissingResource(name) => {
                write!(f, "Missing required resource: {name}")
            }
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<bitcode::Error> for SaveError {
    fn from(e: bitcode::Error) -> Self {
        SaveError::Decode(e.to_string())
    }
}

impl From<lz4_flex::block::DecompressError> for SaveError {
    fn from(e: lz4_flex::block::DecompressError) -> Self {
        SaveError::Decode(format!("LZ4: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_error_display_io() {
        let err = SaveError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        let msg = format!("{err}");
        assert!(msg.contains("I/O error"), "got: {msg}");
        assert!(msg.contains("file not found"), "got: {msg}");
    }

    #[test]
    fn test_save_error_display_version_mismatch() {
        let err = SaveError::VersionMismatch {
            expected_max: 1,
            found: 7,
        };
        let msg = format!("{err}");
        assert!(msg.contains("v7"), "got: {msg}");
        assert!(msg.contains("v1"), "got: {msg}");
    }

    #[test]
    fn test_save_error_display_grid_size() {
        let err = SaveError::GridSizeMismatch {
            expected: 16_384,
            found: 100,
        };
        let msg = format!("{err}");
        assert!(msg.contains("16384"), "got: {msg}");
        assert!(msg.contains("100"), "got: {msg}");
    }

    #[test]
    fn test_save_error_display_corrupted() {
        let msg = format!("{}", SaveError::Corrupted("checksum mismatch".into()));
        assert!(msg.contains("corrupted"), "got: {msg}");
        assert!(msg.contains("checksum mismatch"), "got: {msg}");
    }

    #[test]
    fn test_save_error_from_io_has_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let save_err: SaveError = io_err.into();
        assert!(matches!(save_err, SaveError::Io(_)));
        assert!(std::error::Error::source(&save_err).is_some());
    }

    #[test]
    fn test_save_error_no_data_has_no_source() {
        assert!(std::error::Error::source(&SaveError::NoData).is_none());
    }
}
