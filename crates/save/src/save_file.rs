//! Save files on disk.
//!
//! Writes go to `{path}.tmp`, are synced, then renamed over the final path, so
//! a crash mid-write leaves the previous save intact.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::save_error::SaveError;

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Atomically replace the file at `path` with `bytes`, creating parent
/// directories as needed.
pub fn write_save_file(path: &Path, bytes: &[u8]) -> Result<(), SaveError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = tmp_path_for(path);
    let mut file = File::create(&tmp)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Read a save file. A missing file is [`SaveError::NoData`].
pub fn read_save_file(path: &Path) -> Result<Vec<u8>, SaveError> {
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(SaveError::NoData),
        Err(e) => Err(SaveError::Io(e)),
    }
}
