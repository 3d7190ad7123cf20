//! Data File Writer
//!
//! Appends single records and atomically replaces the whole data file.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// Append one encoded record to the end of the data file, creating it if absent
pub fn append_block(path: &Path, block: &[u8], sync: bool) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(block)?;
    if sync {
        file.sync_data()?;
    }
    Ok(())
}

/// Replace the data file with `contents`
///
/// Steps:
/// 1. Write everything to `<path>.tmp` (truncating any leftover)
/// 2. fsync the temp file
/// 3. Rename over `path` (atomic on the same filesystem)
/// 4. fsync the parent directory so the rename itself is durable
///
/// The temp file is removed if any step before the rename fails.
pub fn rewrite(path: &Path, contents: &[u8]) -> Result<()> {
    let temp = temp_path(path);

    if let Err(e) = write_synced(&temp, contents) {
        let _ = fs::remove_file(&temp);
        return Err(e);
    }

    if let Err(e) = fs::rename(&temp, path) {
        let _ = fs::remove_file(&temp);
        return Err(StoreError::Io(e));
    }

    if let Some(parent) = path.parent() {
        let parent = if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        };
        // Directory fsync is not supported everywhere (e.g. Windows)
        if let Ok(dir) = File::open(parent) {
            if let Err(e) = dir.sync_all() {
                tracing::warn!(
                    dir = %parent.display(),
                    error = %e,
                    "directory fsync failed; rename may not be durable"
                );
            }
        }
    }

    Ok(())
}

fn write_synced(path: &Path, contents: &[u8]) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;

    let mut writer = BufWriter::new(file);
    writer.write_all(contents)?;
    writer.flush()?;

    let file = writer
        .into_inner()
        .map_err(|e| StoreError::Io(e.into_error()))?;
    file.sync_all()?;
    Ok(())
}

/// `<dir>/<name>.tmp` next to the data file, so the rename stays on one filesystem
pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("data"));
    name.push(".tmp");
    path.with_file_name(name)
}
