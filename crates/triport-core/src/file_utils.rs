//! Safe file I/O for the state file
//!
//! Reading is hardened: symlinks are rejected via `symlink_metadata()`,
//! non-regular files (directories, FIFOs, devices) are refused, and a size
//! limit prevents resource exhaustion. There is an inherent TOCTOU window
//! between the metadata check and the read; acceptable here because the
//! impact is limited to reading unexpected content from a local path.
//!
//! Writing goes through a `.tmp` sibling plus rename so a crash mid-write
//! never leaves a truncated state file behind.

use crate::diagnostics::{StateError, StateResult};
use std::fs;
use std::path::Path;

/// Default maximum state file size (1 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

/// Safely read a state file with the default size limit.
///
/// # Errors
///
/// Returns `StateError::FileSymlink` if the path is a symlink.
/// Returns `StateError::FileNotRegular` if the path is not a regular file.
/// Returns `StateError::FileTooBig` if the file exceeds the size limit.
/// Returns `StateError::FileRead` for other I/O errors.
pub fn safe_read_file(path: &Path) -> StateResult<String> {
    safe_read_file_with_limit(path, DEFAULT_MAX_FILE_SIZE)
}

/// Safely read a state file with a custom size limit.
///
/// Files at exactly `max_size` bytes are accepted.
pub fn safe_read_file_with_limit(path: &Path, max_size: u64) -> StateResult<String> {
    // symlink_metadata gets metadata WITHOUT following symlinks
    let metadata = fs::symlink_metadata(path).map_err(|e| StateError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if metadata.file_type().is_symlink() {
        return Err(StateError::FileSymlink {
            path: path.to_path_buf(),
        });
    }

    if !metadata.is_file() {
        return Err(StateError::FileNotRegular {
            path: path.to_path_buf(),
        });
    }

    let size = metadata.len();
    if size > max_size {
        return Err(StateError::FileTooBig {
            path: path.to_path_buf(),
            size,
            limit: max_size,
        });
    }

    fs::read_to_string(path).map_err(|e| StateError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write `content` to `path` atomically: write a `.tmp` sibling in the same
/// directory, then rename it over the target.
pub fn write_atomic(path: &Path, content: &str) -> StateResult<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    fs::write(tmp, content).map_err(|e| StateError::FileWrite {
        path: tmp.to_path_buf(),
        source: e,
    })?;

    fs::rename(tmp, path).map_err(|e| StateError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
