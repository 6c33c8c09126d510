//! Staleness rule - decides whether a destination file needs updating

use crate::types::SyncError;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::SystemTime;

/// Decide whether the source file must be copied to `dest`
///
/// Timestamp-only comparison:
///
/// 1. **No file at destination** (missing, or something other than a regular
///    file occupies the name) → copy
/// 2. **Source strictly newer** (src.mtime > dest.mtime) → copy
/// 3. **Same or older** → keep the destination as it is
///
/// Sizes and contents are never inspected.
///
/// # Errors
/// Returns the underlying IO error if the destination exists but its
/// metadata cannot be read.
pub fn needs_copy(src_mtime: SystemTime, dest: &Path) -> Result<bool, SyncError> {
    match fs::metadata(dest) {
        Ok(meta) if meta.is_file() => Ok(is_strictly_newer(src_mtime, meta.modified()?)),
        // A directory in the way still means "no file there"; the copy itself
        // reports the conflict.
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(true),
        Err(e) => Err(SyncError::Io(e)),
    }
}

/// Source wins only when it is strictly newer; ties keep the destination
pub fn is_strictly_newer(src_mtime: SystemTime, dest_mtime: SystemTime) -> bool {
    src_mtime > dest_mtime
}
