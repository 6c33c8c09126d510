//! File copy with timestamp preservation

use crate::types::SyncError;
use std::ffi::OsString;
use std::fs::{self, File, Metadata};
use std::io::{Read, Write};
use std::path::Path;
use tempfile::{Builder, NamedTempFile};

const BUFFER_SIZE: usize = 128 * 1024;

/// Suffix of the temporary files a copy writes before renaming into place
pub const PART_SUFFIX: &str = ".treesync-part";

/// Copy `src` over `dest`, giving the copy the source's modification time
///
/// The data is written to a freshly created hidden sibling of `dest` and
/// renamed into place once it is flushed, so an interrupted copy never leaves
/// a truncated destination file behind. The temporary name is chosen so it
/// never matches an existing entry. The temporary file is removed if any step
/// fails.
///
/// The parent directory of `dest` must already exist.
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(SyncError)` - IO error or other failure
///
/// # Example
/// ```no_run
/// use treesync::sync::copy_file;
/// use std::path::Path;
///
/// let src = Path::new("source.txt");
/// let meta = std::fs::metadata(src)?;
/// let bytes = copy_file(src, Path::new("dest.txt"), &meta)?;
/// # Ok::<(), treesync::SyncError>(())
/// ```
pub fn copy_file(src: &Path, dest: &Path, src_meta: &Metadata) -> Result<u64, SyncError> {
    let mut src_file = File::open(src)?;
    let part = create_part_file(dest)?;

    // Dropping `part` on any early return deletes the temporary file
    let total_bytes = write_part(&mut src_file, part.as_file())?;

    fs::set_permissions(part.path(), src_meta.permissions())?;

    let mtime = filetime::FileTime::from_last_modification_time(src_meta);
    filetime::set_file_mtime(part.path(), mtime)?;

    part.persist(dest).map_err(|e| SyncError::Io(e.error))?;

    Ok(total_bytes)
}

/// Create `dir/.name.XXXXXX.treesync-part` next to `dest`
fn create_part_file(dest: &Path) -> Result<NamedTempFile, SyncError> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut prefix = OsString::from(".");
    prefix.push(dest.file_name().unwrap_or_default());
    prefix.push(".");

    let part = Builder::new()
        .prefix(&prefix)
        .suffix(PART_SUFFIX)
        .tempfile_in(dir)?;
    Ok(part)
}

fn write_part(src_file: &mut File, mut part_file: &File) -> Result<u64, SyncError> {
    let mut buffer = vec![0u8; BUFFER_SIZE];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = src_file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        part_file.write_all(&buffer[..bytes_read])?;
        total_bytes += bytes_read as u64;
    }

    part_file.sync_all()?;
    Ok(total_bytes)
}
