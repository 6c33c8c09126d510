//! Path guard - refuses destinations inside the source tree
//!
//! Syncing a directory into itself (or into one of its own subdirectories)
//! would recurse into the freshly written copies forever. The guard runs
//! before any filesystem change is made.

use crate::types::{CaseSensitivity, DirectoryPath};
use std::path::Path;

/// Check whether `destination` is `source` itself or lies below it
///
/// Both paths are resolved to absolute form (`.`, `..` and symbolic links
/// included) and compared as strings with a trailing separator, so `/a/b`
/// guards `/a/b/c` but not `/a/bc`.
///
/// If either path cannot be resolved the pair is reported invalid: an
/// unverified relationship is never allowed to proceed.
///
/// # Example
/// ```
/// use treesync::guard::is_destination_invalid;
/// use treesync::types::CaseSensitivity;
/// use std::path::Path;
///
/// let case = CaseSensitivity::Insensitive;
/// assert!(is_destination_invalid(Path::new("/data"), Path::new("/data/backup"), case));
/// assert!(!is_destination_invalid(Path::new("/data"), Path::new("/backup"), case));
/// ```
pub fn is_destination_invalid(source: &Path, destination: &Path, case: CaseSensitivity) -> bool {
    let resolved = DirectoryPath::resolve(source)
        .and_then(|src| DirectoryPath::resolve(destination).map(|dest| (src, dest)));

    match resolved {
        Ok((src, dest)) => is_resolved_destination_invalid(&src, &dest, case),
        Err(e) => {
            tracing::warn!(
                source = %source.display(),
                destination = %destination.display(),
                error = %e,
                "could not resolve paths, refusing sync"
            );
            true
        }
    }
}

/// Same check for paths that are already resolved
pub fn is_resolved_destination_invalid(
    source: &DirectoryPath,
    destination: &DirectoryPath,
    case: CaseSensitivity,
) -> bool {
    let invalid = source.contains(destination, case);
    if invalid {
        tracing::debug!(
            source = %source.as_path().display(),
            destination = %destination.as_path().display(),
            "destination is inside source"
        );
    }
    invalid
}
