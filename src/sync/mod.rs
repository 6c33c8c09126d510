//! Tree synchronizer - one-way, additive, newer-wins mirroring
//!
//! The walk is depth-first and pre-order. Within each directory every file is
//! attempted, then every subdirectory; a failure is reported as an event and
//! confined to the file or subtree it happened in.

mod cancel;
mod compare;
mod copy;
mod filter;
mod lock;
mod walker;

pub use cancel::CancelToken;
pub use compare::{is_strictly_newer, needs_copy};
pub use copy::{copy_file, PART_SUFFIX};
pub use filter::ExcludeFilter;
pub use lock::RunLock;

use crate::types::{AbortReason, EventSink, SyncEvent, SyncResult};
use std::path::Path;
use std::time::Instant;
use walker::{describe, Walk};

/// Knobs for a single run
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Emit `Skipped` events for up-to-date files
    pub report_skipped: bool,

    /// Entries never visited
    pub exclude: ExcludeFilter,

    /// Checked between files and subdirectories
    pub cancel: CancelToken,
}

/// Mirror `source` into `destination`, reporting every outcome to `sink`
///
/// The caller is responsible for input validation and for the path guard
/// (see [`crate::commands::sync::run`], which does both).
///
/// A failure to create the destination root or to list the source root is
/// reported as a directory error event and aborts the run; every other
/// failure is confined to its file or subtree and the run completes.
pub fn synchronize(
    source: &Path,
    destination: &Path,
    options: &SyncOptions,
    sink: &dyn EventSink,
) -> SyncResult {
    let started = Instant::now();
    let mut walk = Walk::new(options, sink);

    let outcome = walk.sync_directory(source, destination);
    if let Err(e) = &outcome {
        tracing::error!(source = %source.display(), error = %e, "cannot process root directory");
        walk.emit(SyncEvent::dir_error(source, e.class(), describe(e)));
    }

    let interrupted = walk.interrupted();
    let mut summary = walk.into_summary();
    summary.elapsed = started.elapsed();

    match outcome {
        Err(e) => SyncResult::Aborted {
            reason: AbortReason::Fatal(e),
            summary,
        },
        Ok(()) if interrupted => SyncResult::Aborted {
            reason: AbortReason::Cancelled,
            summary,
        },
        Ok(()) => SyncResult::Completed(summary),
    }
}
