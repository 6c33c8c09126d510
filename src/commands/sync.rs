//! Main sync command

use crate::sync::{synchronize, CancelToken, RunLock};
use crate::types::{EventSink, SyncResult};
use crate::Config;

/// Run the sync operation
///
/// Validates the configuration (including the path guard), claims the
/// destination root, then walks. Validation failures come back as
/// `SyncResult::Aborted` with `AbortReason::Refused` before anything on disk
/// is touched.
pub fn run(config: &Config, sink: &dyn EventSink) -> SyncResult {
    run_with_cancel(config, sink, &CancelToken::new())
}

/// Same as [`run`], stopping between items once `cancel` is triggered
pub fn run_with_cancel(config: &Config, sink: &dyn EventSink, cancel: &CancelToken) -> SyncResult {
    let paths = match config.validate() {
        Ok(paths) => paths,
        Err(e) => {
            tracing::warn!(error = %e, "refusing to start sync");
            return SyncResult::refused(e);
        }
    };

    let mut options = match config.sync_options() {
        Ok(options) => options,
        Err(e) => {
            tracing::warn!(error = %e, "refusing to start sync");
            return SyncResult::refused(e);
        }
    };
    options.cancel = cancel.clone();

    let _lock = match RunLock::acquire(&paths.destination, config.case_sensitivity) {
        Ok(lock) => lock,
        Err(e) => {
            tracing::warn!(error = %e, "refusing to start sync");
            return SyncResult::refused(e);
        }
    };

    tracing::info!(
        source = %paths.source.as_path().display(),
        destination = %paths.destination.as_path().display(),
        excludes = options.exclude.patterns().len(),
        "sync started"
    );

    let result = synchronize(
        paths.source.as_path(),
        paths.destination.as_path(),
        &options,
        sink,
    );

    let summary = result.summary();
    tracing::info!(
        completed = result.is_completed(),
        copied = summary.files_copied,
        skipped = summary.files_skipped,
        dirs = summary.dirs_entered,
        file_errors = summary.file_errors,
        dir_errors = summary.dir_errors,
        bytes = summary.bytes_copied,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "sync finished"
    );

    result
}
