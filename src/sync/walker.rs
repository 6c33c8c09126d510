//! Depth-first tree walk with per-item fault isolation

use super::{copy_file, needs_copy, SyncOptions};
use crate::types::{EventSink, SyncError, SyncEvent, SyncSummary};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

enum FileOutcome {
    Copied(u64),
    UpToDate,
}

/// State of one run: the sink, options and running counters
pub(crate) struct Walk<'a> {
    options: &'a SyncOptions,
    sink: &'a dyn EventSink,
    summary: SyncSummary,
    interrupted: bool,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(options: &'a SyncOptions, sink: &'a dyn EventSink) -> Self {
        Self {
            options,
            sink,
            summary: SyncSummary::default(),
            interrupted: false,
        }
    }

    pub(crate) fn emit(&mut self, event: SyncEvent) {
        self.summary.record(&event);
        self.sink.emit(event);
    }

    /// True once the walk stopped early because of a cancel request
    pub(crate) fn interrupted(&self) -> bool {
        self.interrupted
    }

    pub(crate) fn into_summary(self) -> SyncSummary {
        self.summary
    }

    fn should_stop(&mut self) -> bool {
        if !self.interrupted && self.options.cancel.is_cancelled() {
            tracing::info!("cancellation requested, stopping walk");
            self.interrupted = true;
        }
        self.interrupted
    }

    /// Mirror `source` into `dest`, files first, then subdirectories
    ///
    /// Per-file failures and failures inside subdirectories are reported as
    /// events and never returned. The returned error covers only this
    /// directory itself: `dest` could not be created or `source` could not be
    /// listed. Nothing below it has been touched in that case.
    pub(crate) fn sync_directory(&mut self, source: &Path, dest: &Path) -> Result<(), SyncError> {
        fs::create_dir_all(dest)
            .map_err(|e| with_context(e, format!("cannot create {}", dest.display())))?;

        let listing = list_directory(source)
            .map_err(|e| with_context(e, format!("cannot list {}", source.display())))?;

        for file in &listing.files {
            if self.should_stop() {
                return Ok(());
            }
            let Some(name) = file.file_name() else {
                continue;
            };
            if self.options.exclude.is_excluded(name) {
                tracing::debug!(path = %file.display(), "excluded");
                continue;
            }
            self.sync_file(file, &dest.join(name));
        }

        for dir in &listing.dirs {
            if self.should_stop() {
                return Ok(());
            }
            let Some(name) = dir.file_name() else {
                continue;
            };
            if self.options.exclude.is_excluded(name) {
                tracing::debug!(path = %dir.display(), "excluded");
                continue;
            }

            self.emit(SyncEvent::entering(dir));
            tracing::debug!(path = %dir.display(), "entering subdirectory");

            if let Err(e) = self.sync_directory(dir, &dest.join(name)) {
                tracing::warn!(path = %dir.display(), error = %e, "subdirectory failed");
                self.emit(SyncEvent::dir_error(dir, e.class(), describe(&e)));
            }
        }

        Ok(())
    }

    fn sync_file(&mut self, src: &Path, dest: &Path) {
        match try_sync_file(src, dest) {
            Ok(FileOutcome::Copied(bytes)) => {
                tracing::debug!(path = %src.display(), bytes, "copied");
                self.summary.bytes_copied += bytes;
                self.emit(SyncEvent::copied(src));
            }
            Ok(FileOutcome::UpToDate) => {
                tracing::debug!(path = %src.display(), "up to date");
                if self.options.report_skipped {
                    self.emit(SyncEvent::skipped(src));
                } else {
                    self.summary.files_skipped += 1;
                }
            }
            Err(e) => {
                tracing::warn!(path = %src.display(), error = %e, "file copy failed");
                self.emit(SyncEvent::file_error(src, e.class(), describe(&e)));
            }
        }
    }
}

fn try_sync_file(src: &Path, dest: &Path) -> Result<FileOutcome, SyncError> {
    let src_meta = fs::metadata(src)?;
    if !needs_copy(src_meta.modified()?, dest)? {
        return Ok(FileOutcome::UpToDate);
    }
    let bytes = copy_file(src, dest, &src_meta)?;
    Ok(FileOutcome::Copied(bytes))
}

/// Immediate children of a directory, split into files and subdirectories
#[derive(Debug, Default)]
pub(crate) struct Listing {
    pub files: Vec<PathBuf>,
    pub dirs: Vec<PathBuf>,
}

/// List `dir`, sorted by name within each group
///
/// Symbolic links are classified by their target: links to files are copied
/// as files, dangling links land in `files` so that their copy failure gets
/// reported. Links to directories are not followed, which keeps link cycles
/// from turning into endless recursion.
pub(crate) fn list_directory(dir: &Path) -> io::Result<Listing> {
    let mut listing = Listing::default();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            listing.dirs.push(path);
        } else if file_type.is_symlink() {
            match fs::metadata(&path) {
                Ok(target) if target.is_dir() => {
                    tracing::warn!(path = %path.display(), "not following directory symlink");
                }
                _ => listing.files.push(path),
            }
        } else if file_type.is_file() {
            listing.files.push(path);
        } else {
            tracing::debug!(path = %path.display(), "skipping special file");
        }
    }

    listing.files.sort();
    listing.dirs.sort();
    Ok(listing)
}

fn with_context(error: io::Error, context: String) -> SyncError {
    SyncError::Io(io::Error::new(error.kind(), format!("{}: {}", context, error)))
}

/// Event message for an error: the bare IO message without the enum prefix
pub(crate) fn describe(error: &SyncError) -> String {
    match error {
        SyncError::Io(e) => e.to_string(),
        other => other.to_string(),
    }
}
