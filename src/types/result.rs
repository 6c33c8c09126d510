//! SyncResult - Terminal outcome of a run

use super::{EventKind, SyncError, SyncEvent};
use std::time::Duration;

/// Counters accumulated over one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub files_copied: usize,
    pub files_skipped: usize,
    pub dirs_entered: usize,
    pub file_errors: usize,
    pub dir_errors: usize,
    pub bytes_copied: u64,
    pub elapsed: Duration,
}

impl SyncSummary {
    /// Count an emitted event
    pub fn record(&mut self, event: &SyncEvent) {
        match event.kind() {
            EventKind::Copied => self.files_copied += 1,
            EventKind::Skipped => self.files_skipped += 1,
            EventKind::EnteringSubdir => self.dirs_entered += 1,
            EventKind::FileError(_) => self.file_errors += 1,
            EventKind::DirError(_) => self.dir_errors += 1,
        }
    }

    pub fn error_count(&self) -> usize {
        self.file_errors + self.dir_errors
    }
}

/// Why a run stopped early or never started
#[derive(Debug)]
pub enum AbortReason {
    /// Input validation failed, nothing was touched
    Refused(SyncError),

    /// Cancellation was requested between items
    Cancelled,

    /// A fault at the root of the traversal (or in the worker itself)
    Fatal(SyncError),
}

impl std::fmt::Display for AbortReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbortReason::Refused(e) => write!(f, "refused to start: {}", e),
            AbortReason::Cancelled => write!(f, "cancelled"),
            AbortReason::Fatal(e) => write!(f, "fatal error: {}", e),
        }
    }
}

/// Outcome of a full run
///
/// `Completed` does not mean error-free: per-file and per-directory failures
/// are reported as events and counted in the summary.
#[derive(Debug)]
pub enum SyncResult {
    Completed(SyncSummary),
    Aborted {
        reason: AbortReason,
        summary: SyncSummary,
    },
}

impl SyncResult {
    pub fn refused(error: SyncError) -> Self {
        SyncResult::Aborted {
            reason: AbortReason::Refused(error),
            summary: SyncSummary::default(),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, SyncResult::Completed(_))
    }

    pub fn summary(&self) -> &SyncSummary {
        match self {
            SyncResult::Completed(summary) => summary,
            SyncResult::Aborted { summary, .. } => summary,
        }
    }

    pub fn abort_reason(&self) -> Option<&AbortReason> {
        match self {
            SyncResult::Completed(_) => None,
            SyncResult::Aborted { reason, .. } => Some(reason),
        }
    }

    /// Process exit code: 0 completed, 2 refused, 1 otherwise
    pub fn exit_code(&self) -> u8 {
        match self {
            SyncResult::Completed(_) => 0,
            SyncResult::Aborted {
                reason: AbortReason::Refused(_),
                ..
            } => 2,
            SyncResult::Aborted { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorClass;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_summary_records_each_kind() {
        let mut summary = SyncSummary::default();
        summary.record(&SyncEvent::copied(Path::new("a")));
        summary.record(&SyncEvent::copied(Path::new("b")));
        summary.record(&SyncEvent::skipped(Path::new("c")));
        summary.record(&SyncEvent::entering(Path::new("d")));
        summary.record(&SyncEvent::file_error(Path::new("e"), ErrorClass::Io, "x"));
        summary.record(&SyncEvent::dir_error(Path::new("f"), ErrorClass::Other, "y"));

        assert_eq!(summary.files_copied, 2);
        assert_eq!(summary.files_skipped, 1);
        assert_eq!(summary.dirs_entered, 1);
        assert_eq!(summary.error_count(), 2);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(SyncResult::Completed(SyncSummary::default()).exit_code(), 0);

        let refused = SyncResult::refused(SyncError::SourceNotFound {
            path: PathBuf::from("/missing"),
        });
        assert_eq!(refused.exit_code(), 2);
        assert!(!refused.is_completed());

        let cancelled = SyncResult::Aborted {
            reason: AbortReason::Cancelled,
            summary: SyncSummary::default(),
        };
        assert_eq!(cancelled.exit_code(), 1);
        assert_eq!(cancelled.abort_reason().map(|r| r.to_string()).as_deref(), Some("cancelled"));
    }
}
