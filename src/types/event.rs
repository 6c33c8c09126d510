//! SyncEvent - Progress and error records emitted during a walk

use super::ErrorClass;
use std::fmt;
use std::path::{Path, PathBuf};

/// What happened to one file or directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// File copied (new or overwritten)
    Copied,

    /// File already up to date at the destination
    Skipped,

    /// About to descend into a subdirectory
    EnteringSubdir,

    /// A whole subtree could not be processed
    DirError(ErrorClass),

    /// A single file could not be copied
    FileError(ErrorClass),
}

impl EventKind {
    pub fn is_error(&self) -> bool {
        matches!(self, EventKind::DirError(_) | EventKind::FileError(_))
    }
}

/// One outcome reported by the synchronizer
///
/// Events are created once and handed to the sink by value; nothing mutates
/// them afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncEvent {
    kind: EventKind,
    path: PathBuf,
    message: String,
}

impl SyncEvent {
    pub fn copied(path: &Path) -> Self {
        Self::new(EventKind::Copied, path, "copied".to_string())
    }

    pub fn skipped(path: &Path) -> Self {
        Self::new(EventKind::Skipped, path, "up to date".to_string())
    }

    pub fn entering(path: &Path) -> Self {
        Self::new(EventKind::EnteringSubdir, path, "entering".to_string())
    }

    pub fn dir_error(path: &Path, class: ErrorClass, message: impl Into<String>) -> Self {
        Self::new(EventKind::DirError(class), path, message.into())
    }

    pub fn file_error(path: &Path, class: ErrorClass, message: impl Into<String>) -> Self {
        Self::new(EventKind::FileError(class), path, message.into())
    }

    fn new(kind: EventKind, path: &Path, message: String) -> Self {
        Self {
            kind,
            path: path.to_path_buf(),
            message,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Source path of the file or directory the event is about
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Base name of the path, falling back to the full path
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl fmt::Display for SyncEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EventKind::Copied => write!(f, "Copied: {}", self.name()),
            EventKind::Skipped => write!(f, "Up to date: {}", self.name()),
            EventKind::EnteringSubdir => write!(f, "-> Entering subdirectory: {}", self.name()),
            EventKind::DirError(class) => write!(
                f,
                "Error (directory, {}): {} - {}",
                class.label(),
                self.name(),
                self.message
            ),
            EventKind::FileError(class) => write!(
                f,
                "Error (file, {}): {} - {}",
                class.label(),
                self.name(),
                self.message
            ),
        }
    }
}

/// Consumer of sync events
///
/// Implementations receive events one at a time, in emission order, on the
/// thread running the walk. They must not block indefinitely.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: SyncEvent);
}

impl<F> EventSink for F
where
    F: Fn(SyncEvent) + Send + Sync,
{
    fn emit(&self, event: SyncEvent) {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_event_constructors() {
        let event = SyncEvent::copied(Path::new("/src/a.txt"));
        assert_eq!(event.kind(), EventKind::Copied);
        assert_eq!(event.path(), Path::new("/src/a.txt"));
        assert_eq!(event.name(), "a.txt");

        let event = SyncEvent::file_error(Path::new("/src/b.txt"), ErrorClass::Io, "disk full");
        assert_eq!(event.kind(), EventKind::FileError(ErrorClass::Io));
        assert_eq!(event.message(), "disk full");
        assert!(event.kind().is_error());
        assert!(!EventKind::EnteringSubdir.is_error());
    }

    #[test]
    fn test_display_lines() {
        let entering = SyncEvent::entering(Path::new("/src/photos"));
        assert_eq!(entering.to_string(), "-> Entering subdirectory: photos");

        let failed = SyncEvent::dir_error(
            Path::new("/src/locked"),
            ErrorClass::AccessDenied,
            "Permission denied",
        );
        let line = failed.to_string();
        assert!(line.contains("directory, access denied"));
        assert!(line.contains("locked - Permission denied"));
    }

    #[test]
    fn test_closure_sink_receives_events_in_order() {
        let seen = Mutex::new(Vec::new());
        let sink = |event: SyncEvent| seen.lock().unwrap().push(event);

        sink.emit(SyncEvent::entering(Path::new("a")));
        sink.emit(SyncEvent::copied(Path::new("a/b.txt")));

        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].kind(), EventKind::EnteringSubdir);
        assert_eq!(seen[1].kind(), EventKind::Copied);
    }
}
