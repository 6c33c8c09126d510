//! Error types for treesync

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for treesync operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration (config file, exclude patterns)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error (blank or unresolvable input paths)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Source directory is missing or is not a directory
    #[error("Source directory not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Destination is the source itself or lies somewhere below it
    #[error("Destination {destination} is the source {source_dir} or one of its subdirectories")]
    DestinationInsideSource {
        source_dir: PathBuf,
        destination: PathBuf,
    },

    /// Another run in this process is already writing to the destination root
    #[error("Destination is already being synchronized: {path}")]
    DestinationBusy { path: PathBuf },

    /// Worker thread died before reporting a result
    #[error("Sync worker terminated unexpectedly: {0}")]
    WorkerPanicked(String),
}

impl SyncError {
    /// Classify this error for event reporting
    pub fn class(&self) -> ErrorClass {
        match self {
            SyncError::Io(e) => ErrorClass::from_io(e),
            _ => ErrorClass::Other,
        }
    }
}

/// Three-way classification carried by file and directory error events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorClass {
    /// Ordinary I/O failure (missing entry, busy file, disk full, ...)
    Io,
    /// The OS refused access
    AccessDenied,
    /// Anything that is not a plain I/O or access failure
    Other,
}

impl ErrorClass {
    pub fn from_io(error: &std::io::Error) -> Self {
        match error.kind() {
            ErrorKind::PermissionDenied => ErrorClass::AccessDenied,
            ErrorKind::Unsupported
            | ErrorKind::InvalidInput
            | ErrorKind::InvalidData
            | ErrorKind::Other => ErrorClass::Other,
            _ => ErrorClass::Io,
        }
    }

    /// Short label used in log lines
    pub fn label(&self) -> &'static str {
        match self {
            ErrorClass::Io => "IO",
            ErrorClass::AccessDenied => "access denied",
            ErrorClass::Other => "unknown",
        }
    }
}
