//! Core type definitions for treesync

mod error;
mod event;
mod path;
mod result;

pub use error::{ErrorClass, SyncError};
pub use event::{EventKind, EventSink, SyncEvent};
pub use path::{CaseSensitivity, DirectoryPath};
pub use result::{AbortReason, SyncResult, SyncSummary};
