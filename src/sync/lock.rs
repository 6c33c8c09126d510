//! Per-destination run lock
//!
//! Two runs writing into the same destination root at once would race on
//! the same files. Within one process the second run is refused instead.

use crate::types::{CaseSensitivity, DirectoryPath, SyncError};
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, OnceLock};

fn active_roots() -> MutexGuard<'static, HashSet<String>> {
    static ACTIVE: OnceLock<Mutex<HashSet<String>>> = OnceLock::new();
    ACTIVE
        .get_or_init(|| Mutex::new(HashSet::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Held for the duration of a run; released on drop
#[derive(Debug)]
pub struct RunLock {
    key: String,
}

impl RunLock {
    /// Claim `destination` for this run
    ///
    /// # Errors
    /// `SyncError::DestinationBusy` if another run holds the same root.
    pub fn acquire(destination: &DirectoryPath, case: CaseSensitivity) -> Result<Self, SyncError> {
        let key = destination.comparison_key(case);
        if !active_roots().insert(key.clone()) {
            return Err(SyncError::DestinationBusy {
                path: destination.as_path().to_path_buf(),
            });
        }
        Ok(Self { key })
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        active_roots().remove(&self.key);
    }
}
