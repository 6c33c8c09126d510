//! Background worker
//!
//! Runs a sync on a dedicated thread and streams its events back over a
//! channel, so the calling thread (a UI loop, a CLI printing progress) is
//! never blocked by filesystem work.

use crate::commands::sync::run_with_cancel;
use crate::sync::CancelToken;
use crate::types::{AbortReason, EventSink, SyncError, SyncEvent, SyncResult, SyncSummary};
use crate::Config;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// Event sink that forwards every event into a channel
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<SyncEvent>,
}

impl ChannelSink {
    pub fn new(tx: Sender<SyncEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: SyncEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("event receiver dropped, discarding event");
        }
    }
}

/// Handle to a sync running on a background thread
#[derive(Debug)]
pub struct SyncHandle {
    events: Receiver<SyncEvent>,
    cancel: CancelToken,
    thread: JoinHandle<SyncResult>,
}

impl SyncHandle {
    /// Events in emission order
    ///
    /// The channel disconnects when the worker finishes, so iterating it
    /// ends once the run is over.
    pub fn events(&self) -> &Receiver<SyncEvent> {
        &self.events
    }

    /// Ask the worker to stop after the item it is working on
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the worker and return its result
    pub fn wait(self) -> SyncResult {
        match self.thread.join() {
            Ok(result) => result,
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                tracing::error!(%message, "sync worker panicked");
                SyncResult::Aborted {
                    reason: AbortReason::Fatal(SyncError::WorkerPanicked(message)),
                    summary: SyncSummary::default(),
                }
            }
        }
    }
}

/// Start a sync on a new thread
///
/// # Errors
/// `SyncError::Io` if the operating system refuses to spawn the thread.
pub fn spawn_sync(config: Config) -> Result<SyncHandle, SyncError> {
    let (tx, rx) = unbounded();
    let cancel = CancelToken::new();
    let worker_cancel = cancel.clone();

    let thread = thread::Builder::new()
        .name("treesync-worker".to_string())
        .spawn(move || {
            let sink = ChannelSink::new(tx);
            run_with_cancel(&config, &sink, &worker_cancel)
        })?;

    Ok(SyncHandle {
        events: rx,
        cancel,
        thread,
    })
}
