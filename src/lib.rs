//! # treesync - Incremental one-way directory mirroring
//!
//! Copies every file from a source tree into a destination tree when the
//! destination has no copy yet or holds an older one. Nothing is ever
//! deleted, and a destination inside the source is refused up front.
//!
//! ```no_run
//! use treesync::{commands::sync::run, Config, SyncEvent};
//!
//! let config = Config {
//!     source: "photos".into(),
//!     destination: "/mnt/backup/photos".into(),
//!     ..Config::default()
//! };
//! let result = run(&config, &|event: SyncEvent| println!("{}", event));
//! std::process::exit(result.exit_code().into());
//! ```

// Module declarations
pub mod commands;
pub mod config;
pub mod guard;
pub mod sync;
pub mod types;
pub mod ui;
pub mod worker;

// Re-export commonly used types
pub use config::Config;
pub use types::{
    AbortReason, CaseSensitivity, DirectoryPath, ErrorClass, EventKind, EventSink, SyncError,
    SyncEvent, SyncResult, SyncSummary,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
