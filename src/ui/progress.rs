//! Event log rendering for the terminal

use crate::types::{AbortReason, EventKind, EventSink, SyncEvent, SyncResult};
use chrono::{DateTime, Local, TimeZone};
use console::style;
use indicatif::{HumanBytes, ProgressBar, ProgressStyle};
use std::fmt::Display;

/// Timestamped log of sync events with a live spinner
///
/// Lines always go to stdout. The spinner draws on stderr and is cleared
/// while a line is printed, so it never mixes with the log itself.
pub struct EventLog {
    spinner: ProgressBar,
    quiet: bool,
}

impl EventLog {
    pub fn new(quiet: bool) -> Self {
        let spinner = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        spinner.enable_steady_tick(std::time::Duration::from_millis(120));
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }

        Self { spinner, quiet }
    }

    /// Print a plain informational line (suppressed when quiet)
    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.print(stamp(&Local::now(), message));
        }
    }

    /// Render one event
    pub fn record(&self, event: &SyncEvent) {
        self.spinner.set_message(event.name());

        let line = stamp(&Local::now(), event);
        match event.kind() {
            EventKind::DirError(_) | EventKind::FileError(_) => {
                self.print(style(line).red().to_string());
            }
            EventKind::EnteringSubdir if !self.quiet => {
                self.print(style(line).dim().to_string());
            }
            _ if !self.quiet => self.print(line),
            _ => {}
        }
    }

    /// Clear the spinner and print the final outcome
    pub fn finish(&self, result: &SyncResult) {
        self.spinner.finish_and_clear();
        let line = stamp(&Local::now(), format_outcome(result));
        if result.is_completed() && result.summary().error_count() == 0 {
            self.print(style(line).green().to_string());
        } else {
            self.print(style(line).yellow().to_string());
        }
    }

    fn print(&self, line: String) {
        self.spinner.suspend(|| println!("{}", line));
    }
}

impl EventSink for EventLog {
    fn emit(&self, event: SyncEvent) {
        self.record(&event);
    }
}

/// Prefix a line with `[YYYY/MM/DD HH:MM:SS]`
pub fn stamp<Tz>(at: &DateTime<Tz>, message: impl Display) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("[{}] {}", at.format("%Y/%m/%d %H:%M:%S"), message)
}

/// One-line description of how a run ended
pub fn format_outcome(result: &SyncResult) -> String {
    let summary = result.summary();
    let counts = format!(
        "{} copied, {} up to date, {} directories, {} errors | {} in {:.1}s",
        summary.files_copied,
        summary.files_skipped,
        summary.dirs_entered,
        summary.error_count(),
        HumanBytes(summary.bytes_copied),
        summary.elapsed.as_secs_f64()
    );

    match result.abort_reason() {
        None => format!("Sync completed: {}", counts),
        Some(AbortReason::Refused(e)) => format!("Sync not started: {}", e),
        Some(reason) => format!("Sync aborted ({}): {}", reason, counts),
    }
}
