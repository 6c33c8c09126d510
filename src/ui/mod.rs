//! Terminal output

mod progress;

pub use progress::{format_outcome, stamp, EventLog};
