//! Command entry points shared by the CLI and library callers

pub mod sync;
