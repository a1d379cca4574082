//! Subcommand handlers. Each takes the already-built context (or just the
//! config for commands that never touch the desktop or the store).

pub mod diagnostics;
pub mod engines;
pub mod history;
pub mod search;
pub mod setup;
pub mod windows;
