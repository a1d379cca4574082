//! Research-window tracking.
//!
//! Detection is a bounded poll-and-diff over window snapshots, the registry is
//! the only durable record of tracked windows, and reconciliation prunes
//! registry entries for windows that disappeared behind our back.

mod detector;
mod lifecycle;
mod reconciler;
mod snapshot;

pub use self::detector::NewWindowDetector;
pub use self::lifecycle::{CloseOutcome, Lifecycle, OpenOutcome};
pub use self::reconciler::Reconciler;
pub use self::snapshot::SnapshotSource;
