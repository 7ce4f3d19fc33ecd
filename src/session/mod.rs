//! Session module - one tracking run's frame pipeline and statistics
//!
//! Re-exports only. All logic in submodules.

mod pipeline;
mod stats;

pub use pipeline::{GestureResult, GestureSession, HandData};
pub use stats::{SessionStats, StatsEntry, RECENT_CAPACITY};
