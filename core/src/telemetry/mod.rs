//! telemetry/mod.rs
//! Decode counters and immutable snapshots.
//!
//! Notes:
//! - The decoder itself keeps no state and never logs; callers own a
//!   `DecodeCounters`, feed it each dispatch outcome, and merge per-thread
//!   counters at the end.
//! - Snapshots are serializable for export.

pub mod counters;
pub mod snapshot;

pub use counters::*;
pub use snapshot::*;
