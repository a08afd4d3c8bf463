//! telemetry/mod.rs
//! Per-call counters, stage timers, and immutable snapshots.
//!
//! Notes:
//! - Counters live on the stack of a single call; nothing is global.
//! - Snapshots are serde-serializable so callers can attach them to their own logs.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
