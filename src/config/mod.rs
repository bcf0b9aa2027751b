//! Configuration module for the good-days engine.

mod scan;
mod scoring;

pub use scan::ScanConfig;
pub use scoring::{ScoringConfig, TierThresholds};

// Top Level Constants

/// Hard cap on enumerable days per scan. Bounds worst-case engine work
/// regardless of the caller-supplied range; there is no other timeout.
pub const SPAN_CEILING_DAYS: i64 = 400;

/// Days scored between cancellation checks and chunk emissions.
pub const BATCH_SIZE: usize = 64;

/// Minimum gap between progress emissions. Progress feeds a UI indicator;
/// anything faster than render cadence is wasted traffic.
pub const PROGRESS_INTERVAL_MS: u64 = 200;

/// Upper bound on the aggregator's working set ("best N seen so far").
pub const RETENTION_CAP: usize = 1000;
