//! Scan engine configuration

use serde::{Deserialize, Serialize};

use super::scoring::ScoringConfig;
use super::{BATCH_SIZE, PROGRESS_INTERVAL_MS, RETENTION_CAP, SPAN_CEILING_DAYS};

/// Everything the worker needs to run one scan session. Travels inside the
/// start command so a session's parameters are frozen at dispatch time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Days per batch (cancellation-check granularity).
    pub batch_size: usize,
    /// Progress throttle in milliseconds.
    pub progress_interval_ms: u64,
    /// Hard cap on enumerable days per scan.
    pub span_ceiling_days: i64,
    /// Aggregator working-set bound.
    pub retention_cap: usize,
    pub scoring: ScoringConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            batch_size: BATCH_SIZE,
            progress_interval_ms: PROGRESS_INTERVAL_MS,
            span_ceiling_days: SPAN_CEILING_DAYS,
            retention_cap: RETENTION_CAP,
            scoring: ScoringConfig::default(),
        }
    }
}
