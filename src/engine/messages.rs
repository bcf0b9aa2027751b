use serde::{Deserialize, Serialize};

use crate::config::ScanConfig;
use crate::models::{DayScore, Purpose};
use crate::saju::SajuProfile;

/// A request to scan one date window for favorable days.
/// Everything is plain owned data: the worker boundary carries values only,
/// never references or live handles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRequest {
    pub profile: SajuProfile,
    /// UTC-midnight epoch ms, inclusive.
    pub start_ts: i64,
    /// UTC-midnight epoch ms, inclusive.
    pub end_ts: i64,
    pub purpose: Purpose,
    /// Per-request override of the progress throttle.
    pub progress_interval_ms: Option<u64>,
}

/// Commands crossing into the worker context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanCommand {
    /// Begin a session. Supersedes whatever session is running.
    Start {
        session: u64,
        request: ScanRequest,
        config: ScanConfig,
    },
    /// Cancel the session the worker is currently running (or most recently
    /// received). Distinguished sentinel with no payload.
    Abort,
}

/// Events streamed back from the worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScanEvent {
    Progress {
        done: usize,
        total: usize,
        percent: u8,
    },
    Chunk {
        items: Vec<DayScore>,
    },
    Done {
        total: usize,
    },
}

/// Every event is stamped with its session generation so the interactive side
/// can discard stragglers from a superseded session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanEnvelope {
    pub session: u64,
    pub event: ScanEvent,
}
