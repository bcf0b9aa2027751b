use itertools::Itertools;
use strum_macros::Display;

use crate::models::DayScore;

use super::messages::ScanEvent;

/// Where a scan stands from the interactive side's point of view.
/// Cancelled is a normal terminal state, not a failure: running=false with no
/// completion means the user stopped it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ScanStatus {
    Idle,
    Running,
    Completed,
    Cancelled,
}

/// Accumulates the event stream of exactly one scan session into a bounded,
/// score-sorted working set plus progress counters.
///
/// The working set is "best N seen so far", not a globally correct ranking
/// until Done lands. That is the accepted tradeoff for streaming responsiveness.
#[derive(Debug)]
pub struct ScanAggregator {
    items: Vec<DayScore>,
    retention_cap: usize,
    pub done: usize,
    pub total: usize,
    pub percent: u8,
    pub status: ScanStatus,
}

impl ScanAggregator {
    pub fn new(retention_cap: usize) -> Self {
        Self {
            items: Vec::new(),
            retention_cap,
            done: 0,
            total: 0,
            percent: 0,
            status: ScanStatus::Idle,
        }
    }

    /// Clears the working set and counters. Called before every new start.
    pub fn reset(&mut self) {
        self.items.clear();
        self.done = 0;
        self.total = 0;
        self.percent = 0;
        self.status = ScanStatus::Idle;
    }

    pub(crate) fn begin(&mut self) {
        self.reset();
        self.status = ScanStatus::Running;
    }

    pub(crate) fn apply(&mut self, event: ScanEvent) {
        match event {
            ScanEvent::Progress {
                done,
                total,
                percent,
            } => {
                self.done = done;
                self.total = total;
                self.percent = percent;
            }
            ScanEvent::Chunk { items } => self.merge(items),
            ScanEvent::Done { total } => {
                self.done = total;
                self.percent = 100;
                self.status = ScanStatus::Completed;
            }
        }
    }

    /// Cancellation is only meaningful for a live session; a completed one
    /// keeps its terminal state.
    pub(crate) fn mark_cancelled(&mut self) {
        if self.status == ScanStatus::Running {
            self.status = ScanStatus::Cancelled;
        }
    }

    /// Sort-and-truncate merge: descending score (date breaks ties), one
    /// entry per calendar day, at most `retention_cap` entries retained.
    fn merge(&mut self, batch: Vec<DayScore>) {
        self.items.extend(batch);
        self.items
            .sort_by(|a, b| b.score.cmp(&a.score).then(a.timestamp.cmp(&b.timestamp)));
        self.items = std::mem::take(&mut self.items)
            .into_iter()
            .unique_by(|d| d.timestamp)
            .take(self.retention_cap)
            .collect();
    }

    pub fn running(&self) -> bool {
        self.status == ScanStatus::Running
    }

    /// Current working set, best first.
    pub fn items(&self) -> &[DayScore] {
        &self.items
    }

    pub fn top(&self, n: usize) -> &[DayScore] {
        &self.items[..n.min(self.items.len())]
    }
}
