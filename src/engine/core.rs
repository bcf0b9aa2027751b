use std::time::Duration;

use anyhow::Result;

use crate::config::ScanConfig;
use crate::models::ScanWindow;
use crate::saju::SajuProfile;

use super::aggregator::{ScanAggregator, ScanStatus};
use super::channel::ScanChannel;
use super::messages::{ScanCommand, ScanEnvelope, ScanRequest};

/// Interactive-side handle for the background day scanner.
///
/// Owns the transport channel and the single active-session slot. Sessions
/// are identified by a monotonically increasing generation: starting a new
/// scan bumps the generation and anything still in flight from an older one
/// is dropped on arrival, so two sessions can never interleave in the
/// aggregator.
pub struct ScanEngine {
    channel: ScanChannel,
    config: ScanConfig,
    session_counter: u64,
    active_session: Option<u64>,
    pub aggregator: ScanAggregator,
}

impl ScanEngine {
    /// Initialize the engine and spawn the worker.
    pub fn new(config: ScanConfig) -> Result<Self> {
        let channel = ScanChannel::new()?;
        let aggregator = ScanAggregator::new(config.retention_cap);
        Ok(Self {
            channel,
            config,
            session_counter: 0,
            active_session: None,
            aggregator,
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(ScanConfig::default())
    }

    /// Start a scan. An already-running session is superseded: its future
    /// emissions are discarded and no partial results are flushed. Invalid
    /// windows are rejected here, before any session exists.
    pub fn start(&mut self, profile: SajuProfile, window: ScanWindow) -> Result<()> {
        self.start_with_interval(profile, window, None)
    }

    /// Like [`start`](Self::start), with a per-scan override of the progress
    /// throttle.
    pub fn start_with_interval(
        &mut self,
        profile: SajuProfile,
        window: ScanWindow,
        progress_interval_ms: Option<u64>,
    ) -> Result<()> {
        window.validate()?;
        self.channel.ensure()?;

        self.session_counter += 1;
        let session = self.session_counter;
        self.active_session = Some(session);
        self.aggregator.begin();

        #[cfg(debug_assertions)]
        log::info!(
            "ENGINE: session {} -> {} .. {} ({})",
            session,
            crate::utils::epoch_ms_to_date_string(window.start_ts),
            crate::utils::epoch_ms_to_date_string(window.end_ts),
            window.purpose
        );

        let request = ScanRequest {
            profile,
            start_ts: window.start_ts,
            end_ts: window.end_ts,
            purpose: window.purpose,
            progress_interval_ms,
        };
        self.channel.send(ScanCommand::Start {
            session,
            request,
            config: self.config.clone(),
        })
    }

    /// Cooperative cancel: flips the flag the worker checks at its next batch
    /// boundary. At most one extra batch can land after this call.
    pub fn cancel(&mut self) {
        if self.active_session.take().is_some() {
            let _ = self.channel.send(ScanCommand::Abort);
            self.aggregator.mark_cancelled();
        }
    }

    /// Drain every pending event without blocking.
    pub fn poll(&mut self) {
        while let Some(envelope) = self.channel.try_next() {
            self.dispatch(envelope);
        }
    }

    /// Wait up to `timeout` for one event, then drain the rest.
    pub fn pump(&mut self, timeout: Duration) -> bool {
        match self.channel.next_timeout(timeout) {
            Some(envelope) => {
                self.dispatch(envelope);
                self.poll();
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.aggregator.running()
    }

    pub fn status(&self) -> ScanStatus {
        self.aggregator.status
    }

    /// Drive the active scan to a terminal state, invoking `on_progress`
    /// after each event wave. Bails out (as Cancelled) if the worker dies
    /// with the scan unfinished.
    pub fn run_to_completion(
        &mut self,
        mut on_progress: impl FnMut(&ScanAggregator),
    ) -> ScanStatus {
        while self.is_running() {
            let received = self.pump(Duration::from_millis(50));
            if received {
                on_progress(&self.aggregator);
            } else if !self.channel.worker_alive() {
                log::error!("scan worker died mid-session");
                self.cancel();
                break;
            }
        }
        self.status()
    }

    /// Events from superseded sessions are dropped here; this is the stale-session
    /// guard behind the "no interleaving" guarantee.
    fn dispatch(&mut self, envelope: ScanEnvelope) {
        if Some(envelope.session) != self.active_session {
            #[cfg(debug_assertions)]
            log::debug!(
                "ENGINE: dropping envelope from superseded session {}",
                envelope.session
            );
            return;
        }
        self.aggregator.apply(envelope.event);
    }
}
