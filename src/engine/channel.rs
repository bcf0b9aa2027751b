//! The message boundary between the interactive side and the scan worker.
//!
//! This is the only place the isolation line is crossed: commands flow in,
//! event envelopes flow out, both over ordered mpsc channels, and exactly one
//! worker thread is alive per channel.

use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};

use super::messages::{ScanCommand, ScanEnvelope};
use super::worker;

pub(crate) struct ScanChannel {
    cmd_tx: Sender<ScanCommand>,
    event_rx: Receiver<ScanEnvelope>,
    worker: JoinHandle<()>,
}

impl ScanChannel {
    /// Builds the channel pair and spawns the worker. Spawn failure is
    /// terminal for the caller; there is no retry here.
    pub fn new() -> Result<Self> {
        let (cmd_tx, cmd_rx) = channel();
        let (event_tx, event_rx) = channel();
        let worker = worker::spawn_worker_thread(cmd_rx, event_tx)
            .context("failed to spawn the scan worker thread")?;
        Ok(Self {
            cmd_tx,
            event_rx,
            worker,
        })
    }

    /// Idempotent liveness guard: safe to call any number of times, always
    /// converging to exactly one live worker. Replacing the channel halves
    /// drops the old command sender, which retires the old worker loop, so
    /// a respawn can never leave two workers emitting at once.
    pub fn ensure(&mut self) -> Result<()> {
        if !self.worker.is_finished() {
            return Ok(());
        }
        log::warn!("scan worker is gone, respawning");
        *self = Self::new()?;
        Ok(())
    }

    pub fn worker_alive(&self) -> bool {
        !self.worker.is_finished()
    }

    pub fn send(&self, command: ScanCommand) -> Result<()> {
        self.cmd_tx
            .send(command)
            .map_err(|_| anyhow!("scan worker command channel is closed"))
    }

    /// Non-blocking event fetch.
    pub fn try_next(&self) -> Option<ScanEnvelope> {
        self.event_rx.try_recv().ok()
    }

    /// Blocking event fetch with a deadline.
    pub fn next_timeout(&self, timeout: Duration) -> Option<ScanEnvelope> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}
