use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crate::analysis::score_day;
use crate::config::ScanConfig;
use crate::utils::{TimeUtils, day_span};

use super::messages::{ScanCommand, ScanEnvelope, ScanEvent, ScanRequest};

/// One queued job: (session generation, request, frozen config).
type Job = (u64, ScanRequest, ScanConfig);

/// Spawns the scan worker thread. The thread owns the receiving half of the
/// command channel and retires when that channel disconnects, so dropping the
/// sender is the teardown mechanism.
pub(crate) fn spawn_worker_thread(
    rx: Receiver<ScanCommand>,
    tx: Sender<ScanEnvelope>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("scan-worker".into())
        .spawn(move || worker_loop(rx, tx))
}

fn worker_loop(rx: Receiver<ScanCommand>, tx: Sender<ScanEnvelope>) {
    let mut next: Option<Job> = None;
    loop {
        let job = match next.take() {
            Some(job) => job,
            None => match rx.recv() {
                Ok(ScanCommand::Start {
                    session,
                    request,
                    config,
                }) => (session, request, config),
                // Abort with nothing running refers to an already-finished
                // session; ignore it.
                Ok(ScanCommand::Abort) => continue,
                // Engine dropped the channel: retire.
                Err(_) => return,
            },
        };
        next = run_session(job, &rx, &tx);
    }
}

/// Outcome of draining the command channel at a batch boundary.
enum Control {
    Continue,
    Cancelled,
    Superseded(Job),
}

/// Runs one scan session to completion, cancellation, or supersession.
/// Returns the replacement job when a new start arrived mid-flight.
fn run_session(job: Job, rx: &Receiver<ScanCommand>, tx: &Sender<ScanEnvelope>) -> Option<Job> {
    let (session, request, config) = job;

    // Inclusive day count, capped by the span ceiling. The window was
    // validated on the interactive side; a hostile request just collapses
    // to an empty session here.
    let total = day_span(request.start_ts, request.end_ts)
        .min(config.span_ceiling_days)
        .max(0) as usize;

    let interval = Duration::from_millis(
        request
            .progress_interval_ms
            .unwrap_or(config.progress_interval_ms),
    );

    #[cfg(debug_assertions)]
    log::info!(
        "WORKER: session {} scanning {} day(s) for {}",
        session,
        total,
        request.purpose
    );

    let mut cursor = request.start_ts;
    let mut processed = 0usize;
    let mut last_progress: Option<Instant> = None;

    while processed < total {
        // Score one batch. Faulting days degrade inside score_day; nothing
        // here can abort the loop.
        let batch_len = config.batch_size.min(total - processed);
        let mut items = Vec::with_capacity(batch_len);
        for _ in 0..batch_len {
            items.push(score_day(
                &request.profile,
                cursor,
                request.purpose,
                &config.scoring,
            ));
            processed += 1;
            cursor += TimeUtils::MS_IN_D;
        }

        if send(tx, session, ScanEvent::Chunk { items }).is_err() {
            return None;
        }

        // Throttled progress; the final batch always reports so a completed
        // scan ends at 100%.
        let due = last_progress.is_none_or(|at| at.elapsed() >= interval);
        if due || processed == total {
            let percent = ((processed as f64 / total as f64) * 100.0).round() as u8;
            if send(
                tx,
                session,
                ScanEvent::Progress {
                    done: processed,
                    total,
                    percent,
                },
            )
            .is_err()
            {
                return None;
            }
            last_progress = Some(Instant::now());
        }

        // Batch boundary: observe cancellation or a replacement session
        // before any new batch begins.
        match drain_commands(rx) {
            Control::Continue => {}
            Control::Cancelled => {
                #[cfg(debug_assertions)]
                log::info!(
                    "WORKER: session {} cancelled after {} day(s)",
                    session,
                    processed
                );
                return None; // no done event for a cancelled session
            }
            Control::Superseded(next) => {
                #[cfg(debug_assertions)]
                log::info!("WORKER: session {} superseded by {}", session, next.0);
                return Some(next);
            }
        }
    }

    let _ = send(tx, session, ScanEvent::Done { total: processed });
    None
}

/// Drains every command queued at this boundary, folding them in arrival
/// order: an abort kills whatever session precedes it, a start replaces it.
/// A disconnected sender is not a cancellation: the session keeps going and
/// teardown surfaces as a failed event send or the next blocking recv.
fn drain_commands(rx: &Receiver<ScanCommand>) -> Control {
    let mut control = Control::Continue;
    loop {
        match rx.try_recv() {
            Ok(ScanCommand::Abort) => control = Control::Cancelled,
            Ok(ScanCommand::Start {
                session,
                request,
                config,
            }) => control = Control::Superseded((session, request, config)),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return control,
        }
    }
}

fn send(
    tx: &Sender<ScanEnvelope>,
    session: u64,
    event: ScanEvent,
) -> Result<(), std::sync::mpsc::SendError<ScanEnvelope>> {
    tx.send(ScanEnvelope { session, event })
}
