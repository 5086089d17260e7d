// src/watch/scanner.rs

use std::path::PathBuf;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::watch::diff::{diff, ChangeSet};
use crate::watch::fingerprint::{Fingerprinter, Snapshot};
use crate::watch::spec::WatchSpec;

/// The scan-diff-emit loop state.
///
/// Owns the baseline snapshot exclusively; each tick builds a brand-new
/// snapshot, diffs it against the baseline, emits the results, and swaps the
/// baseline wholesale. Nothing is persisted across restarts, so the first
/// tick after startup only establishes a baseline and reports nothing.
pub struct Scanner {
    spec: WatchSpec,
    fingerprinter: Fingerprinter,
    baseline: Option<Snapshot>,
    changes_tx: mpsc::UnboundedSender<PathBuf>,
}

impl Scanner {
    pub fn new(spec: WatchSpec, changes_tx: mpsc::UnboundedSender<PathBuf>) -> Self {
        let fingerprinter = Fingerprinter::for_mode(spec.mode());
        Self {
            spec,
            fingerprinter,
            baseline: None,
            changes_tx,
        }
    }

    pub fn spec(&self) -> &WatchSpec {
        &self.spec
    }

    /// Run one complete scan-diff-emit cycle and return its `ChangeSet`.
    ///
    /// Added paths are pushed first, then changed paths, each in enumeration
    /// order. The baseline swap does not wait on the consumer: a slow or gone
    /// receiver never blocks the loop or corrupts the next tick's diff.
    pub fn tick(&mut self) -> ChangeSet {
        let empty = Snapshot::new();
        let prev = self.baseline.as_ref().unwrap_or(&empty);
        let curr = self.fingerprinter.snapshot(&self.spec, prev);

        let changes = match self.baseline {
            Some(ref prev) => diff(prev, &curr),
            None => ChangeSet::default(),
        };

        debug!(
            total = curr.len(),
            changed = changes.changed.len(),
            added = changes.added.len(),
            removed = changes.removed.len(),
            "scan tick"
        );

        if !changes.removed.is_empty() {
            warn!("deleted files require a manual restart to take effect");
        }

        for path in changes.added.iter().chain(changes.changed.iter()) {
            // A closed channel only means no one is listening anymore.
            let _ = self.changes_tx.send(path.clone());
        }

        self.baseline = Some(curr);
        changes
    }
}

/// Handle for a running scan loop.
///
/// Dropping the handle does not stop the loop; call [`ScannerHandle::stop`]
/// for a clean shutdown between ticks.
#[derive(Debug)]
pub struct ScannerHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ScannerHandle {
    /// Request the loop to stop after the current tick.
    pub fn stop(&self) {
        let _ = self.stop_tx.send(true);
    }

    /// Stop the loop and wait for it to finish.
    pub async fn shutdown(self) {
        self.stop();
        let _ = self.task.await;
    }
}

/// Spawn the scan loop on a dedicated Tokio task.
///
/// A single task drives the timer, so ticks never overlap; if a scan takes
/// longer than the interval, the missed ticks are skipped rather than queued.
/// The first tick fires immediately to establish the baseline.
pub fn spawn_scanner(
    spec: WatchSpec,
    changes_tx: mpsc::UnboundedSender<PathBuf>,
) -> ScannerHandle {
    let (stop_tx, mut stop_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut scanner = Scanner::new(spec, changes_tx);

        let mut interval = time::interval(scanner.spec().scan_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            interval_ms = scanner.spec().scan_interval_ms(),
            mode = ?scanner.spec().mode(),
            "scan loop started"
        );

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    scanner.tick();
                }
                res = stop_rx.changed() => {
                    if res.is_err() || *stop_rx.borrow() {
                        break;
                    }
                }
            }
        }

        debug!("scan loop stopped");
    });

    ScannerHandle { stop_tx, task }
}
