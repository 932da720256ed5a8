//! Worker thread logic for parallel file scanning
//!
//! Each worker:
//! - Pulls file tasks from the shared work queue
//! - Streams the file through the tokenizer into the shared accumulator
//! - Logs and counts failures, then moves on to the next file
//! - Exits once the queue is closed and drained

use crate::accumulator::WordAccumulator;
use crate::content::{scan_file, ScanOptions, ScanSummary};
use crate::error::{ScanError, WorkerError};
use crate::walker::queue::{FileTask, WorkQueueReceiver};
use crate::walker::stats::IndexStats;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, trace, warn};

/// Outcome of processing one file task
#[derive(Debug)]
pub enum FileOutcome {
    /// File scanned to the end
    Scanned { path: PathBuf, summary: ScanSummary },

    /// Open or read failed; words read before a read failure are kept
    Failed { path: PathBuf, error: ScanError },

    /// Dropped without scanning because shutdown was requested
    Discarded { path: PathBuf },
}

/// Everything a worker needs, shared across the pool
#[derive(Clone)]
pub struct WorkerContext {
    pub accumulator: Arc<WordAccumulator>,
    pub stats: Arc<IndexStats>,
    pub shutdown: Arc<AtomicBool>,
    pub scan: ScanOptions,
}

/// A worker thread that scans files
pub struct Worker {
    /// Worker ID
    id: usize,

    /// Thread handle
    handle: Option<JoinHandle<()>>,

    /// Files this worker has finished
    processed: Arc<AtomicU64>,
}

impl Worker {
    /// Spawn a new worker thread
    pub fn spawn(
        id: usize,
        queue_rx: WorkQueueReceiver,
        ctx: WorkerContext,
    ) -> Result<Self, WorkerError> {
        let processed = Arc::new(AtomicU64::new(0));
        let processed_clone = Arc::clone(&processed);

        let handle = thread::Builder::new()
            .name(format!("ssfi-worker-{}", id))
            .spawn(move || worker_loop(id, queue_rx, ctx, processed_clone))
            .map_err(|e| WorkerError::InitFailed {
                id,
                reason: e.to_string(),
            })?;

        Ok(Self {
            id,
            handle: Some(handle),
            processed,
        })
    }

    /// Get worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Wait for the worker to finish
    ///
    /// Returns the number of tasks the worker finished.
    pub fn join(mut self) -> Result<u64, WorkerError> {
        if let Some(handle) = self.handle.take() {
            handle.join().map_err(|_| WorkerError::Panicked {
                id: self.id,
                message: "Worker thread panicked".into(),
            })?;
        }
        Ok(self.processed.load(Ordering::Relaxed))
    }
}

/// Main worker loop
fn worker_loop(id: usize, queue_rx: WorkQueueReceiver, ctx: WorkerContext, processed: Arc<AtomicU64>) {
    debug!(worker = id, "Worker starting");

    // recv() returns None once the walker has dropped the sender and the
    // queue is drained.
    while let Some(task) = queue_rx.recv() {
        let outcome = process_file(task, &ctx);
        queue_rx.task_done();
        processed.fetch_add(1, Ordering::Relaxed);

        match &outcome {
            FileOutcome::Scanned { path, summary } => {
                trace!(
                    worker = id,
                    path = %path.display(),
                    bytes = summary.bytes,
                    words = summary.words,
                    "File scanned"
                );
                if summary.truncated > 0 {
                    warn!(
                        path = %path.display(),
                        truncated = summary.truncated,
                        "Overlong words truncated"
                    );
                }
            }
            FileOutcome::Failed { error, .. } => {
                warn!(worker = id, error = %error, "File skipped");
            }
            FileOutcome::Discarded { path } => {
                trace!(worker = id, path = %path.display(), "File discarded after shutdown");
            }
        }
    }

    debug!(
        worker = id,
        files = processed.load(Ordering::Relaxed),
        "Worker shutting down"
    );
}

/// Process a single file task
pub fn process_file(task: FileTask, ctx: &WorkerContext) -> FileOutcome {
    if ctx.shutdown.load(Ordering::Relaxed) {
        ctx.stats.record_discard();
        return FileOutcome::Discarded { path: task.path };
    }

    match scan_file(&task.path, ctx.accumulator.as_ref(), ctx.scan) {
        Ok(summary) => {
            ctx.stats
                .record_scan(summary.bytes, summary.words, summary.truncated);
            FileOutcome::Scanned {
                path: task.path,
                summary,
            }
        }
        Err(error) => {
            ctx.stats.record_failure();
            FileOutcome::Failed {
                path: task.path,
                error,
            }
        }
    }
}
