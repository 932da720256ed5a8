//! Index coordinator - orchestrates one walk + scan run
//!
//! The coordinator is responsible for:
//! - Clearing the accumulator and statistics before a run
//! - Spawning the worker pool and the work queue
//! - Walking the tree on the calling thread
//! - Closing the queue and joining workers (the only barrier)
//! - Final statistics
//!
//! ```text
//!   Idle ──run()──▶ Walking ──walk done──▶ Draining ──workers joined──▶ Done
//! ```

use crate::accumulator::{WordAccumulator, WordCount};
use crate::config::IndexConfig;
use crate::error::Result;
use crate::walker::queue::WorkQueue;
use crate::walker::stats::{IndexStats, RunPhase};
use crate::walker::walk::DirectoryWalker;
use crate::walker::worker::{Worker, WorkerContext};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct IndexResult {
    /// Directories opened
    pub dirs_walked: u64,

    /// Files submitted to workers
    pub files_submitted: u64,

    /// Files scanned successfully
    pub files_scanned: u64,

    /// Files that could not be opened or read
    pub files_failed: u64,

    /// Bytes read
    pub bytes_scanned: u64,

    /// Words counted
    pub words_seen: u64,

    /// Words cut at the length ceiling
    pub words_truncated: u64,

    /// Entries the walker ignored
    pub entries_skipped: u64,

    /// Times the walker waited on a full bounded queue
    pub queue_backpressure: u64,

    /// Distinct words in the accumulator
    pub unique_words: usize,

    /// Time taken for the run
    pub duration: Duration,

    /// Whether the run completed (vs was interrupted)
    pub completed: bool,
}

/// Coordinates the walk and the worker pool for one root directory
pub struct IndexCoordinator {
    /// Configuration
    config: Arc<IndexConfig>,

    /// Shared word counts
    accumulator: Arc<WordAccumulator>,

    /// Shared run statistics
    stats: Arc<IndexStats>,

    /// Shutdown signal
    shutdown: Arc<AtomicBool>,
}

impl IndexCoordinator {
    /// Create a coordinator with its own accumulator
    pub fn new(config: IndexConfig) -> Self {
        let accumulator = Arc::new(WordAccumulator::with_shard_count(config.shard_count));
        Self::with_accumulator(config, accumulator)
    }

    /// Create a coordinator that fills a caller-provided accumulator
    pub fn with_accumulator(config: IndexConfig, accumulator: Arc<WordAccumulator>) -> Self {
        Self {
            config: Arc::new(config),
            accumulator,
            stats: Arc::new(IndexStats::new()),
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a clone of the shutdown flag (for signal handlers)
    ///
    /// Setting it interrupts the current run, or the next one if none is in
    /// progress. The flag is cleared when that run returns.
    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Live statistics handle (for progress display)
    pub fn stats(&self) -> Arc<IndexStats> {
        Arc::clone(&self.stats)
    }

    /// The accumulator this coordinator fills
    pub fn accumulator(&self) -> &Arc<WordAccumulator> {
        &self.accumulator
    }

    /// Current run phase
    pub fn phase(&self) -> RunPhase {
        self.stats.phase()
    }

    /// Most frequent words (final once [`RunPhase::Done`])
    pub fn top_words(&self, count: usize) -> Vec<WordCount> {
        self.accumulator.top_words(count)
    }

    /// Run the walk and wait for every scan to finish
    ///
    /// The accumulator is cleared first, so a coordinator can be run again
    /// over the same tree.
    pub fn run(&self) -> Result<IndexResult> {
        let start_time = Instant::now();

        info!(
            root = %self.config.root.display(),
            threads = self.config.thread_count,
            "Starting index walk"
        );

        self.stats.reset();
        self.accumulator.clear();

        let queue = WorkQueue::new(self.config.queue_size);
        let queue_stats = queue.stats();

        let ctx = WorkerContext {
            accumulator: Arc::clone(&self.accumulator),
            stats: Arc::clone(&self.stats),
            shutdown: Arc::clone(&self.shutdown),
            scan: self.config.scan,
        };

        // Spawn workers
        let mut workers = Vec::with_capacity(self.config.thread_count);
        for id in 0..self.config.thread_count {
            match Worker::spawn(id, queue.receiver(), ctx.clone()) {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    // Close the queue so already-spawned workers exit
                    drop(queue);
                    self.join_workers(workers);
                    self.shutdown.store(false, Ordering::SeqCst);
                    self.stats.set_phase(RunPhase::Done);
                    return Err(e.into());
                }
            }
        }
        debug!(count = workers.len(), "Workers spawned");

        // Walk on this thread; the walker owns the only sender
        self.stats.set_phase(RunPhase::Walking);
        let walker = DirectoryWalker::new(
            self.config.root.clone(),
            queue.into_sender(),
            Arc::clone(&self.stats),
            Arc::clone(&self.shutdown),
        );
        let walk_result = walker.walk();

        // Queue is closed; wait for outstanding scans
        self.stats.set_phase(RunPhase::Draining);
        debug!(outstanding = queue_stats.outstanding(), "Walk finished, draining");
        self.join_workers(workers);
        // An interrupt ends this run only; the next run starts clean.
        let interrupted = self.shutdown.swap(false, Ordering::SeqCst);
        self.stats.set_phase(RunPhase::Done);

        let walk_completed = walk_result?;
        let completed = walk_completed && !interrupted;
        let duration = start_time.elapsed();
        let result = self.build_result(duration, completed, queue_stats.backpressure_count());

        if !completed {
            info!("Walk was interrupted before completion");
        }

        info!(
            dirs = result.dirs_walked,
            files = result.files_scanned,
            failed = result.files_failed,
            words = result.words_seen,
            unique = result.unique_words,
            duration_ms = duration.as_millis() as u64,
            "Index completed"
        );

        Ok(result)
    }

    /// Join all worker threads
    fn join_workers(&self, workers: Vec<Worker>) {
        for worker in workers {
            let id = worker.id();
            match worker.join() {
                Ok(files) => debug!(worker = id, files, "Worker joined"),
                Err(e) => warn!(worker = id, error = %e, "Worker failed to join cleanly"),
            }
        }
    }

    fn build_result(&self, duration: Duration, completed: bool, queue_backpressure: u64) -> IndexResult {
        let s = &self.stats;
        IndexResult {
            dirs_walked: s.dirs_walked.load(Ordering::Relaxed),
            files_submitted: s.files_submitted.load(Ordering::Relaxed),
            files_scanned: s.files_scanned.load(Ordering::Relaxed),
            files_failed: s.files_failed.load(Ordering::Relaxed),
            bytes_scanned: s.bytes_scanned.load(Ordering::Relaxed),
            words_seen: s.words_seen.load(Ordering::Relaxed),
            words_truncated: s.words_truncated.load(Ordering::Relaxed),
            entries_skipped: s.entries_skipped.load(Ordering::Relaxed),
            queue_backpressure,
            unique_words: self.accumulator.unique_word_count(),
            duration,
            completed,
        }
    }
}
