//! Shared run statistics and phase tracking
//!
//! One [`IndexStats`] is shared by the walker, every worker and any progress
//! display. Counters are relaxed atomics; they are exact once the run is
//! [`RunPhase::Done`].

use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::time::Duration;

/// Lifecycle of a single indexing run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RunPhase {
    /// Not started
    Idle = 0,
    /// Directory walk in progress, workers scanning
    Walking = 1,
    /// Walk finished, waiting for outstanding scans
    Draining = 2,
    /// All workers joined; results are final
    Done = 3,
}

impl RunPhase {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => RunPhase::Walking,
            2 => RunPhase::Draining,
            3 => RunPhase::Done,
            _ => RunPhase::Idle,
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Idle => "idle",
            RunPhase::Walking => "walking",
            RunPhase::Draining => "draining",
            RunPhase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Counters collected during a run
#[derive(Debug)]
pub struct IndexStats {
    phase: AtomicU8,

    /// Directories opened by the walker (root included)
    pub dirs_walked: AtomicU64,

    /// Files handed to the worker pool
    pub files_submitted: AtomicU64,

    /// Entries ignored by the walker (symlinks, other extensions, unreadable)
    pub entries_skipped: AtomicU64,

    /// Files scanned successfully
    pub files_scanned: AtomicU64,

    /// Files that failed to open or read
    pub files_failed: AtomicU64,

    /// Tasks dropped unscanned after an interrupt
    pub files_discarded: AtomicU64,

    /// Bytes read by workers
    pub bytes_scanned: AtomicU64,

    /// Words reported to the accumulator
    pub words_seen: AtomicU64,

    /// Words cut at the length ceiling
    pub words_truncated: AtomicU64,
}

impl IndexStats {
    pub fn new() -> Self {
        Self {
            phase: AtomicU8::new(RunPhase::Idle as u8),
            dirs_walked: AtomicU64::new(0),
            files_submitted: AtomicU64::new(0),
            entries_skipped: AtomicU64::new(0),
            files_scanned: AtomicU64::new(0),
            files_failed: AtomicU64::new(0),
            files_discarded: AtomicU64::new(0),
            bytes_scanned: AtomicU64::new(0),
            words_seen: AtomicU64::new(0),
            words_truncated: AtomicU64::new(0),
        }
    }

    /// Current phase
    pub fn phase(&self) -> RunPhase {
        RunPhase::from_u8(self.phase.load(Ordering::SeqCst))
    }

    pub(crate) fn set_phase(&self, phase: RunPhase) {
        self.phase.store(phase as u8, Ordering::SeqCst);
    }

    /// Zero every counter and return to [`RunPhase::Idle`]
    pub fn reset(&self) {
        for counter in [
            &self.dirs_walked,
            &self.files_submitted,
            &self.entries_skipped,
            &self.files_scanned,
            &self.files_failed,
            &self.files_discarded,
            &self.bytes_scanned,
            &self.words_seen,
            &self.words_truncated,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
        self.set_phase(RunPhase::Idle);
    }

    pub(crate) fn record_dir(&self) {
        self.dirs_walked.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_submit(&self) {
        self.files_submitted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_skip(&self) {
        self.entries_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_scan(&self, bytes: u64, words: u64, truncated: u64) {
        self.files_scanned.fetch_add(1, Ordering::Relaxed);
        self.bytes_scanned.fetch_add(bytes, Ordering::Relaxed);
        self.words_seen.fetch_add(words, Ordering::Relaxed);
        self.words_truncated.fetch_add(truncated, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.files_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_discard(&self) {
        self.files_discarded.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy for progress display
    pub fn progress(&self, elapsed: Duration) -> IndexProgress {
        IndexProgress {
            phase: self.phase(),
            dirs: self.dirs_walked.load(Ordering::Relaxed),
            submitted: self.files_submitted.load(Ordering::Relaxed),
            scanned: self.files_scanned.load(Ordering::Relaxed),
            failed: self.files_failed.load(Ordering::Relaxed),
            bytes: self.bytes_scanned.load(Ordering::Relaxed),
            words: self.words_seen.load(Ordering::Relaxed),
            elapsed,
        }
    }
}

impl Default for IndexStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Progress information for display
#[derive(Debug, Clone)]
pub struct IndexProgress {
    pub phase: RunPhase,
    pub dirs: u64,
    pub submitted: u64,
    pub scanned: u64,
    pub failed: u64,
    pub bytes: u64,
    pub words: u64,
    pub elapsed: Duration,
}

impl IndexProgress {
    /// Files submitted but not yet scanned or failed
    pub fn pending(&self) -> u64 {
        self.submitted.saturating_sub(self.scanned + self.failed)
    }

    /// Calculate files per second rate
    pub fn files_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            (self.scanned + self.failed) as f64 / secs
        } else {
            0.0
        }
    }

    /// Calculate words per second rate
    pub fn words_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.words as f64 / secs
        } else {
            0.0
        }
    }
}
