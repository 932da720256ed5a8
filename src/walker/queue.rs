//! Work queue for file scan tasks
//!
//! The directory walk is the only producer; worker threads are the
//! consumers. The queue is unbounded by default so that slow file I/O never
//! stalls the walk. An optional capacity turns on backpressure: the walker
//! blocks on `send` while the queue is full.
//!
//! Dropping the single [`WorkQueueSender`] closes the queue. Receivers keep
//! draining buffered tasks and then see `None`.

use crate::error::WorkerError;
use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TrySendError};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A task to scan one file
#[derive(Debug, Clone)]
pub struct FileTask {
    /// Full path to the file
    pub path: PathBuf,

    /// File size at enumeration time
    pub size: u64,
}

impl FileTask {
    /// Create a new file task
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// Statistics for the work queue
#[derive(Debug, Default)]
pub struct QueueStats {
    /// Total tasks enqueued
    pub enqueued: AtomicU64,

    /// Total tasks finished (scanned, failed or discarded)
    pub finished: AtomicU64,

    /// Number of sends that found a bounded queue full
    pub backpressure_events: AtomicU64,
}

impl QueueStats {
    /// Tasks submitted but not yet finished
    pub fn outstanding(&self) -> u64 {
        let enqueued = self.enqueued.load(Ordering::SeqCst);
        let finished = self.finished.load(Ordering::SeqCst);
        enqueued.saturating_sub(finished)
    }

    /// Get backpressure event count
    pub fn backpressure_count(&self) -> u64 {
        self.backpressure_events.load(Ordering::Relaxed)
    }
}

/// Work queue of file tasks
pub struct WorkQueue {
    sender: Sender<FileTask>,
    receiver: Receiver<FileTask>,
    stats: Arc<QueueStats>,
}

impl WorkQueue {
    /// Create a new work queue, bounded if `capacity` is set
    pub fn new(capacity: Option<usize>) -> Self {
        let (sender, receiver) = match capacity {
            Some(cap) => bounded(cap),
            None => unbounded(),
        };

        Self {
            sender,
            receiver,
            stats: Arc::new(QueueStats::default()),
        }
    }

    /// Get a receiver for this queue (one per worker)
    pub fn receiver(&self) -> WorkQueueReceiver {
        WorkQueueReceiver {
            receiver: self.receiver.clone(),
            stats: Arc::clone(&self.stats),
        }
    }

    /// Consume the queue, returning its only producer handle
    ///
    /// Take every receiver you need first: once the returned sender is
    /// dropped the queue is closed.
    pub fn into_sender(self) -> WorkQueueSender {
        WorkQueueSender {
            sender: self.sender,
            stats: self.stats,
        }
    }

    /// Get queue statistics
    pub fn stats(&self) -> Arc<QueueStats> {
        Arc::clone(&self.stats)
    }
}

/// Producer handle; dropping it signals that no more work will arrive
pub struct WorkQueueSender {
    sender: Sender<FileTask>,
    stats: Arc<QueueStats>,
}

impl WorkQueueSender {
    /// Submit a task
    ///
    /// Never blocks on an unbounded queue. On a full bounded queue the
    /// backpressure event is recorded and the call blocks until a worker
    /// frees a slot.
    pub fn send(&self, task: FileTask) -> Result<(), WorkerError> {
        match self.sender.try_send(task) {
            Ok(()) => {}
            Err(TrySendError::Full(task)) => {
                self.stats.backpressure_events.fetch_add(1, Ordering::Relaxed);
                self.sender.send(task).map_err(|_| WorkerError::QueueClosed)?;
            }
            Err(TrySendError::Disconnected(_)) => return Err(WorkerError::QueueClosed),
        }

        self.stats.enqueued.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Handle for receiving tasks from the queue
#[derive(Clone)]
pub struct WorkQueueReceiver {
    receiver: Receiver<FileTask>,
    stats: Arc<QueueStats>,
}

impl WorkQueueReceiver {
    /// Receive a task from the queue
    ///
    /// Blocks until a task is available. Returns `None` once the queue is
    /// closed and fully drained.
    pub fn recv(&self) -> Option<FileTask> {
        self.receiver.recv().ok()
    }

    /// Mark one received task as finished
    pub fn task_done(&self) {
        self.stats.finished.fetch_add(1, Ordering::SeqCst);
    }
}
