//! Error types for ssfi
//!
//! This module defines the error hierarchy for the indexer:
//! - Configuration and CLI errors (fatal, reported before the walk starts)
//! - Per-file scan errors (contained inside a worker, never fatal)
//! - Worker thread errors
//!
//! Library code uses thiserror; the binary wraps everything in anyhow.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the indexer
#[derive(Error, Debug)]
pub enum IndexError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Worker/concurrency errors
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid thread count
    #[error("Invalid thread count {count}: must be between 1 and {max}")]
    InvalidThreadCount { count: usize, max: usize },

    /// Invalid shard count
    #[error("Invalid shard count {count}: must be at least 1")]
    InvalidShardCount { count: usize },

    /// Invalid queue size
    #[error("Invalid queue size {size}: must be at least {min}")]
    InvalidQueueSize { size: usize, min: usize },

    /// Root path does not exist
    #[error("The specified path does not exist: {}", path.display())]
    RootNotFound { path: PathBuf },

    /// Root path exists but is not a directory
    #[error("The specified path is not a directory: {}", path.display())]
    RootNotDirectory { path: PathBuf },

    /// Root directory could not be opened
    #[error("Cannot open '{}': {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure while scanning a single file
///
/// These never leave the worker that produced them; they are logged and
/// counted.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The file could not be opened
    #[error("Failed to open '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A read failed partway through the file
    #[error("Failed reading file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Path of the file that failed
    pub fn path(&self) -> &PathBuf {
        match self {
            ScanError::Open { path, .. } | ScanError::Read { path, .. } => path,
        }
    }

    /// Underlying OS error
    pub fn io_error(&self) -> &io::Error {
        match self {
            ScanError::Open { source, .. } | ScanError::Read { source, .. } => source,
        }
    }

    /// True if the file vanished between enumeration and open
    pub fn is_not_found(&self) -> bool {
        self.io_error().kind() == io::ErrorKind::NotFound
    }
}

/// Worker thread errors
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Worker panicked
    #[error("Worker {id} panicked: {message}")]
    Panicked { id: usize, message: String },

    /// Worker thread could not be spawned
    #[error("Failed to initialize worker {id}: {reason}")]
    InitFailed { id: usize, reason: String },

    /// Every receiver is gone, so submitted work can no longer be processed
    #[error("Failed to submit file task: queue closed")]
    QueueClosed,
}

/// Result type alias for IndexError
pub type Result<T> = std::result::Result<T, IndexError>;

/// Result type alias for ScanError
pub type ScanResult<T> = std::result::Result<T, ScanError>;
