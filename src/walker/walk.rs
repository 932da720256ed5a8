//! Single-threaded depth-first directory walk
//!
//! The walker runs on the caller's thread and is the only producer for the
//! work queue. Subdirectories are descended into inline; only regular `.txt`
//! files are handed to the worker pool.
//!
//! An explicit stack of open directory iterators keeps the visiting order of
//! a recursive walk without tying depth to the thread's stack size.
//!
//! ```text
//!   root/
//!   ├── a.txt        ──▶ queue
//!   ├── b.txt        ──▶ queue
//!   ├── notes.md        skipped (suffix)
//!   ├── link.txt        skipped (symlink)
//!   └── sub/         ──▶ descend inline
//!       └── c.txt    ──▶ queue
//! ```

use crate::error::{ConfigError, IndexError, Result};
use crate::walker::entry::{is_text_file_name, EntryType};
use crate::walker::queue::{FileTask, WorkQueueSender};
use crate::walker::stats::IndexStats;
use std::fs::{self, ReadDir};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// Depth-first directory walker feeding a work queue
pub struct DirectoryWalker {
    root: PathBuf,
    queue_tx: WorkQueueSender,
    stats: Arc<IndexStats>,
    shutdown: Arc<AtomicBool>,
}

impl DirectoryWalker {
    pub fn new(
        root: impl Into<PathBuf>,
        queue_tx: WorkQueueSender,
        stats: Arc<IndexStats>,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            root: root.into(),
            queue_tx,
            stats,
            shutdown,
        }
    }

    /// Walk the whole tree, submitting every eligible file
    ///
    /// Returns `Ok(true)` if the walk finished, `Ok(false)` if it stopped
    /// early on shutdown. Only failing to open the root is an error;
    /// unreadable entries and subdirectories are skipped.
    ///
    /// Consumes the walker: its queue sender is dropped on return, which
    /// tells the workers no more work is coming.
    pub fn walk(self) -> Result<bool> {
        let root_dir = fs::read_dir(&self.root).map_err(|source| ConfigError::RootUnreadable {
            path: self.root.clone(),
            source,
        })?;
        self.stats.record_dir();

        let mut stack: Vec<ReadDir> = vec![root_dir];

        loop {
            if self.shutdown.load(Ordering::Relaxed) {
                debug!(depth = stack.len(), "Walk interrupted");
                return Ok(false);
            }

            let Some(entries) = stack.last_mut() else {
                break;
            };
            let entry = match entries.next() {
                Some(Ok(entry)) => entry,
                Some(Err(e)) => {
                    trace!(error = %e, "Unreadable directory entry");
                    self.stats.record_skip();
                    continue;
                }
                None => {
                    stack.pop();
                    continue;
                }
            };

            let path = entry.path();
            if let Some(dir) = self.visit(&path)? {
                stack.push(dir);
            }
        }

        Ok(true)
    }

    /// Classify one entry; returns an opened directory to descend into
    fn visit(&self, path: &Path) -> Result<Option<ReadDir>> {
        // lstat: never follow symlinks
        let metadata = match fs::symlink_metadata(path) {
            Ok(m) => m,
            Err(e) => {
                trace!(path = %path.display(), error = %e, "Cannot stat entry");
                self.stats.record_skip();
                return Ok(None);
            }
        };

        match EntryType::from_file_type(metadata.file_type()) {
            EntryType::Directory => match fs::read_dir(path) {
                Ok(dir) => {
                    self.stats.record_dir();
                    Ok(Some(dir))
                }
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "Cannot open directory");
                    self.stats.record_skip();
                    Ok(None)
                }
            },
            EntryType::File if path.file_name().is_some_and(is_text_file_name) => {
                self.queue_tx
                    .send(FileTask::new(path.to_path_buf(), metadata.len()))
                    .map_err(IndexError::Worker)?;
                self.stats.record_submit();
                Ok(None)
            }
            other => {
                trace!(path = %path.display(), kind = other.as_str(), "Entry skipped");
                self.stats.record_skip();
                Ok(None)
            }
        }
    }
}
