//! ssfi - Simple Sharded File Indexer
//!
//! Walks a directory tree, tokenizes every regular `.txt` file into
//! lowercase ASCII words, and counts word frequencies in a concurrent,
//! sharded accumulator. The result is the number of unique words and a
//! ranked top-N list.
//!
//! # Features
//!
//! - **Sharded Accumulator**: tens of thousands of independently locked
//!   shards keep contention between workers rare.
//!
//! - **Inline Walk, Parallel Scan**: the directory walk stays on one thread
//!   and never waits on file I/O; a fixed pool of workers scans files.
//!
//! - **Contained Failures**: unreadable entries are skipped and unreadable
//!   files are logged; neither stops the run.
//!
//! # Architecture
//!
//! ```text
//!   PATH ──▶ DirectoryWalker ──FileTask──▶ WorkQueue ──▶ Worker × N
//!                                                          │
//!                                               scan_file + Tokenizer
//!                                                          │
//!                                                          ▼
//!                                                  WordAccumulator
//!                                                          │
//!                                                          ▼
//!                                              top_words() / report
//! ```
//!
//! # Example
//!
//! ```no_run
//! use ssfi::{IndexConfig, IndexCoordinator};
//!
//! let coordinator = IndexCoordinator::new(IndexConfig::new("/srv/corpus"));
//! let result = coordinator.run()?;
//! println!("{} words found", result.unique_words);
//! for wc in coordinator.top_words(10) {
//!     println!("{}\t{}", wc.word, wc.count);
//! }
//! # Ok::<(), ssfi::IndexError>(())
//! ```

pub mod accumulator;
pub mod config;
pub mod content;
pub mod error;
pub mod progress;
pub mod report;
pub mod walker;

pub use accumulator::{WordAccumulator, WordCount, WordSink, DEFAULT_SHARD_COUNT};
pub use config::{CliArgs, IndexConfig};
pub use error::{IndexError, Result};
pub use walker::{IndexCoordinator, IndexResult, RunPhase};
