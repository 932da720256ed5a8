//! Directory walk and file-scanning worker pool
//!
//! # Architecture
//!
//! ```text
//!                     ┌─────────────────────────┐
//!                     │    DirectoryWalker      │
//!                     │  - caller's thread      │
//!                     │  - depth-first, inline  │
//!                     └───────────┬─────────────┘
//!                                 │ FileTask (.txt only)
//!                                 ▼
//!                     ┌─────────────────────────┐
//!                     │       WorkQueue         │
//!                     │  (crossbeam channel)    │
//!                     └───────────┬─────────────┘
//!       ┌─────────────────────────┼─────────────────────────┐
//!       │                         │                         │
//! ┌─────▼─────┐             ┌─────▼─────┐             ┌─────▼─────┐
//! │  Worker 1 │             │  Worker 2 │             │  Worker N │
//! │  scan     │             │  scan     │             │  scan     │
//! └─────┬─────┘             └─────┬─────┘             └─────┬─────┘
//!       └─────────────────────────┼─────────────────────────┘
//!                                 ▼
//!                     ┌─────────────────────────┐
//!                     │    WordAccumulator      │
//!                     │  (sharded, locked)      │
//!                     └─────────────────────────┘
//! ```

pub mod coordinator;
pub mod entry;
pub mod queue;
pub mod stats;
pub mod walk;
pub mod worker;

pub use coordinator::{IndexCoordinator, IndexResult};
pub use entry::EntryType;
pub use queue::{FileTask, WorkQueue};
pub use stats::{IndexProgress, IndexStats, RunPhase};
pub use walk::DirectoryWalker;
pub use worker::{FileOutcome, Worker};
