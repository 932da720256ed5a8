//! Configuration types for ssfi
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use crate::accumulator::DEFAULT_SHARD_COUNT;
use crate::content::{ScanOptions, TrailingWord};
use crate::error::ConfigError;
use clap::Parser;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Maximum reasonable thread count
const MAX_THREADS: usize = 512;

/// Minimum bounded queue size
const MIN_QUEUE_SIZE: usize = 1;

/// Default number of file processor threads
pub const DEFAULT_THREADS: usize = 3;

/// Default number of ranked words to print
pub const DEFAULT_TOP: usize = 10;

/// Index all text files in PATH
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ssfi",
    version,
    about = "Index all text files in PATH",
    long_about = "Recursively finds every regular file ending in .txt under PATH, counts \
                  the words in them using a pool of worker threads, and prints the number \
                  of unique words followed by the most frequent ones.\n\n\
                  A word is a run of ASCII letters and digits, compared case-insensitively. \
                  Symbolic links are never followed.",
    after_help = "EXAMPLES:\n    \
        ssfi ~/books\n    \
        ssfi /srv/corpus -t 8 -n 25\n    \
        ssfi ./logs --progress --verbose"
)]
pub struct CliArgs {
    /// Directory to index
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Number of file processor threads
    #[arg(short = 't', long, default_value_t = DEFAULT_THREADS, value_name = "NUM")]
    pub threads: usize,

    /// Number of most frequent words to print
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP, value_name = "NUM")]
    pub top: usize,

    /// Number of accumulator shards
    #[arg(long, default_value_t = DEFAULT_SHARD_COUNT, value_name = "NUM")]
    pub shards: usize,

    /// Bound the queue of pending files (unbounded if not set)
    #[arg(long, value_name = "NUM")]
    pub queue_size: Option<usize>,

    /// Drop a final word that is not followed by a separator
    #[arg(long)]
    pub drop_trailing_word: bool,

    /// Show a live progress spinner and a summary on stderr
    #[arg(short = 'p', long)]
    pub progress: bool,

    /// Verbose output (debug logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Directory to walk
    pub root: PathBuf,

    /// Number of worker threads
    pub thread_count: usize,

    /// Number of ranked words to report
    pub top_count: usize,

    /// Accumulator shard count
    pub shard_count: usize,

    /// Work queue capacity (None = unbounded)
    pub queue_size: Option<usize>,

    /// Per-file scan options
    pub scan: ScanOptions,

    /// Show progress indicator
    pub show_progress: bool,

    /// Verbose logging
    pub verbose: bool,
}

impl IndexConfig {
    /// Default configuration for `root`, without validation
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            thread_count: DEFAULT_THREADS,
            top_count: DEFAULT_TOP,
            shard_count: DEFAULT_SHARD_COUNT,
            queue_size: None,
            scan: ScanOptions::default(),
            show_progress: false,
            verbose: false,
        }
    }

    /// Create and validate configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        let config = Self {
            root: args.path,
            thread_count: args.threads,
            top_count: args.top,
            shard_count: args.shards,
            queue_size: args.queue_size,
            scan: ScanOptions {
                trailing_word: if args.drop_trailing_word {
                    TrailingWord::Drop
                } else {
                    TrailingWord::Flush
                },
            },
            show_progress: args.progress,
            verbose: args.verbose,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check limits and that the root is an openable directory
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate thread count
        if self.thread_count == 0 || self.thread_count > MAX_THREADS {
            return Err(ConfigError::InvalidThreadCount {
                count: self.thread_count,
                max: MAX_THREADS,
            });
        }

        // Validate shard count
        if self.shard_count == 0 {
            return Err(ConfigError::InvalidShardCount {
                count: self.shard_count,
            });
        }

        // Validate queue size
        if let Some(size) = self.queue_size {
            if size < MIN_QUEUE_SIZE {
                return Err(ConfigError::InvalidQueueSize {
                    size,
                    min: MIN_QUEUE_SIZE,
                });
            }
        }

        check_root(&self.root)
    }
}

/// Verify that `root` exists, is a directory, and can be listed
fn check_root(root: &Path) -> Result<(), ConfigError> {
    let metadata = match fs::metadata(root) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ConfigError::RootNotFound {
                path: root.to_path_buf(),
            })
        }
        Err(source) => {
            return Err(ConfigError::RootUnreadable {
                path: root.to_path_buf(),
                source,
            })
        }
    };

    if !metadata.is_dir() {
        return Err(ConfigError::RootNotDirectory {
            path: root.to_path_buf(),
        });
    }

    fs::read_dir(root).map_err(|source| ConfigError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(std::iter::once("ssfi").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_defaults() {
        let args = parse(&["/data"]).unwrap();
        assert_eq!(args.path, PathBuf::from("/data"));
        assert_eq!(args.threads, 3);
        assert_eq!(args.top, 10);
        assert_eq!(args.shards, DEFAULT_SHARD_COUNT);
        assert_eq!(args.queue_size, None);
        assert!(!args.drop_trailing_word);
        assert!(!args.progress);
    }

    #[test]
    fn test_cli_short_and_long_flags() {
        let args = parse(&["-t", "8", "/data", "--top", "25", "--queue-size", "100"]).unwrap();
        assert_eq!(args.threads, 8);
        assert_eq!(args.top, 25);
        assert_eq!(args.queue_size, Some(100));

        let args = parse(&["--threads", "2", "/data", "--drop-trailing-word", "-p", "-v"]).unwrap();
        assert_eq!(args.threads, 2);
        assert!(args.drop_trailing_word);
        assert!(args.progress);
        assert!(args.verbose);
    }

    #[test]
    fn test_cli_errors() {
        use clap::error::ErrorKind;

        let err = parse(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = parse(&["/data", "-t", "many"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);

        let err = parse(&["-t", "-2", "/data"]).unwrap_err();
        assert_ne!(err.kind(), ErrorKind::DisplayHelp);

        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_from_args_valid() {
        let dir = tempdir().unwrap();
        let args = parse(&[dir.path().to_str().unwrap(), "--drop-trailing-word"]).unwrap();
        let config = IndexConfig::from_args(args).unwrap();

        assert_eq!(config.root, dir.path());
        assert_eq!(config.thread_count, DEFAULT_THREADS);
        assert_eq!(config.scan.trailing_word, TrailingWord::Drop);
    }

    #[test]
    fn test_invalid_thread_count() {
        let dir = tempdir().unwrap();
        let mut config = IndexConfig::new(dir.path());

        config.thread_count = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreadCount { count: 0, .. })
        ));

        config.thread_count = MAX_THREADS + 1;
        assert!(config.validate().is_err());

        config.thread_count = MAX_THREADS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_shard_and_queue_size() {
        let dir = tempdir().unwrap();
        let mut config = IndexConfig::new(dir.path());

        config.shard_count = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidShardCount { .. })
        ));

        config.shard_count = 1;
        config.queue_size = Some(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidQueueSize { size: 0, .. })
        ));
    }

    #[test]
    fn test_root_checks() {
        let dir = tempdir().unwrap();

        let missing = IndexConfig::new(dir.path().join("missing"));
        assert!(matches!(
            missing.validate(),
            Err(ConfigError::RootNotFound { .. })
        ));

        let file = dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        let not_dir = IndexConfig::new(&file);
        assert!(matches!(
            not_dir.validate(),
            Err(ConfigError::RootNotDirectory { .. })
        ));
    }
}
