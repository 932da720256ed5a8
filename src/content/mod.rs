//! Content analysis: turning file bytes into words
//!
//! This module provides:
//! - A chunk-fed ASCII tokenizer with a bounded word length
//! - A file scanner that streams a file into a word sink

pub mod scanner;
pub mod tokenizer;

pub use scanner::{scan_file, scan_reader, ScanOptions, ScanSummary};
pub use tokenizer::{tokenize, Tokenizer, TrailingWord, MAX_WORD_LEN};
