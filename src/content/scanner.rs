//! Single-file word scanner
//!
//! Streams a file through a [`Tokenizer`] and hands each completed word to a
//! [`WordSink`]. Failures are returned to the caller as [`ScanError`]; words
//! emitted before a mid-file read error stay counted.

use crate::accumulator::WordSink;
use crate::content::tokenizer::{Tokenizer, TrailingWord};
use crate::error::{ScanError, ScanResult};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Read buffer size per scan
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Per-file scan options
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Policy for a word still open at end of file
    pub trailing_word: TrailingWord,
}

/// What a successful scan saw
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Bytes read
    pub bytes: u64,
    /// Words emitted to the sink
    pub words: u64,
    /// Words cut at the length ceiling
    pub truncated: u64,
}

/// Scan one file, reporting every word to `sink`
pub fn scan_file<S>(path: &Path, sink: &S, options: ScanOptions) -> ScanResult<ScanSummary>
where
    S: WordSink + ?Sized,
{
    let file = File::open(path).map_err(|source| ScanError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    scan_reader(BufReader::with_capacity(READ_BUFFER_SIZE, file), sink, options).map_err(
        |source| ScanError::Read {
            path: path.to_path_buf(),
            source,
        },
    )
}

/// Scan any buffered reader, reporting every word to `sink`
pub fn scan_reader<R, S>(mut reader: R, sink: &S, options: ScanOptions) -> io::Result<ScanSummary>
where
    R: BufRead,
    S: WordSink + ?Sized,
{
    let mut tokenizer = Tokenizer::new(options.trailing_word);
    let mut summary = ScanSummary::default();

    loop {
        let chunk = match reader.fill_buf() {
            Ok(chunk) => chunk,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if chunk.is_empty() {
            break;
        }

        let len = chunk.len();
        tokenizer.feed(chunk, |word| {
            sink.accept(word);
            summary.words += 1;
        });
        summary.bytes += len as u64;
        reader.consume(len);
    }

    tokenizer.finish(|word| {
        sink.accept(word);
        summary.words += 1;
    });
    summary.truncated = tokenizer.truncated();

    Ok(summary)
}
