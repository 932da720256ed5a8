//! Final result report
//!
//! Plain, script-friendly output on stdout:
//!
//! ```text
//! 2 words found
//! world	3
//! hello	2
//! ```

use crate::accumulator::WordCount;
use std::io::{self, Write};

/// Write the unique word count followed by one `word<TAB>count` line per entry
pub fn write_report<W: Write>(out: &mut W, unique_words: usize, top: &[WordCount]) -> io::Result<()> {
    writeln!(out, "{} words found", unique_words)?;
    for wc in top {
        writeln!(out, "{}\t{}", wc.word, wc.count)?;
    }
    out.flush()
}
