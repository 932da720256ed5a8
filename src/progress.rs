//! Progress reporting for the indexer
//!
//! Provides a live spinner using indicatif and a run summary. Everything here
//! writes to stderr; stdout is reserved for the word report.

use crate::walker::{IndexProgress, IndexResult, IndexStats};
use console::style;
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Interval between spinner refreshes
const REFRESH_INTERVAL: Duration = Duration::from_millis(100);

/// Progress reporter that displays run status
pub struct ProgressReporter {
    /// Progress bar
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());

        if let Ok(spinner) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
            bar.set_style(spinner.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }

        bar.enable_steady_tick(REFRESH_INTERVAL);

        Self { bar }
    }

    /// Update the progress display
    pub fn update(&self, progress: &IndexProgress) {
        self.bar.set_message(format_progress(progress));
    }

    /// Refresh from `stats` until `finished` is set
    pub fn track(&self, stats: &IndexStats, finished: &AtomicBool) {
        let start = Instant::now();
        while !finished.load(Ordering::SeqCst) {
            self.update(&stats.progress(start.elapsed()));
            thread::sleep(REFRESH_INTERVAL);
        }
    }

    /// Set a status message
    pub fn set_status(&self, status: &str) {
        self.bar.set_message(status.to_string());
    }

    /// Finish the progress display with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Finish and clear the progress display
    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn format_progress(progress: &IndexProgress) -> String {
    format!(
        "{} | Dirs: {} | Files: {}/{} ({} queued) | Words: {} | Read: {} | Rate: {:.0} files/s, {:.0} words/s",
        progress.phase,
        format_number(progress.dirs),
        format_number(progress.scanned + progress.failed),
        format_number(progress.submitted),
        format_number(progress.pending()),
        format_number(progress.words),
        format_size(progress.bytes, BINARY),
        progress.files_per_second(),
        progress.words_per_second(),
    )
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let bytes: Vec<_> = s.bytes().rev().collect();

    let chunks: Vec<String> = bytes
        .chunks(3)
        .map(|chunk| chunk.iter().rev().map(|&b| b as char).collect::<String>())
        .collect();

    chunks.into_iter().rev().collect::<Vec<_>>().join(",")
}

/// Print a summary of the run
pub fn print_summary(result: &IndexResult) {
    let duration_secs = result.duration.as_secs_f64();
    let rate = if duration_secs > 0.0 {
        result.files_scanned as f64 / duration_secs
    } else {
        0.0
    };

    let title = if result.completed {
        style("Index Complete").green().bold()
    } else {
        style("Index Interrupted").yellow().bold()
    };

    eprintln!();
    eprintln!("{}", title);
    eprintln!("{}", style("─".repeat(50)).dim());
    eprintln!("  {} {}", style("Directories:").bold(), format_number(result.dirs_walked));
    eprintln!("  {} {}", style("Files:").bold(), format_number(result.files_scanned));
    eprintln!("  {} {}", style("Total Size:").bold(), format_size(result.bytes_scanned, BINARY));
    eprintln!("  {} {}", style("Words:").bold(), format_number(result.words_seen));
    eprintln!("  {} {}", style("Unique:").bold(), format_number(result.unique_words as u64));
    eprintln!(
        "  {} {:.1}s ({:.0} files/sec)",
        style("Duration:").bold(),
        duration_secs,
        rate
    );
    if result.files_failed > 0 {
        eprintln!(
            "  {} {}",
            style("Failed:").yellow().bold(),
            format_number(result.files_failed)
        );
    }
    if result.queue_backpressure > 0 {
        eprintln!(
            "  {} {}",
            style("Queue Full:").yellow().bold(),
            format_number(result.queue_backpressure)
        );
    }
    if result.words_truncated > 0 {
        eprintln!(
            "  {} {}",
            style("Truncated:").yellow().bold(),
            format_number(result.words_truncated)
        );
    }
    eprintln!();
}

/// Print a header at the start of the run
pub fn print_header(root: &str, threads: usize) {
    eprintln!();
    eprintln!("{} {}", style("ssfi").cyan().bold(), env!("CARGO_PKG_VERSION"));
    eprintln!("{}", style("─".repeat(50)).dim());
    eprintln!("  {} {}", style("Source:").bold(), root);
    eprintln!("  {} {}", style("Threads:").bold(), threads);
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::RunPhase;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(1234567890), "1,234,567,890");
    }

    #[test]
    fn test_format_progress() {
        let progress = IndexProgress {
            phase: RunPhase::Walking,
            dirs: 12,
            submitted: 1500,
            scanned: 1000,
            failed: 2,
            bytes: 2048,
            words: 123456,
            elapsed: Duration::from_secs(2),
        };

        let msg = format_progress(&progress);
        assert!(msg.starts_with("walking | Dirs: 12 | Files: 1,002/1,500"));
        assert!(msg.contains("(498 queued)"));
        assert!(msg.contains("Words: 123,456"));
        assert!(msg.ends_with("501 files/s, 61728 words/s"));
        assert!(msg.contains("Read: 2"));
    }
}
