//! ssfi - Simple Sharded File Indexer
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use ssfi::config::{CliArgs, IndexConfig};
use ssfi::progress::{print_header, print_summary, ProgressReporter};
use ssfi::report::write_report;
use ssfi::walker::IndexCoordinator;
use std::io;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Parse CLI arguments; help and version exit 0, anything else exits 1
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<()> {
    // Setup logging
    setup_logging(args.verbose)?;

    // Validate and create config
    let config = IndexConfig::from_args(args).context("Invalid configuration")?;
    let top_count = config.top_count;
    let show_progress = config.show_progress;

    if show_progress {
        print_header(&config.root.display().to_string(), config.thread_count);
    }

    let coordinator = IndexCoordinator::new(config);

    // Setup signal handler for graceful shutdown
    let shutdown_flag = coordinator.shutdown_flag();
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupt received, finishing current files...");
        shutdown_flag.store(true, Ordering::SeqCst);
    })
    .context("Failed to set signal handler")?;

    // Run the walk, refreshing the spinner from a scoped thread if requested
    let run_result = if show_progress {
        let reporter = ProgressReporter::new();
        reporter.set_status("Walking...");
        let stats = coordinator.stats();
        let finished = AtomicBool::new(false);

        let result = thread::scope(|s| {
            s.spawn(|| reporter.track(&stats, &finished));
            let result = coordinator.run();
            finished.store(true, Ordering::SeqCst);
            result
        });

        match &result {
            Ok(r) if r.completed => reporter.finish("Index completed"),
            Ok(_) => reporter.finish("Index interrupted"),
            Err(_) => reporter.finish_and_clear(),
        }
        result
    } else {
        coordinator.run()
    };
    let result = run_result.context("Index failed")?;

    let top = coordinator.top_words(top_count);
    let stdout = io::stdout();
    write_report(&mut stdout.lock(), result.unique_words, &top)
        .context("Failed to write report")?;

    if show_progress {
        print_summary(&result);
    }

    if result.files_failed > 0 {
        info!(failed = result.files_failed, "Index completed with unreadable files");
    }

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("ssfi=debug,warn")
    } else {
        EnvFilter::new("ssfi=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}
