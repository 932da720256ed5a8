//! Integration tests for ssfi
//!
//! These build small trees in temporary directories and run the full
//! walk + worker pool + accumulator pipeline over them.

use ssfi::accumulator::{WordAccumulator, WordCount};
use ssfi::config::IndexConfig;
use ssfi::content::{ScanOptions, TrailingWord};
use ssfi::report::write_report;
use ssfi::walker::worker::WorkerContext;
use ssfi::walker::{FileTask, IndexCoordinator, IndexStats, RunPhase, WorkQueue, Worker};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tempfile::tempdir;

fn config(root: &Path, threads: usize) -> IndexConfig {
    let mut config = IndexConfig::new(root);
    config.thread_count = threads;
    config
}

/// a.txt, b.txt, and a subdirectory holding c.log and a symlink to a.txt
fn build_fixture(root: &Path) {
    fs::write(root.join("a.txt"), "Hello hello WORLD!").unwrap();
    fs::write(root.join("b.txt"), "world world").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub/c.log"), "ignored ignored ignored").unwrap();
    #[cfg(unix)]
    std::os::unix::fs::symlink(root.join("a.txt"), root.join("sub/link.txt")).unwrap();
}

fn as_map(words: Vec<WordCount>) -> HashMap<String, u64> {
    words.into_iter().map(|wc| (wc.word, wc.count)).collect()
}

#[test]
fn test_fixture_walk() {
    let dir = tempdir().unwrap();
    build_fixture(dir.path());

    let coordinator = IndexCoordinator::new(config(dir.path(), 3));
    let result = coordinator.run().unwrap();

    assert!(result.completed);
    assert_eq!(result.unique_words, 2);
    assert_eq!(result.files_scanned, 2);
    assert_eq!(coordinator.accumulator().count_of("hello"), Some(2));
    assert_eq!(coordinator.accumulator().count_of("world"), Some(3));
    assert_eq!(coordinator.accumulator().count_of("ignored"), None);

    let top = coordinator.top_words(10);
    assert_eq!(
        top,
        vec![WordCount::new("world", 3), WordCount::new("hello", 2)]
    );
}

#[test]
fn test_fixture_report_output() {
    let dir = tempdir().unwrap();
    build_fixture(dir.path());

    let coordinator = IndexCoordinator::new(config(dir.path(), 2));
    let result = coordinator.run().unwrap();

    let mut out = Vec::new();
    write_report(&mut out, result.unique_words, &coordinator.top_words(10)).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "2 words found\nworld\t3\nhello\t2\n"
    );
}

#[test]
fn test_legacy_trailing_word_policy() {
    let dir = tempdir().unwrap();
    build_fixture(dir.path());

    let mut config = config(dir.path(), 2);
    config.scan.trailing_word = TrailingWord::Drop;
    let coordinator = IndexCoordinator::new(config);
    coordinator.run().unwrap();

    // b.txt has no terminator after its last word
    assert_eq!(coordinator.accumulator().count_of("world"), Some(2));
    assert_eq!(coordinator.accumulator().count_of("hello"), Some(2));
}

#[test]
fn test_missing_file_fails_without_stopping_pool() {
    let dir = tempdir().unwrap();
    let ctx = WorkerContext {
        accumulator: Arc::new(WordAccumulator::with_shard_count(64)),
        stats: Arc::new(IndexStats::new()),
        shutdown: Arc::new(AtomicBool::new(false)),
        scan: ScanOptions::default(),
    };
    let queue = WorkQueue::new(None);
    let workers: Vec<_> = (0..3)
        .map(|id| Worker::spawn(id, queue.receiver(), ctx.clone()).unwrap())
        .collect();
    let queue_stats = queue.stats();
    let sender = queue.into_sender();

    for i in 0..5 {
        let path = dir.path().join(format!("ok{}.txt", i));
        fs::write(&path, "fine words\n").unwrap();
        sender.send(FileTask::new(path, 11)).unwrap();
    }
    // Enumerated, then gone before any worker opens it
    sender
        .send(FileTask::new(dir.path().join("vanished.txt"), 7))
        .unwrap();
    for i in 5..10 {
        let path = dir.path().join(format!("ok{}.txt", i));
        fs::write(&path, "fine words\n").unwrap();
        sender.send(FileTask::new(path, 11)).unwrap();
    }
    drop(sender);

    let finished: u64 = workers.into_iter().map(|w| w.join().unwrap()).sum();

    assert_eq!(finished, 11);
    assert_eq!(queue_stats.outstanding(), 0);
    assert_eq!(ctx.stats.files_failed.load(Ordering::Relaxed), 1);
    assert_eq!(ctx.stats.files_scanned.load(Ordering::Relaxed), 10);
    assert_eq!(ctx.accumulator.count_of("fine"), Some(10));
    assert_eq!(ctx.accumulator.count_of("words"), Some(10));
    assert_eq!(ctx.accumulator.unique_word_count(), 2);
}

#[test]
fn test_many_files_many_threads() {
    let dir = tempdir().unwrap();
    let mut expected: HashMap<String, u64> = HashMap::new();

    for d in 0..5 {
        let sub = dir.path().join(format!("dir{}", d));
        fs::create_dir(&sub).unwrap();
        for f in 0..20 {
            let mut text = String::new();
            for w in 0..50 {
                let word = format!("w{}", (d * 7 + f * 3 + w) % 40);
                text.push_str(&word);
                text.push(if w % 10 == 9 { '\n' } else { ' ' });
                *expected.entry(word).or_default() += 1;
            }
            fs::write(sub.join(format!("f{}.txt", f)), text).unwrap();
        }
    }

    let coordinator = IndexCoordinator::new(config(dir.path(), 8));
    let result = coordinator.run().unwrap();

    assert_eq!(result.files_scanned, 100);
    assert_eq!(result.words_seen, 5_000);
    assert_eq!(as_map(coordinator.accumulator().snapshot()), expected);
}

#[test]
fn test_repeat_runs_are_identical() {
    let dir = tempdir().unwrap();
    build_fixture(dir.path());
    fs::create_dir_all(dir.path().join("x/y")).unwrap();
    fs::write(dir.path().join("x/y/z.txt"), "The quick brown fox. THE END").unwrap();

    let coordinator = IndexCoordinator::new(config(dir.path(), 4));
    coordinator.run().unwrap();
    let first = as_map(coordinator.accumulator().snapshot());
    coordinator.run().unwrap();
    let second = as_map(coordinator.accumulator().snapshot());

    assert_eq!(first, second);
    assert_eq!(first.get("the"), Some(&2));
    assert_eq!(coordinator.phase(), RunPhase::Done);
}

#[test]
fn test_bounded_queue_with_single_worker() {
    let dir = tempdir().unwrap();
    for i in 0..30 {
        fs::write(dir.path().join(format!("{}.txt", i)), "tick tock\n").unwrap();
    }

    let mut config = config(dir.path(), 1);
    config.queue_size = Some(2);
    let coordinator = IndexCoordinator::new(config);
    let result = coordinator.run().unwrap();

    assert_eq!(result.files_scanned, 30);
    assert_eq!(coordinator.accumulator().count_of("tick"), Some(30));
}

#[test]
fn test_empty_tree() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("nothing_here")).unwrap();

    let coordinator = IndexCoordinator::new(config(dir.path(), 3));
    let result = coordinator.run().unwrap();

    assert_eq!(result.unique_words, 0);
    assert!(coordinator.top_words(10).is_empty());
}

#[test]
fn test_accumulator_stress_shared_words() {
    let acc = Arc::new(WordAccumulator::new());
    let threads = 32;
    let per_thread = 5_000;

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let acc = Arc::clone(&acc);
            thread::spawn(move || {
                for i in 0..per_thread {
                    acc.add(if i % 2 == 0 { "Even" } else { "odd" });
                    if i % 100 == 0 {
                        acc.add(&format!("thread{}", t));
                    }
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    let half = (threads * per_thread / 2) as u64;
    assert_eq!(acc.count_of("even"), Some(half));
    assert_eq!(acc.count_of("odd"), Some(half));
    assert_eq!(acc.count_of("thread7"), Some(50));
    assert_eq!(acc.unique_word_count(), 2 + threads);

    acc.clear();
    assert_eq!(acc.unique_word_count(), 0);
}
