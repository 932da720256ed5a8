//! Sharded, thread-safe word frequency accumulator
//!
//! Words are partitioned across a large number of independently locked
//! shards by `hash(word) % shard_count`. An `add` touches exactly one shard,
//! so concurrent workers only contend when two words land in the same shard.
//!
//! Whole-accumulator operations (`clear`, `unique_word_count`, `top_words`,
//! `snapshot`) lock every shard in ascending index order before reading, and
//! release them before any sorting happens.
//!
//! ```text
//!   add("fox") ──hash──▶ shard 17 ──▶ [("fox", 3), ("lamp", 1)]
//!   add("owl") ──hash──▶ shard 4  ──▶ [("owl", 1)]
//! ```

use parking_lot::{Mutex, MutexGuard};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Default number of shards
///
/// Large enough that each shard holds only a handful of words in typical
/// corpora, which keeps the linear in-shard scan short and lock contention
/// rare.
pub const DEFAULT_SHARD_COUNT: usize = 32_767;

/// A word and the number of times it was seen
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

impl WordCount {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Anything that accepts completed words from the tokenizer
pub trait WordSink {
    /// Record one occurrence of `word`
    fn accept(&self, word: &str);
}

type Shard = Vec<(String, u64)>;

/// Concurrent word -> count map partitioned into independently locked shards
pub struct WordAccumulator {
    shards: Box<[Mutex<Shard>]>,
}

impl WordAccumulator {
    /// Create an accumulator with [`DEFAULT_SHARD_COUNT`] shards
    pub fn new() -> Self {
        Self::with_shard_count(DEFAULT_SHARD_COUNT)
    }

    /// Create an accumulator with a specific number of shards
    ///
    /// A count of zero is treated as one.
    pub fn with_shard_count(shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1))
            .map(|_| Mutex::new(Vec::new()))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self { shards }
    }

    /// Number of shards
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Shard a (case-folded) word is stored in
    pub fn shard_index(&self, word: &str) -> usize {
        let word = fold_case(word);
        self.index_of(&word)
    }

    fn index_of(&self, folded: &str) -> usize {
        // DefaultHasher::new() uses fixed keys, so placement is reproducible.
        let mut hasher = DefaultHasher::new();
        folded.hash(&mut hasher);
        (hasher.finish() % self.shards.len() as u64) as usize
    }

    /// Record one occurrence of `word`
    ///
    /// ASCII uppercase letters are folded, so `"Hello"` and `"hello"` are the
    /// same word. Empty words are ignored.
    pub fn add(&self, word: &str) {
        if word.is_empty() {
            return;
        }

        let word = fold_case(word);
        let index = self.index_of(&word);
        let mut shard = self.shards[index].lock();

        if let Some(entry) = shard.iter_mut().find(|(w, _)| *w == *word) {
            entry.1 += 1;
            return;
        }

        shard.push((word.into_owned(), 1));
    }

    /// Current count for `word`, if it has been seen
    pub fn count_of(&self, word: &str) -> Option<u64> {
        let word = fold_case(word);
        let shard = self.shards[self.index_of(&word)].lock();
        shard
            .iter()
            .find(|(w, _)| *w == *word)
            .map(|(_, count)| *count)
    }

    /// Remove every word
    ///
    /// All shards are held at once so no reader observes a partial clear.
    pub fn clear(&self) {
        let mut guards = self.lock_all();
        for shard in guards.iter_mut() {
            shard.clear();
        }
    }

    /// Number of distinct words recorded
    pub fn unique_word_count(&self) -> usize {
        self.lock_all().iter().map(|shard| shard.len()).sum()
    }

    /// Sum of all counts
    pub fn total_occurrences(&self) -> u64 {
        self.lock_all()
            .iter()
            .flat_map(|shard| shard.iter())
            .map(|(_, count)| *count)
            .sum()
    }

    /// True if no words have been recorded
    pub fn is_empty(&self) -> bool {
        self.unique_word_count() == 0
    }

    /// Copy of every (word, count) pair, in no particular order
    pub fn snapshot(&self) -> Vec<WordCount> {
        let guards = self.lock_all();
        let total = guards.iter().map(|shard| shard.len()).sum();

        let mut words = Vec::with_capacity(total);
        for shard in guards.iter() {
            words.extend(shard.iter().map(|(w, c)| WordCount::new(w.clone(), *c)));
        }
        words
    }

    /// Up to `count` most frequent words, highest count first
    ///
    /// Equal counts are ordered by word so results are reproducible. Asking
    /// for more words than exist returns all of them.
    pub fn top_words(&self, count: usize) -> Vec<WordCount> {
        if count == 0 {
            return Vec::new();
        }

        // Shards are released when snapshot() returns; sorting runs unlocked.
        let mut words = self.snapshot();

        if count < words.len() {
            words.select_nth_unstable_by(count - 1, rank);
            words.truncate(count);
        }
        words.sort_unstable_by(rank);
        words
    }

    /// Lock every shard in ascending index order
    fn lock_all(&self) -> Vec<MutexGuard<'_, Shard>> {
        self.shards.iter().map(|shard| shard.lock()).collect()
    }
}

impl Default for WordAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl WordSink for WordAccumulator {
    fn accept(&self, word: &str) {
        self.add(word);
    }
}

impl std::fmt::Debug for WordAccumulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordAccumulator")
            .field("shards", &self.shards.len())
            .finish_non_exhaustive()
    }
}

/// Descending count, then ascending word
fn rank(a: &WordCount, b: &WordCount) -> Ordering {
    b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word))
}

fn fold_case(word: &str) -> Cow<'_, str> {
    if word.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(word.to_ascii_lowercase())
    } else {
        Cow::Borrowed(word)
    }
}
