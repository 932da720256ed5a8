//! Byte-level word tokenizer
//!
//! A word is a maximal run of ASCII letters and digits. Uppercase letters are
//! folded to lowercase; every other byte ends the current word.
//!
//! The tokenizer is fed arbitrary chunks, so a word split across two reads is
//! still emitted once, intact.

/// Longest word kept, in bytes; longer runs are truncated
pub const MAX_WORD_LEN: usize = 2047;

/// What to do with a word still being built when input ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingWord {
    /// Emit it like any other word
    #[default]
    Flush,
    /// Discard it; only a separator completes a word
    Drop,
}

/// Incremental tokenizer with a growable word buffer
#[derive(Debug)]
pub struct Tokenizer {
    buf: Vec<u8>,
    overflowed: bool,
    truncated: u64,
    trailing: TrailingWord,
}

impl Tokenizer {
    pub fn new(trailing: TrailingWord) -> Self {
        Self {
            buf: Vec::with_capacity(64),
            overflowed: false,
            truncated: 0,
            trailing,
        }
    }

    /// Feed a chunk of input, calling `emit` for each completed word
    pub fn feed<F>(&mut self, chunk: &[u8], mut emit: F)
    where
        F: FnMut(&str),
    {
        for &byte in chunk {
            if byte.is_ascii_alphanumeric() {
                self.push(byte.to_ascii_lowercase());
            } else if !self.buf.is_empty() {
                self.complete(&mut emit);
            }
        }
    }

    /// Signal end of input, applying the trailing-word policy
    pub fn finish<F>(&mut self, mut emit: F)
    where
        F: FnMut(&str),
    {
        if self.buf.is_empty() {
            return;
        }
        match self.trailing {
            TrailingWord::Flush => self.complete(&mut emit),
            TrailingWord::Drop => self.reset(),
        }
    }

    /// Number of words cut at [`MAX_WORD_LEN`] so far
    pub fn truncated(&self) -> u64 {
        self.truncated
    }

    fn push(&mut self, byte: u8) {
        if self.buf.len() < MAX_WORD_LEN {
            self.buf.push(byte);
        } else if !self.overflowed {
            self.overflowed = true;
            self.truncated += 1;
        }
    }

    fn complete<F>(&mut self, emit: &mut F)
    where
        F: FnMut(&str),
    {
        // Only ASCII alphanumerics are ever pushed.
        if let Ok(word) = std::str::from_utf8(&self.buf) {
            emit(word);
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.buf.clear();
        self.overflowed = false;
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(TrailingWord::default())
    }
}

/// Tokenize a complete in-memory buffer
pub fn tokenize(input: &[u8], trailing: TrailingWord) -> Vec<String> {
    let mut words = Vec::new();
    let mut tokenizer = Tokenizer::new(trailing);
    tokenizer.feed(input, |w| words.push(w.to_string()));
    tokenizer.finish(|w| words.push(w.to_string()));
    words
}
