//! Data Memory and Memory Delta tracking.
//!
//! This module models the word-addressed data memory. It performs the following:
//! 1. **Storage:** A fixed array of 32-bit words, zero-initialized.
//! 2. **Address Validation:** Maps byte addresses to word indices, rejecting unaligned
//!    addresses, addresses inside the program footprint and addresses past the bound.
//! 3. **Delta Tracking:** Records each word whose value changed since the last report,
//!    in ascending word order, until drained.

use std::collections::BTreeMap;

use crate::common::constants::WORD_BYTES;

/// Maps a data byte address to a word index.
///
/// Valid addresses are word aligned, at or above the program footprint
/// (`4 * program_len`) and below `memory_bytes`.
///
/// ```
/// use mipsim_core::core::cpu::memory::data_word_index;
///
/// assert_eq!(data_word_index(1024, 4, 1 << 20), Some(256));
/// assert_eq!(data_word_index(1026, 4, 1 << 20), None);
/// assert_eq!(data_word_index(8, 4, 1 << 20), None);
/// ```
pub fn data_word_index(addr: i64, program_len: usize, memory_bytes: usize) -> Option<usize> {
    let word = WORD_BYTES as i64;
    let in_bounds = addr >= (program_len * WORD_BYTES) as i64 && addr < memory_bytes as i64;
    (addr % word == 0 && in_bounds).then(|| (addr / word) as usize)
}

/// Word-addressed data memory with a change log.
#[derive(Clone, Debug)]
pub struct DataMemory {
    words: Vec<i32>,
    delta: BTreeMap<usize, i32>,
}

impl DataMemory {
    /// Creates a zeroed memory of `bytes / 4` words.
    pub fn new(bytes: usize) -> Self {
        Self {
            words: vec![0; bytes / WORD_BYTES],
            delta: BTreeMap::new(),
        }
    }

    /// Number of words.
    pub fn len_words(&self) -> usize {
        self.words.len()
    }

    /// Reads a word; `None` if the index is past the end of memory.
    pub fn read(&self, word: usize) -> Option<i32> {
        self.words.get(word).copied()
    }

    /// Writes a word, logging it in the delta map only if its value changes.
    ///
    /// Returns `None` if the index is past the end of memory.
    pub fn write(&mut self, word: usize, value: i32) -> Option<()> {
        let slot = self.words.get_mut(word)?;
        if *slot != value {
            *slot = value;
            let _ = self.delta.insert(word, value);
        }
        Some(())
    }

    /// Words changed since the last drain.
    pub fn delta(&self) -> &BTreeMap<usize, i32> {
        &self.delta
    }

    /// Drains the change log, returning its `(word, value)` pairs in ascending order.
    pub fn take_delta(&mut self) -> Vec<(usize, i32)> {
        std::mem::take(&mut self.delta).into_iter().collect()
    }

    /// Non-zero words with their indices, ascending.
    pub fn nonzero_words(&self) -> impl Iterator<Item = (usize, i32)> + '_ {
        self.words
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0)
            .map(|(i, v)| (i, *v))
    }
}
