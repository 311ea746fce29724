//! Global-History Counter Predictor.
//!
//! A 2-bit shift register of the last two outcomes selects one of four
//! counters. The PC is ignored, so every branch shares the same history.

use super::BranchPredictor;
use super::branch_predictor::SaturatingCounter;
use crate::common::constants::{HISTORY_BITS, HISTORY_MASK};

/// Number of counters selectable by the history register.
const TABLE_SIZE: usize = 1 << HISTORY_BITS;

/// Branch-history shift register; the newest outcome is bit 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct HistoryRegister(u8);

impl HistoryRegister {
    /// Creates a register holding the low two bits of `value`.
    pub const fn new(value: u8) -> Self {
        Self(value & HISTORY_MASK)
    }

    /// Current history as a table index.
    pub const fn value(self) -> usize {
        self.0 as usize
    }

    /// Shifts in the newest outcome, discarding the oldest.
    pub const fn push(&mut self, taken: bool) {
        self.0 = ((self.0 << 1) | taken as u8) & HISTORY_MASK;
    }
}

/// History-indexed 2-bit counter predictor.
#[derive(Clone, Debug)]
pub struct HistoryPredictor {
    history: HistoryRegister,
    table: [SaturatingCounter; TABLE_SIZE],
}

impl HistoryPredictor {
    /// Creates a predictor whose counters and history register all start at `initial`.
    pub const fn new(initial: u8) -> Self {
        Self {
            history: HistoryRegister::new(initial),
            table: [SaturatingCounter::new(initial); TABLE_SIZE],
        }
    }

    /// Current history register.
    pub const fn history(&self) -> HistoryRegister {
        self.history
    }

    /// Counter value selected by the current history.
    pub const fn counter(&self) -> u8 {
        self.table[self.history.value()].value()
    }
}

impl BranchPredictor for HistoryPredictor {
    fn predict(&self, _pc: u32) -> bool {
        self.table[self.history.value()].predict_taken()
    }

    fn update(&mut self, _pc: u32, taken: bool) {
        self.table[self.history.value()].train(taken);
        self.history.push(taken);
    }
}
