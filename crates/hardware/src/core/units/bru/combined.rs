//! Combined PC + History Predictor.
//!
//! Indexes a single counter table with `pc_bucket * 4 + history`, so each
//! branch keeps a separate counter per recent-outcome pattern.
//!
//! # Index bounds
//!
//! The full index space is `2^14 * 4 = 2^16`. Tables may be built with any
//! size from 1 to 2^16; indices are reduced modulo the table size, so a
//! full-size table is indexed exactly and every index is in range.
//!
//! The PC-only and history-only tables are trained alongside the combined
//! one so that policies sharing this state can consult either view.

use super::BranchPredictor;
use super::branch_predictor::{SaturatingCounter, pc_index};
use super::history::HistoryRegister;
use crate::common::constants::{HISTORY_BITS, MAX_COMBINED_TABLE, PC_INDEX_BITS};
use crate::common::error::ConfigError;

/// PC + history indexed 2-bit counter predictor.
#[derive(Clone, Debug)]
pub struct CombinedPredictor {
    history: HistoryRegister,
    combined: Vec<SaturatingCounter>,
    pc_table: Vec<SaturatingCounter>,
    history_table: [SaturatingCounter; 1 << HISTORY_BITS],
}

impl CombinedPredictor {
    /// Creates a predictor with a combined table of `size` counters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyTable`] for a zero size and
    /// [`ConfigError::TableTooLarge`] for sizes above 2^16.
    pub fn new(initial: u8, size: usize) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::EmptyTable);
        }
        if size > MAX_COMBINED_TABLE {
            return Err(ConfigError::TableTooLarge { size });
        }
        let counter = SaturatingCounter::new(initial);
        Ok(Self {
            history: HistoryRegister::new(initial),
            combined: vec![counter; size],
            pc_table: vec![counter; 1 << PC_INDEX_BITS],
            history_table: [counter; 1 << HISTORY_BITS],
        })
    }

    /// Combined-table index for `pc` under the current history.
    pub fn index(&self, pc: u32) -> usize {
        ((pc_index(pc) << HISTORY_BITS) | self.history.value()) % self.combined.len()
    }

    /// Number of counters in the combined table.
    pub fn table_size(&self) -> usize {
        self.combined.len()
    }

    /// Current history register.
    pub const fn history(&self) -> HistoryRegister {
        self.history
    }

    /// Combined-table counter value used for `pc`.
    pub fn counter(&self, pc: u32) -> u8 {
        self.combined[self.index(pc)].value()
    }

    /// PC-only table counter for `pc`.
    pub fn pc_counter(&self, pc: u32) -> u8 {
        self.pc_table[pc_index(pc)].value()
    }

    /// History-only table counter selected by the current history.
    pub const fn history_counter(&self) -> u8 {
        self.history_table[self.history.value()].value()
    }
}

impl BranchPredictor for CombinedPredictor {
    fn predict(&self, pc: u32) -> bool {
        self.combined[self.index(pc)].predict_taken()
    }

    fn update(&mut self, pc: u32, taken: bool) {
        let idx = self.index(pc);
        self.combined[idx].train(taken);
        self.pc_table[pc_index(pc)].train(taken);
        self.history_table[self.history.value()].train(taken);
        self.history.push(taken);
    }
}
