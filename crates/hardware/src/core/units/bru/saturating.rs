//! PC-indexed Saturating Counter Predictor.
//!
//! One 2-bit counter per PC bucket; the bucket is the low 14 bits of the PC.
//! Branches that alias to the same bucket share a counter.

use super::BranchPredictor;
use super::branch_predictor::{SaturatingCounter, pc_index};
use crate::common::constants::PC_INDEX_BITS;

/// Number of counters in the table.
const TABLE_SIZE: usize = 1 << PC_INDEX_BITS;

/// PC-indexed 2-bit counter predictor.
#[derive(Clone, Debug)]
pub struct SaturatingPredictor {
    table: Vec<SaturatingCounter>,
}

impl SaturatingPredictor {
    /// Creates a predictor with every counter set to `initial`.
    pub fn new(initial: u8) -> Self {
        Self {
            table: vec![SaturatingCounter::new(initial); TABLE_SIZE],
        }
    }

    /// Counter value currently used for `pc`.
    pub fn counter(&self, pc: u32) -> u8 {
        self.table[pc_index(pc)].value()
    }
}

impl BranchPredictor for SaturatingPredictor {
    fn predict(&self, pc: u32) -> bool {
        self.table[pc_index(pc)].predict_taken()
    }

    fn update(&mut self, pc: u32, taken: bool) {
        self.table[pc_index(pc)].train(taken);
    }
}
