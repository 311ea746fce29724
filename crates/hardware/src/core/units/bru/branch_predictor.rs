//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait that every prediction
//! variant implements, plus the 2-bit saturating counter they share.

use crate::common::constants::{COUNTER_MAX, PC_INDEX_MASK};

/// Trait for branch direction predictors.
///
/// Predictors are trained after resolution with the real outcome; a
/// prediction never changes predictor state.
pub trait BranchPredictor {
    /// Predicts whether the branch at `pc` will be taken.
    fn predict(&self, pc: u32) -> bool;

    /// Trains the predictor with the resolved outcome of the branch at `pc`.
    fn update(&mut self, pc: u32, taken: bool);
}

/// A 2-bit saturating counter.
///
/// Values run from 0 (strongly not-taken) to 3 (strongly taken); the high
/// bit is the prediction. Training moves one step toward the outcome and
/// stops at the ends instead of wrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SaturatingCounter(u8);

impl SaturatingCounter {
    /// Creates a counter, clamping `value` into `0..=3`.
    pub const fn new(value: u8) -> Self {
        if value > COUNTER_MAX {
            Self(COUNTER_MAX)
        } else {
            Self(value)
        }
    }

    /// Current counter value.
    pub const fn value(self) -> u8 {
        self.0
    }

    /// True if the high bit is set.
    pub const fn predict_taken(self) -> bool {
        self.0 & 0b10 != 0
    }

    /// Steps toward `taken`, saturating at 0 and 3.
    pub const fn train(&mut self, taken: bool) {
        if taken {
            if self.0 < COUNTER_MAX {
                self.0 += 1;
            }
        } else if self.0 > 0 {
            self.0 -= 1;
        }
    }
}

/// Table index selected by the low PC bits.
pub const fn pc_index(pc: u32) -> usize {
    (pc & PC_INDEX_MASK) as usize
}
