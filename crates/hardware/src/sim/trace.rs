//! Branch-trace replay.
//!
//! Drives a branch predictor with a recorded stream of branch outcomes,
//! independently of the pipeline. Each non-blank line of a trace is
//! `<pc> <outcome>`: a hexadecimal pc (optional `0x`) and `0` or `1`.
//! Text after `#` is ignored.

use crate::common::error::TraceError;
use crate::core::units::bru::BranchPredictor;

/// One resolved conditional branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchRecord {
    /// Branch address.
    pub pc: u32,
    /// Whether the branch was taken.
    pub taken: bool,
}

/// Result of replaying a trace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PredictionSummary {
    /// Branches replayed.
    pub branches: u64,
    /// Branches whose direction was predicted correctly.
    pub correct: u64,
}

impl PredictionSummary {
    /// Fraction of correct predictions, 0 for an empty trace.
    pub fn accuracy(&self) -> f64 {
        if self.branches == 0 {
            0.0
        } else {
            self.correct as f64 / self.branches as f64
        }
    }
}

/// Parses a branch trace.
///
/// ```
/// use mipsim_core::sim::trace::{BranchRecord, parse_trace};
///
/// let records = parse_trace("0x40 1\n44 0 # loop exit\n").unwrap();
/// assert_eq!(records[0], BranchRecord { pc: 0x40, taken: true });
/// assert_eq!(records[1], BranchRecord { pc: 0x44, taken: false });
/// ```
///
/// # Errors
///
/// Returns a [`TraceError`] naming the first malformed line.
pub fn parse_trace(text: &str) -> Result<Vec<BranchRecord>, TraceError> {
    let mut records = Vec::new();
    for (n, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let err = |reason: &str| TraceError {
            line: n + 1,
            reason: reason.to_owned(),
        };
        let mut fields = line.split_whitespace();
        let (Some(pc), Some(outcome), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(err("expected `<pc> <outcome>`"));
        };
        let digits = pc
            .strip_prefix("0x")
            .or_else(|| pc.strip_prefix("0X"))
            .unwrap_or(pc);
        let pc = u32::from_str_radix(digits, 16).map_err(|_| err("pc is not hexadecimal"))?;
        let taken = match outcome {
            "1" => true,
            "0" => false,
            _ => return Err(err("outcome must be 0 or 1")),
        };
        records.push(BranchRecord { pc, taken });
    }
    Ok(records)
}

/// Replays `records` through `predictor`, predicting then training on each.
pub fn replay<P: BranchPredictor + ?Sized>(
    predictor: &mut P,
    records: &[BranchRecord],
) -> PredictionSummary {
    let mut summary = PredictionSummary::default();
    for record in records {
        summary.branches += 1;
        if predictor.predict(record.pc) == record.taken {
            summary.correct += 1;
        }
        predictor.update(record.pc, record.taken);
    }
    summary
}
