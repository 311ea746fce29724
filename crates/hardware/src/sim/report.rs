//! Per-cycle architectural state report.
//!
//! The text form is a fixed output contract:
//!
//! ```text
//! <r0> <r1> ... <r31> \n
//! <n> <word> <value> <word> <value> ... \n
//! ```
//!
//! Every number is followed by one space. Changed words are listed in
//! ascending word order.

use std::fmt;

use crate::common::constants::NUM_REGISTERS;

/// Architectural state visible at the end of one cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleReport {
    /// Cycle number; 0 is the state before the first tick.
    pub cycle: u64,
    /// Register file contents, `$0` first.
    pub registers: [i32; NUM_REGISTERS],
    /// Words whose value changed during this cycle, ascending by word index.
    pub memory_delta: Vec<(usize, i32)>,
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in &self.registers {
            write!(f, "{value} ")?;
        }
        writeln!(f)?;
        write!(f, "{} ", self.memory_delta.len())?;
        for (word, value) in &self.memory_delta {
            write!(f, "{word} {value} ")?;
        }
        writeln!(f)
    }
}
