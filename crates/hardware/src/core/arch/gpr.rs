//! MIPS General-Purpose Register File.
//!
//! This module implements the architectural register file. It performs the following:
//! 1. **Storage:** Maintains 32 signed 32-bit registers (`$0`-`$31`).
//! 2. **Invariant Enforcement:** Ensures that `$zero` always reads as zero.
//! 3. **Reporting:** Exposes the full register image for per-cycle reports.

use crate::common::constants::NUM_REGISTERS;
use crate::isa::abi::{ABI_NAMES, REG_ZERO};

/// General-Purpose Register file.
///
/// `$zero` is hardwired to zero; writes to it are discarded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [i32; NUM_REGISTERS],
}

impl Gpr {
    /// Creates a register file with every register set to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register. Out-of-range indices and `$zero` read as 0.
    pub fn read(&self, idx: usize) -> i32 {
        if idx == REG_ZERO {
            0
        } else {
            self.regs.get(idx).copied().unwrap_or_default()
        }
    }

    /// Writes a register. Writes to `$zero` and out-of-range indices are ignored.
    pub fn write(&mut self, idx: usize, val: i32) {
        if idx == REG_ZERO {
            return;
        }
        if let Some(slot) = self.regs.get_mut(idx) {
            *slot = val;
        }
    }

    /// Snapshot of all 32 registers in index order.
    pub const fn snapshot(&self) -> [i32; NUM_REGISTERS] {
        self.regs
    }

    /// Renders the registers four per line with their ABI names, for debug logs.
    pub fn dump(&self) -> String {
        self.regs
            .chunks(4)
            .enumerate()
            .map(|(row, chunk)| {
                chunk
                    .iter()
                    .enumerate()
                    .map(|(col, v)| format!("${:<4}={v:>11}", ABI_NAMES[row * 4 + col]))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
