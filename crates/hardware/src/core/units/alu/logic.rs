//! ALU comparison operations.
//!
//! `slt` yields 0 or 1. The branch tests subtract their operands and return
//! 0 when the branch is taken: `beq` on a zero difference, `bne` on a
//! nonzero one. `j` always returns 0.

use crate::isa::Mnemonic;

/// Executes a comparison. Returns `0` for non-comparison mnemonics.
pub const fn execute(mnemonic: Mnemonic, a: i32, b: i32) -> i32 {
    match mnemonic {
        Mnemonic::Slt => (a < b) as i32,
        Mnemonic::Beq => (a.wrapping_sub(b) != 0) as i32,
        Mnemonic::Bne => (a.wrapping_sub(b) == 0) as i32,
        _ => 0,
    }
}
