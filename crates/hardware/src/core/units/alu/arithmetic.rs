//! ALU arithmetic operations.
//!
//! Addition, subtraction and multiplication on 32-bit signed values, all
//! wrapping. Loads and stores reuse addition for the effective address.

use crate::isa::Mnemonic;

/// Executes an arithmetic operation. Returns `0` for non-arithmetic mnemonics.
pub const fn execute(mnemonic: Mnemonic, a: i32, b: i32) -> i32 {
    match mnemonic {
        Mnemonic::Add | Mnemonic::Addi | Mnemonic::Lw | Mnemonic::Sw => a.wrapping_add(b),
        Mnemonic::Sub => a.wrapping_sub(b),
        Mnemonic::Mul => a.wrapping_mul(b),
        _ => 0,
    }
}
