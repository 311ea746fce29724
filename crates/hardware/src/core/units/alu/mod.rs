//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the per-mnemonic semantic functions used by the
//! Execute stage (and by the reference interpreter). All arithmetic is 32-bit
//! two's complement and wraps on overflow.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: add, addi, sub, mul and effective-address computation
//! - [`logic`]:      slt and the branch/jump zero tests

/// Integer arithmetic operations (add, subtract, multiply).
pub mod arithmetic;

/// Comparison operations (slt, branch tests).
pub mod logic;

use crate::isa::Mnemonic;

/// Arithmetic Logic Unit.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Applies the semantic function of `mnemonic` to two operands.
    ///
    /// For control transfers the result is zero exactly when the transfer is
    /// taken, so the execute stage's zero flag doubles as the taken flag.
    ///
    /// # Arguments
    ///
    /// * `mnemonic` - The instruction whose semantics to apply.
    /// * `a`        - First operand.
    /// * `b`        - Second operand (register value or immediate, per ALUSrc).
    ///
    /// # Examples
    ///
    /// ```
    /// use mipsim_core::core::units::alu::Alu;
    /// use mipsim_core::isa::Mnemonic;
    ///
    /// assert_eq!(Alu::execute(Mnemonic::Sub, 3, 5), -2);
    /// assert_eq!(Alu::execute(Mnemonic::Beq, 7, 7), 0);
    /// assert_eq!(Alu::execute(Mnemonic::Bne, 7, 7), 1);
    /// ```
    pub fn execute(mnemonic: Mnemonic, a: i32, b: i32) -> i32 {
        match mnemonic {
            Mnemonic::Add
            | Mnemonic::Addi
            | Mnemonic::Sub
            | Mnemonic::Mul
            | Mnemonic::Lw
            | Mnemonic::Sw => arithmetic::execute(mnemonic, a, b),
            Mnemonic::Slt | Mnemonic::Beq | Mnemonic::Bne | Mnemonic::J => {
                logic::execute(mnemonic, a, b)
            }
        }
    }
}
