//! Instruction Set Architecture (ISA) definitions.
//!
//! Contains the register naming convention and the decoded instruction model
//! for the supported MIPS subset:
//!
//! * arithmetic-register: `add`, `sub`, `mul`, `slt`
//! * immediate-arithmetic: `addi`
//! * branch: `beq`, `bne`
//! * jump: `j`
//! * memory: `lw`, `sw`

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Decoded instruction structures and operand classes.
pub mod instruction;

pub use instruction::{Address, InstClass, Instruction, Mnemonic, Operands};
