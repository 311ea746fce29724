//! MIPS Application Binary Interface (ABI) register names.
//!
//! Maps the conventional `$name` spellings and the numeric `$0`-`$31`
//! spellings onto architectural register indices.

use crate::common::constants::NUM_REGISTERS;

/// Register `$zero` (always reads as zero).
pub const REG_ZERO: usize = 0;
/// Register `$sp` (stack pointer).
pub const REG_SP: usize = 29;
/// Register `$ra` (return address).
pub const REG_RA: usize = 31;

/// ABI name of every register, indexed by register number.
pub const ABI_NAMES: [&str; NUM_REGISTERS] = [
    "zero", "at", "v0", "v1", "a0", "a1", "a2", "a3", "t0", "t1", "t2", "t3", "t4", "t5", "t6",
    "t7", "s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7", "t8", "t9", "k0", "k1", "gp", "sp",
    "s8", "ra",
];

/// Resolves a register token such as `$t0` or `$8` to its index.
///
/// Returns `None` for anything that is not exactly one of the recognized
/// spellings (the `$` prefix is mandatory and numeric forms must be canonical).
///
/// ```
/// use mipsim_core::isa::abi::register_index;
///
/// assert_eq!(register_index("$t0"), Some(8));
/// assert_eq!(register_index("$31"), Some(31));
/// assert_eq!(register_index("$08"), None);
/// assert_eq!(register_index("t0"), None);
/// ```
pub fn register_index(token: &str) -> Option<usize> {
    let name = token.strip_prefix('$')?;
    if let Some(idx) = ABI_NAMES.iter().position(|abi| *abi == name) {
        return Some(idx);
    }
    let idx: usize = name.parse().ok()?;
    (idx < NUM_REGISTERS && idx.to_string() == name).then_some(idx)
}
