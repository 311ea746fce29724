//! Global Simulator Constants.
//!
//! This module defines the machine-wide constants shared by the loader, the
//! pipeline and the reference interpreter. It includes:
//! 1. **Register Constants:** Architectural register count.
//! 2. **Memory Constants:** Word size and the default data memory size.
//! 3. **Predictor Constants:** Table geometry for the branch predictor family.

/// Number of architectural general-purpose registers.
pub const NUM_REGISTERS: usize = 32;

/// Size of one memory word in bytes; every data address must be a multiple of this.
pub const WORD_BYTES: usize = 4;

/// Default data memory size in bytes (1 MiB).
pub const DEFAULT_MEMORY_BYTES: usize = 1 << 20;

/// Number of PC bits used to index per-branch predictor tables.
pub const PC_INDEX_BITS: u32 = 14;

/// Mask selecting the PC bits used as a predictor table index (`0x3FFF`).
pub const PC_INDEX_MASK: u32 = (1 << PC_INDEX_BITS) - 1;

/// Number of outcomes held in the branch-history shift register.
pub const HISTORY_BITS: u32 = 2;

/// Mask selecting the valid bits of the branch-history shift register.
pub const HISTORY_MASK: u8 = (1 << HISTORY_BITS) - 1;

/// Largest table the combined PC+history predictor may be built with.
pub const MAX_COMBINED_TABLE: usize = 1 << 16;

/// Largest value a 2-bit saturating counter can hold.
pub const COUNTER_MAX: u8 = 3;
