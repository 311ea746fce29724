//! MIPS architectural state.
//!
//! Holds the programmer-visible register file. Data memory lives with the
//! CPU state object because it also carries the per-cycle change log.

/// General-Purpose Register file implementation.
pub mod gpr;
