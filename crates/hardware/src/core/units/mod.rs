//! Execution units and functional components.
//!
//! This module contains the ALU used by the Execute stage and the branch
//! prediction unit used by the speculative control policy.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch prediction unit: direction predictors and their shared counter.
pub mod bru;
