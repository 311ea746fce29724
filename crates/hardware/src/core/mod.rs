//! Core processor implementation.
//!
//! This module contains the simulated processor: the owned CPU state, the
//! five-stage pipeline that advances it, the architectural register file and
//! the functional units (ALU and branch predictors).

/// Architectural register file.
pub mod arch;

/// CPU state container and data memory.
pub mod cpu;

/// Instruction pipeline implementation (engine, stages, latches, hazards, scoreboard, signals).
pub mod pipeline;

/// Functional units (ALU, branch predictors).
pub mod units;

pub use self::cpu::Cpu;
