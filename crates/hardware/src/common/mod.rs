//! Common types and constants shared throughout the simulator.
//!
//! This module provides the building blocks used by every other component:
//! 1. **Constants:** Register count, word size, memory and predictor geometry.
//! 2. **Error Handling:** The fatal error taxonomy and its exit codes.

/// Simulator-wide constants.
pub mod constants;

/// Error types and exit codes.
pub mod error;

pub use constants::{NUM_REGISTERS, WORD_BYTES};
pub use error::{ConfigError, ExitCode, SimError, TraceError};
