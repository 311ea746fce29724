//! Cycle-stepped five-stage MIPS pipeline simulator.
//!
//! This crate simulates a classic five-stage pipeline running a small MIPS subset with
//! the following:
//! 1. **Core:** Fetch, decode, execute, memory and writeback stages over shared latches,
//!    evaluated in reverse order each cycle.
//! 2. **Forwarding:** A scoreboard keyed by instruction sequence number that supplies
//!    in-flight results to younger instructions.
//! 3. **Control Hazards:** A stall policy that holds fetch behind branches and jumps, and a
//!    predict policy driven by interchangeable branch predictors.
//! 4. **ISA:** Ten mnemonics (`add sub mul slt addi beq bne j lw sw`) and the register ABI.
//! 5. **Simulation:** Loader, run loop with bit-exact per-cycle reports, a reference
//!    interpreter, branch-trace replay, configuration and statistics.
//!
//! ```
//! use mipsim_core::{Config, Simulator, parse_program};
//!
//! let program = parse_program("addi $t0, $zero, 5\nadd $t1, $t0, $t0\n", 1 << 20).unwrap();
//! let mut sim = Simulator::new(program, &Config::default()).unwrap();
//! let mut out = Vec::new();
//! let outcome = sim.run(&mut out).unwrap();
//! assert_eq!(outcome.cycles(), 6);
//! assert_eq!(sim.cpu.regs.read(9), 10);
//! ```

/// Common types and constants (errors, exit codes, sizes).
pub mod common;
/// Simulator configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// CPU core (pipeline, register file, memory, functional units).
pub mod core;
/// Instruction set (mnemonics, operand shapes, register ABI).
pub mod isa;
/// Program loading, run loop, reports, reference interpreter and trace replay.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main CPU type; holds registers, memory, latches, scoreboard and stats.
pub use crate::core::Cpu;
/// Error taxonomy and exit codes.
pub use crate::common::{ConfigError, ExitCode, SimError};
/// Program loading entry points.
pub use crate::sim::{Program, load_program, parse_program};
/// Run loop and report types.
pub use crate::sim::{CycleReport, Outcome, Simulator};
