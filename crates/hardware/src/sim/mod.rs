//! Simulation front end.
//!
//! Provides the following:
//! 1. **Loading:** Parsing assembly source into a [`program::Program`].
//! 2. **Running:** The cycle loop and its per-cycle reports.
//! 3. **Checking:** A sequential reference interpreter and branch-trace replay.

/// Assembly source parsing.
pub mod loader;
/// Program store.
pub mod program;
/// Sequential reference interpreter.
pub mod reference;
/// Per-cycle report format.
pub mod report;
/// Run loop.
pub mod simulator;
/// Branch-trace parsing and predictor replay.
pub mod trace;

pub use self::loader::{load_program, parse_program};
pub use self::program::Program;
pub use self::report::CycleReport;
pub use self::simulator::{Outcome, Simulator};
