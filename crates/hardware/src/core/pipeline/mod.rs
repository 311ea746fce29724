//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the five-stage instruction pipeline.
//! It includes the following components:
//! 1. **Engine:** The per-cycle tick that evaluates the stages in reverse order.
//! 2. **Hazards:** Operand resolution, forwarding and load-use stall detection.
//! 3. **Latches:** Inter-stage buffers for communication between pipeline stages.
//! 4. **Scoreboard:** Sequence-number keyed producer tracking and pending results.
//! 5. **Signals:** Control signals generated during instruction decoding.
//! 6. **Stages:** Implementation of Fetch, Decode, Execute, Memory, and Writeback stages.

/// Per-cycle stage evaluation.
pub mod engine;

/// Operand resolution and data hazard detection.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

/// In-flight instruction tracking for forwarding and control stalls.
pub mod scoreboard;

/// Control signals generated during instruction decode.
pub mod signals;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;
