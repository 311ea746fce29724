//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! entire simulation state. It owns the following:
//! 1. **Architectural State:** Register file, data memory and the fetch index.
//! 2. **Pipeline Control:** The four inter-stage latches and the scoreboard.
//! 3. **Control Policy:** The active control-hazard policy and its branch predictor.
//!
//! Every stage function takes `&mut Cpu`, so a simulation is one owned value
//! that can be built and stepped in isolation.

/// Word-addressed data memory with change tracking.
pub mod memory;

use std::sync::Arc;

use crate::common::error::ConfigError;
use crate::config::{Config, ControlPolicy};
use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry};
use crate::core::pipeline::scoreboard::Scoreboard;
use crate::core::units::bru::BranchPredictorWrapper;
use crate::sim::program::Program;
use crate::stats::SimStats;

use self::memory::DataMemory;

/// Main CPU structure containing all processor state and components.
#[derive(Debug)]
pub struct Cpu {
    /// Program store, shared read-only.
    pub program: Arc<Program>,
    /// General purpose registers.
    pub regs: Gpr,
    /// Data memory.
    pub memory: DataMemory,
    /// In-flight producers, pending results and the control-transfer marker.
    pub scoreboard: Scoreboard,

    /// IF/ID Latch.
    pub if_id: Option<IfIdEntry>,
    /// ID/EX Latch.
    pub id_ex: Option<IdExEntry>,
    /// EX/MEM Latch.
    pub ex_mem: Option<ExMemEntry>,
    /// MEM/WB Latch.
    pub mem_wb: Option<MemWbEntry>,

    /// Program index of the next instruction to fetch.
    pub pc: usize,
    /// Control-hazard policy.
    pub policy: ControlPolicy,
    /// Branch Predictor Unit (consulted only under [`ControlPolicy::Predict`]).
    pub branch_predictor: BranchPredictorWrapper,
    /// Memory size in bytes, the upper bound for data addresses.
    pub memory_bytes: usize,

    /// Performance statistics.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a CPU with empty latches, zeroed registers and zeroed memory.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid.
    pub fn new(program: Arc<Program>, config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let branch_predictor = BranchPredictorWrapper::new(&config.pipeline)?;

        Ok(Self {
            program,
            regs: Gpr::new(),
            memory: DataMemory::new(config.memory.size_bytes),
            scoreboard: Scoreboard::new(),
            if_id: None,
            id_ex: None,
            ex_mem: None,
            mem_wb: None,
            pc: 0,
            policy: config.pipeline.control_policy,
            branch_predictor,
            memory_bytes: config.memory.size_bytes,
            stats: SimStats::default(),
        })
    }

    /// True when every latch is a bubble.
    pub const fn latches_empty(&self) -> bool {
        self.if_id.is_none() && self.id_ex.is_none() && self.ex_mem.is_none() && self.mem_wb.is_none()
    }

    /// True once all instructions have left the pipeline and fetch is past the program.
    pub fn is_drained(&self) -> bool {
        self.latches_empty() && self.pc >= self.program.len()
    }

    /// One-line picture of which instruction occupies each stage, for trace output.
    pub fn pipeline_diagram(&self) -> String {
        fn slot(index: Option<usize>) -> String {
            index.map_or_else(|| "--".to_owned(), |i| i.to_string())
        }
        format!(
            "IF/ID[{}] ID/EX[{}] EX/MEM[{}] MEM/WB[{}] pc={}",
            slot(self.if_id.map(|e| e.index)),
            slot(self.id_ex.as_ref().map(|e| e.index)),
            slot(self.ex_mem.map(|e| e.index)),
            slot(self.mem_wb.map(|e| e.index)),
            self.pc
        )
    }
}
