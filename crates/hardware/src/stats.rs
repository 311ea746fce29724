//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for a pipeline run. It provides:
//! 1. **Cycle and CPI:** Total cycles, retired instructions, and derived ratios.
//! 2. **Instruction mix:** Counts by class (ALU, load, store, branch, jump).
//! 3. **Stalls:** Load-use (data) and outstanding-control-transfer (control) stall cycles.
//! 4. **Branch prediction:** Correct predictions, mispredictions and squashed instructions.

use std::fmt;
use std::time::Instant;

use crate::isa::{InstClass, Mnemonic};

/// Simulation statistics structure.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulated cycles.
    pub cycles: u64,
    /// Number of instructions retired at writeback.
    pub instructions_retired: u64,

    /// Register arithmetic and immediate arithmetic instructions retired.
    pub inst_alu: u64,
    /// Loads retired.
    pub inst_load: u64,
    /// Stores retired.
    pub inst_store: u64,
    /// Conditional branches retired.
    pub inst_branch: u64,
    /// Jumps retired.
    pub inst_jump: u64,

    /// Cycles decode held an instruction waiting on a load result.
    pub stalls_data: u64,
    /// Cycles fetch was suspended behind an outstanding branch or jump.
    pub stalls_control: u64,

    /// Conditional branches whose predicted direction was correct.
    pub branch_predictions: u64,
    /// Conditional branches whose predicted direction was wrong.
    pub branch_mispredictions: u64,
    /// Wrong-path instructions discarded after mispredictions.
    pub squashed: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_jump: 0,
            stalls_data: 0,
            stalls_control: 0,
            branch_predictions: 0,
            branch_mispredictions: 0,
            squashed: 0,
        }
    }
}

impl SimStats {
    /// Counts one retired instruction by class.
    pub const fn record_retire(&mut self, mnemonic: Mnemonic) {
        self.instructions_retired += 1;
        match mnemonic.class() {
            InstClass::ArithReg | InstClass::ArithImm => self.inst_alu += 1,
            InstClass::Branch => self.inst_branch += 1,
            InstClass::Jump => self.inst_jump += 1,
            InstClass::Memory => {
                if matches!(mnemonic, Mnemonic::Lw) {
                    self.inst_load += 1;
                } else {
                    self.inst_store += 1;
                }
            }
        }
    }

    /// Cycles per retired instruction (0 when nothing retired).
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Fraction of resolved conditional branches that were predicted correctly.
    pub fn prediction_accuracy(&self) -> Option<f64> {
        let total = self.branch_predictions + self.branch_mispredictions;
        (total != 0).then(|| self.branch_predictions as f64 / total as f64)
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let pct = |n: u64| {
            if self.instructions_retired == 0 {
                0.0
            } else {
                n as f64 / self.instructions_retired as f64 * 100.0
            }
        };
        writeln!(f, "==========================================================")?;
        writeln!(f, "MIPS PIPELINE SIMULATION STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "host_seconds             {seconds:.4} s")?;
        writeln!(f, "sim_cycles               {}", self.cycles)?;
        writeln!(f, "sim_insts                {}", self.instructions_retired)?;
        writeln!(f, "sim_cpi                  {:.4}", self.cpi())?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "INSTRUCTION MIX")?;
        writeln!(f, "  op.alu                 {} ({:.2}%)", self.inst_alu, pct(self.inst_alu))?;
        writeln!(f, "  op.load                {} ({:.2}%)", self.inst_load, pct(self.inst_load))?;
        writeln!(f, "  op.store               {} ({:.2}%)", self.inst_store, pct(self.inst_store))?;
        writeln!(f, "  op.branch              {} ({:.2}%)", self.inst_branch, pct(self.inst_branch))?;
        writeln!(f, "  op.jump                {} ({:.2}%)", self.inst_jump, pct(self.inst_jump))?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "PIPELINE STALLS")?;
        writeln!(f, "  stall.data             {}", self.stalls_data)?;
        writeln!(f, "  stall.control          {}", self.stalls_control)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "BRANCH PREDICTION")?;
        writeln!(f, "  bp.correct             {}", self.branch_predictions)?;
        writeln!(f, "  bp.mispredict          {}", self.branch_mispredictions)?;
        match self.prediction_accuracy() {
            Some(acc) => writeln!(f, "  bp.accuracy            {:.2}%", acc * 100.0)?,
            None => writeln!(f, "  bp.accuracy            n/a")?,
        }
        writeln!(f, "  bp.squashed            {}", self.squashed)?;
        writeln!(f, "==========================================================")
    }
}
