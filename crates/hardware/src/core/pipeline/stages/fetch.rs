//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the instruction pipeline.
//! It assigns each fetched instruction the next sequence number and chooses
//! the next fetch index. Under the stall policy it holds fetch while a branch
//! or jump is unresolved; under the predict policy it consults the branch
//! predictor and follows the predicted path.

use tracing::{debug, trace};

use crate::config::ControlPolicy;
use crate::core::Cpu;
use crate::core::pipeline::latches::IfIdEntry;
use crate::core::units::bru::BranchPredictor;
use crate::isa::InstClass;

/// Executes the instruction fetch stage of the pipeline.
///
/// Does nothing when decode is still holding the previous instruction, when
/// the fetch index is past the program, or when the stall policy is waiting
/// on an outstanding control transfer.
pub fn fetch_stage(cpu: &mut Cpu) {
    if cpu.if_id.is_some() || cpu.pc >= cpu.program.len() {
        return;
    }

    if cpu.policy == ControlPolicy::Stall && cpu.scoreboard.control_pending() {
        cpu.stats.stalls_control += 1;
        debug!(
            "IF  stall: waiting on control transfer {}",
            cpu.scoreboard.control().unwrap_or_default()
        );
        return;
    }

    let index = cpu.pc;
    let seq = cpu.scoreboard.allocate(index);
    let (next, pred_taken) = match cpu.policy {
        ControlPolicy::Stall => (index + 1, false),
        ControlPolicy::Predict => predict_next(cpu, index),
    };

    trace!("IF  {seq} idx={index} next={next}");
    cpu.pc = next;
    cpu.if_id = Some(IfIdEntry {
        seq,
        index,
        pred_taken,
    });
}

/// Next fetch index on the predicted path, and whether the transfer was predicted taken.
///
/// Jumps are always taken. A label that does not resolve falls through; the
/// instruction then faults when it is decoded.
fn predict_next(cpu: &Cpu, index: usize) -> (usize, bool) {
    let Some(inst) = cpu.program.get(index) else {
        return (index + 1, false);
    };
    let taken = match inst.mnemonic.class() {
        InstClass::Jump => true,
        InstClass::Branch => cpu.branch_predictor.predict(index as u32),
        _ => false,
    };
    let target = inst
        .label()
        .and_then(|label| cpu.program.resolve_label(label));
    match target {
        Some(target) if taken => (target, true),
        _ => (index + 1, false),
    }
}
