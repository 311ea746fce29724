//! Instruction Execute (EX) Stage.
//!
//! This module implements the third stage of the pipeline. It selects the
//! second ALU input (register or immediate), runs the instruction's semantic
//! function, and publishes the result to the scoreboard so younger
//! instructions can forward it. Loads publish only after memory access.

use tracing::trace;

use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::pipeline::latches::ExMemEntry;
use crate::core::units::alu::Alu;

/// Executes the instruction execute stage.
///
/// # Errors
///
/// Returns the decode fault carried by the ID/EX entry, if any.
pub fn execute_stage(cpu: &mut Cpu) -> Result<(), SimError> {
    let Some(id) = cpu.id_ex.take() else {
        return Ok(());
    };
    if let Some(fault) = id.fault {
        return Err(fault);
    }
    let Some(mnemonic) = id.mnemonic else {
        return Ok(());
    };

    let op_b = if id.ctrl.alu_src { id.imm } else { id.rv2 };
    let alu = Alu::execute(mnemonic, id.rv1, op_b);
    let zero = alu == 0;

    if !id.ctrl.mem_read {
        cpu.scoreboard.publish(id.seq, alu);
    }

    trace!("EX  {} idx={} {mnemonic} alu={alu} zero={zero}", id.seq, id.index);

    cpu.ex_mem = Some(ExMemEntry {
        seq: id.seq,
        index: id.index,
        mnemonic: Some(mnemonic),
        ctrl: id.ctrl,
        alu,
        zero,
        store_data: id.rv2,
        target: id.target,
        rd: id.rd,
        pred_taken: id.pred_taken,
    });
    Ok(())
}
