//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the instruction pipeline.
//! It commits the selected result to the register file, retires the
//! instruction's sequence number from the scoreboard, and updates
//! performance statistics.

use tracing::trace;

use crate::core::Cpu;

/// Executes the writeback stage of the pipeline.
///
/// The committed value is the load data when `MemToReg` is set and the ALU
/// result otherwise. Retiring clears the destination's producer only if no
/// younger writer has claimed it since.
pub fn wb_stage(cpu: &mut Cpu) {
    let Some(wb) = cpu.mem_wb.take() else {
        return;
    };

    if wb.ctrl.reg_write {
        let value = if wb.ctrl.mem_to_reg { wb.load_data } else { wb.alu };
        if let Some(rd) = wb.rd {
            cpu.regs.write(rd, value);
            trace!("WB  {} idx={} r{rd} <- {value}", wb.seq, wb.index);
        }
    } else {
        trace!("WB  {} idx={}", wb.seq, wb.index);
    }

    cpu.scoreboard.complete(wb.seq);
    cpu.scoreboard.retire(wb.seq);
    if let Some(mnemonic) = wb.mnemonic {
        cpu.stats.record_retire(mnemonic);
    }
}
