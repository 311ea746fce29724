//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the pipeline. It performs the following:
//! 1. **Control Generation:** Derives the control signals from the mnemonic.
//! 2. **Register Read:** Resolves source operands through the scoreboard (forwarding).
//! 3. **Hazard Detection:** Holds the instruction in IF/ID for a cycle when an
//!    operand's producer is a load that has not reached memory yet.
//! 4. **Scoreboard Update:** Claims the destination register and, for branches
//!    and jumps under the stall policy, the control-transfer marker.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::common::error::SimError;
use crate::config::ControlPolicy;
use crate::core::Cpu;
use crate::core::pipeline::hazards::{self, Resolution};
use crate::core::pipeline::latches::IdExEntry;

/// Executes the instruction decode stage.
///
/// # Errors
///
/// Under the stall policy, any operand resolution error is returned at once.
/// Under the predict policy the error is parked in the ID/EX entry and raised
/// by execute, since the instruction may be on a wrong path.
pub fn decode_stage(cpu: &mut Cpu) -> Result<(), SimError> {
    let Some(fetched) = cpu.if_id else {
        return Ok(());
    };
    let program = Arc::clone(&cpu.program);
    let Some(inst) = program.get(fetched.index) else {
        cpu.if_id = None;
        return Ok(());
    };

    let entry = match hazards::resolve(cpu, inst, fetched) {
        Ok(Resolution::Ready(entry)) => entry,
        Ok(Resolution::Stall(producer)) => {
            cpu.stats.stalls_data += 1;
            debug!(
                "ID  stall: {} idx={} waits on {producer}",
                fetched.seq, fetched.index
            );
            return Ok(());
        }
        Err(err) if cpu.policy == ControlPolicy::Predict => {
            debug!("ID  {} idx={} deferred fault: {err}", fetched.seq, fetched.index);
            IdExEntry {
                seq: fetched.seq,
                index: fetched.index,
                fault: Some(err),
                ..IdExEntry::default()
            }
        }
        Err(err) => return Err(err),
    };

    if entry.fault.is_none() {
        if let Some(rd) = entry.rd {
            cpu.scoreboard.set_producer(rd, entry.seq);
        }
        if entry.ctrl.branch && cpu.policy == ControlPolicy::Stall {
            cpu.scoreboard.set_control(entry.seq);
        }
        trace!(
            "ID  {} idx={} {inst} rv1={} rv2={} imm={}",
            entry.seq, entry.index, entry.rv1, entry.rv2, entry.imm
        );
    }

    cpu.if_id = None;
    cpu.id_ex = Some(entry);
    Ok(())
}
