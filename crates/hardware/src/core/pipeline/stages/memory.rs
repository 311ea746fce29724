//! Memory Access (MEM) Stage.
//!
//! This module implements the fourth stage of the pipeline. It performs the following:
//! 1. **Loads:** Reads the addressed word and publishes it for forwarding.
//! 2. **Stores:** Writes the addressed word (logging it in the memory delta if the
//!    value changed) and marks the store complete.
//! 3. **Control Resolution:** Marks branches and jumps complete, which releases a
//!    stalled fetch, and redirects fetch to the taken target. Under the predict
//!    policy it trains the predictor and recovers from mispredictions.

use tracing::{debug, trace};

use crate::common::constants::WORD_BYTES;
use crate::common::error::SimError;
use crate::config::ControlPolicy;
use crate::core::Cpu;
use crate::core::pipeline::latches::{ExMemEntry, MemWbEntry};
use crate::core::units::bru::BranchPredictor;

/// Executes the memory access stage.
///
/// # Errors
///
/// Returns [`SimError::InvalidAddress`] if the effective address has no backing word.
pub fn mem_stage(cpu: &mut Cpu) -> Result<(), SimError> {
    let Some(ex) = cpu.ex_mem.take() else {
        return Ok(());
    };

    let word = ex.alu as usize / WORD_BYTES;
    let mut load_data = 0;

    if ex.ctrl.mem_read {
        load_data = cpu
            .memory
            .read(word)
            .ok_or_else(|| invalid_address(cpu, ex.index))?;
        cpu.scoreboard.publish(ex.seq, load_data);
        trace!("MEM {} idx={} load [{word}] -> {load_data}", ex.seq, ex.index);
    } else if ex.ctrl.mem_write {
        cpu.memory
            .write(word, ex.store_data)
            .ok_or_else(|| invalid_address(cpu, ex.index))?;
        cpu.scoreboard.complete(ex.seq);
        trace!("MEM {} idx={} store [{word}] <- {}", ex.seq, ex.index, ex.store_data);
    } else if ex.ctrl.branch {
        cpu.scoreboard.complete(ex.seq);
        resolve_control(cpu, &ex);
    }

    cpu.mem_wb = Some(MemWbEntry {
        seq: ex.seq,
        index: ex.index,
        mnemonic: ex.mnemonic,
        ctrl: ex.ctrl,
        alu: ex.alu,
        load_data,
        rd: ex.rd,
    });
    Ok(())
}

fn invalid_address(cpu: &Cpu, index: usize) -> SimError {
    SimError::InvalidAddress {
        tokens: cpu
            .program
            .get(index)
            .map(|inst| inst.tokens.clone())
            .unwrap_or_default(),
    }
}

/// Applies a resolved branch or jump to the fetch index.
fn resolve_control(cpu: &mut Cpu, ex: &ExMemEntry) {
    let taken = ex.zero;
    let correct_next = if taken { ex.target } else { ex.index + 1 };
    trace!("MEM {} idx={} resolved taken={taken} next={correct_next}", ex.seq, ex.index);

    match cpu.policy {
        ControlPolicy::Stall => {
            if taken {
                cpu.pc = correct_next;
            }
        }
        ControlPolicy::Predict => {
            let conditional = ex.mnemonic.is_some_and(|m| m.is_conditional_branch());
            if !conditional {
                return;
            }
            cpu.branch_predictor.update(ex.index as u32, taken);
            if taken == ex.pred_taken {
                cpu.stats.branch_predictions += 1;
                return;
            }
            cpu.stats.branch_mispredictions += 1;
            cpu.if_id = None;
            cpu.id_ex = None;
            let squashed = cpu.scoreboard.squash_younger(ex.seq);
            cpu.stats.squashed += squashed as u64;
            cpu.pc = correct_next;
            debug!(
                "MEM {} idx={} mispredicted, squashed {squashed}, refetch at {correct_next}",
                ex.seq, ex.index
            );
        }
    }
}
