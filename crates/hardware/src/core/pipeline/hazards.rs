//! Operand Resolution and Forwarding.
//!
//! This module turns a fetched instruction into the values the execute stage
//! needs. It provides:
//! 1. **Forwarding:** Source registers are read through the scoreboard, so a value
//!    still in flight is taken from its producer's pending-result slot instead of
//!    the stale register file.
//! 2. **Hazard Detection:** An operand whose producer has not computed its result
//!    yet (a load still in execute) stalls decode for a cycle.
//! 3. **Address and Label Checks:** Base+offset addresses are computed and
//!    validated, and branch and jump labels are resolved to program indices.

use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::cpu::memory::data_word_index;
use crate::core::pipeline::latches::{IdExEntry, IfIdEntry};
use crate::core::pipeline::scoreboard::{Operand, Seq};
use crate::core::pipeline::signals::ControlSignals;
use crate::isa::instruction::parse_literal;
use crate::isa::{Address, Instruction, Mnemonic, Operands};

/// Outcome of resolving one instruction's operands.
#[derive(Debug)]
pub enum Resolution {
    /// All operands are known; the entry is ready for execute.
    Ready(IdExEntry),
    /// An operand's producer has not computed its value yet.
    Stall(Seq),
}

/// Reads `reg` through the scoreboard.
fn operand(cpu: &Cpu, reg: usize) -> Operand {
    cpu.scoreboard.read(reg, cpu.regs.read(reg))
}

/// Resolves the operands of `inst` fetched as `fetched`.
///
/// Register operands are forwarded from in-flight producers when possible.
/// Returns [`Resolution::Stall`] naming the blocking producer if any operand
/// is still pending. Label and offset checks run before the operand reads, so
/// a malformed instruction fails on its first decode attempt.
///
/// # Errors
///
/// * [`SimError::InvalidLabel`] for an undefined or duplicated label.
/// * [`SimError::Syntax`] for a non-numeric address offset.
/// * [`SimError::InvalidAddress`] for an effective address that is unaligned,
///   inside the program footprint, or past the memory bound.
pub fn resolve(cpu: &Cpu, inst: &Instruction, fetched: IfIdEntry) -> Result<Resolution, SimError> {
    let tokens = || inst.tokens.clone();
    let mut entry = IdExEntry {
        seq: fetched.seq,
        index: fetched.index,
        mnemonic: Some(inst.mnemonic),
        ctrl: ControlSignals::decode(inst.mnemonic),
        rd: inst.dest(),
        pred_taken: fetched.pred_taken,
        ..IdExEntry::default()
    };

    let (a, b) = match &inst.operands {
        Operands::ArithReg { rs, rt, .. } => (operand(cpu, *rs), operand(cpu, *rt)),
        Operands::ArithImm { rs, imm, .. } => {
            entry.imm = *imm;
            (operand(cpu, *rs), Operand::Committed(*imm))
        }
        Operands::Branch { rs, rt, label } => {
            entry.target = cpu
                .program
                .resolve_label(label)
                .ok_or_else(|| SimError::InvalidLabel { tokens: tokens() })?;
            (operand(cpu, *rs), operand(cpu, *rt))
        }
        Operands::Jump { label } => {
            entry.target = cpu
                .program
                .resolve_label(label)
                .ok_or_else(|| SimError::InvalidLabel { tokens: tokens() })?;
            (Operand::Committed(0), Operand::Committed(0))
        }
        Operands::Memory { rt, address } => {
            let (base, offset) = match address {
                Address::Literal(addr) => (Operand::Committed(0), *addr as i32),
                Address::BaseOffset { base, offset } => {
                    let offset = if offset.is_empty() {
                        0
                    } else {
                        parse_literal(offset).ok_or_else(|| SimError::Syntax { tokens: tokens() })?
                    };
                    (operand(cpu, *base), offset)
                }
            };
            entry.imm = offset;
            // `rt` is a source only for stores; a load overwrites it.
            let value = if inst.mnemonic == Mnemonic::Sw {
                operand(cpu, *rt)
            } else {
                Operand::Committed(0)
            };
            (base, value)
        }
    };

    let (Some(rv1), Some(rv2)) = (a.value(), b.value()) else {
        let producer = match (a, b) {
            (Operand::Pending(seq), _) | (_, Operand::Pending(seq)) => seq,
            _ => Seq::default(),
        };
        return Ok(Resolution::Stall(producer));
    };
    entry.rv1 = rv1;
    entry.rv2 = rv2;

    if matches!(inst.operands, Operands::Memory { .. }) {
        let addr = i64::from(rv1) + i64::from(entry.imm);
        if data_word_index(addr, cpu.program.len(), cpu.memory_bytes).is_none() {
            return Err(SimError::InvalidAddress { tokens: tokens() });
        }
    }

    Ok(Resolution::Ready(entry))
}
