//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the records handed between the five stages:
//! Fetch → Decode → Execute → Memory → Writeback.
//!
//! Each latch holds at most one instruction (`None` is a bubble). Stages run
//! in reverse order within a cycle, so every latch is consumed before its
//! producer stage overwrites it.

use crate::common::error::SimError;
use crate::core::pipeline::scoreboard::Seq;
use crate::core::pipeline::signals::ControlSignals;
use crate::isa::Mnemonic;

/// Entry in the IF/ID latch (Fetch to Decode).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct IfIdEntry {
    /// Sequence number assigned at fetch.
    pub seq: Seq,
    /// Program index of the instruction.
    pub index: usize,
    /// Fetch predicted this control transfer as taken (speculative policy only).
    pub pred_taken: bool,
}

/// Entry in the ID/EX latch (Decode to Execute).
#[derive(Debug, Default)]
pub struct IdExEntry {
    /// Sequence number.
    pub seq: Seq,
    /// Program index.
    pub index: usize,
    /// Operation, selecting the semantic function in execute.
    pub mnemonic: Option<Mnemonic>,
    /// Control signals from the control decoder.
    pub ctrl: ControlSignals,
    /// First operand value (resolved register, or address base).
    pub rv1: i32,
    /// Second operand value (resolved register; store data for `sw`).
    pub rv2: i32,
    /// Immediate: literal operand or address offset.
    pub imm: i32,
    /// Branch or jump target index.
    pub target: usize,
    /// Destination register, if the instruction writes one.
    pub rd: Option<usize>,
    /// Fetch predicted this control transfer as taken.
    pub pred_taken: bool,
    /// Decode error deferred until the instruction is known to be on the correct path.
    pub fault: Option<SimError>,
}

/// Entry in the EX/MEM latch (Execute to Memory).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct ExMemEntry {
    /// Sequence number.
    pub seq: Seq,
    /// Program index.
    pub index: usize,
    /// Operation.
    pub mnemonic: Option<Mnemonic>,
    /// Control signals.
    pub ctrl: ControlSignals,
    /// ALU result (effective byte address for loads and stores).
    pub alu: i32,
    /// ALU result was zero; for a control transfer, the transfer is taken.
    pub zero: bool,
    /// Value a store writes.
    pub store_data: i32,
    /// Branch or jump target index.
    pub target: usize,
    /// Destination register.
    pub rd: Option<usize>,
    /// Fetch predicted this control transfer as taken.
    pub pred_taken: bool,
}

/// Entry in the MEM/WB latch (Memory to Writeback).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct MemWbEntry {
    /// Sequence number.
    pub seq: Seq,
    /// Program index.
    pub index: usize,
    /// Operation.
    pub mnemonic: Option<Mnemonic>,
    /// Control signals.
    pub ctrl: ControlSignals,
    /// ALU result.
    pub alu: i32,
    /// Data read by a load.
    pub load_data: i32,
    /// Destination register.
    pub rd: Option<usize>,
}
