//! # Stage Function Tests
//!
//! Drives each stage on hand-built latches to check what it reads, what it
//! writes and what it records in the scoreboard.

use std::sync::Arc;

use crate::common::harness::program;
use mipsim_core::config::Config;
use mipsim_core::core::Cpu;
use mipsim_core::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry};
use mipsim_core::core::pipeline::signals::ControlSignals;
use mipsim_core::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage,
};
use mipsim_core::isa::Mnemonic;
use mipsim_core::ExitCode;

fn cpu(source: &str) -> Cpu {
    Cpu::new(Arc::new(program(source)), &Config::default()).expect("valid config")
}

fn fetched(cpu: &mut Cpu, index: usize) -> IfIdEntry {
    IfIdEntry {
        seq: cpu.scoreboard.allocate(index),
        index,
        pred_taken: false,
    }
}

// ══════════════════════════════════════════════════════════
// 1. Fetch
// ══════════════════════════════════════════════════════════

#[test]
fn fetch_assigns_sequence_and_advances() {
    let mut cpu = cpu("add $t0, $t0, $t0\nadd $t0, $t0, $t0\n");
    fetch_stage(&mut cpu);
    let entry = cpu.if_id.expect("fetched");
    assert_eq!(entry.index, 0);
    assert_eq!(entry.seq.0, 1);
    assert_eq!(cpu.pc, 1);
}

#[test]
fn fetch_waits_for_decode() {
    let mut cpu = cpu("add $t0, $t0, $t0\nadd $t0, $t0, $t0\n");
    fetch_stage(&mut cpu);
    fetch_stage(&mut cpu);
    assert_eq!(cpu.pc, 1, "IF/ID still occupied");
}

#[test]
fn fetch_blocked_by_outstanding_branch() {
    let mut cpu = cpu("j end\nend: add $t0, $t0, $t0\n");
    let br = cpu.scoreboard.allocate(0);
    cpu.scoreboard.set_control(br);
    cpu.pc = 1;
    fetch_stage(&mut cpu);
    assert!(cpu.if_id.is_none());
    assert_eq!(cpu.stats.stalls_control, 1);

    cpu.scoreboard.complete(br);
    fetch_stage(&mut cpu);
    assert!(cpu.if_id.is_some());
}

#[test]
fn fetch_past_end_is_a_bubble() {
    let mut cpu = cpu("add $t0, $t0, $t0\n");
    cpu.pc = 1;
    fetch_stage(&mut cpu);
    assert!(cpu.if_id.is_none());
    assert!(cpu.is_drained());
}

// ══════════════════════════════════════════════════════════
// 2. Decode
// ══════════════════════════════════════════════════════════

#[test]
fn decode_reads_registers_and_claims_destination() {
    let mut cpu = cpu("add $t2, $t0, $t1\n");
    cpu.regs.write(8, 3);
    cpu.regs.write(9, 4);
    let f = fetched(&mut cpu, 0);
    cpu.if_id = Some(f);
    decode_stage(&mut cpu).expect("decodes");
    let id = cpu.id_ex.as_ref().expect("issued");
    assert_eq!((id.rv1, id.rv2, id.rd), (3, 4, Some(10)));
    assert_eq!(id.ctrl, ControlSignals::decode(Mnemonic::Add));
    assert_eq!(cpu.scoreboard.producer(10), Some(f.seq));
    assert!(cpu.if_id.is_none());
}

#[test]
fn decode_forwards_published_result() {
    let mut cpu = cpu("addi $t0, $zero, 1\nadd $t1, $t0, $t0\n");
    let producer = cpu.scoreboard.allocate(0);
    cpu.scoreboard.set_producer(8, producer);
    cpu.scoreboard.publish(producer, 21);
    cpu.if_id = Some(fetched(&mut cpu, 1));
    decode_stage(&mut cpu).expect("decodes");
    let id = cpu.id_ex.as_ref().expect("issued");
    assert_eq!((id.rv1, id.rv2), (21, 21));
}

#[test]
fn decode_stalls_on_unpublished_load() {
    let mut cpu = cpu("lw $t0, 2048($zero)\nadd $t1, $t0, $t0\n");
    let load = cpu.scoreboard.allocate(0);
    cpu.scoreboard.set_producer(8, load);
    let f = fetched(&mut cpu, 1);
    cpu.if_id = Some(f);
    decode_stage(&mut cpu).expect("no error");
    assert!(cpu.id_ex.is_none());
    assert_eq!(cpu.if_id, Some(f));
    assert_eq!(cpu.stats.stalls_data, 1);
    assert_eq!(cpu.scoreboard.producer(9), None);
}

#[test]
fn decode_registers_control_transfer() {
    let mut cpu = cpu("x: beq $t0, $t1, x\n");
    let f = fetched(&mut cpu, 0);
    cpu.if_id = Some(f);
    decode_stage(&mut cpu).expect("decodes");
    assert_eq!(cpu.scoreboard.control(), Some(f.seq));
    assert_eq!(cpu.id_ex.as_ref().map(|e| e.target), Some(0));
}

#[test]
fn decode_never_claims_zero_register() {
    let mut cpu = cpu("addi $zero, $zero, 1\n");
    cpu.if_id = Some(fetched(&mut cpu, 0));
    decode_stage(&mut cpu).expect("decodes");
    assert_eq!(cpu.scoreboard.producer(0), None);
}

#[test]
fn decode_error_is_immediate_under_stall_policy() {
    let mut cpu = cpu("j missing\n");
    cpu.if_id = Some(fetched(&mut cpu, 0));
    let err = decode_stage(&mut cpu).unwrap_err();
    assert_eq!(err.exit_code(), ExitCode::InvalidLabel);
}

// ══════════════════════════════════════════════════════════
// 3. Execute
// ══════════════════════════════════════════════════════════

#[test]
fn execute_publishes_alu_result() {
    let mut cpu = cpu("sub $t2, $t0, $t1\n");
    let seq = cpu.scoreboard.allocate(0);
    cpu.id_ex = Some(IdExEntry {
        seq,
        mnemonic: Some(Mnemonic::Sub),
        ctrl: ControlSignals::decode(Mnemonic::Sub),
        rv1: 10,
        rv2: 4,
        rd: Some(10),
        ..IdExEntry::default()
    });
    execute_stage(&mut cpu).expect("executes");
    assert_eq!(cpu.ex_mem.map(|e| e.alu), Some(6));
    assert_eq!(cpu.scoreboard.entry(seq).and_then(|e| e.result), Some(6));
}

#[test]
fn execute_uses_immediate_when_alu_src() {
    let mut cpu = cpu("lw $t0, 8($t1)\n");
    let seq = cpu.scoreboard.allocate(0);
    cpu.id_ex = Some(IdExEntry {
        seq,
        mnemonic: Some(Mnemonic::Lw),
        ctrl: ControlSignals::decode(Mnemonic::Lw),
        rv1: 4000,
        rv2: 77,
        imm: 8,
        rd: Some(8),
        ..IdExEntry::default()
    });
    execute_stage(&mut cpu).expect("executes");
    assert_eq!(cpu.ex_mem.map(|e| e.alu), Some(4008));
    assert_eq!(
        cpu.scoreboard.entry(seq).and_then(|e| e.result),
        None,
        "load results are published by the memory stage"
    );
}

#[test]
fn execute_sets_zero_flag_for_taken_branch() {
    let mut cpu = cpu("x: bne $t0, $t1, x\n");
    let seq = cpu.scoreboard.allocate(0);
    cpu.id_ex = Some(IdExEntry {
        seq,
        mnemonic: Some(Mnemonic::Bne),
        ctrl: ControlSignals::decode(Mnemonic::Bne),
        rv1: 1,
        rv2: 2,
        ..IdExEntry::default()
    });
    execute_stage(&mut cpu).expect("executes");
    assert_eq!(cpu.ex_mem.map(|e| e.zero), Some(true));
}

// ══════════════════════════════════════════════════════════
// 4. Memory
// ══════════════════════════════════════════════════════════

#[test]
fn memory_store_then_load() {
    let mut cpu = cpu("sw $t0, 4000($zero)\nlw $t1, 4000($zero)\n");
    let st = cpu.scoreboard.allocate(0);
    cpu.ex_mem = Some(ExMemEntry {
        seq: st,
        mnemonic: Some(Mnemonic::Sw),
        ctrl: ControlSignals::decode(Mnemonic::Sw),
        alu: 4000,
        store_data: -9,
        ..ExMemEntry::default()
    });
    mem_stage(&mut cpu).expect("stores");
    assert!(cpu.scoreboard.is_complete(st));
    assert_eq!(cpu.memory.delta().get(&1000), Some(&-9));

    let ld = cpu.scoreboard.allocate(1);
    cpu.ex_mem = Some(ExMemEntry {
        seq: ld,
        index: 1,
        mnemonic: Some(Mnemonic::Lw),
        ctrl: ControlSignals::decode(Mnemonic::Lw),
        alu: 4000,
        rd: Some(9),
        ..ExMemEntry::default()
    });
    mem_stage(&mut cpu).expect("loads");
    assert_eq!(cpu.mem_wb.map(|e| e.load_data), Some(-9));
    assert_eq!(cpu.scoreboard.entry(ld).and_then(|e| e.result), Some(-9));
}

#[test]
fn memory_resolves_taken_branch() {
    let mut cpu = cpu("add $t0, $t0, $t0\nbeq $t0, $t0, top\nadd $t0, $t0, $t0\ntop: add $t0, $t0, $t0\n");
    let br = cpu.scoreboard.allocate(1);
    cpu.scoreboard.set_control(br);
    cpu.pc = 2;
    cpu.ex_mem = Some(ExMemEntry {
        seq: br,
        index: 1,
        mnemonic: Some(Mnemonic::Beq),
        ctrl: ControlSignals::decode(Mnemonic::Beq),
        zero: true,
        target: 3,
        ..ExMemEntry::default()
    });
    mem_stage(&mut cpu).expect("resolves");
    assert_eq!(cpu.pc, 3);
    assert!(!cpu.scoreboard.control_pending());
}

#[test]
fn memory_not_taken_branch_keeps_sequential_pc() {
    let mut cpu = cpu("beq $t0, $t1, x\nx: add $t0, $t0, $t0\n");
    let br = cpu.scoreboard.allocate(0);
    cpu.pc = 1;
    cpu.ex_mem = Some(ExMemEntry {
        seq: br,
        mnemonic: Some(Mnemonic::Beq),
        ctrl: ControlSignals::decode(Mnemonic::Beq),
        zero: false,
        target: 1,
        ..ExMemEntry::default()
    });
    mem_stage(&mut cpu).expect("resolves");
    assert_eq!(cpu.pc, 1);
}

// ══════════════════════════════════════════════════════════
// 5. Writeback
// ══════════════════════════════════════════════════════════

#[test]
fn writeback_selects_memory_or_alu() {
    let mut cpu = cpu("lw $t0, 4000($zero)\nadd $t1, $t0, $t0\n");
    let ld = cpu.scoreboard.allocate(0);
    cpu.scoreboard.set_producer(8, ld);
    cpu.mem_wb = Some(MemWbEntry {
        seq: ld,
        mnemonic: Some(Mnemonic::Lw),
        ctrl: ControlSignals::decode(Mnemonic::Lw),
        alu: 4000,
        load_data: 5,
        rd: Some(8),
        ..MemWbEntry::default()
    });
    wb_stage(&mut cpu);
    assert_eq!(cpu.regs.read(8), 5);
    assert_eq!(cpu.scoreboard.producer(8), None);
    assert_eq!(cpu.stats.inst_load, 1);

    let add = cpu.scoreboard.allocate(1);
    cpu.mem_wb = Some(MemWbEntry {
        seq: add,
        index: 1,
        mnemonic: Some(Mnemonic::Add),
        ctrl: ControlSignals::decode(Mnemonic::Add),
        alu: 10,
        load_data: 99,
        rd: Some(9),
        ..MemWbEntry::default()
    });
    wb_stage(&mut cpu);
    assert_eq!(cpu.regs.read(9), 10);
    assert_eq!(cpu.stats.instructions_retired, 2);
}

#[test]
fn writeback_of_store_touches_no_register() {
    let mut cpu = cpu("sw $t0, 4000($zero)\n");
    let st = cpu.scoreboard.allocate(0);
    cpu.mem_wb = Some(MemWbEntry {
        seq: st,
        mnemonic: Some(Mnemonic::Sw),
        ctrl: ControlSignals::decode(Mnemonic::Sw),
        alu: 4000,
        rd: None,
        ..MemWbEntry::default()
    });
    wb_stage(&mut cpu);
    assert_eq!(cpu.regs.snapshot(), [0; 32]);
    assert_eq!(cpu.scoreboard.in_flight(), 0);
}
