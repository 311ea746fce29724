//! # Statistics Tests
//!
//! Verifies that a run fills the counters consistently and that the banner
//! report renders them.

use crate::common::harness::TestContext;
use mipsim_core::isa::Mnemonic;
use mipsim_core::stats::SimStats;

#[test]
fn record_retire_classifies_mnemonics() {
    let mut stats = SimStats::default();
    for m in Mnemonic::ALL {
        stats.record_retire(m);
    }
    assert_eq!(stats.instructions_retired, 10);
    assert_eq!(stats.inst_alu, 5);
    assert_eq!(stats.inst_load, 1);
    assert_eq!(stats.inst_store, 1);
    assert_eq!(stats.inst_branch, 2);
    assert_eq!(stats.inst_jump, 1);
}

#[test]
fn cpi_and_accuracy_handle_zero() {
    let stats = SimStats::default();
    assert!(stats.cpi().abs() < f64::EPSILON);
    assert_eq!(stats.prediction_accuracy(), None);
}

#[test]
fn run_populates_counters() {
    let mut tc = TestContext::new(
        "addi $t0, $zero, 4\n\
         sw $t0, 2048($zero)\n\
         lw $t1, 2048($zero)\n\
         add $t2, $t1, $t1\n",
    );
    let cycles = tc.run_ok();
    let stats = tc.sim.stats();
    assert_eq!(stats.cycles, cycles);
    assert_eq!(stats.instructions_retired, 4);
    assert_eq!(stats.inst_load, 1);
    assert_eq!(stats.inst_store, 1);
    assert_eq!(stats.stalls_data, 1);
    assert!(stats.cpi() > 1.0);
}

#[test]
fn banner_mentions_every_section() {
    let mut tc = TestContext::new("addi $t0, $zero, 1\n");
    let _ = tc.run_ok();
    let text = tc.sim.stats().to_string();
    for needle in ["sim_cycles", "INSTRUCTION MIX", "PIPELINE STALLS", "BRANCH PREDICTION", "bp.accuracy            n/a"] {
        assert!(text.contains(needle), "missing {needle:?} in:\n{text}");
    }
}
