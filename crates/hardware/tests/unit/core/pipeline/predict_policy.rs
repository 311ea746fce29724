//! # Predict Policy Tests
//!
//! Under the predict policy fetch follows the branch predictor. A wrong
//! prediction squashes the younger in-flight instructions and refetches;
//! the architectural result must match the stall policy exactly.

use crate::common::harness::{TestContext, reference_state};
use mipsim_core::ExitCode;
use mipsim_core::config::BranchPredictor;
use pretty_assertions::assert_eq;
use rstest::rstest;

const TAKEN_SKIP: &str = "addi $t0, $zero, 1\n\
                          beq $zero, $zero, end\n\
                          addi $t1, $zero, 5\n\
                          end: addi $t2, $zero, 9\n";

const LOOP: &str = "addi $t0, $zero, 6\n\
                    loop: addi $t1, $t1, 3\n\
                    sw $t1, 4096($zero)\n\
                    addi $t0, $t0, -1\n\
                    bne $t0, $zero, loop\n\
                    lw $t2, 4096($zero)\n\
                    add $t3, $t2, $t0\n";

// ══════════════════════════════════════════════════════════
// 1. Timing
// ══════════════════════════════════════════════════════════

#[test]
fn mispredicted_branch_squashes_and_refetches() {
    let mut tc = TestContext::predicting(TAKEN_SKIP, BranchPredictor::Saturating, 1);
    assert_eq!(tc.run_ok(), 9);
    let stats = tc.sim.stats();
    assert_eq!(stats.branch_mispredictions, 1);
    assert_eq!(stats.branch_predictions, 0);
    assert_eq!(stats.squashed, 2);
    assert_eq!((tc.reg("$t1"), tc.reg("$t2")), (0, 9));
}

#[test]
fn correctly_predicted_branch_is_free() {
    let mut tc = TestContext::predicting(TAKEN_SKIP, BranchPredictor::Saturating, 2);
    assert_eq!(tc.run_ok(), 7);
    assert_eq!(tc.sim.stats().branch_predictions, 1);
    assert_eq!(tc.sim.stats().squashed, 0);
}

#[test]
fn jumps_redirect_at_fetch() {
    let mut tc = TestContext::predicting(
        "j end\naddi $t0, $zero, 1\nend: addi $t1, $zero, 2\n",
        BranchPredictor::History,
        0,
    );
    assert_eq!(tc.run_ok(), 6);
    assert_eq!((tc.reg("$t0"), tc.reg("$t1")), (0, 2));
    assert_eq!(tc.sim.stats().branch_mispredictions, 0);
}

#[test]
fn no_control_stalls_under_prediction() {
    let mut tc = TestContext::predicting(LOOP, BranchPredictor::Saturating, 3);
    let _ = tc.run_ok();
    assert_eq!(tc.sim.stats().stalls_control, 0);
}

// ══════════════════════════════════════════════════════════
// 2. Squash correctness
// ══════════════════════════════════════════════════════════

#[test]
fn wrong_path_writer_does_not_leak() {
    let mut tc = TestContext::predicting(
        "addi $t0, $zero, 1\n\
         beq $zero, $zero, end\n\
         addi $t0, $zero, 99\n\
         end: add $t1, $t0, $t0\n",
        BranchPredictor::Saturating,
        1,
    );
    assert_eq!(tc.run_ok(), 9);
    assert_eq!((tc.reg("$t0"), tc.reg("$t1")), (1, 2));
    assert_eq!(tc.cpu().scoreboard.in_flight(), 0);
}

#[test]
fn wrong_path_fault_is_discarded() {
    let mut tc = TestContext::predicting(
        "beq $zero, $zero, end\n\
         j nowhere\n\
         end: addi $t0, $zero, 1\n",
        BranchPredictor::Saturating,
        1,
    );
    assert_eq!(tc.run_ok(), 8);
    assert_eq!(tc.reg("$t0"), 1);
}

#[test]
fn correct_path_fault_raised_in_execute() {
    let mut tc = TestContext::predicting("j nowhere\n", BranchPredictor::Saturating, 1);
    let err = tc.run().unwrap_err();
    assert_eq!(err.exit_code(), ExitCode::InvalidLabel);
    // Reports for cycles 0-2; execute raised the fault in cycle 3.
    assert_eq!(tc.reports().len(), 3);
}

// ══════════════════════════════════════════════════════════
// 3. Same architectural result as the stall policy
// ══════════════════════════════════════════════════════════

#[rstest]
fn loop_matches_stall_policy(
    #[values(BranchPredictor::Saturating, BranchPredictor::History, BranchPredictor::Combined)]
    predictor: BranchPredictor,
    #[values(0, 1, 2, 3)] initial: u8,
) {
    let mut stall = TestContext::new(LOOP);
    let _ = stall.run_ok();
    let mut predict = TestContext::predicting(LOOP, predictor, initial);
    let _ = predict.run_ok();
    assert_eq!(predict.final_state(), stall.final_state());
    assert_eq!(predict.final_state(), reference_state(LOOP));
    assert_eq!(predict.reg("$t3"), 18);
}

#[test]
fn loop_trains_predictor() {
    let mut tc = TestContext::predicting(LOOP, BranchPredictor::Saturating, 0);
    let _ = tc.run_ok();
    let stats = tc.sim.stats();
    assert_eq!(stats.branch_predictions + stats.branch_mispredictions, 6);
    // Counter 0 mispredicts the first two taken iterations and the exit.
    assert_eq!(stats.branch_mispredictions, 3);
}
