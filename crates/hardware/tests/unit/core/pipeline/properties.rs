//! # Pipeline Property Tests
//!
//! Random straight-line programs with loads, stores and forward branches:
//! - the pipelined final state equals the sequential reference interpreter's
//!   (every forwarded operand saw its producer's value);
//! - both control policies agree;
//! - two runs produce byte-identical report streams;
//! - the cycle count is fixed by the executed path: one stall per load whose
//!   value the next instruction reads, two per branch.

use crate::common::harness::{TestContext, executed_indices, reference_state};
use crate::common::programs::{self, op_at, render};
use mipsim_core::config::BranchPredictor;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn stall_pipeline_matches_reference(ops in programs::program()) {
        let src = render(&ops);
        let mut tc = TestContext::new(&src);
        let _ = tc.run_ok();
        prop_assert_eq!(tc.final_state(), reference_state(&src));
    }

    #[test]
    fn predict_pipeline_matches_reference(ops in programs::program(), initial in 0u8..4) {
        let src = render(&ops);
        let mut tc = TestContext::predicting(&src, BranchPredictor::Combined, initial);
        let _ = tc.run_ok();
        prop_assert_eq!(tc.final_state(), reference_state(&src));
        prop_assert_eq!(tc.cpu().scoreboard.in_flight(), 0);
    }

    #[test]
    fn reports_are_deterministic(ops in programs::program()) {
        let src = render(&ops);
        let mut first = TestContext::new(&src);
        let mut second = TestContext::new(&src);
        let _ = first.run_ok();
        let _ = second.run_ok();
        prop_assert_eq!(&first.output, &second.output);
    }

    #[test]
    fn cycle_count_follows_from_program_shape(ops in programs::program()) {
        let src = render(&ops);
        let order = executed_indices(&src);

        let load_use = order
            .windows(2)
            .filter(|pair| {
                let consumer = op_at(&ops, pair[1]);
                op_at(&ops, pair[0])
                    .loaded()
                    .is_some_and(|reg| consumer.sources().contains(&reg))
            })
            .count() as u64;
        let branches = order.iter().filter(|&&i| op_at(&ops, i).is_branch()).count() as u64;

        let mut tc = TestContext::new(&src);
        let cycles = tc.run_ok();
        let stats = tc.sim.stats();
        prop_assert_eq!(stats.instructions_retired, order.len() as u64);
        prop_assert_eq!(stats.stalls_data, load_use);
        prop_assert_eq!(stats.stalls_control, 2 * branches);
        prop_assert_eq!(cycles, order.len() as u64 + 4 + load_use + 2 * branches);
    }
}
