//! Scoreboard lockstep flows.
//!
//! Runs short programs with full observations, exactly as a device
//! under test would report them, and checks that the scoreboard accepts
//! correct behavior and rejects corrupted fields.

use kestrel_core::config::Config;
use kestrel_core::coverage::CoverageModel;
use kestrel_core::sim::{Observation, Scoreboard};
use pretty_assertions::assert_eq;

use crate::common::encode::{add, addi, encode_branch};
use crate::common::init_tracing;

#[test]
fn correct_device_passes_a_whole_program() {
    init_tracing();
    let mut sb = Scoreboard::new(&Config::default());
    let program = [
        (addi(1, 0, 5), 1, 5),
        (addi(2, 0, 3), 2, 3),
        (add(3, 1, 2), 3, 8),
    ];
    for (i, (word, rd, val)) in program.into_iter().enumerate() {
        let obs = Observation {
            next_pc: Some((i as u64 + 1) * 4),
            rd_arch: Some(rd),
            rd_val: Some(val),
            rob_idx: Some(i as u32),
            ..Observation::new(word)
        };
        assert!(sb.commit(&obs), "instruction {i} rejected");
    }
    assert_eq!(sb.trace().len(), 3);
    assert_eq!(sb.cycle(), 3);
}

#[test]
fn corrupted_register_value_is_rejected_once() {
    let mut sb = Scoreboard::new(&Config::default());
    let bad = Observation {
        rd_arch: Some(1),
        rd_val: Some(99), // device computed the wrong sum
        ..Observation::new(addi(1, 0, 5))
    };
    assert!(!sb.commit(&bad));
    // the reference model advanced anyway, so the next commit is clean
    let good = Observation {
        rd_arch: Some(2),
        rd_val: Some(3),
        ..Observation::new(addi(2, 0, 3))
    };
    assert!(sb.commit(&good));
}

#[test]
fn branch_coverage_accumulates() {
    let mut sb = Scoreboard::new(&Config::default());
    let cov = CoverageModel::shared();
    sb.set_coverage(&cov);

    // taken branch predicted not-taken: counted as a mispredict
    let obs = Observation {
        mispredict: Some(true),
        ..Observation::new(encode_branch(0, 0, 0, 8))
    };
    assert!(sb.commit(&obs));

    let summary = cov.borrow().summary();
    assert_eq!(summary.branches, 1);
    assert_eq!(summary.mispredicts, 1);
}

#[test]
fn reset_restarts_at_a_new_pc() {
    let mut sb = Scoreboard::new(&Config::default());
    let _ = sb.commit(&Observation::new(addi(1, 0, 1)));
    sb.reset(0x2000, 10);

    let obs = Observation {
        next_pc: Some(0x2004),
        rd_arch: Some(1),
        rd_val: Some(7),
        rob_idx: Some(10),
        ..Observation::new(addi(1, 0, 7))
    };
    assert!(sb.commit(&obs));
    assert_eq!(sb.trace().len(), 1);
    assert_eq!(sb.trace()[0].pc, 0x2000);
}
