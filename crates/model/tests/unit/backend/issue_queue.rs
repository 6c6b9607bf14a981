//! Issue queue scheduling flows.
//!
//! Dependency chains resolved by wakeup broadcasts across classes, and
//! multi-cycle issue under constrained functional-unit availability.

use kestrel_core::config::BackendConfig;
use kestrel_core::core::{FuClass, FuStatus, IqUop, IssueQueue};
use pretty_assertions::assert_eq;

fn queue() -> IssueQueue {
    IssueQueue::new(&BackendConfig::default())
}

#[test]
fn wakeup_chain_issues_over_successive_cycles() {
    let mut iq = queue();
    // load -> add -> branch, linked by physical register tags
    let load = IqUop {
        func_type: FuClass::Mem,
        dest: Some(40),
        rob_idx: Some(0),
        ..IqUop::default()
    };
    let add = IqUop {
        func_type: FuClass::Int,
        ready1: false,
        src1_tag: Some(40),
        dest: Some(41),
        rob_idx: Some(1),
        ..IqUop::default()
    };
    let branch = IqUop {
        func_type: FuClass::Branch,
        ready1: false,
        src1_tag: Some(41),
        rob_idx: Some(2),
        ..IqUop::default()
    };
    iq.alloc(&[load, add, branch]);

    let cycle1 = iq.issue(FuStatus::uniform(1), None);
    assert_eq!(cycle1.len(), 1);
    assert_eq!(cycle1[0].rob_idx, Some(0));

    iq.wakeup(40, 0x1234);
    let cycle2 = iq.issue(FuStatus::uniform(1), None);
    assert_eq!(cycle2.len(), 1);
    assert_eq!(cycle2[0].op1, Some(0x1234));

    iq.wakeup(41, 0x1239);
    let cycle3 = iq.issue(FuStatus::uniform(1), None);
    assert_eq!(cycle3.len(), 1);
    assert_eq!(cycle3[0].rob_idx, Some(2));
    assert!(iq.is_empty());
}

#[test]
fn one_wakeup_readies_every_waiting_consumer() {
    let mut iq = queue();
    let consumer = |class, rob| IqUop {
        func_type: class,
        ready1: false,
        src1_tag: Some(50),
        rob_idx: Some(rob),
        ..IqUop::default()
    };
    iq.alloc(&[
        consumer(FuClass::Int, 0),
        consumer(FuClass::Fp, 1),
        consumer(FuClass::Mem, 2),
    ]);
    iq.wakeup(50, 7);
    let issued = iq.issue(FuStatus::uniform(8), None);
    assert_eq!(issued.len(), 3);
    assert!(issued.iter().all(|u| u.op1 == Some(7)));
}

#[test]
fn issue_width_caps_a_wide_ready_window() {
    let mut iq = queue();
    let uops: Vec<IqUop> = (0..12)
        .map(|i| IqUop {
            rob_idx: Some(i),
            ..IqUop::default()
        })
        .collect();
    iq.alloc(&uops);
    // default issue width is 8
    let issued = iq.issue(FuStatus::uniform(16), None);
    assert_eq!(issued.len(), 8);
    assert_eq!(iq.len(), 4);
    let rest = iq.issue(FuStatus::uniform(16), None);
    assert_eq!(rest.len(), 4);
}

#[test]
fn starved_class_catches_up_next_cycle() {
    let mut iq = queue();
    let mem = |rob| IqUop {
        func_type: FuClass::Mem,
        rob_idx: Some(rob),
        ..IqUop::default()
    };
    iq.alloc(&[mem(0), mem(1), mem(2), mem(3)]);
    let status = FuStatus {
        mem: 2,
        ..FuStatus::default()
    };
    assert_eq!(iq.issue(status, None).len(), 2);
    assert_eq!(iq.issue(status, None).len(), 2);
    assert!(iq.is_empty());
}
