//! Speculative-fetch fence scenarios.
//!
//! Each fence instruction adds one pending branch; loads (scalar and
//! vector) fault with `spec` until every pending branch has retired.

use kestrel_core::common::Fault;
use kestrel_core::isa::opcodes::load;
use pretty_assertions::assert_eq;

use crate::common::encode::{encode_branch, encode_load, FENCE_SPEC};
use crate::common::model;

#[test]
fn pending_count_tracks_fences_and_retires() {
    let mut gm = model();
    gm.step(FENCE_SPEC);
    gm.step(FENCE_SPEC);
    assert_eq!(gm.fence_pending(), 2);

    // branches retire pending slots regardless of direction
    gm.step(encode_branch(0, 0, 0, 8)); // beq x0,x0: taken
    assert_eq!(gm.fence_pending(), 1);
    gm.step(encode_branch(1, 0, 0, 8)); // bne x0,x0: not taken
    assert_eq!(gm.fence_pending(), 0);
}

#[test]
fn loads_fault_while_pending_then_recover() {
    let mut gm = model();
    gm.load_memory(0x400, 7);
    gm.set_reg(1, 0x400);

    gm.step(FENCE_SPEC);
    gm.step(FENCE_SPEC);
    gm.step(encode_load(load::LD, 2, 1, 0));
    assert_eq!(gm.get_last_exception(), Some(Fault::Spec));

    gm.step(encode_branch(1, 0, 0, 8));
    // one branch retired, one still pending: loads stay gated
    gm.step(encode_load(load::LD, 2, 1, 0));
    assert_eq!(gm.get_last_exception(), Some(Fault::Spec));

    gm.step(encode_branch(1, 0, 0, 8));
    gm.step(encode_load(load::LD, 2, 1, 0));
    assert_eq!(gm.get_last_exception(), None);
    assert_eq!(gm.reg(2), 7);
}

#[test]
fn stores_are_not_gated() {
    let mut gm = model();
    gm.set_reg(1, 0x400);
    gm.set_reg(2, 9);
    gm.step(FENCE_SPEC);
    gm.step(crate::common::encode::encode_store(0b011, 1, 2, 0));
    assert_eq!(gm.get_last_exception(), None);
    assert_eq!(gm.mem_word(0x400), 9);
}

#[test]
fn retire_on_empty_fence_saturates_at_zero() {
    let mut gm = model();
    gm.step(encode_branch(1, 0, 0, 8));
    assert_eq!(gm.fence_pending(), 0);
    gm.step(FENCE_SPEC);
    assert_eq!(gm.fence_pending(), 1);
}
