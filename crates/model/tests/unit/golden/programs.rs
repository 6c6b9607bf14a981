//! Multi-instruction program tests.
//!
//! Drives the golden model through short programs with real control
//! flow: loops, calls, and memory traffic across access widths.

use kestrel_core::core::GoldenModel;
use kestrel_core::isa::opcodes::{load, store};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::encode::{
    add, addi, encode_branch, encode_jal, encode_jalr, encode_load, encode_store, NOP,
};
use crate::common::model;

/// Steps a program placed at PC 0 until the PC leaves it.
fn run(gm: &mut GoldenModel, prog: &[u32]) {
    let mut steps = 0;
    while (gm.pc() as usize) < prog.len() * 4 {
        gm.step(prog[gm.pc() as usize / 4]);
        steps += 1;
        assert!(steps < 10_000, "program did not terminate");
    }
}

#[test]
fn sum_loop_with_backward_branch() {
    let mut gm = model();
    let prog = [
        addi(1, 0, 0),               // sum = 0
        addi(2, 0, 5),               // i = 5
        add(1, 1, 2),                // loop: sum += i
        addi(2, 2, -1),              // i -= 1
        encode_branch(1, 2, 0, -8),  // bne x2,x0,loop
    ];
    run(&mut gm, &prog);
    assert_eq!(gm.reg(1), 15);
    assert_eq!(gm.reg(2), 0);
    assert_eq!(gm.pc(), 20);
}

#[test]
fn call_and_return() {
    let mut gm = model();
    let prog = [
        addi(10, 0, 7),        // a0 = 7
        encode_jal(1, 12),     // call +12 (to index 4)
        addi(10, 10, 100),     // after return: a0 += 100
        encode_jal(0, 12),     // jump past the callee to the end
        addi(10, 10, 1),       // callee: a0 += 1
        encode_jalr(0, 1, 0),  // ret
        NOP,
    ];
    run(&mut gm, &prog);
    assert_eq!(gm.reg(10), 108);
}

#[test]
fn straight_line_fibonacci() {
    let mut gm = model();
    // x1,x2 hold the pair; three iterations of (x1,x2) <- (x2,x1+x2)
    let mut prog = vec![addi(1, 0, 0), addi(2, 0, 1)];
    for _ in 0..3 {
        prog.push(add(3, 1, 2));
        prog.push(addi(1, 2, 0));
        prog.push(addi(2, 3, 0));
    }
    gm.execute_bundle(&prog);
    assert_eq!(gm.reg(2), 3); // fib: 1,1,2,3
    assert_eq!(gm.reg(1), 2);
}

#[rstest]
#[case::byte_signed(store::SB, load::LB, 0x80, 0xFFFF_FFFF_FFFF_FF80)]
#[case::byte_unsigned(store::SB, load::LBU, 0x80, 0x80)]
#[case::half_signed(store::SH, load::LH, 0x8000, 0xFFFF_FFFF_FFFF_8000)]
#[case::half_unsigned(store::SH, load::LHU, 0x8000, 0x8000)]
#[case::word_signed(store::SW, load::LW, 0x8000_0000, 0xFFFF_FFFF_8000_0000)]
#[case::word_unsigned(store::SW, load::LWU, 0x8000_0000, 0x8000_0000)]
#[case::double(store::SD, load::LD, 0x8000_0000_0000_0000, 0x8000_0000_0000_0000)]
fn store_load_width_and_sign(
    #[case] store_f3: u32,
    #[case] load_f3: u32,
    #[case] value: u64,
    #[case] expected: u64,
) {
    let mut gm = model();
    gm.set_reg(1, 0x400);
    gm.set_reg(2, value);
    gm.step(encode_store(store_f3, 1, 2, 0));
    gm.step(encode_load(load_f3, 3, 1, 0));
    assert_eq!(gm.get_last_exception(), None);
    assert_eq!(gm.reg(3), expected);
}

#[test]
fn bundle_reports_pc_and_hazards() {
    let mut gm = model();
    let words = [addi(1, 0, 5), add(2, 1, 1), addi(1, 0, 9)];
    let res = gm.issue_bundle(0x100, &words);
    assert_eq!(res.next_pc, 0x10C);
    assert_eq!(res.uops.len(), 3);
    assert!(!res.hazards.is_empty());
    assert_eq!(gm.reg(2), 10);
    assert_eq!(gm.reg(1), 9);
}
