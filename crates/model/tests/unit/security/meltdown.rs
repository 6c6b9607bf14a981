//! Meltdown leak path.
//!
//! With protection disabled, a load that faults on a permission check
//! still materializes the underlying data into the destination
//! register; protection suppresses the leak while the fault itself is
//! reported either way.

use kestrel_core::common::{Fault, PagePerms};
use kestrel_core::isa::opcodes::load;
use pretty_assertions::assert_eq;

use crate::common::encode::encode_load;
use crate::common::model;

const SECRET: u64 = 0x5EC2_E700_0000_0042;

fn kernel_reading_user_page(protection: bool) -> kestrel_core::core::GoldenModel {
    let mut gm = model();
    gm.load_memory_mapped(0x3000, SECRET, 0x3000, PagePerms::RWXU);
    gm.set_kernel_mode(true);
    gm.set_smap(true);
    gm.set_meltdown_protection(protection);
    gm.set_reg(1, 0x3000);
    gm
}

#[test]
fn unprotected_load_leaks_the_faulting_data() {
    let mut gm = kernel_reading_user_page(false);
    gm.step(encode_load(load::LD, 2, 1, 0));
    assert_eq!(gm.get_last_exception(), Some(Fault::Smap));
    assert_eq!(gm.reg(2), SECRET);
}

#[test]
fn protected_load_faults_without_leaking() {
    let mut gm = kernel_reading_user_page(true);
    gm.set_reg(2, 0xAAAA);
    gm.step(encode_load(load::LD, 2, 1, 0));
    assert_eq!(gm.get_last_exception(), Some(Fault::Smap));
    assert_eq!(gm.reg(2), 0xAAAA);
}

#[test]
fn no_leak_when_nothing_is_backed() {
    // faulting address with no resident word: nothing to leak either way
    let mut gm = model();
    gm.map_page(0x3000, 0x3000, PagePerms::RWXU);
    gm.set_kernel_mode(true);
    gm.set_smap(true);
    gm.set_meltdown_protection(false);
    gm.set_reg(1, 0x3000);
    gm.step(encode_load(load::LD, 2, 1, 0));
    assert_eq!(gm.get_last_exception(), Some(Fault::Smap));
    assert_eq!(gm.reg(2), 0);
}
