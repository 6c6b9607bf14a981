//! Nested page translation under a running VM.
//!
//! While a VM is on, every translated address passes through the EPT
//! transform keyed by the current vmid, so guests with different vmids
//! see disjoint physical memory.

use kestrel_core::isa::opcodes::{load, store};
use kestrel_core::vm::Ept;
use pretty_assertions::assert_eq;

use crate::common::encode::{encode_load, encode_store};
use crate::common::model;

const EPT_KEY: u64 = 0x0000_0000_00F0_0000;

#[test]
fn ept_applies_only_while_vm_is_on() {
    let mut gm = model();
    gm.ept = Ept::new(EPT_KEY);

    // host store lands at the untransformed address
    gm.set_reg(1, 0x200);
    gm.set_reg(2, 5);
    gm.step(encode_store(store::SD, 1, 2, 0));
    assert_eq!(gm.mem_word(0x200), 5);

    // guest view of the same virtual address is a different frame
    gm.vmcs.vm_on(1);
    let guest_pa = gm.ept.translate(1, 0x200);
    gm.load_memory(guest_pa, 77);
    gm.step(encode_load(load::LD, 3, 1, 0));
    assert_eq!(gm.reg(3), 77);

    gm.vmcs.vm_off();
    gm.step(encode_load(load::LD, 3, 1, 0));
    assert_eq!(gm.reg(3), 5);
}

#[test]
fn vmids_partition_physical_memory() {
    let mut gm = model();
    gm.ept = Ept::new(EPT_KEY);
    gm.set_reg(1, 0x200);

    gm.vmcs.vm_on(1);
    gm.set_reg(2, 111);
    gm.step(encode_store(store::SD, 1, 2, 0));

    gm.vmcs.vm_on(2);
    gm.set_reg(2, 222);
    gm.step(encode_store(store::SD, 1, 2, 0));

    // each guest still reads its own value back
    gm.step(encode_load(load::LD, 3, 1, 0));
    assert_eq!(gm.reg(3), 222);
    gm.vmcs.vm_on(1);
    gm.step(encode_load(load::LD, 3, 1, 0));
    assert_eq!(gm.reg(3), 111);
}

#[test]
fn vmid_is_masked_to_eight_bits() {
    let mut gm = model();
    gm.vmcs.vm_on(0x1FF);
    assert_eq!(gm.vmcs.current_vmid(), Some(0xFF));
}
