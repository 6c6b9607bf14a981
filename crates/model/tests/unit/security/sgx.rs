//! Enclave access gating scenarios.
//!
//! While the enclave is entered, every physical access outside its
//! committed page set faults; outside the enclave nothing is gated.

use kestrel_core::common::Fault;
use kestrel_core::isa::opcodes::{load, store};
use pretty_assertions::assert_eq;

use crate::common::encode::{encode_load, encode_store};
use crate::common::model;

#[test]
fn enclave_lifecycle_gates_accesses() {
    let mut gm = model();
    gm.load_memory(0x400, 11); // inside the enclave page set
    gm.load_memory(0x900, 22); // outside
    gm.enclave.ecreate(0x400);
    gm.enclave.einit();

    // before entry both addresses are readable
    gm.set_reg(1, 0x900);
    gm.step(encode_load(load::LD, 2, 1, 0));
    assert_eq!(gm.reg(2), 22);

    gm.enclave.eenter();
    gm.set_reg(1, 0x400);
    gm.step(encode_load(load::LD, 2, 1, 0));
    assert_eq!(gm.get_last_exception(), None);
    assert_eq!(gm.reg(2), 11);

    gm.set_reg(1, 0x900);
    gm.step(encode_load(load::LD, 3, 1, 0));
    assert_eq!(gm.get_last_exception(), Some(Fault::Sgx));
    assert_eq!(gm.reg(3), 0);

    gm.enclave.eexit();
    gm.step(encode_load(load::LD, 3, 1, 0));
    assert_eq!(gm.get_last_exception(), None);
    assert_eq!(gm.reg(3), 22);
}

#[test]
fn stores_outside_the_enclave_fault() {
    let mut gm = model();
    gm.load_memory(0x500, 1);
    gm.enclave.ecreate(0x500);
    gm.enclave.eenter();

    gm.set_reg(1, 0x800);
    gm.set_reg(2, 77);
    gm.step(encode_store(store::SD, 1, 2, 0));
    assert_eq!(gm.get_last_exception(), Some(Fault::Sgx));
    assert_eq!(gm.mem_word(0x800), 0);
}

#[test]
fn committed_pages_cover_256_byte_granules() {
    let mut gm = model();
    gm.load_memory(0x4F8, 5);
    gm.enclave.ecreate(0x400); // commits the whole 0x400-0x4FF granule
    gm.enclave.eenter();

    gm.set_reg(1, 0x4F8);
    gm.step(encode_load(load::LD, 2, 1, 0));
    assert_eq!(gm.get_last_exception(), None);
    assert_eq!(gm.reg(2), 5);
}
