//! Address translation as observed through the golden model.
//!
//! Covers explicit page mappings, the permissive identity fallback for
//! unmapped addresses, permission enforcement, and TLB staleness after
//! a remap.

use kestrel_core::common::{Access, Fault, PagePerms};
use kestrel_core::isa::opcodes::{load, store};
use pretty_assertions::assert_eq;

use crate::common::encode::{encode_load, encode_store};
use crate::common::model;

#[test]
fn explicit_mapping_preserves_page_offset() {
    let mut gm = model();
    gm.map_page(0x5000, 0x9000, PagePerms::RW);
    assert_eq!(gm.translate(0x5AB8, Access::Read, false), Ok(0x9AB8));
}

#[test]
fn unmapped_address_gains_identity_mapping() {
    let mut gm = model();
    assert_eq!(gm.translate(0x7123, Access::Read, false), Ok(0x7123));
    // the fallback installed a real mapping, visible to later lookups
    assert_eq!(gm.translate(0x7456, Access::Write, false), Ok(0x7456));
}

#[test]
fn readonly_page_rejects_stores() {
    let mut gm = model();
    gm.load_memory_mapped(0x9000, 42, 0x5000, PagePerms::R);
    gm.set_reg(1, 0x5000);
    gm.set_reg(2, 7);

    gm.step(encode_load(load::LD, 3, 1, 0));
    assert_eq!(gm.reg(3), 42);

    gm.step(encode_store(store::SD, 1, 2, 0));
    assert_eq!(gm.get_last_exception(), Some(Fault::Page));
    assert_eq!(gm.mem_word(0x9000), 42);
}

#[test]
fn execute_on_data_page_is_nx() {
    let mut gm = model();
    gm.map_page(0x5000, 0x9000, PagePerms::RW);
    assert_eq!(gm.translate(0x5000, Access::Execute, false), Err(Fault::Nx));
    // the same page still reads fine
    assert_eq!(gm.translate(0x5000, Access::Read, false), Ok(0x9000));
}

#[test]
fn remap_leaves_stale_tlb_entry() {
    let mut gm = model();
    gm.map_page(0x5000, 0x9000, PagePerms::RW);
    assert_eq!(gm.translate(0x5000, Access::Read, false), Ok(0x9000));

    // remapping updates only the authoritative table; the cached entry
    // keeps answering until it ages out
    gm.map_page(0x5000, 0xA000, PagePerms::RW);
    assert_eq!(gm.translate(0x5000, Access::Read, false), Ok(0x9000));
    let authoritative = gm
        .translation
        .walker
        .entry(kestrel_core::common::VirtAddr::new(0x5000))
        .map(|(pa, _)| pa.val());
    assert_eq!(authoritative, Some(0xA000));
}
