//! SMEP/SMAP scenarios through the golden model.
//!
//! User-marked pages become off limits to kernel-mode fetches (SMEP)
//! and kernel-mode data accesses (SMAP); the access-control override
//! suppresses only the SMAP case.

use kestrel_core::common::{Access, Fault, PagePerms};
use kestrel_core::isa::opcodes::load;
use pretty_assertions::assert_eq;

use crate::common::encode::encode_load;
use crate::common::model;

fn user_page() -> PagePerms {
    PagePerms::RWXU
}

#[test]
fn smap_blocks_kernel_data_access_to_user_pages() {
    let mut gm = model();
    gm.load_memory_mapped(0x3000, 42, 0x3000, user_page());
    gm.set_kernel_mode(true);
    gm.set_smap(true);

    gm.set_reg(1, 0x3000);
    gm.step(encode_load(load::LD, 2, 1, 0));
    assert_eq!(gm.get_last_exception(), Some(Fault::Smap));
    assert_eq!(gm.reg(2), 0);
}

#[test]
fn smap_override_permits_the_access() {
    let mut gm = model();
    gm.load_memory_mapped(0x3000, 42, 0x3000, user_page());
    gm.set_kernel_mode(true);
    gm.set_smap(true);

    assert_eq!(gm.translate(0x3000, Access::Read, false), Err(Fault::Smap));
    assert_eq!(gm.translate(0x3000, Access::Read, true), Ok(0x3000));
}

#[test]
fn smep_blocks_kernel_fetch_of_user_pages() {
    let mut gm = model();
    gm.map_page(0x3000, 0x3000, user_page());
    gm.set_kernel_mode(true);
    gm.set_smep(true);

    assert_eq!(
        gm.translate(0x3000, Access::Execute, false),
        Err(Fault::Smep)
    );
    // the override is an SMAP concept; it does not bypass SMEP
    assert_eq!(
        gm.translate(0x3000, Access::Execute, true),
        Err(Fault::Smep)
    );
}

#[test]
fn user_mode_is_never_restricted() {
    let mut gm = model();
    gm.load_memory_mapped(0x3000, 42, 0x3000, user_page());
    gm.set_smep(true);
    gm.set_smap(true);

    gm.set_reg(1, 0x3000);
    gm.step(encode_load(load::LD, 2, 1, 0));
    assert_eq!(gm.get_last_exception(), None);
    assert_eq!(gm.reg(2), 42);
}

#[test]
fn kernel_pages_are_unaffected() {
    let mut gm = model();
    gm.load_memory_mapped(0x4000, 7, 0x4000, PagePerms::RWX);
    gm.set_kernel_mode(true);
    gm.set_smep(true);
    gm.set_smap(true);

    gm.set_reg(1, 0x4000);
    gm.step(encode_load(load::LD, 2, 1, 0));
    assert_eq!(gm.get_last_exception(), None);
    assert_eq!(gm.reg(2), 7);
    assert_eq!(gm.translate(0x4000, Access::Execute, false), Ok(0x4000));
}
