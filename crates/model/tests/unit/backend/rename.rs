//! Rename unit invariants.
//!
//! Beyond the unit's own tests, these exercise longer allocate/free
//! sequences and property-check the free-list bookkeeping.

use kestrel_core::core::{RenameRequest, RenameUnit, ARCH_REGS};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn req(rd: usize) -> RenameRequest {
    RenameRequest {
        valid: true,
        rd,
        rs1: 0,
        rs2: 0,
    }
}

#[test]
fn sustained_allocate_free_cycle_never_starves() {
    // 8 rename registers serving 4 hot architectural registers: after the
    // first write to each, every retire frees one rename register and the
    // free list settles into a steady state
    let mut ru = RenameUnit::new(40);
    for round in 0..100 {
        let out = ru.allocate(&[req(1 + round % 4)]);
        assert!(out[0].valid, "starved at round {round}");
        ru.free(out[0].old_phys);
    }
    assert_eq!(ru.free_count(), 4);
}

#[test]
fn dependency_chain_across_bundles() {
    let mut ru = RenameUnit::new(128);
    let first = ru.allocate(&[req(5)]);
    let second = ru.allocate(&[RenameRequest {
        valid: true,
        rd: 6,
        rs1: 5,
        rs2: 0,
    }]);
    // the consumer in the next bundle reads the producer's new name
    assert_eq!(second[0].rs1_phys, first[0].rd_phys);
}

proptest! {
    #[test]
    fn free_count_matches_successful_allocations(
        rds in proptest::collection::vec(0usize..32, 1..64)
    ) {
        let mut ru = RenameUnit::new(64);
        let before = ru.free_count();
        let reqs: Vec<_> = rds.iter().map(|&rd| req(rd)).collect();
        let out = ru.allocate(&reqs);
        let consumed = out
            .iter()
            .zip(&rds)
            .filter(|&(r, &rd)| r.valid && rd != 0)
            .count();
        prop_assert_eq!(ru.free_count(), before - consumed);
    }

    #[test]
    fn mappings_stay_within_the_physical_file(
        rds in proptest::collection::vec(1usize..32, 1..200)
    ) {
        let mut ru = RenameUnit::new(48);
        for &rd in &rds {
            let out = ru.allocate(&[req(rd)]);
            if out[0].valid {
                ru.free(out[0].old_phys);
            }
            for arch in 0..ARCH_REGS {
                prop_assert!(ru.mapping(arch) < 48);
            }
        }
    }
}
