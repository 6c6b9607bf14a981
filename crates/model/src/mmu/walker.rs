//! Page walker.
//!
//! The authoritative virtual-to-physical mapping: an unbounded table with no
//! eviction. Both TLB levels are caches over this structure; a successful
//! walk is the only source of TLB refills.

use std::collections::HashMap;

use crate::common::{Access, PagePerms, PhysAddr, VirtAddr};
use crate::coverage::CoverageRef;

/// Outcome of a page walk that found a mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalkHit {
    /// Translated physical address.
    pub pa: PhysAddr,
    /// Permissions attached to the mapping.
    pub perms: PagePerms,
    /// True if `access` was not allowed by the mapping's permissions.
    pub perm_fault: bool,
}

/// Authoritative page table plus walk logic.
#[derive(Debug, Default)]
pub struct PageWalker {
    table: HashMap<u64, (PhysAddr, PagePerms)>,
    coverage: Option<CoverageRef>,
}

impl PageWalker {
    /// Creates an empty page walker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a coverage sink.
    pub fn set_coverage(&mut self, coverage: CoverageRef) {
        self.coverage = Some(coverage);
    }

    /// Installs or replaces the mapping for `va`.
    pub fn set_entry(&mut self, va: VirtAddr, pa: PhysAddr, perms: PagePerms) {
        let _ = self.table.insert(va.val(), (pa, perms));
    }

    /// Returns the mapping for `va`, if one exists.
    pub fn entry(&self, va: VirtAddr) -> Option<(PhysAddr, PagePerms)> {
        self.table.get(&va.val()).copied()
    }

    /// Returns true if `va` has a mapping.
    pub fn is_mapped(&self, va: VirtAddr) -> bool {
        self.table.contains_key(&va.val())
    }

    /// Walks the table for `va`, checking `access` against the mapping's
    /// permissions. `None` means no mapping exists at all.
    pub fn walk(&mut self, va: VirtAddr, access: Access) -> Option<WalkHit> {
        let hit = self.entry(va).map(|(pa, perms)| WalkHit {
            pa,
            perms,
            perm_fault: !perms.allows(access),
        });

        if let Some(cov) = &self.coverage {
            let faulted = hit.is_none_or(|h| h.perm_fault);
            cov.borrow_mut().record_page_walk(faulted);
        }

        hit
    }
}
