//! Second-level TLB.
//!
//! Keyed by the full virtual address, with a small capacity and
//! insertion-order eviction. Backstops the L1 TLB in the translation
//! cascade; hits here refill L1.

use crate::common::{Access, PagePerms, PhysAddr, VirtAddr};
use crate::config::TranslationConfig;
use crate::coverage::{CoverageRef, Level};
use crate::mmu::TlbResult;

/// Second-level TLB.
///
/// The entry count is small enough (4 by default) that a linear scan over a
/// vector beats any map structure and preserves insertion order for free.
#[derive(Debug)]
pub struct TlbL2 {
    /// (va, pa, perms) triples in insertion order; index 0 is the victim.
    table: Vec<(u64, PhysAddr, PagePerms)>,
    capacity: usize,
    hit_latency: u64,
    miss_latency: u64,
    last_latency: u64,
    coverage: Option<CoverageRef>,
}

impl TlbL2 {
    /// Creates an L2 TLB from the translation configuration.
    pub fn new(cfg: &TranslationConfig) -> Self {
        Self {
            table: Vec::new(),
            capacity: cfg.l2_entries,
            hit_latency: cfg.l2_hit_latency,
            miss_latency: cfg.l2_miss_latency,
            last_latency: 0,
            coverage: None,
        }
    }

    /// Attaches a coverage sink.
    pub fn set_coverage(&mut self, coverage: CoverageRef) {
        self.coverage = Some(coverage);
    }

    /// Latency in cycles of the most recent lookup.
    pub const fn last_latency(&self) -> u64 {
        self.last_latency
    }

    /// Number of cached translations.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if no translations are cached.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Looks up the exact virtual address and checks `access` against the
    /// cached permissions.
    pub fn lookup(&mut self, va: VirtAddr, access: Access) -> TlbResult {
        let result = self
            .table
            .iter()
            .find(|&&(key, _, _)| key == va.val())
            .map_or(TlbResult::Miss, |&(_, pa, perms)| TlbResult::Hit {
                pa,
                perms,
                perm_fault: !perms.allows(access),
            });

        let hit = !matches!(result, TlbResult::Miss);
        self.last_latency = if hit { self.hit_latency } else { self.miss_latency };

        if let Some(cov) = &self.coverage {
            let mut cov = cov.borrow_mut();
            cov.record_tlb(Level::L2, hit);
            cov.record_tlb_latency(Level::L2, self.last_latency);
            if matches!(result, TlbResult::Hit { perm_fault: true, .. }) {
                cov.record_tlb_fault(Level::L2);
            }
        }

        result
    }

    /// Inserts or updates a translation, evicting the oldest insertion when
    /// at capacity. An updated entry keeps its position.
    pub fn refill(&mut self, va: VirtAddr, pa: PhysAddr, perms: PagePerms) {
        if let Some(slot) = self.table.iter_mut().find(|(key, _, _)| *key == va.val()) {
            slot.1 = pa;
            slot.2 = perms;
            return;
        }
        if self.table.len() >= self.capacity {
            let _ = self.table.remove(0);
        }
        self.table.push((va.val(), pa, perms));
    }

    /// Drops every cached translation.
    pub fn flush(&mut self) {
        self.table.clear();
    }
}
