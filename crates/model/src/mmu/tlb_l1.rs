//! First-level TLB.
//!
//! Keyed by virtual page number, capacity-bounded with FIFO eviction. Fixed
//! hit/miss latencies are recorded per lookup for cascade accounting.

use std::collections::{HashMap, VecDeque};

use crate::common::{Access, PagePerms, PhysAddr, VirtAddr};
use crate::config::TranslationConfig;
use crate::coverage::{CoverageRef, Level};
use crate::mmu::TlbResult;

/// Cached translation for one virtual page.
#[derive(Clone, Copy, Debug)]
struct TlbL1Entry {
    /// Physical page number.
    ppn: u64,
    /// Permissions carried over from the authoritative mapping.
    perms: PagePerms,
}

/// First-level TLB: VPN-keyed, FIFO eviction.
#[derive(Debug)]
pub struct TlbL1 {
    entries: HashMap<u64, TlbL1Entry>,
    /// Insertion order for FIFO eviction; front is the next victim.
    order: VecDeque<u64>,
    capacity: usize,
    hit_latency: u64,
    miss_latency: u64,
    last_latency: u64,
    coverage: Option<CoverageRef>,
}

impl TlbL1 {
    /// Creates an L1 TLB from the translation configuration.
    pub fn new(cfg: &TranslationConfig) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: cfg.l1_entries,
            hit_latency: cfg.l1_hit_latency,
            miss_latency: cfg.l1_miss_latency,
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
        self.entries.len()
    }

    /// Returns true if no translations are cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the page containing `va` and checks `access` against the
    /// cached permissions.
    pub fn lookup(&mut self, va: VirtAddr, access: Access) -> TlbResult {
        let result = match self.entries.get(&va.vpn()) {
            Some(entry) => TlbResult::Hit {
                pa: PhysAddr::new((entry.ppn << 12) | va.page_offset()),
                perms: entry.perms,
                perm_fault: !entry.perms.allows(access),
            },
            None => TlbResult::Miss,
        };

        let hit = !matches!(result, TlbResult::Miss);
        self.last_latency = if hit { self.hit_latency } else { self.miss_latency };

        if let Some(cov) = &self.coverage {
            let mut cov = cov.borrow_mut();
            cov.record_tlb(Level::L1, hit);
            cov.record_tlb_latency(Level::L1, self.last_latency);
            if matches!(result, TlbResult::Hit { perm_fault: true, .. }) {
                cov.record_tlb_fault(Level::L1);
            }
        }

        result
    }

    /// Inserts or refreshes a translation, evicting the oldest entry when
    /// at capacity. A refreshed entry moves to the back of the FIFO.
    pub fn refill(&mut self, va: VirtAddr, pa: PhysAddr, perms: PagePerms) {
        let vpn = va.vpn();
        if self.entries.contains_key(&vpn) {
            self.order.retain(|&v| v != vpn);
        } else if self.entries.len() >= self.capacity {
            if let Some(victim) = self.order.pop_front() {
                let _ = self.entries.remove(&victim);
            }
        }
        let _ = self.entries.insert(
            vpn,
            TlbL1Entry {
                ppn: pa.ppn(),
                perms,
            },
        );
        self.order.push_back(vpn);
    }

    /// Drops every cached translation.
    pub fn flush(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
