//! Address translation stack.
//!
//! A strict inclusion cascade: the L1 TLB fronts the L2 TLB, which fronts the
//! authoritative page walker. Provides:
//! 1. **TLB L1:** VPN-keyed, FIFO eviction.
//! 2. **TLB L2:** full-VA keyed, insertion-order eviction.
//! 3. **Walker:** the unbounded ground-truth page table.
//! 4. **Cascade:** [`TranslationStack::translate`] with refill-on-miss and
//!    summed latency accounting.

/// First-level TLB.
pub mod tlb_l1;

/// Second-level TLB.
pub mod tlb_l2;

/// Authoritative page walker.
pub mod walker;

use tracing::trace;

use crate::common::{Access, PagePerms, PhysAddr, VirtAddr};
use crate::config::TranslationConfig;
use crate::coverage::CoverageRef;

pub use tlb_l1::TlbL1;
pub use tlb_l2::TlbL2;
pub use walker::{PageWalker, WalkHit};

/// Result of a single TLB lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TlbResult {
    /// The address was cached.
    Hit {
        /// Translated physical address.
        pa: PhysAddr,
        /// Permissions carried by the cached entry.
        perms: PagePerms,
        /// True if the requested access kind is not permitted.
        perm_fault: bool,
    },
    /// The address was not cached; consult the next level.
    Miss,
}

/// Result of a full cascade translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Translation {
    /// A mapping was found (possibly with a permission fault).
    Hit {
        /// Translated physical address.
        pa: PhysAddr,
        /// Permissions of the mapping.
        perms: PagePerms,
        /// True if the requested access kind is not permitted.
        perm_fault: bool,
        /// Total cycles spent across the cascade levels traversed.
        latency: u64,
    },
    /// No mapping exists anywhere in the stack.
    Unmapped {
        /// Total cycles spent discovering the miss.
        latency: u64,
    },
}

impl Translation {
    /// Total latency of this translation attempt.
    pub const fn latency(&self) -> u64 {
        match self {
            Self::Hit { latency, .. } | Self::Unmapped { latency } => *latency,
        }
    }
}

/// The TLB-L1 → TLB-L2 → walker cascade as one owned unit.
///
/// Every consumer of address translation (golden model, load/store unit,
/// instruction cache) owns its own stack; the structures are not designed
/// for concurrent mutation.
#[derive(Debug)]
pub struct TranslationStack {
    /// First-level TLB.
    pub l1: TlbL1,
    /// Second-level TLB.
    pub l2: TlbL2,
    /// Authoritative page table.
    pub walker: PageWalker,
    walk_latency: u64,
}

impl TranslationStack {
    /// Creates a translation stack from the given configuration.
    pub fn new(cfg: &TranslationConfig) -> Self {
        Self {
            l1: TlbL1::new(cfg),
            l2: TlbL2::new(cfg),
            walker: PageWalker::new(),
            walk_latency: cfg.walk_latency,
        }
    }

    /// Attaches one coverage sink to all three levels.
    pub fn set_coverage(&mut self, coverage: &CoverageRef) {
        self.l1.set_coverage(coverage.clone());
        self.l2.set_coverage(coverage.clone());
        self.walker.set_coverage(coverage.clone());
    }

    /// Installs a mapping in the authoritative table.
    ///
    /// The TLBs are left alone: stale cached entries age out through their
    /// normal eviction, exactly as in the reference model.
    pub fn map_page(&mut self, va: VirtAddr, pa: PhysAddr, perms: PagePerms) {
        self.walker.set_entry(va, pa, perms);
    }

    /// Translates `va` through the cascade, refilling upper levels on the
    /// way back and summing the latency of every level traversed.
    ///
    /// Refills propagate the authoritative permissions, so later TLB hits
    /// enforce the same checks the walker would. A walker-level permission
    /// fault does not refill (the reference model only caches clean walks).
    pub fn translate(&mut self, va: VirtAddr, access: Access) -> Translation {
        if let TlbResult::Hit { pa, perms, perm_fault } = self.l1.lookup(va, access) {
            return Translation::Hit {
                pa,
                perms,
                perm_fault,
                latency: self.l1.last_latency(),
            };
        }
        let mut latency = self.l1.last_latency();

        if let TlbResult::Hit { pa, perms, perm_fault } = self.l2.lookup(va, access) {
            latency += self.l2.last_latency();
            self.l1.refill(va, pa, perms);
            return Translation::Hit {
                pa,
                perms,
                perm_fault,
                latency,
            };
        }
        latency += self.l2.last_latency();
        latency += self.walk_latency;

        match self.walker.walk(va, access) {
            Some(WalkHit { pa, perms, perm_fault }) => {
                if !perm_fault {
                    self.l2.refill(va, pa, perms);
                    self.l1.refill(va, pa, perms);
                }
                trace!(va = va.val(), pa = pa.val(), %perms, "page walk");
                Translation::Hit {
                    pa,
                    perms,
                    perm_fault,
                    latency,
                }
            }
            None => Translation::Unmapped { latency },
        }
    }
}
