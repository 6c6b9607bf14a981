//! Load/store unit.
//!
//! Services up to two memory micro-ops per cycle. The unit owns its own
//! translation stack and backing memory: each operation translates its
//! virtual address through the TLB cascade and carries the summed
//! cascade latency in its result. Unmapped addresses and permission
//! failures both surface as page faults; there is no demand-mapping
//! here, the page table is whatever the harness installed.

use tracing::debug;

use crate::common::{Access, Fault, PhysAddr, VirtAddr};
use crate::config::TranslationConfig;
use crate::coverage::CoverageRef;
use crate::mem::{Backing, SparseMemory};
use crate::mmu::{Translation, TranslationStack};

/// Ports serviced per cycle.
pub const LSU_PORTS: usize = 2;

/// One memory micro-op presented to the unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemOp {
    /// True for stores, false for loads.
    pub is_store: bool,
    /// Virtual address of the access.
    pub addr: u64,
    /// Store data (ignored for loads).
    pub data: u64,
    /// Access width in bytes.
    pub size: usize,
    /// Destination physical register for loads.
    pub dest: Option<usize>,
    /// Reorder buffer slot of this micro-op.
    pub rob: Option<usize>,
}

impl MemOp {
    /// A load of `size` bytes from `addr` into `dest`.
    pub const fn load(addr: u64, size: usize, dest: Option<usize>, rob: Option<usize>) -> Self {
        Self {
            is_store: false,
            addr,
            data: 0,
            size,
            dest,
            rob,
        }
    }

    /// A store of the low `size` bytes of `data` to `addr`.
    pub const fn store(addr: u64, data: u64, size: usize, rob: Option<usize>) -> Self {
        Self {
            is_store: true,
            addr,
            data,
            size,
            dest: None,
            rob,
        }
    }
}

/// Outcome of one serviced memory micro-op.
///
/// Completed stores produce no result at all; their port slot stays
/// empty and the reorder buffer learns of completion out of band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemResult {
    /// The access faulted during translation.
    Fault {
        /// Fault code (always a page fault from this unit).
        fault: Fault,
        /// Reorder buffer slot to mark faulted.
        rob: Option<usize>,
    },
    /// A load completed.
    Load {
        /// Loaded value, zero-extended to 64 bits.
        data: u64,
        /// Destination physical register.
        dest: Option<usize>,
        /// Reorder buffer slot to mark complete.
        rob: Option<usize>,
        /// Translation latency in cycles.
        latency: u64,
    },
}

/// Two-port load/store unit with a private translation stack.
#[derive(Debug)]
pub struct Lsu {
    mem: SparseMemory,
    /// Translation stack; exposed so the harness can install mappings.
    pub translation: TranslationStack,
}

impl Lsu {
    /// Creates a unit with empty memory and the given translation
    /// parameters.
    pub fn new(cfg: &TranslationConfig) -> Self {
        Self {
            mem: SparseMemory::new(),
            translation: TranslationStack::new(cfg),
        }
    }

    /// Attaches a coverage sink to the translation cascade.
    pub fn set_coverage(&mut self, coverage: &CoverageRef) {
        self.translation.set_coverage(coverage);
    }

    /// Installs a page mapping in the unit's page table.
    pub fn map_page(&mut self, va: u64, pa: u64, perms: crate::common::PagePerms) {
        self.translation
            .map_page(VirtAddr::new(va), PhysAddr::new(pa), perms);
    }

    /// Writes directly into backing memory, bypassing translation.
    pub fn poke(&mut self, pa: u64, value: u64, size: usize) {
        self.mem.store(PhysAddr::new(pa), value, size);
    }

    /// Reads directly from backing memory, bypassing translation.
    pub fn peek(&mut self, pa: u64, size: usize) -> u64 {
        self.mem.load(PhysAddr::new(pa), size)
    }

    /// Services up to two micro-ops for this cycle.
    ///
    /// Each port is independent: a fault on one does not disturb the
    /// other. Results land in the same port slot the op arrived in.
    pub fn cycle(&mut self, ops: [Option<MemOp>; LSU_PORTS]) -> [Option<MemResult>; LSU_PORTS] {
        ops.map(|op| op.and_then(|op| self.service(op)))
    }

    fn service(&mut self, op: MemOp) -> Option<MemResult> {
        let access = if op.is_store { Access::Write } else { Access::Read };
        let (pa, latency) = match self.translation.translate(VirtAddr::new(op.addr), access) {
            Translation::Hit {
                pa,
                perm_fault: false,
                latency,
                ..
            } => (pa, latency),
            Translation::Hit { .. } | Translation::Unmapped { .. } => {
                debug!(va = op.addr, is_store = op.is_store, "lsu page fault");
                return Some(MemResult::Fault {
                    fault: Fault::Page,
                    rob: op.rob,
                });
            }
        };

        if op.is_store {
            self.mem.store(pa, op.data, op.size);
            None
        } else {
            Some(MemResult::Load {
                data: self.mem.load(pa, op.size),
                dest: op.dest,
                rob: op.rob,
                latency,
            })
        }
    }
}
