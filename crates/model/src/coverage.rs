//! Functional coverage collection.
//!
//! A purely observational sink threaded through the decoder, the translation
//! stack, the caches, and the golden model. Every recorder is fire-and-forget
//! and optional: all components behave identically with the sink absent, and
//! nothing architectural may ever depend on it.
//!
//! Components share one collector through a [`CoverageRef`]
//! (`Rc<RefCell<CoverageModel>>`); the model is single-threaded per simulated
//! core, so the non-`Sync` handle is deliberate.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::common::Fault;

/// Shared handle to a coverage collector.
pub type CoverageRef = Rc<RefCell<CoverageModel>>;

/// Cache or TLB hierarchy level, used as a recorder key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    /// First-level structure (L1 cache or L1 TLB).
    L1,
    /// Second-level structure.
    L2,
    /// Third-level cache.
    L3,
}

/// Per-level hit/miss counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HitMiss {
    /// Number of hits recorded.
    pub hits: u64,
    /// Number of misses recorded.
    pub misses: u64,
}

/// Snapshot of collected coverage, returned by [`CoverageModel::summary`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoverageSummary {
    /// Number of distinct major opcodes seen.
    pub opcodes: usize,
    /// Number of distinct immediate values seen.
    pub immediates: usize,
    /// Cache hit/miss counters per level.
    pub cache: HashMap<Level, HitMiss>,
    /// TLB hit/miss counters per level.
    pub tlb: HashMap<Level, HitMiss>,
    /// Accumulated TLB lookup latency per level, in cycles.
    pub tlb_latency: HashMap<Level, u64>,
    /// TLB permission-fault count per level.
    pub tlb_faults: HashMap<Level, u64>,
    /// Page walks performed and how many of them faulted.
    pub page_walks: HitMiss,
    /// Fault occurrences by code.
    pub exceptions: HashMap<&'static str, u64>,
    /// Retired branches and how many were mispredicted.
    pub branches: u64,
    /// Mispredicted branch count.
    pub mispredicts: u64,
    /// Vector unit-stride loads executed.
    pub vector_loads: u64,
    /// Vector unit-stride stores executed.
    pub vector_stores: u64,
    /// Vector indexed gathers executed.
    pub vector_gathers: u64,
    /// Vector indexed scatters executed.
    pub vector_scatters: u64,
}

/// Collects functional coverage statistics.
///
/// All recorders are cheap counter updates; none of them can fail.
#[derive(Debug, Default)]
pub struct CoverageModel {
    opcodes: HashSet<u32>,
    immediates: HashSet<i64>,
    cache: HashMap<Level, HitMiss>,
    tlb: HashMap<Level, HitMiss>,
    tlb_latency: HashMap<Level, u64>,
    tlb_faults: HashMap<Level, u64>,
    page_walks: HitMiss,
    exceptions: HashMap<&'static str, u64>,
    branches: u64,
    mispredicts: u64,
    vector_loads: u64,
    vector_stores: u64,
    vector_gathers: u64,
    vector_scatters: u64,
}

impl CoverageModel {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty collector already wrapped in a shared handle.
    pub fn shared() -> CoverageRef {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Clears all collected statistics.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Records execution of a major opcode (low 7 bits kept).
    pub fn record_opcode(&mut self, opcode: u32) {
        let _ = self.opcodes.insert(opcode & 0x7F);
    }

    /// Records a decoded immediate value.
    pub fn record_immediate(&mut self, imm: i64) {
        let _ = self.immediates.insert(imm);
    }

    /// Records a cache hit or miss at the given level.
    pub fn record_cache(&mut self, level: Level, hit: bool) {
        let c = self.cache.entry(level).or_default();
        if hit {
            c.hits += 1;
        } else {
            c.misses += 1;
        }
    }

    /// Records a TLB hit or miss at the given level.
    pub fn record_tlb(&mut self, level: Level, hit: bool) {
        let c = self.tlb.entry(level).or_default();
        if hit {
            c.hits += 1;
        } else {
            c.misses += 1;
        }
    }

    /// Accumulates TLB lookup latency at the given level.
    pub fn record_tlb_latency(&mut self, level: Level, cycles: u64) {
        *self.tlb_latency.entry(level).or_default() += cycles;
    }

    /// Records a TLB permission fault at the given level.
    pub fn record_tlb_fault(&mut self, level: Level) {
        *self.tlb_faults.entry(level).or_default() += 1;
    }

    /// Records a page walk and whether it faulted.
    pub fn record_page_walk(&mut self, fault: bool) {
        if fault {
            self.page_walks.misses += 1;
        } else {
            self.page_walks.hits += 1;
        }
    }

    /// Records a retired branch and whether it was mispredicted.
    pub fn record_branch(&mut self, mispredict: bool) {
        self.branches += 1;
        if mispredict {
            self.mispredicts += 1;
        }
    }

    /// Records an architectural fault occurrence.
    pub fn record_exception(&mut self, fault: Fault) {
        *self.exceptions.entry(fault.code()).or_default() += 1;
    }

    /// Records a vector unit-stride load.
    pub fn record_vector_load(&mut self) {
        self.vector_loads += 1;
    }

    /// Records a vector unit-stride store.
    pub fn record_vector_store(&mut self) {
        self.vector_stores += 1;
    }

    /// Records a vector indexed gather.
    pub fn record_vector_gather(&mut self) {
        self.vector_gathers += 1;
    }

    /// Records a vector indexed scatter.
    pub fn record_vector_scatter(&mut self) {
        self.vector_scatters += 1;
    }

    /// Returns the set of distinct major opcodes seen so far.
    pub fn opcode_coverage(&self) -> HashSet<u32> {
        self.opcodes.clone()
    }

    /// Returns a snapshot of everything collected so far.
    pub fn summary(&self) -> CoverageSummary {
        CoverageSummary {
            opcodes: self.opcodes.len(),
            immediates: self.immediates.len(),
            cache: self.cache.clone(),
            tlb: self.tlb.clone(),
            tlb_latency: self.tlb_latency.clone(),
            tlb_faults: self.tlb_faults.clone(),
            page_walks: self.page_walks,
            exceptions: self.exceptions.clone(),
            branches: self.branches,
            mispredicts: self.mispredicts,
            vector_loads: self.vector_loads,
            vector_stores: self.vector_stores,
            vector_gathers: self.vector_gathers,
            vector_scatters: self.vector_scatters,
        }
    }
}
