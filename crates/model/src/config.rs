//! Model configuration.
//!
//! Hierarchical configuration for the core model. It provides:
//! 1. **Defaults:** Baseline constants matching the reference hardware model.
//! 2. **Structures:** Per-component config for the translation stack, the
//!    out-of-order backend, and golden-model behavior flags.
//!
//! Configuration is supplied as JSON (deserialized with `serde`) or built in
//! code from `Config::default()`.

use serde::Deserialize;

/// Default configuration constants.
///
/// These reproduce the reference model's hardware parameters exactly; tests
/// that state latencies or capacities assume them.
pub mod defaults {
    /// L1 TLB entry count.
    pub const TLB_L1_ENTRIES: usize = 64;

    /// L1 TLB hit latency in cycles.
    pub const TLB_L1_HIT_LATENCY: u64 = 1;

    /// L1 TLB miss latency in cycles.
    pub const TLB_L1_MISS_LATENCY: u64 = 5;

    /// L2 TLB entry count.
    pub const TLB_L2_ENTRIES: usize = 4;

    /// L2 TLB hit latency in cycles.
    pub const TLB_L2_HIT_LATENCY: u64 = 8;

    /// L2 TLB miss latency in cycles.
    pub const TLB_L2_MISS_LATENCY: u64 = 20;

    /// Page walk latency in cycles, charged when both TLB levels miss.
    pub const WALK_LATENCY: u64 = 20;

    /// Reorder buffer entry count.
    pub const ROB_ENTRIES: usize = 256;

    /// Total issue queue capacity across all functional-unit classes.
    pub const IQ_ENTRIES: usize = 128;

    /// Maximum instructions issued per cycle.
    pub const ISSUE_WIDTH: usize = 8;

    /// Issue queue capacity for the integer class.
    pub const IQ_INT_CAPACITY: usize = 32;

    /// Issue queue capacity for the floating-point class.
    pub const IQ_FP_CAPACITY: usize = 32;

    /// Issue queue capacity for the vector class.
    pub const IQ_VECTOR_CAPACITY: usize = 32;

    /// Issue queue capacity for the memory class.
    pub const IQ_MEM_CAPACITY: usize = 16;

    /// Issue queue capacity for the branch class.
    pub const IQ_BRANCH_CAPACITY: usize = 16;

    /// Physical register file size (32 architectural + 96 rename).
    pub const PHYS_REGS: usize = 128;
}

/// Translation stack parameters (TLBs and page walker).
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// L1 TLB entry count.
    pub l1_entries: usize,
    /// L1 TLB hit latency in cycles.
    pub l1_hit_latency: u64,
    /// L1 TLB miss latency in cycles.
    pub l1_miss_latency: u64,
    /// L2 TLB entry count.
    pub l2_entries: usize,
    /// L2 TLB hit latency in cycles.
    pub l2_hit_latency: u64,
    /// L2 TLB miss latency in cycles.
    pub l2_miss_latency: u64,
    /// Page walk latency in cycles.
    pub walk_latency: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            l1_entries: defaults::TLB_L1_ENTRIES,
            l1_hit_latency: defaults::TLB_L1_HIT_LATENCY,
            l1_miss_latency: defaults::TLB_L1_MISS_LATENCY,
            l2_entries: defaults::TLB_L2_ENTRIES,
            l2_hit_latency: defaults::TLB_L2_HIT_LATENCY,
            l2_miss_latency: defaults::TLB_L2_MISS_LATENCY,
            walk_latency: defaults::WALK_LATENCY,
        }
    }
}

/// Out-of-order backend parameters (ROB, issue queue, rename).
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Reorder buffer entry count.
    pub rob_entries: usize,
    /// Total issue queue capacity.
    pub iq_entries: usize,
    /// Maximum instructions issued per cycle.
    pub issue_width: usize,
    /// Issue queue capacity for the integer class.
    pub iq_int_capacity: usize,
    /// Issue queue capacity for the floating-point class.
    pub iq_fp_capacity: usize,
    /// Issue queue capacity for the vector class.
    pub iq_vector_capacity: usize,
    /// Issue queue capacity for the memory class.
    pub iq_mem_capacity: usize,
    /// Issue queue capacity for the branch class.
    pub iq_branch_capacity: usize,
    /// Physical register file size.
    pub phys_regs: usize,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            rob_entries: defaults::ROB_ENTRIES,
            iq_entries: defaults::IQ_ENTRIES,
            issue_width: defaults::ISSUE_WIDTH,
            iq_int_capacity: defaults::IQ_INT_CAPACITY,
            iq_fp_capacity: defaults::IQ_FP_CAPACITY,
            iq_vector_capacity: defaults::IQ_VECTOR_CAPACITY,
            iq_mem_capacity: defaults::IQ_MEM_CAPACITY,
            iq_branch_capacity: defaults::IQ_BRANCH_CAPACITY,
            phys_regs: defaults::PHYS_REGS,
        }
    }
}

/// Golden model behavior flags.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct GoldenConfig {
    /// When false, a faulting load still materializes the underlying data
    /// value into the destination register even though the fault is
    /// reported. Models the classic speculative side channel; enabled
    /// (protected) by default.
    pub meltdown_protection: bool,
}

impl Default for GoldenConfig {
    fn default() -> Self {
        Self {
            meltdown_protection: true,
        }
    }
}

/// Root configuration for the model.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Translation stack parameters.
    pub translation: TranslationConfig,
    /// Out-of-order backend parameters.
    pub backend: BackendConfig,
    /// Golden model behavior flags.
    pub golden: GoldenConfig,
}
