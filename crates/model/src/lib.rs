//! Cycle-level functional model of an out-of-order superscalar RISC-V core.
//!
//! The crate provides two halves that verify each other:
//! 1. **Golden Model:** An instruction-accurate reference executor for
//!    RV64 integer, atomic, floating-point, and vector instructions, with
//!    full address translation (two TLB levels over an authoritative page
//!    walker) and the security extensions of the reference hardware:
//!    memory encryption, enclave access control, SMEP/SMAP, nested-page
//!    translation, and a speculative-fetch load fence.
//! 2. **Backend Structures:** Standalone models of the out-of-order
//!    machinery — eight-wide decoder, register rename, class-partitioned
//!    issue queue, reorder buffer, and a two-port load/store unit.
//!
//! The [`sim::Scoreboard`] ties them together: it steps the golden model
//! in lockstep with a device under test, cross-checks every commit, and
//! records a serializable trace.
//!
//! # Example
//!
//! ```
//! use kestrel_core::config::Config;
//! use kestrel_core::core::GoldenModel;
//!
//! let mut gm = GoldenModel::new(&Config::default());
//! gm.step(0x0050_0093); // addi x1,x0,5
//! gm.step(0x0030_0113); // addi x2,x0,3
//! gm.step(0x0020_81B3); // add  x3,x1,x2
//! assert_eq!(gm.reg(3), 8);
//! ```

/// Common types: addresses, faults, permissions.
pub mod common;

/// Model configuration.
pub mod config;

/// Golden model and out-of-order backend structures.
pub mod core;

/// Functional coverage collection.
pub mod coverage;

/// Instruction set definitions and decoding.
pub mod isa;

/// Memory models: sparse backing store and caches.
pub mod mem;

/// Address translation stack.
pub mod mmu;

/// Security extensions: encryption, enclaves, access-mode checks.
pub mod security;

/// Simulation harness: scoreboard and trace.
pub mod sim;

/// Virtualization: VM control state and nested page translation.
pub mod vm;

pub use crate::common::{Access, Fault, PagePerms, PhysAddr, VirtAddr};
pub use crate::config::Config;
pub use crate::core::GoldenModel;
pub use crate::sim::{Observation, Scoreboard};
