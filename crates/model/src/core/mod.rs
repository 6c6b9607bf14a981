//! Core model components.
//!
//! The architectural reference plus the out-of-order backend structures:
//! 1. **Golden Model:** Instruction-accurate reference executor.
//! 2. **Rename:** Architectural-to-physical register mapping.
//! 3. **Issue Queue:** Class-partitioned out-of-order scheduler.
//! 4. **Reorder Buffer:** Strict in-order retirement.
//! 5. **Load/Store Unit:** Two-port translated memory pipeline.

/// Instruction-accurate golden reference model.
pub mod golden;

/// Issue queue and functional-unit scheduling.
pub mod issue_queue;

/// Load/store unit.
pub mod lsu;

/// Register rename unit.
pub mod rename;

/// Reorder buffer.
pub mod rob;

pub use golden::{BundleResult, GoldenModel, Hazard, HazardKind};
pub use issue_queue::{FuClass, FuStatus, IqUop, IssueQueue};
pub use lsu::{Lsu, MemOp, MemResult, LSU_PORTS};
pub use rename::{RenameRequest, RenameUnit, Renamed, ARCH_REGS};
pub use rob::{Committed, Rob, RobUop};
