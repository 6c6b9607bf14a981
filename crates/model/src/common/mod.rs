//! Common types shared across the model.
//!
//! Fundamental building blocks used by every component:
//! 1. **Address Types:** Strong types for virtual and physical addresses.
//! 2. **Fault Codes:** The closed set of architectural fault codes.
//! 3. **Permissions:** Page permission flags and access kinds.

/// Address type definitions (physical and virtual addresses).
pub mod addr;

/// Architectural fault codes.
pub mod fault;

/// Page permissions and access kinds.
pub mod perms;

pub use addr::{PAGE_SHIFT, PhysAddr, VirtAddr};
pub use fault::Fault;
pub use perms::{Access, PagePerms};
