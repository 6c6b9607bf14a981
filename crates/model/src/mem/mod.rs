//! Memory models.
//!
//! Backing storage and cache structures:
//! 1. **Sparse memory:** the word-granular backing store and its
//!    [`Backing`] abstraction.
//! 2. **Data caches:** L1-D with byte strobes, unified L2/L3 maps.
//! 3. **Instruction cache:** physically tagged fetch path with its own
//!    translation stack.

/// Data cache models (L1-D, unified L2/L3).
pub mod cache;

/// L1 instruction cache with embedded translation.
pub mod icache;

/// Sparse backing memory and the `Backing` trait.
pub mod sparse;

pub use cache::{L1DCache, UnifiedCache};
pub use icache::L1ICache;
pub use sparse::{Backing, SparseMemory};
