//! Security extension models.
//!
//! Each component wraps or gates a memory access:
//! 1. **SEV:** XOR memory encryption with address scrambling.
//! 2. **SGX:** enclave page-set access check.
//! 3. **SMEP/SMAP:** privilege-mode page checks.
//! 4. **Spec fence:** load gating behind unretired branches.
//!
//! All are toy models by design; their test-observable behavior is the
//! contract, not their security value.

/// SEV-style XOR memory encryption.
pub mod sev;

/// SGX-style enclave page map.
pub mod sgx;

/// SMEP/SMAP privilege checks.
pub mod smep_smap;

/// Speculative-fetch load fence.
pub mod spec_fence;

pub use sev::SevMemory;
pub use sgx::SgxEnclave;
pub use spec_fence::SpecFetchFence;
