//! Security extension scenario tests.

/// Privilege-mode page access checks (SMEP/SMAP).
pub mod access_modes;

/// Meltdown leak path.
pub mod meltdown;


/// Enclave access gating.
pub mod sgx;

/// Speculative-fetch load fence.
pub mod spec_fence;

/// Nested page translation under a running VM.
pub mod virtualization;
