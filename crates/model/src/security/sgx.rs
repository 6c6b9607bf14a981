//! SGX-style enclave page map.
//!
//! The enclave page cache map (EPCM) is a set of 8-bit page numbers derived
//! from physical addresses. While the enclave is active, any access to a
//! page outside the committed set faults. Set membership stands in for real
//! attestation and must stay that way.

use std::collections::HashSet;

/// Enclave state: committed page set plus an active flag.
#[derive(Clone, Debug, Default)]
pub struct SgxEnclave {
    epcm: HashSet<u8>,
    active: bool,
}

impl SgxEnclave {
    /// Creates an inactive enclave with an empty page set.
    pub fn new() -> Self {
        Self::default()
    }

    const fn page(addr: u64) -> u8 {
        ((addr >> 8) & 0xFF) as u8
    }

    /// Commits the page containing `addr` as the enclave's initial page.
    pub fn ecreate(&mut self, addr: u64) {
        let _ = self.epcm.insert(Self::page(addr));
    }

    /// Adds the page containing `addr` to the committed set.
    pub fn eadd(&mut self, addr: u64) {
        let _ = self.epcm.insert(Self::page(addr));
    }

    /// Finalizes the enclave. A no-op in this model.
    pub fn einit(&mut self) {}

    /// Enters the enclave, activating access checks.
    pub fn eenter(&mut self) {
        self.active = true;
    }

    /// Leaves the enclave, deactivating access checks.
    pub fn eexit(&mut self) {
        self.active = false;
    }

    /// True while the enclave is entered.
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// True if an access to `addr` must fault: the enclave is active and
    /// the containing page was never committed.
    pub fn access_faults(&self, addr: u64) -> bool {
        self.active && !self.epcm.contains(&Self::page(addr))
    }
}
