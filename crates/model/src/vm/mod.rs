//! Virtualization models.
//!
//! A minimal VM control structure and an extended-page-table transform.
//! When a VM context is active, guest-physical addresses pass through the
//! EPT's per-VM XOR transform before reaching backing memory.

/// VM control structure: which VM, if any, is running.
#[derive(Clone, Copy, Debug, Default)]
pub struct Vmcs {
    vmid: u8,
    running: bool,
}

impl Vmcs {
    /// Creates a VMCS with no VM running.
    pub const fn new() -> Self {
        Self {
            vmid: 0,
            running: false,
        }
    }

    /// Enters VM context `vmid` (masked to 8 bits).
    pub fn vm_on(&mut self, vmid: u64) {
        self.vmid = (vmid & 0xFF) as u8;
        self.running = true;
    }

    /// Leaves VM context.
    pub fn vm_off(&mut self) {
        self.running = false;
    }

    /// The active VM id, if a VM is running.
    pub const fn current_vmid(&self) -> Option<u8> {
        if self.running {
            Some(self.vmid)
        } else {
            None
        }
    }
}

/// Extended page table: per-VM guest-physical address transform.
///
/// The transform is a XOR with a key derived from the base key and the VM
/// id. A toy model with the useful property that distinct VMs see disjoint
/// views of the same backing store.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ept {
    key: u64,
}

impl Ept {
    /// Creates an EPT with the given base key.
    pub const fn new(key: u64) -> Self {
        Self { key }
    }

    /// Translates a guest-physical address for VM `vmid`.
    pub const fn translate(&self, vmid: u8, gpa: u64) -> u64 {
        let vm_key = self.key ^ (vmid as u64).wrapping_mul(0x1000);
        gpa ^ vm_key
    }
}
