//! Speculative-fetch fence.
//!
//! A pending counter gating loads behind unretired branches. A fence
//! arms the gate; each retired branch disarms one level; loads proceed
//! only when nothing is pending.

/// Pending-branch load gate.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpecFetchFence {
    pending: u32,
}

impl SpecFetchFence {
    /// Creates a fence with nothing pending.
    pub const fn new() -> Self {
        Self { pending: 0 }
    }

    /// Arms the fence after a branch prediction.
    pub fn fence(&mut self) {
        self.pending += 1;
    }

    /// Notes a retired branch, releasing one pending level.
    pub fn retire_branch(&mut self) {
        self.pending = self.pending.saturating_sub(1);
    }

    /// True when loads may proceed.
    pub const fn loads_allowed(&self) -> bool {
        self.pending == 0
    }

    /// Number of unretired fenced branches.
    pub const fn pending(&self) -> u32 {
        self.pending
    }
}
