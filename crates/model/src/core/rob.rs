//! Reorder buffer.
//!
//! Circular buffer retiring micro-ops strictly in program order. Slots
//! are allocated at dispatch, marked ready by writeback, and drained one
//! at a time from the head; an unready head stalls commit entirely.

use crate::config::BackendConfig;

/// Payload stored per reorder-buffer slot at dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RobUop {
    /// Destination physical register, if the op writes one.
    pub dest: Option<usize>,
    /// Previous physical mapping of the destination, released at retire.
    pub old: Option<usize>,
}

/// A retired micro-op together with its resolved branch outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Committed {
    /// Destination physical register.
    pub dest: Option<usize>,
    /// Previous physical mapping now safe to free.
    pub old: Option<usize>,
    /// True when writeback flagged a branch misprediction.
    pub mispredict: bool,
    /// Resolved branch target from writeback.
    pub target: u64,
}

/// Circular reorder buffer.
#[derive(Clone, Debug)]
pub struct Rob {
    entries: Vec<Option<RobUop>>,
    ready: Vec<bool>,
    mispredict: Vec<bool>,
    target: Vec<u64>,
    head: usize,
    tail: usize,
    count: usize,
}

impl Rob {
    /// Creates an empty buffer sized by the backend configuration.
    pub fn new(cfg: &BackendConfig) -> Self {
        let n = cfg.rob_entries;
        Self {
            entries: vec![None; n],
            ready: vec![false; n],
            mispredict: vec![false; n],
            target: vec![0; n],
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Number of occupied slots.
    pub const fn len(&self) -> usize {
        self.count
    }

    /// True when no slot is occupied.
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// True when every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.count == self.entries.len()
    }

    /// Allocates slots at the tail in program order.
    ///
    /// Returns one index per micro-op; `None` marks an op that found the
    /// buffer full. Allocation continues past a full slot so later ops of
    /// the same bundle still see their own overflow status.
    pub fn alloc(&mut self, uops: &[RobUop]) -> Vec<Option<usize>> {
        uops.iter()
            .map(|uop| {
                if self.is_full() {
                    return None;
                }
                let idx = self.tail;
                self.entries[idx] = Some(*uop);
                self.ready[idx] = false;
                self.mispredict[idx] = false;
                self.target[idx] = 0;
                self.tail = (self.tail + 1) % self.entries.len();
                self.count += 1;
                Some(idx)
            })
            .collect()
    }

    /// Marks a slot complete and records its branch resolution.
    pub fn writeback(&mut self, idx: usize, mispredict: bool, target: u64) {
        if idx < self.entries.len() && self.entries[idx].is_some() {
            self.ready[idx] = true;
            self.mispredict[idx] = mispredict;
            self.target[idx] = target;
        }
    }

    /// Retires the head slot if it is occupied and complete.
    pub fn commit(&mut self) -> Option<Committed> {
        let idx = self.head;
        let uop = self.entries[idx]?;
        if !self.ready[idx] {
            return None;
        }
        let committed = Committed {
            dest: uop.dest,
            old: uop.old,
            mispredict: self.mispredict[idx],
            target: self.target[idx],
        };
        self.entries[idx] = None;
        self.ready[idx] = false;
        self.head = (self.head + 1) % self.entries.len();
        self.count -= 1;
        Some(committed)
    }

    /// Discards every in-flight slot (misprediction recovery).
    pub fn flush(&mut self) {
        for slot in &mut self.entries {
            *slot = None;
        }
        for flag in &mut self.ready {
            *flag = false;
        }
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }
}
