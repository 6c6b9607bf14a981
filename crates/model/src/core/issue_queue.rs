//! Out-of-order issue queue.
//!
//! Entries are partitioned by functional-unit class, each class bounded
//! on its own and the whole queue bounded by a total capacity. Within a
//! class, entries issue strictly in FIFO order (an unready head blocks
//! its class); across classes, issue interleaves round-robin under the
//! caller-supplied functional-unit availability.

use std::collections::VecDeque;

use crate::config::BackendConfig;

/// Functional-unit class of a queued micro-op.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FuClass {
    /// Integer ALU.
    #[default]
    Int,
    /// Floating-point unit.
    Fp,
    /// Vector unit.
    Vector,
    /// Load/store unit.
    Mem,
    /// Branch unit.
    Branch,
}

impl FuClass {
    /// All classes in round-robin scheduling order.
    pub const ALL: [Self; 5] = [Self::Int, Self::Fp, Self::Vector, Self::Mem, Self::Branch];

    const fn index(self) -> usize {
        match self {
            Self::Int => 0,
            Self::Fp => 1,
            Self::Vector => 2,
            Self::Mem => 3,
            Self::Branch => 4,
        }
    }
}

/// Per-class functional-unit availability for one issue cycle.
#[derive(Clone, Copy, Debug, Default)]
pub struct FuStatus {
    /// Available integer units.
    pub int: usize,
    /// Available floating-point units.
    pub fp: usize,
    /// Available vector units.
    pub vector: usize,
    /// Available load/store ports.
    pub mem: usize,
    /// Available branch units.
    pub branch: usize,
}

impl FuStatus {
    /// The same availability for every class.
    pub const fn uniform(n: usize) -> Self {
        Self {
            int: n,
            fp: n,
            vector: n,
            mem: n,
            branch: n,
        }
    }

    const fn get(&self, class: FuClass) -> usize {
        match class {
            FuClass::Int => self.int,
            FuClass::Fp => self.fp,
            FuClass::Vector => self.vector,
            FuClass::Mem => self.mem,
            FuClass::Branch => self.branch,
        }
    }
}

/// One queued micro-op: up to three operands, each either a value or a
/// pending source tag awaiting wakeup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IqUop {
    /// First operand value, if known.
    pub op1: Option<u64>,
    /// Second operand value, if known.
    pub op2: Option<u64>,
    /// Third operand value (FP/vector), if known.
    pub op3: Option<u64>,
    /// Physical register tag the first operand waits on.
    pub src1_tag: Option<usize>,
    /// Physical register tag the second operand waits on.
    pub src2_tag: Option<usize>,
    /// Physical register tag the third operand waits on.
    pub src3_tag: Option<usize>,
    /// Destination physical register.
    pub dest: Option<usize>,
    /// Reorder buffer slot of this micro-op.
    pub rob_idx: Option<usize>,
    /// First operand readiness.
    pub ready1: bool,
    /// Second operand readiness.
    pub ready2: bool,
    /// Third operand readiness.
    pub ready3: bool,
    /// Functional-unit class.
    pub func_type: FuClass,
    /// Bubble slots are skipped at allocation.
    pub valid: bool,
}

impl Default for IqUop {
    fn default() -> Self {
        Self {
            op1: None,
            op2: None,
            op3: None,
            src1_tag: None,
            src2_tag: None,
            src3_tag: None,
            dest: None,
            rob_idx: None,
            ready1: true,
            ready2: true,
            ready3: true,
            func_type: FuClass::Int,
            valid: true,
        }
    }
}

impl IqUop {
    const fn ready(&self) -> bool {
        self.ready1 && self.ready2 && self.ready3
    }
}

/// Class-partitioned issue queue.
#[derive(Clone, Debug)]
pub struct IssueQueue {
    rs: [VecDeque<IqUop>; 5],
    capacity: [usize; 5],
    size: usize,
    issue_width: usize,
    count: usize,
}

impl IssueQueue {
    /// Creates an empty queue from the backend configuration.
    pub fn new(cfg: &BackendConfig) -> Self {
        Self {
            rs: std::array::from_fn(|_| VecDeque::new()),
            capacity: [
                cfg.iq_int_capacity,
                cfg.iq_fp_capacity,
                cfg.iq_vector_capacity,
                cfg.iq_mem_capacity,
                cfg.iq_branch_capacity,
            ],
            size: cfg.iq_entries,
            issue_width: cfg.issue_width,
            count: 0,
        }
    }

    /// Number of queued micro-ops across all classes.
    pub const fn len(&self) -> usize {
        self.count
    }

    /// True when nothing is queued.
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Discards every queued entry (misprediction recovery).
    pub fn flush(&mut self) {
        for class in &mut self.rs {
            class.clear();
        }
        self.count = 0;
    }

    /// Admits micro-ops in program order.
    ///
    /// Admission drops rather than blocks: allocation stops once the
    /// total capacity is reached, and an op whose class is full is
    /// skipped. The caller must retry anything not admitted.
    pub fn alloc(&mut self, uops: &[IqUop]) {
        for uop in uops {
            if self.count >= self.size {
                break;
            }
            if !uop.valid {
                continue;
            }
            let class = uop.func_type.index();
            if self.rs[class].len() >= self.capacity[class] {
                continue;
            }
            self.rs[class].push_back(*uop);
            self.count += 1;
        }
    }

    /// Broadcasts a completed result to every waiting operand slot.
    ///
    /// This is the sole mechanism resolving producer-consumer
    /// dependencies: matching not-yet-ready slots capture `value` and
    /// become ready.
    pub fn wakeup(&mut self, tag: usize, value: u64) {
        for class in &mut self.rs {
            for entry in class.iter_mut() {
                if !entry.ready1 && entry.src1_tag == Some(tag) {
                    entry.op1 = Some(value);
                    entry.ready1 = true;
                }
                if !entry.ready2 && entry.src2_tag == Some(tag) {
                    entry.op2 = Some(value);
                    entry.ready2 = true;
                }
                if !entry.ready3 && entry.src3_tag == Some(tag) {
                    entry.op3 = Some(value);
                    entry.ready3 = true;
                }
            }
        }
    }

    /// Selects up to `max_issue` ready micro-ops for this cycle.
    ///
    /// Classes are visited round-robin; within a class, entries leave in
    /// FIFO order and an unready head blocks the rest of its class. No
    /// class issues more than its availability in `fu_status`.
    pub fn issue(&mut self, fu_status: FuStatus, max_issue: Option<usize>) -> Vec<IqUop> {
        let max_issue = max_issue.unwrap_or(self.issue_width);
        let mut avail = [0usize; 5];
        for class in FuClass::ALL {
            avail[class.index()] = fu_status.get(class);
        }

        let mut issued = Vec::new();
        let mut progress = true;
        while issued.len() < max_issue && self.count > 0 && progress {
            progress = false;
            for class in FuClass::ALL {
                let idx = class.index();
                while avail[idx] > 0 && issued.len() < max_issue {
                    let Some(head) = self.rs[idx].front() else {
                        break;
                    };
                    if !head.ready() {
                        break;
                    }
                    if let Some(entry) = self.rs[idx].pop_front() {
                        issued.push(entry);
                        self.count -= 1;
                        avail[idx] -= 1;
                        progress = true;
                    }
                }
            }
        }
        issued
    }
}
