//! Golden-model scoreboard.
//!
//! Steps the reference model in lockstep with a device under test and
//! cross-checks every field the device reports at commit: destination
//! value, memory traffic, control flow, faults, branch prediction
//! verdicts, and reorder-buffer ordering. Every commit appends a trace
//! entry; mismatches are logged and the commit returns failure, but the
//! reference model always advances so checking can continue.

use tracing::warn;

use crate::common::Fault;
use crate::config::Config;
use crate::core::GoldenModel;
use crate::coverage::CoverageRef;
use crate::isa::opcodes::{OP_BRANCH, OP_JAL, OP_JALR};
use crate::sim::trace::TraceEntry;

/// Everything a device under test reports for one committed instruction.
///
/// Absent fields are simply not checked, so a harness can start with
/// only `instr` and add observations as the device grows.
#[derive(Clone, Copy, Debug)]
pub struct Observation {
    /// Raw 32-bit instruction word.
    pub instr: u32,
    /// Program counter after the instruction.
    pub next_pc: Option<u64>,
    /// Destination architectural register.
    pub rd_arch: Option<usize>,
    /// Value written to the destination register.
    pub rd_val: Option<u64>,
    /// Store effective address.
    pub store_addr: Option<u64>,
    /// Store data.
    pub store_data: Option<u64>,
    /// Load effective address.
    pub load_addr: Option<u64>,
    /// Load data.
    pub load_data: Option<u64>,
    /// Architectural fault the device reports, if any.
    pub exception: Option<Fault>,
    /// Resolved branch direction the device reports.
    pub branch_taken: Option<bool>,
    /// Resolved branch target the device reports.
    pub branch_target: Option<u64>,
    /// Predicted branch direction.
    pub pred_taken: bool,
    /// Predicted branch target.
    pub pred_target: Option<u64>,
    /// Misprediction verdict the device reports.
    pub mispredict: Option<bool>,
    /// Reorder buffer index at commit.
    pub rob_idx: Option<u32>,
}

impl Observation {
    /// An observation carrying only the instruction word; nothing else
    /// is checked.
    pub const fn new(instr: u32) -> Self {
        Self {
            instr,
            next_pc: None,
            rd_arch: None,
            rd_val: None,
            store_addr: None,
            store_data: None,
            load_addr: None,
            load_data: None,
            exception: None,
            branch_taken: None,
            branch_target: None,
            pred_taken: false,
            pred_target: None,
            mispredict: None,
            rob_idx: None,
        }
    }
}

/// Lockstep checker pairing a golden model with a device under test.
#[derive(Debug)]
pub struct Scoreboard {
    config: Config,
    gm: GoldenModel,
    trace: Vec<TraceEntry>,
    cycle: u64,
    expected_rob_idx: u32,
    coverage: Option<CoverageRef>,
}

impl Scoreboard {
    /// Creates a scoreboard with a fresh golden model at pc 0.
    pub fn new(config: &Config) -> Self {
        Self {
            config: *config,
            gm: GoldenModel::new(config),
            trace: Vec::new(),
            cycle: 0,
            expected_rob_idx: 0,
            coverage: None,
        }
    }

    /// Attaches a coverage sink to the scoreboard and its golden model.
    pub fn set_coverage(&mut self, coverage: &CoverageRef) {
        self.gm.set_coverage(coverage);
        self.coverage = Some(coverage.clone());
    }

    /// The golden model, for harness setup (memory, mappings, registers).
    pub fn golden(&mut self) -> &mut GoldenModel {
        &mut self.gm
    }

    /// Trace entries recorded so far, in commit order.
    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    /// Current commit cycle.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Checks one committed instruction and advances the cycle counter.
    ///
    /// Returns false if any observed field disagrees with the reference
    /// model. The reference model steps regardless, so one mismatch does
    /// not cascade into spurious failures on later instructions.
    pub fn commit(&mut self, obs: &Observation) -> bool {
        let ok = self.commit_at_cycle(obs);
        self.cycle += 1;
        ok
    }

    /// Checks a whole commit bundle sharing one cycle stamp.
    pub fn commit_bundle(&mut self, bundle: &[Observation]) -> bool {
        let mut ok = true;
        for obs in bundle {
            ok &= self.commit_at_cycle(obs);
        }
        self.cycle += 1;
        ok
    }

    fn commit_at_cycle(&mut self, obs: &Observation) -> bool {
        let pc_before = self.gm.pc();
        let next_pc = self.gm.step(obs.instr);
        let exception = self.gm.get_last_exception();

        let opcode = obs.instr & 0x7F;
        let is_branch = matches!(opcode, OP_BRANCH | OP_JAL | OP_JALR);
        let taken = is_branch && next_pc != pc_before.wrapping_add(4);
        let target = if taken { Some(next_pc) } else { None };
        let mispredict =
            obs.pred_taken != taken || (taken && obs.pred_target != target);

        let mut ok = true;
        if let (Some(rd), Some(val)) = (obs.rd_arch, obs.rd_val) {
            if self.gm.reg(rd) != val {
                warn!(
                    pc = pc_before,
                    rd,
                    observed = val,
                    expected = self.gm.reg(rd),
                    "destination register mismatch"
                );
                ok = false;
            }
        }
        if let (Some(addr), Some(data)) = (obs.store_addr, obs.store_data) {
            if self.gm.mem_word(addr) != data {
                warn!(
                    pc = pc_before,
                    addr,
                    observed = data,
                    expected = self.gm.mem_word(addr),
                    "store data mismatch"
                );
                ok = false;
            }
        }
        if let (Some(addr), Some(data)) = (obs.load_addr, obs.load_data) {
            if self.gm.mem_word(addr) != data {
                warn!(
                    pc = pc_before,
                    addr,
                    observed = data,
                    expected = self.gm.mem_word(addr),
                    "load data mismatch"
                );
                ok = false;
            }
        }
        if let Some(observed) = obs.next_pc {
            if observed != next_pc {
                warn!(pc = pc_before, observed, expected = next_pc, "next pc mismatch");
                ok = false;
            }
        }
        if obs.exception != exception {
            warn!(
                pc = pc_before,
                observed = ?obs.exception,
                expected = ?exception,
                "exception mismatch"
            );
            ok = false;
        }
        if let Some(observed) = obs.branch_taken {
            if observed != taken {
                warn!(pc = pc_before, observed, expected = taken, "branch direction mismatch");
                ok = false;
            }
        }
        if let Some(observed) = obs.branch_target {
            if Some(observed) != target {
                warn!(
                    pc = pc_before,
                    observed,
                    expected = ?target,
                    "branch target mismatch"
                );
                ok = false;
            }
        }
        if let Some(observed) = obs.mispredict {
            if observed != mispredict {
                warn!(
                    pc = pc_before,
                    observed,
                    expected = mispredict,
                    "misprediction verdict mismatch"
                );
                ok = false;
            }
        }
        if let Some(idx) = obs.rob_idx {
            if idx != self.expected_rob_idx {
                warn!(
                    pc = pc_before,
                    observed = idx,
                    expected = self.expected_rob_idx,
                    "reorder buffer index out of order"
                );
                ok = false;
            }
            self.expected_rob_idx = idx.wrapping_add(1);
        }

        if is_branch {
            if let Some(cov) = &self.coverage {
                cov.borrow_mut().record_branch(mispredict);
            }
        }

        self.trace.push(TraceEntry {
            cycle: self.cycle,
            pc: pc_before,
            instr: obs.instr,
            next_pc,
            rd_arch: obs.rd_arch,
            rd_val: obs.rd_val,
            store_addr: obs.store_addr,
            store_data: obs.store_data,
            load_addr: obs.load_addr,
            load_data: obs.load_data,
            exception,
            branch_taken: taken,
            branch_target: target,
            pred_taken: obs.pred_taken,
            pred_target: obs.pred_target,
            mispredict,
            rob_idx: obs.rob_idx,
        });
        ok
    }

    /// Restarts checking with a fresh golden model.
    ///
    /// The trace and cycle counter clear, the reorder-buffer ordering
    /// check restarts at `rob_idx`, and the attached coverage sink (if
    /// any) is reset and re-wired.
    pub fn reset(&mut self, pc: u64, rob_idx: u32) {
        self.gm = GoldenModel::with_pc(&self.config, pc);
        if let Some(cov) = &self.coverage {
            cov.borrow_mut().reset();
            self.gm.set_coverage(cov);
        }
        self.trace.clear();
        self.cycle = 0;
        self.expected_rob_idx = rob_idx;
    }
}
