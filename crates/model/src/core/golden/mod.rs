//! Instruction-level golden model.
//!
//! The single authoritative source of architectural truth: an RV64
//! interpreter over the translation stack and the security extension
//! models. It provides:
//! 1. **Stepping:** [`GoldenModel::step`] executes one instruction word,
//!    mutating architectural state and recording at most one fault.
//! 2. **Bundles:** [`GoldenModel::execute_bundle`] and
//!    [`GoldenModel::issue_bundle`] with RAW/WAR/WAW hazard scanning.
//! 3. **Setup surface:** memory/page/register accessors for harnesses.
//!
//! Opcode-class handlers live in the submodules (`int`, `control`, `mem`,
//! `fp`, `vector`, `system`); this module owns the state, the dispatch,
//! and the translation/memory plumbing they share.

mod control;
mod fp;
mod int;
mod mem;
mod system;
mod vector;

use std::collections::HashMap;

use crate::common::{Access, Fault, PagePerms, PhysAddr, VirtAddr};
use crate::config::Config;
use crate::coverage::CoverageRef;
use crate::isa::opcodes::{
    OP_AMO, OP_AUIPC, OP_BRANCH, OP_FMADD, OP_FMSUB, OP_FNMADD, OP_FNMSUB, OP_FP, OP_IMM,
    OP_IMM_32, OP_JAL, OP_JALR, OP_LOAD, OP_LOAD_V, OP_LUI, OP_MISC_MEM, OP_REG, OP_REG_32,
    OP_STORE, OP_STORE_V, OP_SYSTEM, OP_VECTOR,
};
use crate::isa::{Decoder8W, InstructionBits, MicroOp};
use crate::mem::{Backing, SparseMemory};
use crate::mmu::{Translation, TranslationStack};
use crate::security::{smep_smap, SevMemory, SgxEnclave, SpecFetchFence};
use crate::vm::{Ept, Vmcs};

/// Cycle counter CSR address.
pub const CSR_CYCLE: u32 = 0xC00;

/// Instructions-retired counter CSR address.
pub const CSR_INSTRET: u32 = 0xC02;

/// Kind of inter-instruction data hazard within a bundle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HazardKind {
    /// Read after write.
    Raw,
    /// Write after read.
    War,
    /// Write after write.
    Waw,
}

/// One data hazard between two instructions of the same bundle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hazard {
    /// Hazard kind.
    pub kind: HazardKind,
    /// Bundle index of the older instruction.
    pub older: usize,
    /// Bundle index of the younger instruction.
    pub younger: usize,
    /// Architectural register involved.
    pub reg: usize,
}

/// Result of [`GoldenModel::issue_bundle`].
#[derive(Clone, Debug)]
pub struct BundleResult {
    /// Decoded micro-ops, in program order.
    pub uops: Vec<MicroOp>,
    /// PC after executing the bundle.
    pub next_pc: u64,
    /// Data hazards detected between bundle members.
    pub hazards: Vec<Hazard>,
}

/// Outcome of one address translation plus security checks.
///
/// `pa` is always the best-effort physical address so the meltdown leak
/// path can read the underlying data even when `fault` is set.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AccessCheck {
    pub pa: u64,
    pub fault: Option<Fault>,
}

/// RV64 architectural reference model.
pub struct GoldenModel {
    regs: [u64; 32],
    fregs: [u64; 32],
    vregs: [[u64; 8]; 32],
    pc: u64,
    csrs: HashMap<u32, u64>,
    mem: SparseMemory,
    /// Data-side translation cascade.
    pub translation: TranslationStack,
    reservation: Option<u64>,
    last_exception: Option<Fault>,
    sev: SevMemory,
    /// Enclave state, gating physical accesses while entered.
    pub enclave: SgxEnclave,
    /// VM control structure.
    pub vmcs: Vmcs,
    /// Extended page table transform, applied while a VM is running.
    pub ept: Ept,
    fence: SpecFetchFence,
    kernel_mode: bool,
    smep: bool,
    smap: bool,
    meltdown_protection: bool,
    decoder: Decoder8W,
    coverage: Option<CoverageRef>,
}

impl std::fmt::Debug for GoldenModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoldenModel")
            .field("pc", &self.pc)
            .field("last_exception", &self.last_exception)
            .field("reservation", &self.reservation)
            .finish_non_exhaustive()
    }
}

impl GoldenModel {
    /// Creates a model at PC 0 with the given configuration.
    pub fn new(cfg: &Config) -> Self {
        Self {
            regs: [0; 32],
            fregs: [0; 32],
            vregs: [[0; 8]; 32],
            pc: 0,
            csrs: HashMap::new(),
            mem: SparseMemory::new(),
            translation: TranslationStack::new(&cfg.translation),
            reservation: None,
            last_exception: None,
            sev: SevMemory::default(),
            enclave: SgxEnclave::new(),
            vmcs: Vmcs::new(),
            ept: Ept::default(),
            fence: SpecFetchFence::new(),
            kernel_mode: false,
            smep: false,
            smap: false,
            meltdown_protection: cfg.golden.meltdown_protection,
            decoder: Decoder8W::new(),
            coverage: None,
        }
    }

    /// Creates a model at the given start PC.
    pub fn with_pc(cfg: &Config, pc: u64) -> Self {
        let mut gm = Self::new(cfg);
        gm.pc = pc;
        gm
    }

    /// Attaches a coverage sink to the model, its translation stack, and
    /// its decoder.
    pub fn set_coverage(&mut self, coverage: &CoverageRef) {
        self.translation.set_coverage(coverage);
        self.decoder = Decoder8W::with_coverage(coverage.clone());
        self.coverage = Some(coverage.clone());
    }

    /// Executes one instruction word and returns the new PC.
    ///
    /// Exactly one fault may be recorded per step; the cycle and instret
    /// counters advance even when the instruction faults, and a faulting
    /// instruction advances the PC by 4 without other architectural effect
    /// (apart from the deliberate meltdown leak path).
    pub fn step(&mut self, instr: u32) -> u64 {
        self.last_exception = None;
        self.bump_counters();
        match self.dispatch(instr) {
            Ok(next) => self.pc = next,
            Err(fault) => {
                self.last_exception = Some(fault);
                if let Some(cov) = &self.coverage {
                    cov.borrow_mut().record_exception(fault);
                }
                self.pc = self.pc.wrapping_add(4);
            }
        }
        self.pc
    }

    /// Executes a sequence of instruction words, returning the final PC.
    pub fn execute_bundle(&mut self, words: &[u32]) -> u64 {
        for &word in words {
            let _ = self.step(word);
        }
        self.pc
    }

    /// Decodes, hazard-scans, and executes up to 8 instructions at `pc`.
    pub fn issue_bundle(&mut self, pc: u64, words: &[u32]) -> BundleResult {
        self.pc = pc;
        let uops = self.decoder.decode(words);
        let hazards = scan_hazards(&uops);
        for uop in &uops {
            let _ = self.step(uop.raw);
        }
        BundleResult {
            next_pc: self.pc,
            uops,
            hazards,
        }
    }

    fn dispatch(&mut self, instr: u32) -> Result<u64, Fault> {
        let next = self.pc.wrapping_add(4);
        match instr.opcode() {
            OP_IMM => self.exec_op_imm(instr).map(|()| next),
            OP_IMM_32 => self.exec_op_imm_32(instr).map(|()| next),
            OP_REG => self.exec_op_reg(instr).map(|()| next),
            OP_REG_32 => self.exec_op_reg_32(instr).map(|()| next),
            OP_LUI => self.exec_lui(instr).map(|()| next),
            OP_AUIPC => self.exec_auipc(instr).map(|()| next),
            OP_BRANCH => self.exec_branch(instr),
            OP_JAL => self.exec_jal(instr),
            OP_JALR => self.exec_jalr(instr),
            OP_LOAD => self.exec_load(instr).map(|()| next),
            OP_STORE => self.exec_store(instr).map(|()| next),
            OP_AMO => self.exec_amo(instr).map(|()| next),
            OP_SYSTEM => self.exec_system(instr).map(|()| next),
            OP_MISC_MEM => self.exec_misc_mem(instr).map(|()| next),
            OP_FP => self.exec_fp(instr).map(|()| next),
            OP_FMADD | OP_FMSUB | OP_FNMSUB | OP_FNMADD => self.exec_fused(instr).map(|()| next),
            OP_VECTOR => self.exec_vector_alu(instr).map(|()| next),
            OP_LOAD_V => self.exec_vector_load(instr).map(|()| next),
            OP_STORE_V => self.exec_vector_store(instr).map(|()| next),
            _ => Err(Fault::Illegal),
        }
    }

    fn bump_counters(&mut self) {
        for addr in [CSR_CYCLE, CSR_INSTRET] {
            let c = self.csrs.entry(addr).or_insert(0);
            *c = c.wrapping_add(1);
        }
    }

    // ---- translation and physical memory -------------------------------

    /// Translates a data or fetch address, applying the full check chain:
    /// page permissions, NX, SMEP, SMAP, EPT, then the enclave set.
    pub fn translate(&mut self, va: u64, access: Access, override_ac: bool) -> Result<u64, Fault> {
        let check = self.translate_access(va, access, override_ac);
        match check.fault {
            Some(fault) => Err(fault),
            None => Ok(check.pa),
        }
    }

    pub(crate) fn translate_access(
        &mut self,
        va: u64,
        access: Access,
        override_ac: bool,
    ) -> AccessCheck {
        let page_va = VirtAddr::new(va & !0xFFF);
        let offset = va & 0xFFF;

        let mut t = self.translation.translate(page_va, access);
        if matches!(t, Translation::Unmapped { .. }) {
            // Legacy fallback: an unmapped address silently gains a
            // permissive identity mapping instead of faulting. Kept for
            // compatibility with tests that never call map_page.
            self.translation
                .map_page(page_va, PhysAddr::new(page_va.val()), PagePerms::RWX);
            t = self.translation.translate(page_va, access);
        }
        let (pa_base, perms, perm_fault) = match t {
            Translation::Hit {
                pa, perms, perm_fault, ..
            } => (pa.val(), perms, perm_fault),
            // cannot happen after the identity refill above
            Translation::Unmapped { .. } => (page_va.val(), PagePerms::RWX, false),
        };
        let pa = pa_base | offset;
        let is_exec = access == Access::Execute;

        // First applicable cause wins; order is architectural.
        let mut fault = if perm_fault {
            Some(if is_exec { Fault::Nx } else { Fault::Page })
        } else if smep_smap::check(
            self.kernel_mode,
            perms.u,
            is_exec,
            self.smep,
            self.smap,
            override_ac,
        ) {
            Some(if is_exec { Fault::Smep } else { Fault::Smap })
        } else {
            None
        };

        let pa = match self.vmcs.current_vmid() {
            Some(vmid) => self.ept.translate(vmid, pa),
            None => pa,
        };
        if fault.is_none() && self.enclave.access_faults(pa) {
            fault = Some(Fault::Sgx);
        }

        AccessCheck { pa, fault }
    }

    /// Loads `size` bytes at physical address `pa` through the SEV
    /// transform. `None` means no backing word exists (a `page` fault).
    pub(crate) fn phys_load(&mut self, pa: u64, size: usize) -> Option<u64> {
        let addr = PhysAddr::new(self.sev.scramble_addr(pa));
        if !self.mem.contains_word(addr) {
            return None;
        }
        let raw = self.mem.load(addr, size);
        Some(raw ^ (self.sev.key() & size_mask(size)))
    }

    /// Stores the low `size` bytes of `value` at `pa` through the SEV
    /// transform. Stores always materialize backing memory.
    pub(crate) fn phys_store(&mut self, pa: u64, value: u64, size: usize) {
        let addr = PhysAddr::new(self.sev.scramble_addr(pa));
        self.mem.store(addr, value ^ self.sev.key(), size);
    }

    // ---- setup and inspection surface ----------------------------------

    /// Writes a raw 64-bit word directly into backing memory.
    pub fn load_memory(&mut self, addr: u64, data: u64) {
        self.mem.write_word(PhysAddr::new(addr), data);
    }

    /// Writes backing memory and maps `va` to `addr` with `perms`.
    pub fn load_memory_mapped(&mut self, addr: u64, data: u64, va: u64, perms: PagePerms) {
        self.load_memory(addr, data);
        self.map_page(va, addr, perms);
    }

    /// Installs a page mapping. Addresses are truncated to page boundaries;
    /// the mapping covers the whole page.
    pub fn map_page(&mut self, va: u64, pa: u64, perms: PagePerms) {
        self.translation
            .map_page(VirtAddr::new(va & !0xFFF), PhysAddr::new(pa & !0xFFF), perms);
    }

    /// Reads the backing word containing `addr`, zero if absent.
    pub fn mem_word(&self, addr: u64) -> u64 {
        self.mem.read_word(PhysAddr::new(addr)).unwrap_or(0)
    }

    /// Integer register read. Index 0 always reads zero.
    pub fn reg(&self, idx: usize) -> u64 {
        self.regs[idx & 0x1F]
    }

    /// Integer register write. Writes to index 0 are discarded.
    pub fn set_reg(&mut self, idx: usize, value: u64) {
        if idx != 0 {
            self.regs[idx & 0x1F] = value;
        }
    }

    /// Floating-point register read (raw bit pattern).
    pub fn freg(&self, idx: usize) -> u64 {
        self.fregs[idx & 0x1F]
    }

    /// Floating-point register write (raw bit pattern).
    pub fn set_freg(&mut self, idx: usize, bits: u64) {
        self.fregs[idx & 0x1F] = bits;
    }

    /// Vector register read (8 64-bit lanes).
    pub fn vreg(&self, idx: usize) -> [u64; 8] {
        self.vregs[idx & 0x1F]
    }

    /// Vector register write.
    pub fn set_vreg(&mut self, idx: usize, lanes: [u64; 8]) {
        self.vregs[idx & 0x1F] = lanes;
    }

    /// Current PC.
    pub const fn pc(&self) -> u64 {
        self.pc
    }

    /// Sets the PC.
    pub fn set_pc(&mut self, pc: u64) {
        self.pc = pc;
    }

    /// CSR read, zero for never-written addresses.
    pub fn csr(&self, addr: u32) -> u64 {
        self.csrs.get(&(addr & 0xFFF)).copied().unwrap_or(0)
    }

    /// Fault recorded by the most recent `step`, if any.
    pub const fn get_last_exception(&self) -> Option<Fault> {
        self.last_exception
    }

    /// Installs the SEV memory encryption key. Key 0 disables encryption.
    pub fn set_sev_key(&mut self, key: u64) {
        self.sev.set_key(key);
    }

    /// Clears the SEV key, disabling encryption.
    pub fn clear_sev_key(&mut self) {
        self.sev.set_key(0);
    }

    /// Sets kernel/user privilege mode for SMEP/SMAP checks.
    pub fn set_kernel_mode(&mut self, kernel: bool) {
        self.kernel_mode = kernel;
    }

    /// Enables or disables SMEP.
    pub fn set_smep(&mut self, enabled: bool) {
        self.smep = enabled;
    }

    /// Enables or disables SMAP.
    pub fn set_smap(&mut self, enabled: bool) {
        self.smap = enabled;
    }

    /// Enables or disables the meltdown leak protection.
    pub fn set_meltdown_protection(&mut self, enabled: bool) {
        self.meltdown_protection = enabled;
    }

    /// Number of branches the speculative-fetch fence is still waiting on.
    pub const fn fence_pending(&self) -> u32 {
        self.fence.pending()
    }
}

/// Byte mask for the low `size` bytes of a word.
pub(crate) const fn size_mask(size: usize) -> u64 {
    if size >= 8 {
        u64::MAX
    } else {
        (1u64 << (size * 8)) - 1
    }
}

/// Scans a decoded bundle for RAW/WAR/WAW hazards in program order.
///
/// Register 0 never participates; every (older, younger) pair is reported
/// at most once per hazard kind per register.
pub fn scan_hazards(uops: &[MicroOp]) -> Vec<Hazard> {
    let mut hazards = Vec::new();
    for younger in 1..uops.len() {
        for older in 0..younger {
            if let Some(dest) = uops[older].dest() {
                if uops[younger].sources().any(|s| s == dest) {
                    hazards.push(Hazard {
                        kind: HazardKind::Raw,
                        older,
                        younger,
                        reg: dest,
                    });
                }
            }
            if let Some(dest) = uops[younger].dest() {
                if uops[older].sources().any(|s| s == dest) {
                    hazards.push(Hazard {
                        kind: HazardKind::War,
                        older,
                        younger,
                        reg: dest,
                    });
                }
                if uops[older].dest() == Some(dest) {
                    hazards.push(Hazard {
                        kind: HazardKind::Waw,
                        older,
                        younger,
                        reg: dest,
                    });
                }
            }
        }
    }
    hazards
}
