//! Register rename unit.
//!
//! Maps 32 architectural registers onto a larger physical register file.
//! The mapping starts as identity over the first 32 physical registers;
//! the remainder forms a FIFO free list. Renaming fails closed per
//! instruction when the free list is exhausted, and destination register
//! 0 never consumes a physical register.

use std::collections::VecDeque;

/// Number of architectural integer registers.
pub const ARCH_REGS: usize = 32;

/// One instruction presented for renaming.
#[derive(Clone, Copy, Debug)]
pub struct RenameRequest {
    /// False for bubble slots; they rename to an invalid result.
    pub valid: bool,
    /// Destination architectural register.
    pub rd: usize,
    /// First source architectural register.
    pub rs1: usize,
    /// Second source architectural register.
    pub rs2: usize,
}

/// Physical register assignment for one renamed instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Renamed {
    /// Physical register backing rs1 at rename time.
    pub rs1_phys: usize,
    /// Physical register backing rs2 at rename time.
    pub rs2_phys: usize,
    /// Newly allocated destination physical register (0 when rd is x0).
    pub rd_phys: usize,
    /// Previous mapping of rd, released when this instruction retires.
    pub old_phys: usize,
    /// False when the request was invalid or the free list was empty.
    pub valid: bool,
}

/// Rename unit: mapping table plus FIFO free list.
#[derive(Clone, Debug)]
pub struct RenameUnit {
    mapping: [usize; ARCH_REGS],
    free_list: VecDeque<usize>,
    phys_regs: usize,
}

impl RenameUnit {
    /// Creates a unit with `phys_regs` physical registers, the first 32
    /// of which form the identity baseline mapping.
    pub fn new(phys_regs: usize) -> Self {
        let mut mapping = [0; ARCH_REGS];
        for (arch, slot) in mapping.iter_mut().enumerate() {
            *slot = arch;
        }
        Self {
            mapping,
            free_list: (ARCH_REGS..phys_regs).collect(),
            phys_regs,
        }
    }

    /// Number of free physical registers.
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    /// Current physical mapping of an architectural register.
    pub fn mapping(&self, arch: usize) -> usize {
        self.mapping[arch & 0x1F]
    }

    /// Renames a list of instructions in program order.
    ///
    /// Source operands resolve through the mapping as updated by earlier
    /// instructions of the same list, so in-bundle RAW dependencies see
    /// the newest physical name.
    pub fn allocate(&mut self, insts: &[RenameRequest]) -> Vec<Renamed> {
        insts
            .iter()
            .map(|inst| {
                if !inst.valid {
                    return Renamed::default();
                }
                let rd = inst.rd & 0x1F;
                let old_phys = self.mapping[rd];
                let rd_phys = if rd == 0 {
                    if self.free_list.is_empty() {
                        return Renamed::default();
                    }
                    0
                } else {
                    match self.free_list.pop_front() {
                        Some(phys) => {
                            self.mapping[rd] = phys;
                            phys
                        }
                        None => return Renamed::default(),
                    }
                };
                Renamed {
                    rs1_phys: self.mapping[inst.rs1 & 0x1F],
                    rs2_phys: self.mapping[inst.rs2 & 0x1F],
                    rd_phys,
                    old_phys,
                    valid: true,
                }
            })
            .collect()
    }

    /// Returns a retired physical register to the tail of the free list.
    ///
    /// Architectural-baseline registers and registers already on the free
    /// list are ignored.
    pub fn free(&mut self, phys_idx: usize) {
        if phys_idx >= ARCH_REGS
            && phys_idx < self.phys_regs
            && !self.free_list.contains(&phys_idx)
        {
            self.free_list.push_back(phys_idx);
        }
    }
}
