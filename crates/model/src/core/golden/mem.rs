//! Memory handlers: scalar loads and stores, LR/SC, and the AMO group.
//!
//! Fault ordering on the load/store path: the speculative-fetch gate
//! (loads only), then misalignment, then translation with its security
//! chain, then backing-word presence. Stores always materialize backing
//! memory and cannot `page`-fault.

use crate::common::{Access, Fault};
use crate::isa::opcodes::{amo, load};
use crate::isa::{sign_extend, InstructionBits};

use super::{size_mask, GoldenModel};

/// Access width and extension kind for a scalar load funct3.
const fn load_width(funct3: u32) -> Option<(u64, bool)> {
    match funct3 {
        load::LB => Some((1, true)),
        load::LH => Some((2, true)),
        load::LW => Some((4, true)),
        load::LD => Some((8, false)),
        load::LBU => Some((1, false)),
        load::LHU => Some((2, false)),
        load::LWU => Some((4, false)),
        _ => None,
    }
}

const fn extend_loaded(value: u64, size: u64, signed: bool) -> u64 {
    if signed {
        sign_extend(value, (size * 8) as u32) as u64
    } else {
        value & size_mask(size as usize)
    }
}

impl GoldenModel {
    pub(super) fn exec_load(&mut self, instr: u32) -> Result<(), Fault> {
        let Some((size, signed)) = load_width(instr.funct3()) else {
            return Err(Fault::Illegal);
        };
        if !self.fence.loads_allowed() {
            return Err(Fault::Spec);
        }
        let ea = self.regs[instr.rs1()].wrapping_add(instr.imm_i() as u64);
        if size > 1 && ea % size != 0 {
            return Err(Fault::Misalign);
        }

        let check = self.translate_access(ea, Access::Read, false);
        if let Some(fault) = check.fault {
            // The side channel: with protection off, the architecturally
            // invisible value still lands in the destination register.
            if !self.meltdown_protection {
                if let Some(raw) = self.phys_load(check.pa, size as usize) {
                    self.set_reg(instr.rd(), extend_loaded(raw, size, signed));
                }
            }
            return Err(fault);
        }
        match self.phys_load(check.pa, size as usize) {
            Some(raw) => {
                self.set_reg(instr.rd(), extend_loaded(raw, size, signed));
                Ok(())
            }
            None => Err(Fault::Page),
        }
    }

    pub(super) fn exec_store(&mut self, instr: u32) -> Result<(), Fault> {
        let size: u64 = match instr.funct3() {
            0b000 => 1,
            0b001 => 2,
            0b010 => 4,
            0b011 => 8,
            _ => return Err(Fault::Illegal),
        };
        let ea = self.regs[instr.rs1()].wrapping_add(instr.imm_s() as u64);
        if size > 1 && ea % size != 0 {
            return Err(Fault::Misalign);
        }

        let check = self.translate_access(ea, Access::Write, false);
        if let Some(fault) = check.fault {
            return Err(fault);
        }
        let value = self.regs[instr.rs2()];
        self.phys_store(check.pa, value, size as usize);
        Ok(())
    }

    pub(super) fn exec_amo(&mut self, instr: u32) -> Result<(), Fault> {
        // only the .D forms exist in this model
        if instr.funct3() != 0b011 {
            return Err(Fault::Illegal);
        }
        let ea = self.regs[instr.rs1()];
        if ea % 8 != 0 {
            return Err(Fault::Misalign);
        }

        match instr.funct5() {
            amo::LR => {
                let check = self.translate_access(ea, Access::Read, false);
                if let Some(fault) = check.fault {
                    return Err(fault);
                }
                let value = self.phys_load(check.pa, 8).ok_or(Fault::Page)?;
                self.set_reg(instr.rd(), value);
                self.reservation = Some(ea);
                Ok(())
            }
            amo::SC => {
                let check = self.translate_access(ea, Access::Write, false);
                let held = self.reservation.take();
                if let Some(fault) = check.fault {
                    return Err(fault);
                }
                if held == Some(ea) {
                    let value = self.regs[instr.rs2()];
                    self.phys_store(check.pa, value, 8);
                    self.set_reg(instr.rd(), 0);
                } else {
                    self.set_reg(instr.rd(), 1);
                }
                Ok(())
            }
            funct5 => {
                let check = self.translate_access(ea, Access::Write, false);
                if let Some(fault) = check.fault {
                    return Err(fault);
                }
                let old = self.phys_load(check.pa, 8).ok_or(Fault::Page)?;
                let src = self.regs[instr.rs2()];
                let new = match funct5 {
                    amo::AMOADD => old.wrapping_add(src),
                    amo::AMOSWAP => src,
                    amo::AMOXOR => old ^ src,
                    amo::AMOOR => old | src,
                    amo::AMOAND => old & src,
                    amo::AMOMIN => (old as i64).min(src as i64) as u64,
                    amo::AMOMAX => (old as i64).max(src as i64) as u64,
                    amo::AMOMINU => old.min(src),
                    amo::AMOMAXU => old.max(src),
                    _ => return Err(Fault::Illegal),
                };
                self.phys_store(check.pa, new, 8);
                self.set_reg(instr.rd(), old);
                Ok(())
            }
        }
    }
}
