//! Vector handlers: 512-bit unit-stride memory traffic, indexed
//! gather/scatter, and lanewise arithmetic.
//!
//! A vector register is 8 independent 64-bit lanes. Unit-stride accesses
//! require an 8-byte-aligned base and fail atomically: any lane fault
//! aborts the whole operation and leaves the destination register
//! untouched. Scatters write lane-by-lane, so a mid-operation fault
//! leaves earlier lanes committed.

use crate::common::{Access, Fault};
use crate::isa::opcodes::{vector, vmem};
use crate::isa::InstructionBits;

use super::GoldenModel;

/// Number of 64-bit lanes in a vector register.
pub const VECTOR_LANES: usize = 8;

impl GoldenModel {
    pub(super) fn exec_vector_alu(&mut self, instr: u32) -> Result<(), Fault> {
        let vs1 = self.vregs[instr.rs1()];
        let vs2 = self.vregs[instr.rs2()];
        let vd = instr.rd();

        match instr.funct7() {
            vector::VADD_VV => {
                for lane in 0..VECTOR_LANES {
                    self.vregs[vd][lane] = vs1[lane].wrapping_add(vs2[lane]);
                }
            }
            vector::VMUL_VV => {
                for lane in 0..VECTOR_LANES {
                    self.vregs[vd][lane] = vs1[lane].wrapping_mul(vs2[lane]);
                }
            }
            vector::VFMA_VV => {
                for lane in 0..VECTOR_LANES {
                    let acc = self.vregs[vd][lane];
                    self.vregs[vd][lane] = acc.wrapping_add(vs1[lane].wrapping_mul(vs2[lane]));
                }
            }
            _ => return Err(Fault::Illegal),
        }
        Ok(())
    }

    pub(super) fn exec_vector_load(&mut self, instr: u32) -> Result<(), Fault> {
        if !self.fence.loads_allowed() {
            return Err(Fault::Spec);
        }
        let base = self.regs[instr.rs1()];
        match instr.funct3() {
            vmem::UNIT => {
                if base % 8 != 0 {
                    return Err(Fault::Misalign);
                }
                let mut lanes = [0u64; VECTOR_LANES];
                for (i, lane) in lanes.iter_mut().enumerate() {
                    let va = base.wrapping_add(8 * i as u64);
                    let check = self.translate_access(va, Access::Read, false);
                    if let Some(fault) = check.fault {
                        return Err(fault);
                    }
                    *lane = self.phys_load(check.pa, 8).ok_or(Fault::Page)?;
                }
                self.vregs[instr.rd()] = lanes;
                if let Some(cov) = &self.coverage {
                    cov.borrow_mut().record_vector_load();
                }
                Ok(())
            }
            vmem::INDEXED => {
                let indices = self.vregs[instr.rs2()];
                let scale = instr.funct7() & 0x3;
                let lanes = self.gather(base, &indices, scale)?;
                self.vregs[instr.rd()] = lanes;
                Ok(())
            }
            _ => Err(Fault::Illegal),
        }
    }

    pub(super) fn exec_vector_store(&mut self, instr: u32) -> Result<(), Fault> {
        let base = self.regs[instr.rs1()];
        // store data register lives in the rd field position (vs3)
        let data = self.vregs[instr.rd()];
        match instr.funct3() {
            vmem::UNIT => {
                if base % 8 != 0 {
                    return Err(Fault::Misalign);
                }
                for (i, &lane) in data.iter().enumerate() {
                    let va = base.wrapping_add(8 * i as u64);
                    let check = self.translate_access(va, Access::Write, false);
                    if let Some(fault) = check.fault {
                        return Err(fault);
                    }
                    self.phys_store(check.pa, lane, 8);
                }
                if let Some(cov) = &self.coverage {
                    cov.borrow_mut().record_vector_store();
                }
                Ok(())
            }
            vmem::INDEXED => {
                let indices = self.vregs[instr.rs2()];
                let scale = instr.funct7() & 0x3;
                self.scatter(base, &indices, scale, &data)
            }
            _ => Err(Fault::Illegal),
        }
    }

    /// Gathers up to 8 lanes: lane i loads 64 bits from
    /// `base + indices[i] << scale`. The first faulting lane aborts the
    /// remainder.
    pub fn gather(&mut self, base: u64, indices: &[u64], scale: u32) -> Result<[u64; 8], Fault> {
        let mut lanes = [0u64; VECTOR_LANES];
        for (lane, &index) in indices.iter().take(VECTOR_LANES).enumerate() {
            let va = base.wrapping_add(index.wrapping_shl(scale));
            let check = self.translate_access(va, Access::Read, false);
            if let Some(fault) = check.fault {
                return Err(fault);
            }
            lanes[lane] = self.phys_load(check.pa, 8).ok_or(Fault::Page)?;
        }
        if let Some(cov) = &self.coverage {
            cov.borrow_mut().record_vector_gather();
        }
        Ok(lanes)
    }

    /// Scatters up to 8 lanes: lane i stores `value[i]` to
    /// `base + indices[i] << scale`. Lanes before the first faulting one
    /// remain written.
    pub fn scatter(
        &mut self,
        base: u64,
        indices: &[u64],
        scale: u32,
        value: &[u64; 8],
    ) -> Result<(), Fault> {
        for (lane, &index) in indices.iter().take(VECTOR_LANES).enumerate() {
            let va = base.wrapping_add(index.wrapping_shl(scale));
            let check = self.translate_access(va, Access::Write, false);
            if let Some(fault) = check.fault {
                return Err(fault);
            }
            self.phys_store(check.pa, value[lane], 8);
        }
        if let Some(cov) = &self.coverage {
            cov.borrow_mut().record_vector_scatter();
        }
        Ok(())
    }
}
