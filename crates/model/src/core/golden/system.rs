//! SYSTEM and MISC-MEM handlers: CSR read-modify-write, ECALL/EBREAK,
//! fences, and the model-specific speculative-fetch fence.

use crate::common::Fault;
use crate::isa::opcodes::{misc_mem, system};
use crate::isa::InstructionBits;

use super::GoldenModel;

impl GoldenModel {
    pub(super) fn exec_system(&mut self, instr: u32) -> Result<(), Fault> {
        let funct3 = instr.funct3();
        if funct3 == system::PRIV {
            return match instr.csr() {
                0 => Err(Fault::Ecall),
                1 => Err(Fault::Ebreak),
                _ => Err(Fault::Illegal),
            };
        }

        // CSR forms: register source for funct3 1-3, 5-bit immediate
        // (the rs1 field) for funct3 5-7.
        let src = match funct3 {
            system::CSRRW | system::CSRRS | system::CSRRC => self.regs[instr.rs1()],
            system::CSRRWI | system::CSRRSI | system::CSRRCI => instr.rs1() as u64,
            _ => return Err(Fault::Illegal),
        };
        let addr = instr.csr();
        let old = self.csr(addr);
        let new = match funct3 {
            system::CSRRW | system::CSRRWI => src,
            system::CSRRS | system::CSRRSI => old | src,
            system::CSRRC | system::CSRRCI => old & !src,
            _ => return Err(Fault::Illegal),
        };
        let _ = self.csrs.insert(addr, new);
        self.set_reg(instr.rd(), old);
        Ok(())
    }

    pub(super) fn exec_misc_mem(&mut self, instr: u32) -> Result<(), Fault> {
        match instr.funct3() {
            // architecturally nothing to order in this model
            misc_mem::FENCE | misc_mem::FENCE_I => Ok(()),
            misc_mem::FENCE_SPEC => {
                self.fence.fence();
                Ok(())
            }
            _ => Err(Fault::Illegal),
        }
    }
}
