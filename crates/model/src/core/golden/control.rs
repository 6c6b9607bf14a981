//! Control-flow handlers: conditional branches, JAL, and JALR.
//!
//! Every retired branch or jump notifies the speculative-fetch fence so
//! gated loads can proceed once predictions resolve.

use crate::common::Fault;
use crate::isa::opcodes::branch;
use crate::isa::InstructionBits;

use super::GoldenModel;

impl GoldenModel {
    pub(super) fn exec_branch(&mut self, instr: u32) -> Result<u64, Fault> {
        let a = self.regs[instr.rs1()];
        let b = self.regs[instr.rs2()];

        let taken = match instr.funct3() {
            branch::BEQ => a == b,
            branch::BNE => a != b,
            branch::BLT => (a as i64) < (b as i64),
            branch::BGE => (a as i64) >= (b as i64),
            branch::BLTU => a < b,
            branch::BGEU => a >= b,
            _ => return Err(Fault::Illegal),
        };
        self.fence.retire_branch();

        if taken {
            Ok(self.pc().wrapping_add(instr.imm_b() as u64))
        } else {
            Ok(self.pc().wrapping_add(4))
        }
    }

    pub(super) fn exec_jal(&mut self, instr: u32) -> Result<u64, Fault> {
        self.set_reg(instr.rd(), self.pc().wrapping_add(4));
        self.fence.retire_branch();
        Ok(self.pc().wrapping_add(instr.imm_j() as u64))
    }

    pub(super) fn exec_jalr(&mut self, instr: u32) -> Result<u64, Fault> {
        if instr.funct3() != 0 {
            return Err(Fault::Illegal);
        }
        let target = self.regs[instr.rs1()].wrapping_add(instr.imm_i() as u64) & !1;
        self.set_reg(instr.rd(), self.pc().wrapping_add(4));
        self.fence.retire_branch();
        Ok(target)
    }
}
