//! Double-precision floating-point handlers.
//!
//! Register storage is the raw 64-bit bit pattern; operands are
//! reinterpreted as IEEE-754 doubles and computed with host arithmetic.
//! The fused opcodes are evaluated non-fused (multiply, then add), which
//! is all the reference semantics require.

use crate::common::Fault;
use crate::isa::opcodes::{fp, OP_FMADD, OP_FMSUB, OP_FNMADD, OP_FNMSUB};
use crate::isa::InstructionBits;

use super::GoldenModel;

impl GoldenModel {
    fn f(&self, idx: usize) -> f64 {
        f64::from_bits(self.fregs[idx])
    }

    pub(super) fn exec_fp(&mut self, instr: u32) -> Result<(), Fault> {
        let a = self.f(instr.rs1());
        let b = self.f(instr.rs2());

        let value = match instr.funct7() {
            fp::FADD_D => a + b,
            fp::FSUB_D => a - b,
            fp::FMUL_D => a * b,
            fp::FDIV_D => a / b,
            fp::FMINMAX_D => match instr.funct3() {
                0b000 => a.min(b),
                0b001 => a.max(b),
                _ => return Err(Fault::Illegal),
            },
            _ => return Err(Fault::Illegal),
        };
        self.fregs[instr.rd()] = value.to_bits();
        Ok(())
    }

    pub(super) fn exec_fused(&mut self, instr: u32) -> Result<(), Fault> {
        let a = self.f(instr.rs1());
        let b = self.f(instr.rs2());
        let c = self.f(instr.rs3());
        let product = a * b;

        let value = match instr.opcode() {
            OP_FMADD => product + c,
            OP_FMSUB => product - c,
            OP_FNMSUB => -product + c,
            OP_FNMADD => -product - c,
            _ => return Err(Fault::Illegal),
        };
        self.fregs[instr.rd()] = value.to_bits();
        Ok(())
    }
}
