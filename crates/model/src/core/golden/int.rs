//! Integer arithmetic handlers: OP, OP-IMM, their 32-bit "W" variants,
//! LUI, and AUIPC. All operations are bit-exact 64-bit two's complement;
//! "W" variants truncate to 32 bits, compute, then sign-extend the 32-bit
//! result.

use crate::common::Fault;
use crate::isa::{sign_extend, InstructionBits};

use super::GoldenModel;

/// Sign-extends the low 32 bits of a value.
const fn sext32(value: u64) -> u64 {
    sign_extend(value & 0xFFFF_FFFF, 32) as u64
}

impl GoldenModel {
    pub(super) fn exec_op_imm(&mut self, instr: u32) -> Result<(), Fault> {
        let a = self.regs[instr.rs1()];
        let imm = instr.imm_i();
        let shamt = (instr >> 20) & 0x3F;
        // bits 31:26 distinguish SRLI from SRAI once the 6-bit shamt is cut
        let shift_func = (instr >> 26) & 0x3F;

        let value = match instr.funct3() {
            0b000 => a.wrapping_add(imm as u64),
            0b010 => u64::from((a as i64) < imm),
            0b011 => u64::from(a < imm as u64),
            0b100 => a ^ imm as u64,
            0b110 => a | imm as u64,
            0b111 => a & imm as u64,
            0b001 if shift_func == 0x00 => a << shamt,
            0b101 if shift_func == 0x00 => a >> shamt,
            0b101 if shift_func == 0x10 => ((a as i64) >> shamt) as u64,
            _ => return Err(Fault::Illegal),
        };
        self.set_reg(instr.rd(), value);
        Ok(())
    }

    pub(super) fn exec_op_imm_32(&mut self, instr: u32) -> Result<(), Fault> {
        let a = self.regs[instr.rs1()];
        let imm = instr.imm_i();
        let shamt = (instr >> 20) & 0x1F;

        let value = match (instr.funct3(), instr.funct7()) {
            (0b000, _) => sext32(a.wrapping_add(imm as u64)),
            (0b001, 0x00) => sext32(a << shamt),
            (0b101, 0x00) => sext32(u64::from((a as u32) >> shamt)),
            (0b101, 0x20) => ((a as u32 as i32) >> shamt) as i64 as u64,
            _ => return Err(Fault::Illegal),
        };
        self.set_reg(instr.rd(), value);
        Ok(())
    }

    pub(super) fn exec_op_reg(&mut self, instr: u32) -> Result<(), Fault> {
        let a = self.regs[instr.rs1()];
        let b = self.regs[instr.rs2()];

        let value = match (instr.funct7(), instr.funct3()) {
            (0x00, 0b000) => a.wrapping_add(b),
            (0x20, 0b000) => a.wrapping_sub(b),
            (0x00, 0b001) => a << (b & 0x3F),
            (0x00, 0b010) => u64::from((a as i64) < (b as i64)),
            (0x00, 0b011) => u64::from(a < b),
            (0x00, 0b100) => a ^ b,
            (0x00, 0b101) => a >> (b & 0x3F),
            (0x20, 0b101) => ((a as i64) >> (b & 0x3F)) as u64,
            (0x00, 0b110) => a | b,
            (0x00, 0b111) => a & b,
            (0x01, f3) => mul_div(f3, a, b)?,
            _ => return Err(Fault::Illegal),
        };
        self.set_reg(instr.rd(), value);
        Ok(())
    }

    pub(super) fn exec_op_reg_32(&mut self, instr: u32) -> Result<(), Fault> {
        let a = self.regs[instr.rs1()];
        let b = self.regs[instr.rs2()];
        let sh = (b & 0x1F) as u32;

        let value = match (instr.funct7(), instr.funct3()) {
            (0x00, 0b000) => sext32(a.wrapping_add(b)),
            (0x20, 0b000) => sext32(a.wrapping_sub(b)),
            (0x00, 0b001) => sext32(a << sh),
            (0x00, 0b101) => sext32(u64::from((a as u32) >> sh)),
            (0x20, 0b101) => ((a as u32 as i32) >> sh) as i64 as u64,
            _ => return Err(Fault::Illegal),
        };
        self.set_reg(instr.rd(), value);
        Ok(())
    }

    pub(super) fn exec_lui(&mut self, instr: u32) -> Result<(), Fault> {
        self.set_reg(instr.rd(), u64::from(instr & 0xFFFF_F000));
        Ok(())
    }

    pub(super) fn exec_auipc(&mut self, instr: u32) -> Result<(), Fault> {
        let value = self.pc().wrapping_add(u64::from(instr & 0xFFFF_F000));
        self.set_reg(instr.rd(), value);
        Ok(())
    }
}

/// M-extension arithmetic. Division by zero yields all-ones for DIV/DIVU
/// and the unchanged dividend for REM/REMU; signed overflow wraps.
fn mul_div(funct3: u32, a: u64, b: u64) -> Result<u64, Fault> {
    let value = match funct3 {
        0b000 => a.wrapping_mul(b),
        0b001 => ((i128::from(a as i64).wrapping_mul(i128::from(b as i64))) >> 64) as u64,
        0b010 => ((i128::from(a as i64).wrapping_mul(i128::from(b))) >> 64) as u64,
        0b011 => ((u128::from(a) * u128::from(b)) >> 64) as u64,
        0b100 => {
            if b == 0 {
                u64::MAX
            } else {
                (a as i64).wrapping_div(b as i64) as u64
            }
        }
        0b101 => {
            if b == 0 {
                u64::MAX
            } else {
                a / b
            }
        }
        0b110 => {
            if b == 0 {
                a
            } else {
                (a as i64).wrapping_rem(b as i64) as u64
            }
        }
        0b111 => {
            if b == 0 {
                a
            } else {
                a % b
            }
        }
        _ => return Err(Fault::Illegal),
    };
    Ok(value)
}
