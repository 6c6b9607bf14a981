//! Instruction field extraction.
//!
//! Bit-level accessors for the standard RISC-V fields of a 32-bit encoding,
//! plus sign-extended immediate extraction for the I/S/B/U/J formats. All
//! register indices are masked to 5 bits here, so malformed encodings can
//! never produce an out-of-range register index downstream.

/// Bit mask for extracting the opcode field (bits 0-6).
pub const OPCODE_MASK: u32 = 0x7F;
/// Bit mask for 5-bit register fields.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for extracting the funct3 field (bits 12-14).
pub const FUNCT3_MASK: u32 = 0x7;
/// Bit mask for extracting the funct7 field (bits 25-31).
pub const FUNCT7_MASK: u32 = 0x7F;
/// Bit mask for extracting the CSR address field (bits 20-31).
pub const CSR_MASK: u32 = 0xFFF;

/// Sign-extends the low `bits` bits of `value`.
#[inline(always)]
pub const fn sign_extend(value: u64, bits: u32) -> i64 {
    let shift = 64 - bits;
    ((value << shift) as i64) >> shift
}

/// Trait for extracting instruction fields from a raw 32-bit encoding.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 0-6).
    fn opcode(&self) -> u32;

    /// Extracts the destination register index (bits 7-11).
    fn rd(&self) -> usize;

    /// Extracts the first source register index (bits 15-19).
    fn rs1(&self) -> usize;

    /// Extracts the second source register index (bits 20-24).
    fn rs2(&self) -> usize;

    /// Extracts the third source register index (bits 27-31, FMA only).
    fn rs3(&self) -> usize;

    /// Extracts the funct3 field (bits 12-14).
    fn funct3(&self) -> u32;

    /// Extracts the funct7 field (bits 25-31).
    fn funct7(&self) -> u32;

    /// Extracts the funct5 field (bits 27-31, AMO ordering stripped).
    fn funct5(&self) -> u32;

    /// Extracts the CSR address field (bits 20-31).
    fn csr(&self) -> u32;

    /// I-type immediate: bits 31-20, sign-extended from 12 bits.
    fn imm_i(&self) -> i64;

    /// S-type immediate: bits 31-25 and 11-7, sign-extended from 12 bits.
    fn imm_s(&self) -> i64;

    /// B-type immediate: 13-bit branch offset with bit 0 always zero.
    fn imm_b(&self) -> i64;

    /// U-type immediate: bits 31-12 shifted into place, zero bits below.
    fn imm_u(&self) -> i64;

    /// J-type immediate: 21-bit jump offset with bit 0 always zero.
    fn imm_j(&self) -> i64;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> 7) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> 15) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> 20) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs3(&self) -> usize {
        ((self >> 27) & REG_MASK) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> 12) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> 25) & FUNCT7_MASK
    }

    #[inline(always)]
    fn funct5(&self) -> u32 {
        (self >> 27) & REG_MASK
    }

    #[inline(always)]
    fn csr(&self) -> u32 {
        (self >> 20) & CSR_MASK
    }

    #[inline(always)]
    fn imm_i(&self) -> i64 {
        sign_extend(u64::from(self >> 20), 12)
    }

    #[inline(always)]
    fn imm_s(&self) -> i64 {
        let low = u64::from((self >> 7) & 0x1F);
        let high = u64::from((self >> 25) & 0x7F);
        sign_extend((high << 5) | low, 12)
    }

    #[inline(always)]
    fn imm_b(&self) -> i64 {
        let bit_11 = u64::from((self >> 7) & 0x1);
        let bits_4_1 = u64::from((self >> 8) & 0xF);
        let bits_10_5 = u64::from((self >> 25) & 0x3F);
        let bit_12 = u64::from(self >> 31);
        let imm = (bit_12 << 12) | (bit_11 << 11) | (bits_10_5 << 5) | (bits_4_1 << 1);
        sign_extend(imm, 13)
    }

    #[inline(always)]
    fn imm_u(&self) -> i64 {
        i64::from((self & 0xFFFF_F000) as i32)
    }

    #[inline(always)]
    fn imm_j(&self) -> i64 {
        let bits_19_12 = u64::from((self >> 12) & 0xFF);
        let bit_11 = u64::from((self >> 20) & 0x1);
        let bits_10_1 = u64::from((self >> 21) & 0x3FF);
        let bit_20 = u64::from(self >> 31);
        let imm = (bit_20 << 20) | (bits_19_12 << 12) | (bit_11 << 11) | (bits_10_1 << 1);
        sign_extend(imm, 21)
    }
}
