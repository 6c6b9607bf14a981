//! RV64 instruction encoders for test programs.
//!
//! Each function assembles one 32-bit instruction word from its fields.
//! Immediates are taken as `i32` and masked to the width of the format;
//! callers are responsible for range.

/// R-type: register-register arithmetic.
pub fn encode_r(opcode: u32, funct7: u32, funct3: u32, rd: u32, rs1: u32, rs2: u32) -> u32 {
    funct7 << 25 | rs2 << 20 | rs1 << 15 | funct3 << 12 | rd << 7 | opcode
}

/// I-type: immediate arithmetic, loads, JALR, CSR.
pub fn encode_i(opcode: u32, funct3: u32, rd: u32, rs1: u32, imm: i32) -> u32 {
    ((imm as u32) & 0xFFF) << 20 | rs1 << 15 | funct3 << 12 | rd << 7 | opcode
}

/// S-type: stores.
pub fn encode_s(opcode: u32, funct3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let imm = imm as u32;
    (imm >> 5 & 0x7F) << 25 | rs2 << 20 | rs1 << 15 | funct3 << 12 | (imm & 0x1F) << 7 | opcode
}

/// B-type: conditional branches.
pub fn encode_branch(funct3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let imm = imm as u32;
    (imm >> 12 & 0x1) << 31
        | (imm >> 5 & 0x3F) << 25
        | rs2 << 20
        | rs1 << 15
        | funct3 << 12
        | (imm >> 1 & 0xF) << 8
        | (imm >> 11 & 0x1) << 7
        | 0x63
}

/// J-type: JAL.
pub fn encode_jal(rd: u32, imm: i32) -> u32 {
    let imm = imm as u32;
    (imm >> 20 & 0x1) << 31
        | (imm >> 1 & 0x3FF) << 21
        | (imm >> 11 & 0x1) << 20
        | (imm >> 12 & 0xFF) << 12
        | rd << 7
        | 0x6F
}

/// JALR.
pub fn encode_jalr(rd: u32, rs1: u32, imm: i32) -> u32 {
    encode_i(0x67, 0, rd, rs1, imm)
}

/// Integer load (funct3 selects width and sign).
pub fn encode_load(funct3: u32, rd: u32, rs1: u32, imm: i32) -> u32 {
    encode_i(0x03, funct3, rd, rs1, imm)
}

/// Integer store (funct3 selects width).
pub fn encode_store(funct3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    encode_s(0x23, funct3, rs1, rs2, imm)
}

/// ADDI.
pub fn addi(rd: u32, rs1: u32, imm: i32) -> u32 {
    encode_i(0x13, 0, rd, rs1, imm)
}

/// ADD.
pub fn add(rd: u32, rs1: u32, rs2: u32) -> u32 {
    encode_r(0x33, 0, 0, rd, rs1, rs2)
}

/// Atomic operation (funct5 per the A extension, width funct3 = 0b011).
pub fn encode_amo(funct5: u32, rd: u32, rs1: u32, rs2: u32) -> u32 {
    funct5 << 27 | rs2 << 20 | rs1 << 15 | 0b011 << 12 | rd << 7 | 0x2F
}

/// LR.D.
pub fn lr_d(rd: u32, rs1: u32) -> u32 {
    encode_amo(0b00010, rd, rs1, 0)
}

/// SC.D.
pub fn sc_d(rd: u32, rs1: u32, rs2: u32) -> u32 {
    encode_amo(0b00011, rd, rs1, rs2)
}

/// AMOADD.D.
pub fn amoadd_d(rd: u32, rs1: u32, rs2: u32) -> u32 {
    encode_amo(0b00000, rd, rs1, rs2)
}

/// AMOSWAP.D.
pub fn amoswap_d(rd: u32, rs1: u32, rs2: u32) -> u32 {
    encode_amo(0b00001, rd, rs1, rs2)
}

/// CSR instruction (funct3 selects the variant).
pub fn encode_csr(funct3: u32, rd: u32, rs1: u32, csr: u32) -> u32 {
    csr << 20 | rs1 << 15 | funct3 << 12 | rd << 7 | 0x73
}

/// The speculative-fetch fence.
pub const FENCE_SPEC: u32 = 0x0000_200F;

/// A canonical NOP (`addi x0,x0,0`).
pub const NOP: u32 = 0x0000_0013;

#[cfg(test)]
mod tests {
    use super::*;

    // spot checks against hand-assembled words used elsewhere in the suite
    #[test]
    fn test_known_encodings() {
        assert_eq!(addi(1, 0, 5), 0x0050_0093);
        assert_eq!(add(3, 1, 2), 0x0020_81B3);
        assert_eq!(encode_store(0b011, 1, 2, 0), 0x0020_B023); // sd x2,0(x1)
        assert_eq!(encode_load(0b011, 3, 1, 0), 0x0000_B183); // ld x3,0(x1)
        assert_eq!(encode_branch(0, 1, 2, 8), 0x0020_8463); // beq x1,x2,8
        assert_eq!(encode_jal(1, 8), 0x0080_00EF);
        assert_eq!(encode_jalr(2, 5, 4), 0x0042_8167);
    }

    #[test]
    fn test_negative_immediates() {
        // addi x1,x1,-1 -> imm 0xFFF
        assert_eq!(addi(1, 1, -1), 0xFFF0_8093);
        // backward branch beq x0,x0,-4
        let word = encode_branch(0, 0, 0, -4);
        assert_eq!(word & 0x7F, 0x63);
        assert_eq!(word >> 31, 1); // sign bit set
    }
}
