//! RISC-V major opcodes and function codes.
//!
//! Named constants for the major opcodes (bits 6-0) and the funct fields the
//! golden model dispatches on. Vector encodings follow the reference model's
//! simplified scheme, not the ratified V extension.

/// Integer load instructions (LB, LH, LW, LD and unsigned variants).
pub const OP_LOAD: u32 = 0b0000011;

/// Vector load instructions (unit-stride and indexed gather).
pub const OP_LOAD_V: u32 = 0b0000111;

/// Memory ordering instructions (FENCE, FENCE.I, speculative-fetch fence).
pub const OP_MISC_MEM: u32 = 0b0001111;

/// Immediate arithmetic instructions (ADDI, ANDI, SLLI, ...).
pub const OP_IMM: u32 = 0b0010011;

/// Add Upper Immediate to PC (AUIPC).
pub const OP_AUIPC: u32 = 0b0010111;

/// 32-bit immediate arithmetic (ADDIW, SLLIW, ...) — RV64 only.
pub const OP_IMM_32: u32 = 0b0011011;

/// Integer store instructions (SB, SH, SW, SD).
pub const OP_STORE: u32 = 0b0100011;

/// Vector store instructions (unit-stride and indexed scatter).
pub const OP_STORE_V: u32 = 0b0100111;

/// Atomic memory operations (LR, SC, AMO*).
pub const OP_AMO: u32 = 0b0101111;

/// Register-register arithmetic (ADD, SUB, SLL, ... and M extension).
pub const OP_REG: u32 = 0b0110011;

/// Load Upper Immediate (LUI).
pub const OP_LUI: u32 = 0b0110111;

/// 32-bit register-register arithmetic (ADDW, SUBW, ...) — RV64 only.
pub const OP_REG_32: u32 = 0b0111011;

/// Fused multiply-add (FMADD.D).
pub const OP_FMADD: u32 = 0b1000011;

/// Fused multiply-subtract (FMSUB.D).
pub const OP_FMSUB: u32 = 0b1000111;

/// Negated fused multiply-subtract (FNMSUB.D).
pub const OP_FNMSUB: u32 = 0b1001011;

/// Negated fused multiply-add (FNMADD.D).
pub const OP_FNMADD: u32 = 0b1001111;

/// Floating-point arithmetic (FADD.D, FSUB.D, FMUL.D, FDIV.D, FMIN/FMAX.D).
pub const OP_FP: u32 = 0b1010011;

/// Vector arithmetic (VADD.VV, VMUL.VV, VFMA.VV).
pub const OP_VECTOR: u32 = 0b1010111;

/// Conditional branch instructions (BEQ, BNE, BLT, BGE, BLTU, BGEU).
pub const OP_BRANCH: u32 = 0b1100011;

/// Jump and Link Register (JALR).
pub const OP_JALR: u32 = 0b1100111;

/// Jump and Link (JAL).
pub const OP_JAL: u32 = 0b1101111;

/// System instructions (CSR access, ECALL, EBREAK).
pub const OP_SYSTEM: u32 = 0b1110011;

/// funct3 values for conditional branches.
pub mod branch {
    /// Branch if equal.
    pub const BEQ: u32 = 0b000;
    /// Branch if not equal.
    pub const BNE: u32 = 0b001;
    /// Branch if less than (signed).
    pub const BLT: u32 = 0b100;
    /// Branch if greater or equal (signed).
    pub const BGE: u32 = 0b101;
    /// Branch if less than (unsigned).
    pub const BLTU: u32 = 0b110;
    /// Branch if greater or equal (unsigned).
    pub const BGEU: u32 = 0b111;
}

/// funct3 values for integer loads.
pub mod load {
    /// Load byte, sign-extended.
    pub const LB: u32 = 0b000;
    /// Load halfword, sign-extended.
    pub const LH: u32 = 0b001;
    /// Load word, sign-extended.
    pub const LW: u32 = 0b010;
    /// Load doubleword.
    pub const LD: u32 = 0b011;
    /// Load byte, zero-extended.
    pub const LBU: u32 = 0b100;
    /// Load halfword, zero-extended.
    pub const LHU: u32 = 0b101;
    /// Load word, zero-extended.
    pub const LWU: u32 = 0b110;
}

/// funct3 values for integer stores.
pub mod store {
    /// Store byte.
    pub const SB: u32 = 0b000;
    /// Store halfword.
    pub const SH: u32 = 0b001;
    /// Store word.
    pub const SW: u32 = 0b010;
    /// Store doubleword.
    pub const SD: u32 = 0b011;
}

/// funct3 values under [`super::OP_SYSTEM`].
pub mod system {
    /// ECALL/EBREAK (distinguished by the immediate field).
    pub const PRIV: u32 = 0b000;
    /// CSR read/write.
    pub const CSRRW: u32 = 0b001;
    /// CSR read/set.
    pub const CSRRS: u32 = 0b010;
    /// CSR read/clear.
    pub const CSRRC: u32 = 0b011;
    /// CSR read/write, immediate source.
    pub const CSRRWI: u32 = 0b101;
    /// CSR read/set, immediate source.
    pub const CSRRSI: u32 = 0b110;
    /// CSR read/clear, immediate source.
    pub const CSRRCI: u32 = 0b111;
}

/// funct3 values under [`super::OP_MISC_MEM`].
pub mod misc_mem {
    /// FENCE — architecturally a no-op here.
    pub const FENCE: u32 = 0b000;
    /// FENCE.I — architecturally a no-op here.
    pub const FENCE_I: u32 = 0b001;
    /// Speculative-fetch fence (model-specific extension, not standard
    /// RISC-V): arms the load gate until pending branches retire.
    pub const FENCE_SPEC: u32 = 0b010;
}

/// funct5 values (bits 31-27) for atomic memory operations.
pub mod amo {
    /// Load-reserved.
    pub const LR: u32 = 0b00010;
    /// Store-conditional.
    pub const SC: u32 = 0b00011;
    /// Atomic swap.
    pub const AMOSWAP: u32 = 0b00001;
    /// Atomic add.
    pub const AMOADD: u32 = 0b00000;
    /// Atomic exclusive-or.
    pub const AMOXOR: u32 = 0b00100;
    /// Atomic or.
    pub const AMOOR: u32 = 0b01000;
    /// Atomic and.
    pub const AMOAND: u32 = 0b01100;
    /// Atomic minimum (signed).
    pub const AMOMIN: u32 = 0b10000;
    /// Atomic maximum (signed).
    pub const AMOMAX: u32 = 0b10100;
    /// Atomic minimum (unsigned).
    pub const AMOMINU: u32 = 0b11000;
    /// Atomic maximum (unsigned).
    pub const AMOMAXU: u32 = 0b11100;
}

/// funct7 values for double-precision floating-point arithmetic.
pub mod fp {
    /// FADD.D.
    pub const FADD_D: u32 = 0b0000001;
    /// FSUB.D.
    pub const FSUB_D: u32 = 0b0000101;
    /// FMUL.D.
    pub const FMUL_D: u32 = 0b0001001;
    /// FDIV.D.
    pub const FDIV_D: u32 = 0b0001101;
    /// FMIN.D / FMAX.D (selected by funct3).
    pub const FMINMAX_D: u32 = 0b0010101;
}

/// funct7 values for vector arithmetic (reference-model scheme).
pub mod vector {
    /// Lanewise 64-bit add.
    pub const VADD_VV: u32 = 0b0000000;
    /// Lanewise 64-bit multiply.
    pub const VMUL_VV: u32 = 0b0000100;
    /// Lanewise multiply-accumulate into the destination.
    pub const VFMA_VV: u32 = 0b0001000;
}

/// funct3 values for vector memory operations.
pub mod vmem {
    /// Unit-stride 512-bit access (8 sequential 64-bit lanes).
    pub const UNIT: u32 = 0b000;
    /// Indexed gather/scatter (per-lane base + index << scale).
    pub const INDEXED: u32 = 0b001;
}
