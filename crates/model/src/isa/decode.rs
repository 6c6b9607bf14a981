//! Eight-wide bundle decoder.
//!
//! [`Decoder8W`] is a pure function over up to eight raw instruction words:
//! it extracts the standard fields and the sign-extended immediate for each
//! word and classifies branches, loads, and stores by opcode membership. It
//! mutates no shared state; coverage recording is an optional side channel,
//! never a correctness dependency.

use crate::coverage::CoverageRef;
use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes::{
    OP_AMO, OP_AUIPC, OP_BRANCH, OP_IMM, OP_JAL, OP_JALR, OP_LOAD, OP_LUI, OP_REG, OP_REG_32,
    OP_STORE,
};

/// Maximum number of instruction words decoded per bundle.
pub const DECODE_WIDTH: usize = 8;

/// One decoded micro-op descriptor.
///
/// Field extraction only; the golden model re-derives any format-specific
/// detail it needs from `raw` during execution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MicroOp {
    /// Raw 32-bit encoding.
    pub raw: u32,
    /// Major opcode (bits 0-6).
    pub opcode: u32,
    /// Destination register index.
    pub rd: usize,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// funct3 field.
    pub funct3: u32,
    /// funct7 field.
    pub funct7: u32,
    /// Sign-extended immediate for the I/S/B/J formats, 0 otherwise.
    pub imm: i64,
    /// True for conditional branches and jumps (0x63, 0x6F, 0x67).
    pub is_branch: bool,
    /// True for integer loads (0x03).
    pub is_load: bool,
    /// True for integer stores (0x23).
    pub is_store: bool,
}

impl MicroOp {
    /// Destination register written by this op, if any.
    ///
    /// Branches and stores write no register; register 0 writes are
    /// discarded and reported as `None`.
    pub fn dest(&self) -> Option<usize> {
        if self.is_store || self.opcode == OP_BRANCH || self.rd == 0 {
            None
        } else {
            Some(self.rd)
        }
    }

    /// Source registers read by this op, register 0 excluded.
    ///
    /// LUI, AUIPC, and JAL read no register; B/S/R formats read rs2 in
    /// addition to rs1.
    pub fn sources(&self) -> impl Iterator<Item = usize> {
        let reads_rs1 = !matches!(self.opcode, OP_LUI | OP_AUIPC | OP_JAL);
        let reads_rs2 = matches!(
            self.opcode,
            OP_REG | OP_REG_32 | OP_STORE | OP_BRANCH | OP_AMO
        );
        let rs1 = (reads_rs1 && self.rs1 != 0).then_some(self.rs1);
        let rs2 = (reads_rs2 && self.rs2 != 0).then_some(self.rs2);
        rs1.into_iter().chain(rs2)
    }
}

/// Stateless eight-wide decoder.
///
/// Holds only an optional coverage handle; decoding never mutates it beyond
/// the fire-and-forget recorder calls.
#[derive(Debug, Default)]
pub struct Decoder8W {
    coverage: Option<CoverageRef>,
}

impl Decoder8W {
    /// Creates a decoder with no coverage sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decoder that records opcodes and immediates to `coverage`.
    pub fn with_coverage(coverage: CoverageRef) -> Self {
        Self {
            coverage: Some(coverage),
        }
    }

    /// Decodes up to [`DECODE_WIDTH`] instruction words.
    ///
    /// Words beyond the decode width are ignored, matching the hardware
    /// bundle boundary.
    pub fn decode(&self, words: &[u32]) -> Vec<MicroOp> {
        words
            .iter()
            .take(DECODE_WIDTH)
            .map(|&word| self.decode_one(word))
            .collect()
    }

    /// Decodes a single instruction word.
    pub fn decode_one(&self, word: u32) -> MicroOp {
        let opcode = word.opcode();

        let imm = match opcode {
            OP_IMM | OP_LOAD | OP_JALR => word.imm_i(),
            OP_STORE => word.imm_s(),
            OP_BRANCH => word.imm_b(),
            OP_JAL => word.imm_j(),
            _ => 0,
        };

        if let Some(cov) = &self.coverage {
            let mut cov = cov.borrow_mut();
            cov.record_opcode(opcode);
            cov.record_immediate(imm);
        }

        MicroOp {
            raw: word,
            opcode,
            rd: word.rd(),
            rs1: word.rs1(),
            rs2: word.rs2(),
            funct3: word.funct3(),
            funct7: word.funct7(),
            imm,
            is_branch: matches!(opcode, OP_BRANCH | OP_JAL | OP_JALR),
            is_load: opcode == OP_LOAD,
            is_store: opcode == OP_STORE,
        }
    }
}
