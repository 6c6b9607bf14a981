//! Instruction set definitions and decoding.
//!
//! Everything needed to pick a 32-bit RISC-V encoding apart:
//! 1. **Opcodes:** Named major-opcode and funct constants.
//! 2. **Fields:** The [`InstructionBits`] extraction trait and immediate forms.
//! 3. **Decode:** The stateless eight-wide bundle decoder.

/// Eight-wide bundle decoder and micro-op descriptor.
pub mod decode;

/// Instruction field extraction trait and immediate helpers.
pub mod instruction;

/// Major opcode and function code constants.
pub mod opcodes;

pub use decode::{DECODE_WIDTH, Decoder8W, MicroOp};
pub use instruction::{InstructionBits, sign_extend};
