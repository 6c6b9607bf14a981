//! Architectural fault codes.
//!
//! Faults are architectural outcomes, not host errors: the golden model
//! records at most one per `step` in its last-exception slot and execution
//! always continues. The `Display` form of each variant is the historical
//! lowercase code emitted in traces and compared by the scoreboard.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Architectural fault raised by a single instruction step.
///
/// Exactly one fault may be recorded per step; the first applicable cause
/// wins and later causes for the same instruction are never observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fault {
    /// Undecodable or unimplemented opcode/funct combination.
    #[error("illegal")]
    Illegal,

    /// Effective address not naturally aligned for the access width.
    ///
    /// Detected before translation is attempted.
    #[error("misalign")]
    Misalign,

    /// Unmapped virtual address, missing read/write permission, or no
    /// backing physical memory word at the translated address.
    #[error("page")]
    Page,

    /// Instruction fetch targeting a page without execute permission.
    #[error("nx")]
    Nx,

    /// Kernel-mode fetch of a user page while SMEP is enabled.
    #[error("smep")]
    Smep,

    /// Kernel-mode data access to a user page while SMAP is enabled and no
    /// override was requested.
    #[error("smap")]
    Smap,

    /// Access to a physical page outside the active enclave's committed set.
    #[error("sgx")]
    Sgx,

    /// Load issued while the speculative-fetch fence has unretired branches
    /// pending.
    #[error("spec")]
    Spec,

    /// `ECALL` trap instruction.
    #[error("ecall")]
    Ecall,

    /// `EBREAK` trap instruction.
    #[error("ebreak")]
    Ebreak,
}

impl Fault {
    /// Returns the lowercase code string for this fault.
    ///
    /// Identical to the `Display` form; convenient where a `&'static str`
    /// is needed (coverage keys, trace columns).
    pub const fn code(self) -> &'static str {
        match self {
            Self::Illegal => "illegal",
            Self::Misalign => "misalign",
            Self::Page => "page",
            Self::Nx => "nx",
            Self::Smep => "smep",
            Self::Smap => "smap",
            Self::Sgx => "sgx",
            Self::Spec => "spec",
            Self::Ecall => "ecall",
            Self::Ebreak => "ebreak",
        }
    }
}
