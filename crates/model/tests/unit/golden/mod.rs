//! Golden-model scenario tests.


/// Multi-instruction programs.
pub mod programs;

/// Address translation observed through instructions.
pub mod translation;
