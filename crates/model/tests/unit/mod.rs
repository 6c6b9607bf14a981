//! # Unit Components
//!
//! Central hub for the model's unit tests, organized by subsystem:
//! golden model execution, security extensions, out-of-order backend
//! structures, and the simulation harness.

/// Scenario tests for the golden reference model.
///
/// Multi-instruction programs, the architectural fault taxonomy, and
/// address translation behavior as observed through instructions.
pub mod golden;

/// Tests for the out-of-order backend structures.
///
/// Rename, issue queue, reorder buffer, and load/store unit, both in
/// isolation and wired together as a miniature pipeline.
pub mod backend;

/// Tests for the security extension models.
///
/// Memory encryption, enclave gating, privilege-mode access checks,
/// nested page translation, the speculative-fetch fence, and the
/// meltdown leak path.
pub mod security;

/// Tests for the simulation harness.
///
/// Scoreboard lockstep checking and trace serialization.
pub mod sim;
