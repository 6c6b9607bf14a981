//! Simulation harness tests.

/// Scoreboard lockstep flows.
pub mod scoreboard_flow;

/// Trace serialization.
pub mod trace_io;
