//! Simulation harness.
//!
//! Lockstep verification against the golden model:
//! 1. **Scoreboard:** Per-commit cross-checking of a device under test.
//! 2. **Trace:** Commit trace recording with CSV and JSON serialization.

/// Golden-model scoreboard.
pub mod scoreboard;

/// Commit trace recording and serialization.
pub mod trace;

pub use scoreboard::{Observation, Scoreboard};
pub use trace::{dump_csv, dump_json, load_json, TraceEntry, TraceError};
