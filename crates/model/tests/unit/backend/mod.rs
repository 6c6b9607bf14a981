//! Out-of-order backend tests.

/// Issue queue scheduling flows.
pub mod issue_queue;


/// Rename unit invariants.
pub mod rename;
