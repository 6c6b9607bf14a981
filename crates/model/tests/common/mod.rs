//! Shared test infrastructure.

/// RV64 instruction encoders.
pub mod encode;

use kestrel_core::config::Config;
use kestrel_core::core::GoldenModel;

/// Builds a golden model with default configuration at PC 0.
pub fn model() -> GoldenModel {
    GoldenModel::new(&Config::default())
}

/// Installs a test-friendly tracing subscriber once per process.
///
/// Honors `RUST_LOG`; repeated calls are no-ops so every test can call
/// this unconditionally.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
