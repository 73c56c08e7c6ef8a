//! Tracing initialisation for tests.
//!
//! Router and registry code logs every predicate decision at `debug`; run a
//! failing test with `RUST_LOG=aeos_core=debug` to see the routing trail.

use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber honouring `RUST_LOG`, defaulting to
/// `warn`. Later calls in the same process are no-ops.
pub fn init_test_tracing() {
    init_test_tracing_with("warn");
}

/// Same as [`init_test_tracing`] with an explicit fallback filter.
pub fn init_test_tracing_with(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_test_writer()
        .try_init();
}
