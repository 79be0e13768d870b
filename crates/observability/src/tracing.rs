//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging for the process with the default filter.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    // Ledger events at info and up; the clamp diagnostic is warn.
    init_with_filter("stockledger=info,info");
}

/// Initialize with explicit filter directives, unless `RUST_LOG` overrides.
pub fn init_with_filter(directives: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives));

    // JSON logs + timestamps, configurable via RUST_LOG.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
