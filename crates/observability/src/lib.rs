//! Tracing/logging setup shared by ledger consumers.
//!
//! The ledger crates only emit `tracing` events: committed movements and
//! sale lines at `info`, clamped stock underflows at `warn`. Hosts call
//! [`init`] once at startup to route those events somewhere visible; the
//! clamp warning is the sanctioned way to observe over-withdrawals, since
//! the quantity contract itself stays silent about them.

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;
