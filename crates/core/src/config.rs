//! Runtime configuration for the stock ledger.

use std::time::Duration;

use serde::Deserialize;

const DEFAULT_LOCK_TIMEOUT_MS: u64 = 5_000;

/// Tunables consumed by the stock store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Upper bound (milliseconds) on waiting for a product's exclusive stock
    /// slot before the operation aborts with `ConcurrencyTimeout`.
    pub lock_timeout_ms: u64,
}

impl LedgerConfig {
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            lock_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
        }
    }
}
