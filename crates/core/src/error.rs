//! Ledger error model.

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the ledger.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors reported by the stock ledger to its immediate caller.
///
/// Keep this focused on the failures the ledger contracts can actually
/// produce. The zero-clamp on stock underflow is deliberate policy, not an
/// error, and never surfaces here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A quantity or price failed positivity validation. Rejected before any
    /// stock mutation is attempted.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// The referenced product has no stock slot. Rejected before mutation.
    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),

    /// Exclusive access to the product's stock slot could not be obtained
    /// within the configured bound. The operation left no partial state.
    #[error("timed out waiting for stock slot of product {0}")]
    ConcurrencyTimeout(ProductId),

    /// The atomic commit of (stock mutation + ledger row) failed. Callers
    /// must retry the entire logical operation, not just the row.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl LedgerError {
    pub fn invalid_quantity(msg: impl Into<String>) -> Self {
        Self::InvalidQuantity(msg.into())
    }

    pub fn unknown_product(product_id: ProductId) -> Self {
        Self::UnknownProduct(product_id)
    }

    pub fn timeout(product_id: ProductId) -> Self {
        Self::ConcurrencyTimeout(product_id)
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
