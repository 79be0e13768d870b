//! Derived stock status.

use serde::{Deserialize, Serialize};

/// Stock status of a product, derived from quantity on hand and the reorder
/// threshold. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    InStock,
}

impl StockStatus {
    /// Derive the status: out of stock at zero, low stock at or below the
    /// reorder threshold, in stock otherwise.
    pub fn derive(quantity_on_hand: i64, reorder_threshold: i64) -> Self {
        if quantity_on_hand == 0 {
            StockStatus::OutOfStock
        } else if quantity_on_hand <= reorder_threshold {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}
