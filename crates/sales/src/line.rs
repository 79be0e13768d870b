//! Sale line record type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockledger_core::{ProductId, SaleId, SaleLineId};

/// Immutable record of one product/quantity/price tuple within a sale.
///
/// `line_total` is derived at creation (`quantity × unit_price`, exact
/// decimal arithmetic) and stored alongside the inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLine {
    pub id: SaleLineId,
    pub sale_id: SaleId,
    pub product_id: ProductId,
    /// Units sold (positive).
    pub quantity: i64,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// Command: AddSaleLine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddSaleLine {
    pub sale_id: SaleId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: Decimal,
}
