//! Sale line processor service.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use stockledger_core::{LedgerError, LedgerResult, SaleLineId};
use stockledger_stock::StockStore;

use crate::line::{AddSaleLine, SaleLine};

/// Append-only persistence for committed sale lines.
///
/// `append` runs inside the product's critical section; a failure aborts the
/// stock mutation as well.
pub trait SaleLineStore: Send + Sync {
    fn append(&self, line: SaleLine) -> LedgerResult<()>;
}

impl<S> SaleLineStore for Arc<S>
where
    S: SaleLineStore + ?Sized,
{
    fn append(&self, line: SaleLine) -> LedgerResult<()> {
        (**self).append(line)
    }
}

/// Creates sale lines and applies their `-quantity` stock effect exactly once.
#[derive(Debug)]
pub struct SaleLineProcessor<S: SaleLineStore> {
    stock: Arc<StockStore>,
    store: S,
}

impl<S: SaleLineStore> SaleLineProcessor<S> {
    pub fn new(stock: Arc<StockStore>, store: S) -> Self {
        Self { stock, store }
    }

    /// Add one line to a sale: compute `line_total`, decrement stock (zero
    /// clamp, same policy as the movement ledger) and persist the row as one
    /// atomic unit.
    ///
    /// On failure no row exists and stock is untouched; the sale header must
    /// not include the line in its totals. Lines are independent units: a
    /// multi-line sale wanting all-or-nothing semantics needs an outer
    /// transaction around repeated calls, owned by the sale-header
    /// collaborator.
    pub fn add_line(&self, cmd: AddSaleLine) -> LedgerResult<SaleLine> {
        if cmd.quantity <= 0 {
            return Err(LedgerError::invalid_quantity(format!(
                "sale line quantity must be positive, got {}",
                cmd.quantity
            )));
        }
        if cmd.unit_price <= Decimal::ZERO {
            return Err(LedgerError::invalid_quantity(format!(
                "unit price must be positive, got {}",
                cmd.unit_price
            )));
        }

        let line = SaleLine {
            id: SaleLineId::new(),
            sale_id: cmd.sale_id,
            product_id: cmd.product_id,
            quantity: cmd.quantity,
            unit_price: cmd.unit_price,
            line_total: Decimal::from(cmd.quantity) * cmd.unit_price,
        };

        let (mutation, ()) = self
            .stock
            .transact(cmd.product_id, -cmd.quantity, |_| {
                self.store.append(line.clone())
            })?;

        info!(
            line_id = %line.id,
            sale_id = %line.sale_id,
            product_id = %line.product_id,
            quantity = line.quantity,
            line_total = %line.line_total,
            new_quantity = mutation.new_quantity,
            clamped = mutation.clamped,
            "sale line added"
        );

        Ok(line)
    }

    pub fn stock(&self) -> &StockStore {
        &self.stock
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
