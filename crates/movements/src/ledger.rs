//! Movement ledger service.

use std::sync::Arc;

use tracing::info;

use stockledger_core::{LedgerError, LedgerResult, MovementId};
use stockledger_stock::StockStore;

use crate::movement::{Movement, RecordMovement};

/// Append-only persistence for committed movements.
///
/// Implementations must never rewrite or delete rows; `append` is called
/// inside the product's critical section, so a failure aborts the stock
/// mutation as well.
pub trait MovementStore: Send + Sync {
    fn append(&self, movement: Movement) -> LedgerResult<()>;
}

impl<S> MovementStore for Arc<S>
where
    S: MovementStore + ?Sized,
{
    fn append(&self, movement: Movement) -> LedgerResult<()> {
        (**self).append(movement)
    }
}

/// Records movements and applies their stock effect exactly once.
#[derive(Debug)]
pub struct MovementLedger<S: MovementStore> {
    stock: Arc<StockStore>,
    store: S,
}

impl<S: MovementStore> MovementLedger<S> {
    pub fn new(stock: Arc<StockStore>, store: S) -> Self {
        Self { stock, store }
    }

    /// Record a movement and apply its signed delta to the stock store as one
    /// atomic unit.
    ///
    /// Validation (positive quantity, known product) happens before any
    /// mutation. If the row append or the stock mutation fails, neither takes
    /// effect, so retrying the whole operation cannot double-apply the delta.
    pub fn record(&self, cmd: RecordMovement) -> LedgerResult<Movement> {
        if cmd.quantity <= 0 {
            return Err(LedgerError::invalid_quantity(format!(
                "movement quantity must be positive, got {}",
                cmd.quantity
            )));
        }

        let movement = Movement {
            id: MovementId::new(),
            product_id: cmd.product_id,
            kind: cmd.kind,
            quantity: cmd.quantity,
            occurred_at: cmd.occurred_at,
            employee_id: cmd.employee_id,
            reason: cmd.reason,
        };

        let delta = cmd.kind.signed_delta(cmd.quantity);
        let (mutation, ()) = self
            .stock
            .transact(cmd.product_id, delta, |_| self.store.append(movement.clone()))?;

        info!(
            movement_id = %movement.id,
            product_id = %movement.product_id,
            kind = ?movement.kind,
            quantity = movement.quantity,
            new_quantity = mutation.new_quantity,
            clamped = mutation.clamped,
            "movement recorded"
        );

        Ok(movement)
    }

    pub fn stock(&self) -> &StockStore {
        &self.stock
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
