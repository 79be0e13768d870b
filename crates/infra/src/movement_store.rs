//! In-memory movement store.

use std::sync::RwLock;

use stockledger_core::{LedgerError, LedgerResult, ProductId};
use stockledger_movements::{Movement, MovementStore};

/// In-memory append-only movement store.
///
/// Intended for tests/dev. Rows are never rewritten or deleted.
#[derive(Debug, Default)]
pub struct InMemoryMovementStore {
    rows: RwLock<Vec<Movement>>,
}

impl InMemoryMovementStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Movement> {
        self.rows.read().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn for_product(&self, product_id: ProductId) -> Vec<Movement> {
        self.all()
            .into_iter()
            .filter(|m| m.product_id == product_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MovementStore for InMemoryMovementStore {
    fn append(&self, movement: Movement) -> LedgerResult<()> {
        self.rows
            .write()
            .map_err(|_| LedgerError::persistence("movement rows lock poisoned"))?
            .push(movement);
        Ok(())
    }
}
