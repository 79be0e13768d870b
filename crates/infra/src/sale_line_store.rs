//! In-memory sale line store.

use std::sync::RwLock;

use stockledger_core::{LedgerError, LedgerResult, SaleId};
use stockledger_sales::{SaleLine, SaleLineStore};

/// In-memory append-only sale line store.
///
/// Intended for tests/dev. Rows are never rewritten or deleted.
#[derive(Debug, Default)]
pub struct InMemorySaleLineStore {
    rows: RwLock<Vec<SaleLine>>,
}

impl InMemorySaleLineStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<SaleLine> {
        self.rows.read().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn for_sale(&self, sale_id: SaleId) -> Vec<SaleLine> {
        self.all()
            .into_iter()
            .filter(|l| l.sale_id == sale_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SaleLineStore for InMemorySaleLineStore {
    fn append(&self, line: SaleLine) -> LedgerResult<()> {
        self.rows
            .write()
            .map_err(|_| LedgerError::persistence("sale line rows lock poisoned"))?
            .push(line);
        Ok(())
    }
}
