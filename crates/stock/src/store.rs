//! In-memory stock store with per-product exclusive slots.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, TryLockError};
use std::thread;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::warn;

use stockledger_core::{LedgerConfig, LedgerError, LedgerResult, ProductId};

use crate::status::StockStatus;

/// Stock registration for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductStock {
    pub product_id: ProductId,
    pub quantity_on_hand: i64,
    pub reorder_threshold: i64,
}

/// One bounded adjustment, as computed inside the critical section.
///
/// `clamped` marks that the candidate quantity went negative and was
/// truncated to zero. The clamp is policy, not an error: stock cannot go
/// negative, and over-withdrawal is silently absorbed. Reconciliation can
/// detect it by comparing `previous + delta` against `new_quantity`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StockMutation {
    pub previous: i64,
    pub new_quantity: i64,
    pub clamped: bool,
}

#[derive(Debug)]
struct Slot {
    reorder_threshold: i64,
    quantity: Mutex<i64>,
}

/// The single source of truth for quantity on hand.
///
/// Each registered product owns an exclusive slot; `adjust`/`transact`
/// serialize per product and proceed independently across products. Waiting
/// for a slot is bounded by `LedgerConfig::lock_timeout`; on timeout the
/// operation aborts with no state change.
#[derive(Debug)]
pub struct StockStore {
    slots: RwLock<HashMap<ProductId, Arc<Slot>>>,
    config: LedgerConfig,
}

impl StockStore {
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Seed (or replace) a product's stock slot.
    ///
    /// Initial quantity and threshold must be non-negative.
    pub fn register(&self, stock: ProductStock) -> LedgerResult<()> {
        if stock.quantity_on_hand < 0 {
            return Err(LedgerError::invalid_quantity(format!(
                "initial quantity_on_hand must be non-negative, got {}",
                stock.quantity_on_hand
            )));
        }
        if stock.reorder_threshold < 0 {
            return Err(LedgerError::invalid_quantity(format!(
                "reorder_threshold must be non-negative, got {}",
                stock.reorder_threshold
            )));
        }

        let mut slots = self
            .slots
            .write()
            .map_err(|_| LedgerError::persistence("stock table lock poisoned"))?;
        slots.insert(
            stock.product_id,
            Arc::new(Slot {
                reorder_threshold: stock.reorder_threshold,
                quantity: Mutex::new(stock.quantity_on_hand),
            }),
        );
        Ok(())
    }

    /// Current quantity on hand.
    pub fn get(&self, product_id: ProductId) -> LedgerResult<i64> {
        let slot = self.slot(product_id)?;
        let guard = self.lock_slot(product_id, &slot)?;
        Ok(*guard)
    }

    /// Derived status for the product (never stored).
    pub fn status(&self, product_id: ProductId) -> LedgerResult<StockStatus> {
        let slot = self.slot(product_id)?;
        let guard = self.lock_slot(product_id, &slot)?;
        Ok(StockStatus::derive(*guard, slot.reorder_threshold))
    }

    /// Atomic bounded adjustment: `new_quantity = max(current + delta, 0)`.
    ///
    /// Clamping to zero raises no error; the underflow is logged at `warn`.
    pub fn adjust(&self, product_id: ProductId, delta: i64) -> LedgerResult<i64> {
        let (mutation, ()) = self.transact(product_id, delta, |_| Ok(()))?;
        Ok(mutation.new_quantity)
    }

    /// Run `commit` inside the product's critical section, then apply the
    /// bounded adjustment.
    ///
    /// This is the transactional entry point both writers use: the ledger row
    /// append runs in `commit`, and the new quantity is written only if
    /// `commit` succeeds. On any failure (unknown product, lock timeout,
    /// commit error) the quantity is left untouched, so retrying the whole
    /// logical operation cannot double-apply a delta.
    pub fn transact<T, F>(
        &self,
        product_id: ProductId,
        delta: i64,
        commit: F,
    ) -> LedgerResult<(StockMutation, T)>
    where
        F: FnOnce(StockMutation) -> LedgerResult<T>,
    {
        let slot = self.slot(product_id)?;
        let mut guard = self.lock_slot(product_id, &slot)?;

        let previous = *guard;
        // Saturating: extreme deltas pin to the i64 range instead of
        // overflowing; the zero clamp below handles the negative end.
        let candidate = previous.saturating_add(delta);
        let mutation = StockMutation {
            previous,
            new_quantity: candidate.max(0),
            clamped: candidate < 0,
        };

        let value = commit(mutation)?;
        *guard = mutation.new_quantity;

        if mutation.clamped {
            warn!(
                product_id = %product_id,
                previous,
                delta,
                "stock underflow clamped to zero"
            );
        }

        Ok((mutation, value))
    }

    fn slot(&self, product_id: ProductId) -> LedgerResult<Arc<Slot>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| LedgerError::persistence("stock table lock poisoned"))?;
        slots
            .get(&product_id)
            .cloned()
            .ok_or(LedgerError::UnknownProduct(product_id))
    }

    /// Bounded acquisition of a product's exclusive slot.
    fn lock_slot<'a>(
        &self,
        product_id: ProductId,
        slot: &'a Slot,
    ) -> LedgerResult<MutexGuard<'a, i64>> {
        let deadline = Instant::now() + self.config.lock_timeout();
        loop {
            match slot.quantity.try_lock() {
                Ok(guard) => return Ok(guard),
                Err(TryLockError::Poisoned(_)) => {
                    return Err(LedgerError::persistence("stock slot lock poisoned"));
                }
                Err(TryLockError::WouldBlock) => {
                    if Instant::now() >= deadline {
                        return Err(LedgerError::timeout(product_id));
                    }
                    thread::yield_now();
                }
            }
        }
    }
}

impl Default for StockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;

    fn store_with(quantity: i64, threshold: i64) -> (StockStore, ProductId) {
        let store = StockStore::new();
        let product_id = ProductId::new();
        store
            .register(ProductStock {
                product_id,
                quantity_on_hand: quantity,
                reorder_threshold: threshold,
            })
            .unwrap();
        (store, product_id)
    }

    #[test]
    fn adjust_applies_signed_delta() {
        let (store, product_id) = store_with(10, 5);
        assert_eq!(store.adjust(product_id, 5).unwrap(), 15);
        assert_eq!(store.adjust(product_id, -12).unwrap(), 3);
        assert_eq!(store.get(product_id).unwrap(), 3);
    }

    #[test]
    fn adjust_clamps_underflow_to_zero() {
        let (store, product_id) = store_with(3, 5);
        assert_eq!(store.adjust(product_id, -10).unwrap(), 0);
        assert_eq!(store.get(product_id).unwrap(), 0);
        assert_eq!(store.status(product_id).unwrap(), StockStatus::OutOfStock);
    }

    #[test]
    fn extreme_deltas_saturate_instead_of_overflowing() {
        let (store, product_id) = store_with(10, 5);
        assert_eq!(store.adjust(product_id, i64::MAX).unwrap(), i64::MAX);

        let (store, product_id) = store_with(10, 5);
        assert_eq!(store.adjust(product_id, i64::MIN).unwrap(), 0);
        assert_eq!(store.get(product_id).unwrap(), 0);
    }

    #[test]
    fn transact_reports_clamp_without_error() {
        let (store, product_id) = store_with(3, 5);
        let (mutation, ()) = store.transact(product_id, -10, |_| Ok(())).unwrap();
        assert!(mutation.clamped);
        assert_eq!(mutation.previous, 3);
        assert_eq!(mutation.new_quantity, 0);
    }

    #[test]
    fn transact_rolls_back_when_commit_fails() {
        let (store, product_id) = store_with(10, 5);
        let err = store
            .transact(product_id, -4, |_| -> LedgerResult<()> {
                Err(LedgerError::persistence("disk full"))
            })
            .unwrap_err();
        match err {
            LedgerError::Persistence(_) => {}
            other => panic!("expected Persistence, got {other:?}"),
        }
        // The quantity write never happened.
        assert_eq!(store.get(product_id).unwrap(), 10);
    }

    #[test]
    fn unknown_product_is_rejected_before_mutation() {
        let store = StockStore::new();
        let product_id = ProductId::new();
        match store.adjust(product_id, 1).unwrap_err() {
            LedgerError::UnknownProduct(id) => assert_eq!(id, product_id),
            other => panic!("expected UnknownProduct, got {other:?}"),
        }
    }

    #[test]
    fn register_rejects_negative_values() {
        let store = StockStore::new();
        let bad = ProductStock {
            product_id: ProductId::new(),
            quantity_on_hand: -1,
            reorder_threshold: 5,
        };
        assert!(matches!(
            store.register(bad).unwrap_err(),
            LedgerError::InvalidQuantity(_)
        ));
    }

    #[test]
    fn status_tracks_threshold_boundaries() {
        let (store, product_id) = store_with(10, 5);
        assert_eq!(store.status(product_id).unwrap(), StockStatus::InStock);
        store.adjust(product_id, -5).unwrap();
        assert_eq!(store.status(product_id).unwrap(), StockStatus::LowStock);
        store.adjust(product_id, -5).unwrap();
        assert_eq!(store.status(product_id).unwrap(), StockStatus::OutOfStock);
    }

    #[test]
    fn slot_wait_times_out_without_partial_state() {
        let store = Arc::new(StockStore::with_config(LedgerConfig {
            lock_timeout_ms: 20,
        }));
        let product_id = ProductId::new();
        store
            .register(ProductStock {
                product_id,
                quantity_on_hand: 8,
                reorder_threshold: 2,
            })
            .unwrap();

        let holder = Arc::clone(&store);
        let handle = thread::spawn(move || {
            // Hold the slot well past the other caller's timeout.
            holder
                .transact(product_id, 1, |_| {
                    thread::sleep(Duration::from_millis(200));
                    Ok(())
                })
                .unwrap();
        });

        // Give the holder time to acquire the slot.
        thread::sleep(Duration::from_millis(50));
        match store.adjust(product_id, -3).unwrap_err() {
            LedgerError::ConcurrencyTimeout(id) => assert_eq!(id, product_id),
            other => panic!("expected ConcurrencyTimeout, got {other:?}"),
        }

        handle.join().unwrap();
        // Only the holder's +1 applied.
        assert_eq!(store.get(product_id).unwrap(), 9);
    }

    #[test]
    fn concurrent_adjustments_on_one_product_lose_nothing() {
        let store = Arc::new(StockStore::new());
        let product_id = ProductId::new();
        store
            .register(ProductStock {
                product_id,
                quantity_on_hand: 0,
                reorder_threshold: 0,
            })
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    store.adjust(product_id, 1).unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.get(product_id).unwrap(), 800);
    }

    #[test]
    fn products_do_not_block_each_other() {
        let store = Arc::new(StockStore::with_config(LedgerConfig {
            lock_timeout_ms: 50,
        }));
        let slow = ProductId::new();
        let fast = ProductId::new();
        for product_id in [slow, fast] {
            store
                .register(ProductStock {
                    product_id,
                    quantity_on_hand: 10,
                    reorder_threshold: 2,
                })
                .unwrap();
        }

        let holder = Arc::clone(&store);
        let handle = thread::spawn(move || {
            holder
                .transact(slow, 1, |_| {
                    thread::sleep(Duration::from_millis(150));
                    Ok(())
                })
                .unwrap();
        });

        thread::sleep(Duration::from_millis(30));
        // `slow` is held past our timeout, but `fast` must go through.
        assert_eq!(store.adjust(fast, -4).unwrap(), 6);

        handle.join().unwrap();
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            /// Quantity on hand never goes negative, whatever the deltas.
            #[test]
            fn non_negativity(deltas in proptest::collection::vec(-50i64..50, 0..64)) {
                let (store, product_id) = store_with(10, 5);
                for delta in deltas {
                    let quantity = store.adjust(product_id, delta).unwrap();
                    prop_assert!(quantity >= 0);
                }
                prop_assert!(store.get(product_id).unwrap() >= 0);
            }

            /// Absent clamping, the final quantity is the initial quantity
            /// plus the sum of all applied deltas.
            #[test]
            fn conservation_without_clamping(deltas in proptest::collection::vec(-50i64..50, 0..64)) {
                let initial = 10_000; // large enough that no delta sequence clamps
                let (store, product_id) = store_with(initial, 5);
                let mut expected = initial;
                for delta in deltas {
                    expected += delta;
                    store.adjust(product_id, delta).unwrap();
                }
                prop_assert_eq!(store.get(product_id).unwrap(), expected);
            }
        }
    }
}
