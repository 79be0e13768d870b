//! Movement ledger: the append-only record of stock-affecting events not
//! tied to a sale (restock, withdrawal, adjustment, return).
//!
//! Each committed movement applies exactly one signed delta to the stock
//! store, atomically with its own row append. Movements are immutable
//! historical facts; corrections are new compensating movements, never edits.

pub mod ledger;
pub mod movement;

pub use ledger::{MovementLedger, MovementStore};
pub use movement::{Movement, MovementKind, RecordMovement};
