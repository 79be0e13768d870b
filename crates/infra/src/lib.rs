//! Infrastructure layer: persistence adapters for the ledger's append-only
//! stores, plus the cross-crate integration tests.

pub mod movement_store;
pub mod sale_line_store;


pub use movement_store::InMemoryMovementStore;
pub use sale_line_store::InMemorySaleLineStore;
