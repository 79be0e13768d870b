//! `stockledger-core` — shared building blocks for the stock ledger.
//!
//! This crate contains **pure domain** primitives (no infrastructure
//! concerns): strongly-typed identifiers, the shared error model and runtime
//! configuration.

pub mod config;
pub mod error;
pub mod id;

pub use config::LedgerConfig;
pub use error::{LedgerError, LedgerResult};
pub use id::{EmployeeId, MovementId, ProductId, SaleId, SaleLineId};
