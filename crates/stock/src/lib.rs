//! Stock store: the authoritative holder of quantity-on-hand per product.
//!
//! Both writers (movement ledger, sale line processor) mutate stock through
//! this crate's atomic bounded-adjust operation. Mutual exclusion is per
//! product; adjustments on different products never block each other.

pub mod status;
pub mod store;

pub use status::StockStatus;
pub use store::{ProductStock, StockMutation, StockStore};
