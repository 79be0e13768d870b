//! Sale line processor: applies the stock-decrementing effect of individual
//! sale line items.
//!
//! Sale-header bookkeeping (totals, discounts, rollback of partially added
//! sales) stays with the external collaborator. Lines of one sale are
//! independent units here; there is no cross-line atomicity.

pub mod line;
pub mod processor;

pub use line::{AddSaleLine, SaleLine};
pub use processor::{SaleLineProcessor, SaleLineStore};
