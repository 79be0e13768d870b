//! Movement record type and delta mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockledger_core::{EmployeeId, MovementId, ProductId};

/// Kind of stock-affecting event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    /// Inbound purchase or replenishment.
    Restock,
    /// Outbound removal other than a sale.
    Withdrawal,
    /// Manual stock-count correction.
    ///
    /// Movement quantities are strictly positive, so an adjustment only ever
    /// increases stock; a downward correction has to be recorded as a
    /// withdrawal. Carried over from the original system as-is.
    Adjustment,
    /// Customer return back into stock.
    Return,
}

impl MovementKind {
    /// Signed stock delta for a movement of `quantity` units.
    pub fn signed_delta(self, quantity: i64) -> i64 {
        match self {
            MovementKind::Restock | MovementKind::Return | MovementKind::Adjustment => quantity,
            MovementKind::Withdrawal => -quantity,
        }
    }
}

/// Immutable movement record. Persisted with its declared quantity even when
/// the stock mutation was clamped; history is never altered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub id: MovementId,
    pub product_id: ProductId,
    pub kind: MovementKind,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
    pub employee_id: Option<EmployeeId>,
    pub reason: Option<String>,
}

/// Command: RecordMovement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMovement {
    pub product_id: ProductId,
    pub kind: MovementKind,
    pub quantity: i64,
    pub employee_id: Option<EmployeeId>,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}
