//! Ledger view types.

use serde::{Deserialize, Serialize};

use crate::occupancy::OccupancyRecord;
use crate::purchase::CreditPurchase;

/// A member's derived balance with its two inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSummary {
    /// `credits_purchased - credits_consumed`; may be negative after voids.
    pub balance: i64,
    /// Sum of credits over non-voided purchases.
    pub credits_purchased: i64,
    /// Count of non-voided occupancy records.
    pub credits_consumed: i64,
}

/// A member's full activity history, each side newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberHistory {
    /// Derived balance at read time.
    pub summary: BalanceSummary,
    /// All purchases, voided included.
    pub purchases: Vec<CreditPurchase>,
    /// All occupancy records, voided included.
    pub occupancies: Vec<OccupancyRecord>,
}
