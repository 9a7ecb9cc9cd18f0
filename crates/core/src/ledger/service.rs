//! Balance derivation.

use std::sync::Arc;

use clubhouse_shared::types::MemberId;

use super::error::LedgerError;
use super::types::{BalanceSummary, MemberHistory};
use crate::storage::{OccupancyStore, PurchaseStore};

/// Computes derived balances from the two history stores.
#[derive(Clone)]
pub struct LedgerService {
    purchases: Arc<dyn PurchaseStore>,
    occupancy: Arc<dyn OccupancyStore>,
}

impl LedgerService {
    /// Creates a ledger over the given stores.
    #[must_use]
    pub fn new(purchases: Arc<dyn PurchaseStore>, occupancy: Arc<dyn OccupancyStore>) -> Self {
        Self { purchases, occupancy }
    }

    /// Derives the member's current balance.
    ///
    /// A member with no history reads as zero on all three fields; the
    /// balance can go negative when a purchase is voided after its
    /// credits were consumed.
    ///
    /// # Errors
    ///
    /// Returns `Storage` on store failure.
    pub async fn balance(&self, member: &MemberId) -> Result<BalanceSummary, LedgerError> {
        let credits_purchased = self.purchases.credits_purchased(member).await?;
        let credits_consumed = self.occupancy.credits_consumed(member).await?;
        Ok(BalanceSummary {
            balance: credits_purchased - credits_consumed,
            credits_purchased,
            credits_consumed,
        })
    }

    /// True when the member's balance covers the required credits.
    ///
    /// # Errors
    ///
    /// Returns `Storage` on store failure.
    pub async fn has_sufficient_balance(
        &self,
        member: &MemberId,
        required: i64,
    ) -> Result<bool, LedgerError> {
        Ok(self.balance(member).await?.balance >= required)
    }

    /// The member's full activity history with the derived summary.
    ///
    /// # Errors
    ///
    /// Returns `Storage` on store failure.
    pub async fn history(&self, member: &MemberId) -> Result<MemberHistory, LedgerError> {
        let summary = self.balance(member).await?;
        let purchases = self.purchases.purchases_by_member(member).await?;
        let occupancies = self.occupancy.occupancies_by_member(member).await?;
        Ok(MemberHistory { summary, purchases, occupancies })
    }
}
