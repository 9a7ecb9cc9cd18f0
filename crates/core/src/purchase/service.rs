//! Purchase engine.

use std::sync::Arc;

use clubhouse_shared::types::{DrawerId, MemberId, PurchaseId, StaffId};
use tracing::info;

use super::error::PurchaseError;
use super::types::{CreditPurchase, PaymentMethod};
use crate::audit::{self, AuditAction, AuditEntity, AuditEvent, AuditSink};
use crate::clock::Clock;
use crate::pricing::{self, PackageSize};
use crate::storage::{MemberStore, PurchaseStore};

/// Records and voids credit-package sales.
#[derive(Clone)]
pub struct PurchaseService {
    members: Arc<dyn MemberStore>,
    purchases: Arc<dyn PurchaseStore>,
    audit: Arc<dyn AuditSink>,
    clock: Arc<dyn Clock>,
}

impl PurchaseService {
    /// Wires the engine to its collaborators.
    #[must_use]
    pub fn new(
        members: Arc<dyn MemberStore>,
        purchases: Arc<dyn PurchaseStore>,
        audit: Arc<dyn AuditSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { members, purchases, audit, clock }
    }

    /// Sells a credit package to a member.
    ///
    /// The price is read from the tariff for the member's tier at sale
    /// time and stored on the purchase; later tariff changes never touch
    /// recorded sales. `drawer_id` attaches the sale to a drawer when one
    /// is open; an unattached sale still counts toward the balance.
    ///
    /// # Errors
    ///
    /// Returns `MemberNotFound`, `InvalidPackageSize`, or `Storage`.
    pub async fn record_sale(
        &self,
        member_id: MemberId,
        credits: i64,
        payment_method: PaymentMethod,
        payment_reference: Option<String>,
        recorded_by: StaffId,
        drawer_id: Option<DrawerId>,
    ) -> Result<CreditPurchase, PurchaseError> {
        let profile = self
            .members
            .member(&member_id)
            .await?
            .ok_or_else(|| PurchaseError::MemberNotFound(member_id.clone()))?;
        let package = PackageSize::try_from(credits)?;
        let price = pricing::price(package, profile.is_local_tier);

        let purchase = CreditPurchase::new(
            member_id,
            package,
            price,
            payment_method,
            payment_reference,
            recorded_by,
            drawer_id,
            self.clock.now(),
        );
        self.purchases.insert_purchase(&purchase).await?;

        info!(
            member = %purchase.member_id,
            credits = purchase.credits.credits(),
            price = %purchase.price_paid,
            method = %purchase.payment_method,
            "credit purchase recorded"
        );
        audit::emit(
            self.audit.as_ref(),
            AuditEvent::new(AuditEntity::Purchase, purchase.id, AuditAction::Create, purchase.created_at)
                .with_payload(audit::payload(&purchase))
                .with_actor(recorded_by),
        )
        .await;

        Ok(purchase)
    }

    /// Voids a purchase, retroactively removing its credits from the
    /// member's balance and its amount from drawer totals.
    ///
    /// The balance may go negative if the credits were already consumed;
    /// that is recorded, not rejected.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `AlreadyVoided`, or `Storage`.
    pub async fn void(
        &self,
        id: PurchaseId,
        reason: impl Into<String>,
        recorded_by: StaffId,
    ) -> Result<CreditPurchase, PurchaseError> {
        let mut purchase = self
            .purchases
            .purchase(id)
            .await?
            .ok_or(PurchaseError::NotFound(id))?;
        purchase.void(reason)?;
        self.purchases.update_purchase(&purchase).await?;

        info!(
            member = %purchase.member_id,
            reason = purchase.void_reason.as_deref().unwrap_or(""),
            "purchase voided"
        );
        audit::emit(
            self.audit.as_ref(),
            AuditEvent::new(AuditEntity::Purchase, id, AuditAction::Void, self.clock.now())
                .with_payload(audit::payload(&purchase))
                .with_actor(recorded_by),
        )
        .await;

        Ok(purchase)
    }

    /// Loads one purchase.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `Storage`.
    pub async fn get(&self, id: PurchaseId) -> Result<CreditPurchase, PurchaseError> {
        self.purchases
            .purchase(id)
            .await?
            .ok_or(PurchaseError::NotFound(id))
    }

    /// All of a member's purchases, newest first, voided included.
    ///
    /// # Errors
    ///
    /// Returns `Storage` on store failure.
    pub async fn list_by_member(
        &self,
        member: &MemberId,
    ) -> Result<Vec<CreditPurchase>, PurchaseError> {
        Ok(self.purchases.purchases_by_member(member).await?)
    }
}
