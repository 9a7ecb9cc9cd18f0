//! Credit purchase domain types.

use chrono::{DateTime, Utc};
use clubhouse_shared::types::{DrawerId, MemberId, PurchaseId, StaffId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::PurchaseError;
use crate::pricing::PackageSize;

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Physical cash into the drawer.
    Cash,
    /// First mobile wallet provider.
    WalletA,
    /// Second mobile wallet provider.
    WalletB,
    /// Bank transfer with reference.
    BankTransfer,
}

impl PaymentMethod {
    /// All methods, in drawer-summary order.
    pub const ALL: [Self; 4] = [Self::Cash, Self::WalletA, Self::WalletB, Self::BankTransfer];
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Cash => "CASH",
            Self::WalletA => "WALLET_A",
            Self::WalletB => "WALLET_B",
            Self::BankTransfer => "BANK_TRANSFER",
        };
        write!(f, "{name}")
    }
}

/// One credit-package sale.
///
/// Immutable once created except for the one-way `voided` flag; voided
/// purchases drop out of balance and drawer totals but are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditPurchase {
    /// Purchase identifier.
    pub id: PurchaseId,
    /// The buying member.
    pub member_id: MemberId,
    /// The package bought.
    pub credits: PackageSize,
    /// Price actually charged, per the tariff at sale time.
    pub price_paid: Decimal,
    /// How the member paid.
    pub payment_method: PaymentMethod,
    /// Wallet/transfer reference, when the method carries one.
    pub payment_reference: Option<String>,
    /// Staff member who recorded the sale.
    pub recorded_by: StaffId,
    /// Drawer the sale was rung into, when one was open.
    pub drawer_id: Option<DrawerId>,
    /// Sale instant.
    pub created_at: DateTime<Utc>,
    /// One-way void flag.
    pub voided: bool,
    /// Reason supplied when voiding.
    pub void_reason: Option<String>,
}

impl CreditPurchase {
    /// Creates a new (non-voided) purchase at the given instant.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        member_id: MemberId,
        credits: PackageSize,
        price_paid: Decimal,
        payment_method: PaymentMethod,
        payment_reference: Option<String>,
        recorded_by: StaffId,
        drawer_id: Option<DrawerId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: PurchaseId::new(),
            member_id,
            credits,
            price_paid,
            payment_method,
            payment_reference,
            recorded_by,
            drawer_id,
            created_at,
            voided: false,
            void_reason: None,
        }
    }

    /// Marks the purchase voided.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyVoided` if the purchase was voided before.
    pub fn void(&mut self, reason: impl Into<String>) -> Result<(), PurchaseError> {
        if self.voided {
            return Err(PurchaseError::AlreadyVoided(self.id));
        }
        self.voided = true;
        self.void_reason = Some(reason.into());
        Ok(())
    }
}
