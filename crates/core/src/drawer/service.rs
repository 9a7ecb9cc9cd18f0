//! Drawer engine.
//!
//! Drawer totals are derived from the attached sales at read time, never
//! accumulated; voiding a sale retroactively adjusts the day's summary.
//! Only the close operation freezes numbers, onto the drawer row itself.

use std::sync::Arc;

use chrono::NaiveDate;
use clubhouse_shared::types::StaffId;
use rust_decimal::Decimal;
use tracing::info;

use super::error::DrawerError;
use super::types::{CashDrawer, DrawerSummary, DrawerTransaction};
use crate::audit::{self, AuditAction, AuditEntity, AuditEvent, AuditSink};
use crate::clock::Clock;
use crate::purchase::PaymentMethod;
use crate::storage::{ConstraintKind, DrawerStore, MemberStore, PurchaseStore, StorageError};

/// Daily cash-drawer operations.
#[derive(Clone)]
pub struct DrawerService {
    drawers: Arc<dyn DrawerStore>,
    purchases: Arc<dyn PurchaseStore>,
    members: Arc<dyn MemberStore>,
    audit: Arc<dyn AuditSink>,
    clock: Arc<dyn Clock>,
}

impl DrawerService {
    /// Wires the engine to its collaborators.
    #[must_use]
    pub fn new(
        drawers: Arc<dyn DrawerStore>,
        purchases: Arc<dyn PurchaseStore>,
        members: Arc<dyn MemberStore>,
        audit: Arc<dyn AuditSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { drawers, purchases, members, audit, clock }
    }

    /// Opens the drawer for a day with a counted float.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOpeningBalance` for a negative float,
    /// `AlreadyExists` when the date already has a drawer, or `Storage`.
    pub async fn open(
        &self,
        date: NaiveDate,
        opening_balance: Decimal,
        opened_by: StaffId,
    ) -> Result<CashDrawer, DrawerError> {
        if opening_balance < Decimal::ZERO {
            return Err(DrawerError::InvalidOpeningBalance(opening_balance));
        }

        let drawer = CashDrawer::new(date, opening_balance, opened_by);
        // The storage date constraint is the authoritative guard.
        self.drawers.insert_drawer(&drawer).await.map_err(|err| match err {
            StorageError::Constraint(ConstraintKind::DrawerDateExists) => {
                DrawerError::AlreadyExists(date)
            }
            other => DrawerError::Storage(other),
        })?;

        info!(%date, opening = %drawer.opening_balance, "drawer opened");
        audit::emit(
            self.audit.as_ref(),
            AuditEvent::new(AuditEntity::Drawer, drawer.id, AuditAction::Open, self.clock.now())
                .with_payload(audit::payload(&drawer))
                .with_actor(opened_by),
        )
        .await;

        Ok(drawer)
    }

    /// The drawer for a date, open or closed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `Storage`.
    pub async fn for_date(&self, date: NaiveDate) -> Result<CashDrawer, DrawerError> {
        self.drawers
            .drawer_for_date(date)
            .await?
            .ok_or(DrawerError::NotFound(date))
    }

    /// Today's drawer per the injected clock.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no drawer was opened today, or `Storage`.
    pub async fn today(&self) -> Result<CashDrawer, DrawerError> {
        self.for_date(self.clock.now().date_naive()).await
    }

    /// Today's drawer only if it is still open.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when today has no drawer, `AlreadyClosed` when it
    /// was closed, or `Storage`.
    pub async fn current(&self) -> Result<CashDrawer, DrawerError> {
        let drawer = self.today().await?;
        if drawer.is_closed() {
            return Err(DrawerError::AlreadyClosed(drawer.date));
        }
        Ok(drawer)
    }

    /// Derives the day's summary from the drawer's attached sales.
    ///
    /// Voided sales are excluded from every subtotal and from the
    /// transaction list; `expected_cash = opening + cash subtotal`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `Storage`.
    pub async fn summarize(&self, date: NaiveDate) -> Result<DrawerSummary, DrawerError> {
        let drawer = self.for_date(date).await?;
        self.summary_for(&drawer).await
    }

    /// Closes the day against a recomputed summary.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `AlreadyClosed`, `InvalidDeclaredBalance`, or
    /// `Storage`.
    pub async fn close(
        &self,
        date: NaiveDate,
        declared_balance: Decimal,
        notes: Option<String>,
        closed_by: StaffId,
    ) -> Result<CashDrawer, DrawerError> {
        let mut drawer = self.for_date(date).await?;
        let summary = self.summary_for(&drawer).await?;
        drawer.close(summary.expected_cash, declared_balance, notes, self.clock.now())?;
        // Another close may have landed since the load; the storage
        // immutability guard decides.
        self.drawers.update_drawer(&drawer).await.map_err(|err| match err {
            StorageError::Constraint(ConstraintKind::DrawerClosed) => {
                DrawerError::AlreadyClosed(date)
            }
            other => DrawerError::Storage(other),
        })?;

        info!(
            %date,
            expected = %summary.expected_cash,
            declared = %declared_balance,
            variance = ?drawer.variance,
            "drawer closed"
        );
        audit::emit(
            self.audit.as_ref(),
            AuditEvent::new(AuditEntity::Drawer, drawer.id, AuditAction::Close, self.clock.now())
                .with_payload(audit::payload(&drawer))
                .with_actor(closed_by),
        )
        .await;

        Ok(drawer)
    }

    async fn summary_for(&self, drawer: &CashDrawer) -> Result<DrawerSummary, DrawerError> {
        let sales = self.purchases.sales_for_drawer(drawer.id).await?;

        let mut total_sales = Decimal::ZERO;
        let mut cash_sales = Decimal::ZERO;
        let mut wallet_a_sales = Decimal::ZERO;
        let mut wallet_b_sales = Decimal::ZERO;
        let mut bank_transfer_sales = Decimal::ZERO;
        let mut transactions = Vec::new();

        for sale in sales.into_iter().filter(|s| !s.voided) {
            total_sales += sale.price_paid;
            match sale.payment_method {
                PaymentMethod::Cash => cash_sales += sale.price_paid,
                PaymentMethod::WalletA => wallet_a_sales += sale.price_paid,
                PaymentMethod::WalletB => wallet_b_sales += sale.price_paid,
                PaymentMethod::BankTransfer => bank_transfer_sales += sale.price_paid,
            }

            let member = match self.members.member(&sale.member_id).await? {
                Some(profile) => profile.display_name,
                None => sale.member_id.to_string(),
            };
            transactions.push(DrawerTransaction {
                time: sale.created_at.format("%H:%M").to_string(),
                member,
                credits: sale.credits.credits(),
                amount: sale.price_paid,
                method: sale.payment_method,
            });
        }

        Ok(DrawerSummary {
            date: drawer.date,
            opening_balance: drawer.opening_balance,
            total_sales,
            cash_sales,
            wallet_a_sales,
            wallet_b_sales,
            bank_transfer_sales,
            expected_cash: drawer.opening_balance + cash_sales,
            transactions,
        })
    }
}
