//! Cash drawer domain types.
//!
//! One drawer exists per calendar day; the date (time-truncated to
//! midnight) is its natural key. A closed drawer is immutable.

use chrono::{DateTime, NaiveDate, Utc};
use clubhouse_shared::types::{DrawerId, StaffId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DrawerError;
use crate::purchase::PaymentMethod;

/// The daily cash-accounting container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashDrawer {
    /// Drawer identifier.
    pub id: DrawerId,
    /// Calendar day this drawer covers (natural key).
    pub date: NaiveDate,
    /// Opening float counted into the drawer.
    pub opening_balance: Decimal,
    /// Staff member who opened the drawer.
    pub opened_by: StaffId,
    /// Expected cash computed at close time.
    pub closing_balance: Option<Decimal>,
    /// Cash physically counted at close.
    pub declared_balance: Option<Decimal>,
    /// `declared - expected`; informational, never blocking.
    pub variance: Option<Decimal>,
    /// Free-form notes recorded at close.
    pub closing_notes: Option<String>,
    /// Close instant; `None` while the drawer is open.
    pub closed_at: Option<DateTime<Utc>>,
}

impl CashDrawer {
    /// Opens a drawer for the given day.
    #[must_use]
    pub fn new(date: NaiveDate, opening_balance: Decimal, opened_by: StaffId) -> Self {
        Self {
            id: DrawerId::new(),
            date,
            opening_balance,
            opened_by,
            closing_balance: None,
            declared_balance: None,
            variance: None,
            closing_notes: None,
            closed_at: None,
        }
    }

    /// True once the drawer has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }

    /// Closes the drawer against the recomputed expected cash.
    ///
    /// The variance (`declared - expected`) is recorded, not enforced.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyClosed` for a closed drawer and
    /// `InvalidDeclaredBalance` for a negative count.
    pub fn close(
        &mut self,
        expected_cash: Decimal,
        declared_balance: Decimal,
        notes: Option<String>,
        at: DateTime<Utc>,
    ) -> Result<(), DrawerError> {
        if self.is_closed() {
            return Err(DrawerError::AlreadyClosed(self.date));
        }
        if declared_balance < Decimal::ZERO {
            return Err(DrawerError::InvalidDeclaredBalance(declared_balance));
        }
        self.closing_balance = Some(expected_cash);
        self.declared_balance = Some(declared_balance);
        self.variance = Some(declared_balance - expected_cash);
        self.closing_notes = notes;
        self.closed_at = Some(at);
        Ok(())
    }
}

/// Per-method subtotals and the transaction list for one drawer day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawerSummary {
    /// The drawer day.
    pub date: NaiveDate,
    /// Opening float.
    pub opening_balance: Decimal,
    /// Sum over all non-voided sales of the day.
    pub total_sales: Decimal,
    /// Cash subtotal.
    pub cash_sales: Decimal,
    /// First-wallet subtotal.
    pub wallet_a_sales: Decimal,
    /// Second-wallet subtotal.
    pub wallet_b_sales: Decimal,
    /// Bank-transfer subtotal.
    pub bank_transfer_sales: Decimal,
    /// `opening_balance + cash_sales`.
    pub expected_cash: Decimal,
    /// Non-voided sales, newest first.
    pub transactions: Vec<DrawerTransaction>,
}

/// One formatted line of the drawer transaction list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawerTransaction {
    /// Sale time, formatted `HH:MM`.
    pub time: String,
    /// Member display name.
    pub member: String,
    /// Credits sold.
    pub credits: i64,
    /// Amount charged.
    pub amount: Decimal,
    /// Payment method.
    pub method: PaymentMethod,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn at_close() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 22, 0, 0).unwrap()
    }

    #[test]
    fn test_new_drawer_is_open() {
        let drawer = CashDrawer::new(day(), dec!(100.00), StaffId::new());
        assert!(!drawer.is_closed());
        assert!(drawer.variance.is_none());
    }

    #[test]
    fn test_close_records_variance() {
        let mut drawer = CashDrawer::new(day(), dec!(100.00), StaffId::new());
        drawer
            .close(dec!(118.00), dec!(115.50), Some("short".into()), at_close())
            .unwrap();

        assert!(drawer.is_closed());
        assert_eq!(drawer.closing_balance, Some(dec!(118.00)));
        assert_eq!(drawer.declared_balance, Some(dec!(115.50)));
        assert_eq!(drawer.variance, Some(dec!(-2.50)));
        assert_eq!(drawer.closing_notes.as_deref(), Some("short"));
    }

    #[test]
    fn test_nonzero_variance_is_accepted() {
        let mut drawer = CashDrawer::new(day(), dec!(50.00), StaffId::new());
        // Over by 10: recorded, not rejected.
        assert!(drawer.close(dec!(50.00), dec!(60.00), None, at_close()).is_ok());
        assert_eq!(drawer.variance, Some(dec!(10.00)));
    }

    #[test]
    fn test_close_twice_fails_and_keeps_first_result() {
        let mut drawer = CashDrawer::new(day(), dec!(100.00), StaffId::new());
        drawer.close(dec!(118.00), dec!(118.00), None, at_close()).unwrap();

        assert!(matches!(
            drawer.close(dec!(200.00), dec!(0.00), None, at_close()),
            Err(DrawerError::AlreadyClosed(_))
        ));
        assert_eq!(drawer.declared_balance, Some(dec!(118.00)));
        assert_eq!(drawer.variance, Some(dec!(0.00)));
    }

    #[test]
    fn test_close_rejects_negative_declared() {
        let mut drawer = CashDrawer::new(day(), dec!(100.00), StaffId::new());
        assert!(matches!(
            drawer.close(dec!(118.00), dec!(-1.00), None, at_close()),
            Err(DrawerError::InvalidDeclaredBalance(_))
        ));
        assert!(!drawer.is_closed());
    }
}
