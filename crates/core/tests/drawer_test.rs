//! Daily drawer lifecycle and derived reconciliation totals.

mod common;

use chrono::{Duration, NaiveDate};
use clubhouse_core::audit::AuditAction;
use clubhouse_core::drawer::DrawerError;
use clubhouse_core::purchase::PaymentMethod;
use common::{context, context_with_failing_audit, start_instant};
use rust_decimal_macros::dec;

fn today() -> NaiveDate {
    start_instant().date_naive()
}

#[tokio::test]
async fn open_rejects_duplicates_and_negative_float() {
    let ctx = context();
    ctx.drawers.open(today(), dec!(100.00), ctx.staff).await.unwrap();

    let err = ctx.drawers.open(today(), dec!(50.00), ctx.staff).await.unwrap_err();
    assert!(matches!(err, DrawerError::AlreadyExists(_)));

    let err = ctx
        .drawers
        .open(today() + Duration::days(1), dec!(-1.00), ctx.staff)
        .await
        .unwrap_err();
    assert!(matches!(err, DrawerError::InvalidOpeningBalance(_)));
}

#[tokio::test]
async fn summary_derives_per_method_subtotals() {
    let ctx = context();
    let drawer = ctx.drawers.open(today(), dec!(100.00), ctx.staff).await.unwrap();

    let local = ctx.seed_member("10000001", "Ana Flores", true);
    let visitor = ctx.seed_member("10000002", "Ben Ortiz", false);
    ctx.sell(&local, 4, PaymentMethod::Cash, Some(drawer.id)).await; // 18.00
    ctx.clock.advance(Duration::minutes(30));
    ctx.sell(&visitor, 8, PaymentMethod::WalletA, Some(drawer.id)).await; // 52.00

    let summary = ctx.drawers.summarize(today()).await.unwrap();
    assert_eq!(summary.total_sales, dec!(70.00));
    assert_eq!(summary.cash_sales, dec!(18.00));
    assert_eq!(summary.wallet_a_sales, dec!(52.00));
    assert_eq!(summary.wallet_b_sales, dec!(0));
    assert_eq!(summary.bank_transfer_sales, dec!(0));
    assert_eq!(summary.expected_cash, dec!(118.00));

    // Newest first, formatted time, resolved names.
    assert_eq!(summary.transactions.len(), 2);
    assert_eq!(summary.transactions[0].member, "Ben Ortiz");
    assert_eq!(summary.transactions[0].time, "09:30");
    assert_eq!(summary.transactions[1].member, "Ana Flores");
    assert_eq!(summary.transactions[1].credits, 4);
}

#[tokio::test]
async fn voided_sales_drop_out_of_the_summary() {
    let ctx = context();
    let drawer = ctx.drawers.open(today(), dec!(100.00), ctx.staff).await.unwrap();
    let member = ctx.seed_member("10000001", "Ana Flores", true);

    let kept = ctx.sell(&member, 4, PaymentMethod::Cash, Some(drawer.id)).await;
    let voided = ctx.sell(&member, 1, PaymentMethod::Cash, Some(drawer.id)).await;
    ctx.purchases.void(voided.id, "mischarge", ctx.staff).await.unwrap();

    let summary = ctx.drawers.summarize(today()).await.unwrap();
    assert_eq!(summary.cash_sales, kept.price_paid);
    assert_eq!(summary.expected_cash, dec!(118.00));
    assert_eq!(summary.transactions.len(), 1);
}

#[tokio::test]
async fn unattached_sales_never_reach_the_drawer() {
    let ctx = context();
    ctx.drawers.open(today(), dec!(100.00), ctx.staff).await.unwrap();
    let member = ctx.seed_member("10000001", "Ana Flores", true);

    ctx.sell(&member, 12, PaymentMethod::Cash, None).await;

    let summary = ctx.drawers.summarize(today()).await.unwrap();
    assert_eq!(summary.total_sales, dec!(0));
    assert_eq!(summary.expected_cash, dec!(100.00));
}

#[tokio::test]
async fn close_freezes_variance_against_recomputed_expected() {
    let ctx = context();
    let drawer = ctx.drawers.open(today(), dec!(100.00), ctx.staff).await.unwrap();
    let member = ctx.seed_member("10000001", "Ana Flores", true);
    ctx.sell(&member, 4, PaymentMethod::Cash, Some(drawer.id)).await;

    let closed = ctx
        .drawers
        .close(today(), dec!(115.50), Some("till was short".into()), ctx.staff)
        .await
        .unwrap();
    assert_eq!(closed.closing_balance, Some(dec!(118.00)));
    assert_eq!(closed.declared_balance, Some(dec!(115.50)));
    assert_eq!(closed.variance, Some(dec!(-2.50)));
    assert!(closed.is_closed());

    let err = ctx.drawers.close(today(), dec!(118.00), None, ctx.staff).await.unwrap_err();
    assert!(matches!(err, DrawerError::AlreadyClosed(_)));
}

#[tokio::test]
async fn close_rejects_negative_declared_balance() {
    let ctx = context();
    ctx.drawers.open(today(), dec!(100.00), ctx.staff).await.unwrap();

    let err = ctx.drawers.close(today(), dec!(-0.01), None, ctx.staff).await.unwrap_err();
    assert!(matches!(err, DrawerError::InvalidDeclaredBalance(_)));

    // Still open after the rejected close.
    assert!(!ctx.drawers.today().await.unwrap().is_closed());
}

#[tokio::test]
async fn close_accounts_for_sales_rung_up_moments_before() {
    let ctx = context();
    let drawer = ctx.drawers.open(today(), dec!(100.00), ctx.staff).await.unwrap();
    let member = ctx.seed_member("10000001", "Ana Flores", true);

    ctx.sell(&member, 1, PaymentMethod::Cash, Some(drawer.id)).await; // 5.00
    ctx.clock.advance(Duration::hours(12));
    ctx.sell(&member, 1, PaymentMethod::Cash, Some(drawer.id)).await; // 5.00

    // Expected is recomputed at close time, not cached from the summary.
    let closed = ctx.drawers.close(today(), dec!(110.00), None, ctx.staff).await.unwrap();
    assert_eq!(closed.closing_balance, Some(dec!(110.00)));
    assert_eq!(closed.variance, Some(dec!(0.00)));
}

#[tokio::test]
async fn today_and_current_track_the_clock_and_close_state() {
    let ctx = context();

    let err = ctx.drawers.today().await.unwrap_err();
    assert!(matches!(err, DrawerError::NotFound(_)));

    let drawer = ctx.drawers.open(today(), dec!(100.00), ctx.staff).await.unwrap();
    assert_eq!(ctx.drawers.current().await.unwrap().id, drawer.id);

    ctx.drawers.close(today(), dec!(100.00), None, ctx.staff).await.unwrap();
    assert!(ctx.drawers.today().await.unwrap().is_closed());
    let err = ctx.drawers.current().await.unwrap_err();
    assert!(matches!(err, DrawerError::AlreadyClosed(_)));

    // The next day has its own drawer.
    ctx.clock.advance(Duration::days(1));
    let err = ctx.drawers.today().await.unwrap_err();
    assert!(matches!(err, DrawerError::NotFound(_)));
}

#[tokio::test]
async fn open_and_close_emit_audit_events() {
    let ctx = context();
    let drawer = ctx.drawers.open(today(), dec!(100.00), ctx.staff).await.unwrap();
    ctx.drawers.close(today(), dec!(100.00), None, ctx.staff).await.unwrap();

    let events = ctx.audit.events();
    assert!(events
        .iter()
        .any(|e| e.action == AuditAction::Open && e.entity_id == drawer.id.to_string()));
    assert!(events
        .iter()
        .any(|e| e.action == AuditAction::Close && e.entity_id == drawer.id.to_string()));
}

#[tokio::test]
async fn failing_audit_sink_never_rolls_back_the_mutation() {
    let ctx = context_with_failing_audit();
    let member = ctx.seed_member("10000001", "Ana Flores", true);

    ctx.drawers.open(today(), dec!(100.00), ctx.staff).await.unwrap();
    ctx.sell(&member, 4, PaymentMethod::Cash, None).await;

    // Both mutations committed despite every audit emission failing.
    assert!(!ctx.drawers.today().await.unwrap().is_closed());
    assert_eq!(ctx.ledger.balance(&member).await.unwrap().balance, 4);
}
