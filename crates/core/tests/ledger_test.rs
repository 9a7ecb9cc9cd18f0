//! Derived balance behavior across purchase and occupancy histories.

mod common;

use clubhouse_shared::types::MemberId;
use common::context;

#[tokio::test]
async fn unknown_member_reads_as_zero() {
    let ctx = context();
    let summary = ctx.ledger.balance(&MemberId::new("99999999")).await.unwrap();

    assert_eq!(summary.balance, 0);
    assert_eq!(summary.credits_purchased, 0);
    assert_eq!(summary.credits_consumed, 0);
    assert!(!ctx
        .ledger
        .has_sufficient_balance(&MemberId::new("99999999"), 1)
        .await
        .unwrap());
}

#[tokio::test]
async fn balance_tracks_purchases_and_checkins() {
    let ctx = context();
    let member = ctx.seed_member_with_credits("10000001", 4).await;

    let summary = ctx.ledger.balance(&member).await.unwrap();
    assert_eq!(summary.balance, 4);
    assert_eq!(summary.credits_purchased, 4);

    // Checkout does not refund the credit; only the check-in spends it.
    let record = ctx.checkin_gym(&member).await;
    assert_eq!(ctx.ledger.balance(&member).await.unwrap().balance, 3);

    ctx.occupancy.checkout(record.id, ctx.staff, false).await.unwrap();
    let summary = ctx.ledger.balance(&member).await.unwrap();
    assert_eq!(summary.balance, 3);
    assert_eq!(summary.credits_consumed, 1);
}

#[tokio::test]
async fn voided_occupancy_refunds_the_credit() {
    let ctx = context();
    let member = ctx.seed_member_with_credits("10000001", 1).await;

    let record = ctx.checkin_gym(&member).await;
    assert_eq!(ctx.ledger.balance(&member).await.unwrap().balance, 0);

    ctx.occupancy.void(record.id, "wrong member", ctx.staff).await.unwrap();
    assert_eq!(ctx.ledger.balance(&member).await.unwrap().balance, 1);
}

#[tokio::test]
async fn voided_purchase_can_drive_balance_negative() {
    let ctx = context();
    let member = ctx.seed_member_with_credits("10000001", 1).await;

    let record = ctx.checkin_gym(&member).await;
    ctx.occupancy.checkout(record.id, ctx.staff, false).await.unwrap();

    let purchase = ctx.ledger.history(&member).await.unwrap().purchases[0].clone();
    ctx.purchases.void(purchase.id, "chargeback", ctx.staff).await.unwrap();

    let summary = ctx.ledger.balance(&member).await.unwrap();
    assert_eq!(summary.credits_purchased, 0);
    assert_eq!(summary.credits_consumed, 1);
    assert_eq!(summary.balance, -1);
}

#[tokio::test]
async fn history_lists_both_sides_newest_first() {
    let ctx = context();
    let member = ctx.seed_member_with_credits("10000001", 4).await;

    ctx.clock.advance(chrono::Duration::minutes(10));
    ctx.sell(&member, 1, clubhouse_core::purchase::PaymentMethod::Cash, None).await;

    ctx.clock.advance(chrono::Duration::minutes(10));
    let first = ctx.checkin_gym(&member).await;
    ctx.occupancy.checkout(first.id, ctx.staff, false).await.unwrap();
    ctx.clock.advance(chrono::Duration::minutes(10));
    let second = ctx.checkin_gym(&member).await;

    let history = ctx.ledger.history(&member).await.unwrap();
    assert_eq!(history.summary.balance, 5 - 2);
    assert_eq!(history.purchases.len(), 2);
    assert!(history.purchases[0].created_at > history.purchases[1].created_at);
    assert_eq!(history.occupancies.len(), 2);
    assert_eq!(history.occupancies[0].id, second.id);
    assert_eq!(history.occupancies[1].id, first.id);
}
