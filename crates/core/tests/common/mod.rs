//! Shared test fixtures: in-memory stores, a frozen clock, and a
//! recording audit sink wired into every engine.

// Each integration test binary uses a different slice of these helpers.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use clubhouse_core::audit::{AuditError, AuditEvent, AuditSink};
use clubhouse_core::clock::FixedClock;
use clubhouse_core::drawer::DrawerService;
use clubhouse_core::ledger::LedgerService;
use clubhouse_core::member::MemberProfile;
use clubhouse_core::occupancy::{OccupancyRecord, OccupancyService, ResourceType};
use clubhouse_core::purchase::{CreditPurchase, PaymentMethod, PurchaseService};
use clubhouse_core::storage::MemoryStore;
use clubhouse_shared::config::OccupancyPolicy;
use clubhouse_shared::types::{DrawerId, MemberId, StaffId};

/// Audit sink that remembers every event it receives.
#[derive(Debug, Default)]
pub struct RecordingAuditSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl RecordingAuditSink {
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditSink for RecordingAuditSink {
    async fn record(&self, event: AuditEvent) -> Result<(), AuditError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

/// Audit sink that always fails, for verifying best-effort emission.
#[derive(Debug, Default)]
pub struct FailingAuditSink;

#[async_trait]
impl AuditSink for FailingAuditSink {
    async fn record(&self, _event: AuditEvent) -> Result<(), AuditError> {
        Err(AuditError::Unavailable("sink offline".into()))
    }
}

/// Every engine wired over one in-memory store and one frozen clock.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub clock: Arc<FixedClock>,
    pub audit: Arc<RecordingAuditSink>,
    pub ledger: LedgerService,
    pub occupancy: OccupancyService,
    pub purchases: PurchaseService,
    pub drawers: DrawerService,
    pub staff: StaffId,
}

pub fn start_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
}

/// Context with a recording sink (inspect via `ctx.audit.events()`).
pub fn context() -> TestContext {
    let audit = Arc::new(RecordingAuditSink::default());
    build(audit.clone(), audit)
}

/// Context whose engines emit into a sink that always fails; the
/// recording sink on the context stays empty.
pub fn context_with_failing_audit() -> TestContext {
    build(Arc::new(FailingAuditSink), Arc::new(RecordingAuditSink::default()))
}

fn build(sink: Arc<dyn AuditSink>, audit: Arc<RecordingAuditSink>) -> TestContext {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(FixedClock::new(start_instant()));

    let ledger = LedgerService::new(store.clone(), store.clone());
    let occupancy = OccupancyService::new(
        store.clone(),
        store.clone(),
        ledger.clone(),
        sink.clone(),
        clock.clone(),
        OccupancyPolicy::default(),
    );
    let purchases = PurchaseService::new(store.clone(), store.clone(), sink.clone(), clock.clone());
    let drawers = DrawerService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        sink,
        clock.clone(),
    );

    TestContext {
        store,
        clock,
        audit,
        ledger,
        occupancy,
        purchases,
        drawers,
        staff: StaffId::new(),
    }
}

impl TestContext {
    /// Seeds a member profile.
    pub fn seed_member(&self, id: &str, name: &str, is_local_tier: bool) -> MemberId {
        let member = MemberId::new(id);
        self.store
            .upsert_member(MemberProfile::new(member.clone(), name, is_local_tier));
        member
    }

    /// Seeds a member and sells them a package so they can check in.
    pub async fn seed_member_with_credits(&self, id: &str, credits: i64) -> MemberId {
        let member = self.seed_member(id, &format!("Member {id}"), true);
        self.purchases
            .record_sale(member.clone(), credits, PaymentMethod::Cash, None, self.staff, None)
            .await
            .expect("seed sale");
        member
    }

    /// Checks a member into the gym (no lane bookkeeping needed).
    pub async fn checkin_gym(&self, member: &MemberId) -> OccupancyRecord {
        self.occupancy
            .checkin(member.clone(), ResourceType::Gym, None, self.staff)
            .await
            .expect("checkin")
    }

    /// Sells a package, attaching it to a drawer when given.
    pub async fn sell(
        &self,
        member: &MemberId,
        credits: i64,
        method: PaymentMethod,
        drawer: Option<DrawerId>,
    ) -> CreditPurchase {
        self.purchases
            .record_sale(member.clone(), credits, method, None, self.staff, drawer)
            .await
            .expect("sale")
    }
}
