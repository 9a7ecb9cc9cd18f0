//! In-memory reference adapter.
//!
//! Single-process storage backed by a `RwLock`. Uniqueness constraints are
//! checked and the write performed under one write-lock acquisition, which
//! gives the same serialization guarantee a database unique index would.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use clubhouse_shared::types::{DrawerId, MemberId, OccupancyId, PurchaseId};

use super::{
    ConstraintKind, DrawerStore, MemberStore, OccupancyStore, PurchaseStore, StorageError,
};
use crate::drawer::CashDrawer;
use crate::member::MemberProfile;
use crate::occupancy::{OccupancyRecord, ResourceType};
use crate::purchase::CreditPurchase;

#[derive(Debug, Default)]
struct MemoryState {
    members: HashMap<MemberId, MemberProfile>,
    purchases: HashMap<PurchaseId, CreditPurchase>,
    occupancies: HashMap<OccupancyId, OccupancyRecord>,
    drawers: HashMap<NaiveDate, CashDrawer>,
}

/// In-memory implementation of every store trait.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a member profile. Test seeding helper.
    pub fn upsert_member(&self, profile: MemberProfile) {
        let mut state = self.state.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        state.members.insert(profile.id.clone(), profile);
    }
}

#[async_trait]
impl MemberStore for MemoryStore {
    async fn member(&self, id: &MemberId) -> Result<Option<MemberProfile>, StorageError> {
        let state = self.state.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(state.members.get(id).cloned())
    }
}

#[async_trait]
impl PurchaseStore for MemoryStore {
    async fn insert_purchase(&self, purchase: &CreditPurchase) -> Result<(), StorageError> {
        let mut state = self.state.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        state.purchases.insert(purchase.id, purchase.clone());
        Ok(())
    }

    async fn purchase(&self, id: PurchaseId) -> Result<Option<CreditPurchase>, StorageError> {
        let state = self.state.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(state.purchases.get(&id).cloned())
    }

    async fn update_purchase(&self, purchase: &CreditPurchase) -> Result<(), StorageError> {
        let mut state = self.state.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        state.purchases.insert(purchase.id, purchase.clone());
        Ok(())
    }

    async fn purchases_by_member(
        &self,
        member: &MemberId,
    ) -> Result<Vec<CreditPurchase>, StorageError> {
        let state = self.state.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut rows: Vec<CreditPurchase> = state
            .purchases
            .values()
            .filter(|p| &p.member_id == member)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn credits_purchased(&self, member: &MemberId) -> Result<i64, StorageError> {
        let state = self.state.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(state
            .purchases
            .values()
            .filter(|p| &p.member_id == member && !p.voided)
            .map(|p| p.credits.credits())
            .sum())
    }

    async fn sales_for_drawer(
        &self,
        drawer: DrawerId,
    ) -> Result<Vec<CreditPurchase>, StorageError> {
        let state = self.state.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut rows: Vec<CreditPurchase> = state
            .purchases
            .values()
            .filter(|p| p.drawer_id == Some(drawer))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

#[async_trait]
impl OccupancyStore for MemoryStore {
    async fn insert_occupancy(&self, record: &OccupancyRecord) -> Result<(), StorageError> {
        let mut state = self.state.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        // Constraint checks and insert under the same lock.
        if state
            .occupancies
            .values()
            .any(|r| r.member_id == record.member_id && r.is_active())
        {
            return Err(StorageError::Constraint(ConstraintKind::MemberAlreadyActive));
        }
        if let Some(lane) = record.lane {
            if state
                .occupancies
                .values()
                .any(|r| r.resource == record.resource && r.lane == Some(lane) && r.is_active())
            {
                return Err(StorageError::Constraint(ConstraintKind::LaneAlreadyActive));
            }
        }
        state.occupancies.insert(record.id, record.clone());
        Ok(())
    }

    async fn occupancy(&self, id: OccupancyId) -> Result<Option<OccupancyRecord>, StorageError> {
        let state = self.state.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(state.occupancies.get(&id).cloned())
    }

    async fn update_occupancy(&self, record: &OccupancyRecord) -> Result<(), StorageError> {
        let mut state = self.state.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        // Compare-and-set against the stored row: a terminal transition is
        // accepted once, and a void over a closed row must keep the stored
        // checkout stamp. Stale copies lose here.
        if let Some(stored) = state.occupancies.get(&record.id) {
            let conflicting = stored.voided
                || (stored.checkout_at.is_some()
                    && (!record.voided || record.checkout_at != stored.checkout_at));
            if conflicting {
                return Err(StorageError::Constraint(ConstraintKind::OccupancyTerminal));
            }
        }
        state.occupancies.insert(record.id, record.clone());
        Ok(())
    }

    async fn active_for_member(
        &self,
        member: &MemberId,
    ) -> Result<Option<OccupancyRecord>, StorageError> {
        let state = self.state.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(state
            .occupancies
            .values()
            .find(|r| &r.member_id == member && r.is_active())
            .cloned())
    }

    async fn active_on_lane(
        &self,
        resource: ResourceType,
        lane: u8,
    ) -> Result<Option<OccupancyRecord>, StorageError> {
        let state = self.state.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(state
            .occupancies
            .values()
            .find(|r| r.resource == resource && r.lane == Some(lane) && r.is_active())
            .cloned())
    }

    async fn list_active(&self) -> Result<Vec<OccupancyRecord>, StorageError> {
        let state = self.state.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut rows: Vec<OccupancyRecord> = state
            .occupancies
            .values()
            .filter(|r| r.is_active())
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.checkin_at.cmp(&b.checkin_at));
        Ok(rows)
    }

    async fn occupancies_by_member(
        &self,
        member: &MemberId,
    ) -> Result<Vec<OccupancyRecord>, StorageError> {
        let state = self.state.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut rows: Vec<OccupancyRecord> = state
            .occupancies
            .values()
            .filter(|r| &r.member_id == member)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.checkin_at.cmp(&a.checkin_at));
        Ok(rows)
    }

    async fn credits_consumed(&self, member: &MemberId) -> Result<i64, StorageError> {
        let state = self.state.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        let count = state
            .occupancies
            .values()
            .filter(|r| &r.member_id == member && !r.voided)
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn expired_active(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<OccupancyRecord>, StorageError> {
        let state = self.state.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut rows: Vec<OccupancyRecord> = state
            .occupancies
            .values()
            .filter(|r| r.is_active() && r.checkin_at <= cutoff)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.checkin_at.cmp(&b.checkin_at));
        Ok(rows)
    }
}

#[async_trait]
impl DrawerStore for MemoryStore {
    async fn insert_drawer(&self, drawer: &CashDrawer) -> Result<(), StorageError> {
        let mut state = self.state.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        if state.drawers.contains_key(&drawer.date) {
            return Err(StorageError::Constraint(ConstraintKind::DrawerDateExists));
        }
        state.drawers.insert(drawer.date, drawer.clone());
        Ok(())
    }

    async fn drawer_for_date(&self, date: NaiveDate) -> Result<Option<CashDrawer>, StorageError> {
        let state = self.state.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(state.drawers.get(&date).cloned())
    }

    async fn update_drawer(&self, drawer: &CashDrawer) -> Result<(), StorageError> {
        let mut state = self.state.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        if state.drawers.get(&drawer.date).is_some_and(CashDrawer::is_closed) {
            return Err(StorageError::Constraint(ConstraintKind::DrawerClosed));
        }
        state.drawers.insert(drawer.date, drawer.clone());
        Ok(())
    }
}
