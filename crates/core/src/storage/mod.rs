//! Storage boundary traits.
//!
//! Persistence technology is a collaborator, specified only here. The
//! uniqueness constraints that back the admission and drawer invariants
//! must be enforced at this boundary (not just checked in the engines) so
//! that check-then-create races lose at the storage layer.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use clubhouse_shared::types::{DrawerId, MemberId, OccupancyId, PurchaseId};
use thiserror::Error;

use crate::drawer::CashDrawer;
use crate::member::MemberProfile;
use crate::occupancy::{OccupancyRecord, ResourceType};
use crate::purchase::CreditPurchase;

pub mod memory;

pub use memory::MemoryStore;

/// The uniqueness and transition guards storage must enforce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// At most one active occupancy record per member.
    MemberAlreadyActive,
    /// At most one active record per (lane-based resource, lane).
    LaneAlreadyActive,
    /// At most one drawer per calendar date.
    DrawerDateExists,
    /// The stored occupancy record already reached a conflicting terminal
    /// state; a stale close or void lost the race.
    OccupancyTerminal,
    /// The stored drawer is closed and immutable.
    DrawerClosed,
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::MemberAlreadyActive => "member_already_active",
            Self::LaneAlreadyActive => "lane_already_active",
            Self::DrawerDateExists => "drawer_date_exists",
            Self::OccupancyTerminal => "occupancy_terminal",
            Self::DrawerClosed => "drawer_closed",
        };
        write!(f, "{name}")
    }
}

/// Errors surfaced by the storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A uniqueness constraint rejected the write.
    #[error("Storage constraint violated: {0}")]
    Constraint(ConstraintKind),

    /// Connectivity or any other backend failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    /// Creates a backend error from any message.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

/// Read access to member profiles (owned by the profile collaborator).
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// Looks up a member by natural key.
    async fn member(&self, id: &MemberId) -> Result<Option<MemberProfile>, StorageError>;
}

/// Persistence for credit purchases.
#[async_trait]
pub trait PurchaseStore: Send + Sync {
    /// Persists a new purchase.
    async fn insert_purchase(&self, purchase: &CreditPurchase) -> Result<(), StorageError>;

    /// Loads one purchase.
    async fn purchase(&self, id: PurchaseId) -> Result<Option<CreditPurchase>, StorageError>;

    /// Replaces a stored purchase (void flag updates).
    async fn update_purchase(&self, purchase: &CreditPurchase) -> Result<(), StorageError>;

    /// All purchases of a member, newest first.
    async fn purchases_by_member(
        &self,
        member: &MemberId,
    ) -> Result<Vec<CreditPurchase>, StorageError>;

    /// Sum of credits over the member's non-voided purchases.
    async fn credits_purchased(&self, member: &MemberId) -> Result<i64, StorageError>;

    /// All purchases attached to a drawer, voided ones included.
    async fn sales_for_drawer(&self, drawer: DrawerId) -> Result<Vec<CreditPurchase>, StorageError>;
}

/// Persistence for occupancy records.
#[async_trait]
pub trait OccupancyStore: Send + Sync {
    /// Persists a new active record.
    ///
    /// # Errors
    ///
    /// Returns `Constraint(MemberAlreadyActive)` or
    /// `Constraint(LaneAlreadyActive)` when the insert would create a
    /// second active record for the member or lane. These constraints are
    /// the authoritative backstop for the admission race.
    async fn insert_occupancy(&self, record: &OccupancyRecord) -> Result<(), StorageError>;

    /// Loads one record.
    async fn occupancy(&self, id: OccupancyId) -> Result<Option<OccupancyRecord>, StorageError>;

    /// Replaces a stored record (checkout/void transitions).
    ///
    /// # Errors
    ///
    /// Returns `Constraint(OccupancyTerminal)` when the stored row already
    /// carries a conflicting terminal transition: a second close over a
    /// closed or voided row, or a void that would replace the stored
    /// checkout stamp. A stored checkout stamp is never overwritten; the
    /// loser of a sweeper-vs-manual race is rejected here.
    async fn update_occupancy(&self, record: &OccupancyRecord) -> Result<(), StorageError>;

    /// The member's active record, if any.
    async fn active_for_member(
        &self,
        member: &MemberId,
    ) -> Result<Option<OccupancyRecord>, StorageError>;

    /// The active record holding a lane, if any.
    async fn active_on_lane(
        &self,
        resource: ResourceType,
        lane: u8,
    ) -> Result<Option<OccupancyRecord>, StorageError>;

    /// All active records, oldest check-in first.
    async fn list_active(&self) -> Result<Vec<OccupancyRecord>, StorageError>;

    /// All records of a member, newest check-in first.
    async fn occupancies_by_member(
        &self,
        member: &MemberId,
    ) -> Result<Vec<OccupancyRecord>, StorageError>;

    /// Count of the member's non-voided records (credits consumed).
    async fn credits_consumed(&self, member: &MemberId) -> Result<i64, StorageError>;

    /// Active records checked in at or before the cutoff.
    async fn expired_active(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<OccupancyRecord>, StorageError>;
}

/// Persistence for daily cash drawers.
#[async_trait]
pub trait DrawerStore: Send + Sync {
    /// Persists a new drawer.
    ///
    /// # Errors
    ///
    /// Returns `Constraint(DrawerDateExists)` when a drawer already exists
    /// for the date; this, not the engine's existence check, is the
    /// authoritative guard.
    async fn insert_drawer(&self, drawer: &CashDrawer) -> Result<(), StorageError>;

    /// Loads the drawer for a date.
    async fn drawer_for_date(&self, date: NaiveDate) -> Result<Option<CashDrawer>, StorageError>;

    /// Replaces a stored drawer (close transition).
    ///
    /// # Errors
    ///
    /// Returns `Constraint(DrawerClosed)` when the stored drawer already
    /// has `closed_at` set; a closed drawer is immutable.
    async fn update_drawer(&self, drawer: &CashDrawer) -> Result<(), StorageError>;
}
