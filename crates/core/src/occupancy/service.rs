//! Occupancy engine.
//!
//! Check-in is the only credit-spending operation: admission re-derives
//! the balance, validates the lane request against the facility catalog,
//! and then leans on the storage constraints as the authoritative guard
//! against concurrent check-ins for the same member or lane.

use std::sync::Arc;

use chrono::Duration;
use clubhouse_shared::config::OccupancyPolicy;
use clubhouse_shared::types::{MemberId, OccupancyId, StaffId};
use tracing::{debug, info};

use super::alerts;
use super::error::OccupancyError;
use super::types::{ActiveOccupancy, OccupancyAlerts, OccupancyRecord, ResourceType};
use crate::audit::{self, AuditAction, AuditEntity, AuditEvent, AuditSink};
use crate::clock::Clock;
use crate::ledger::LedgerService;
use crate::storage::{ConstraintKind, MemberStore, OccupancyStore, StorageError};

/// Facility admission, checkout, void, and monitoring operations.
#[derive(Clone)]
pub struct OccupancyService {
    store: Arc<dyn OccupancyStore>,
    members: Arc<dyn MemberStore>,
    ledger: LedgerService,
    audit: Arc<dyn AuditSink>,
    clock: Arc<dyn Clock>,
    policy: OccupancyPolicy,
}

impl OccupancyService {
    /// Wires the engine to its collaborators.
    #[must_use]
    pub fn new(
        store: Arc<dyn OccupancyStore>,
        members: Arc<dyn MemberStore>,
        ledger: LedgerService,
        audit: Arc<dyn AuditSink>,
        clock: Arc<dyn Clock>,
        policy: OccupancyPolicy,
    ) -> Self {
        Self { store, members, ledger, audit, clock, policy }
    }

    /// Admits a member into a facility, spending one credit.
    ///
    /// Gate order: balance, one-active-per-member, facility/lane
    /// validation, lane availability. A member unknown to the profile
    /// collaborator has zero balance and fails the first gate.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientBalance`, `AlreadyActive`, `ResourceClosed`,
    /// `LaneRequired`/`LaneNotApplicable`/`LaneOutOfRange`, `LaneOccupied`,
    /// or `Storage`.
    pub async fn checkin(
        &self,
        member_id: MemberId,
        resource: ResourceType,
        lane: Option<u8>,
        recorded_by: StaffId,
    ) -> Result<OccupancyRecord, OccupancyError> {
        let summary = self.ledger.balance(&member_id).await.map_err(|err| match err {
            crate::ledger::LedgerError::Storage(e) => OccupancyError::Storage(e),
        })?;
        if summary.balance <= 0 {
            return Err(OccupancyError::InsufficientBalance {
                member_id,
                balance: summary.balance,
            });
        }

        if self.store.active_for_member(&member_id).await?.is_some() {
            return Err(OccupancyError::AlreadyActive(member_id));
        }

        let lane = validate_lane(resource, lane)?;

        if let Some(lane) = lane {
            if self.store.active_on_lane(resource, lane).await?.is_some() {
                return Err(OccupancyError::LaneOccupied { resource, lane });
            }
        }

        let record =
            OccupancyRecord::new(member_id, resource, lane, recorded_by, self.clock.now());

        // Storage constraints win the race over the checks above.
        self.store.insert_occupancy(&record).await.map_err(|err| match err {
            StorageError::Constraint(ConstraintKind::MemberAlreadyActive) => {
                OccupancyError::AlreadyActive(record.member_id.clone())
            }
            StorageError::Constraint(ConstraintKind::LaneAlreadyActive) => {
                OccupancyError::LaneOccupied {
                    resource,
                    lane: record.lane.unwrap_or_default(),
                }
            }
            other => OccupancyError::Storage(other),
        })?;

        info!(
            member = %record.member_id,
            resource = %record.resource,
            lane = ?record.lane,
            "member checked in"
        );
        audit::emit(
            self.audit.as_ref(),
            AuditEvent::new(AuditEntity::Occupancy, record.id, AuditAction::Checkin, record.checkin_at)
                .with_payload(audit::payload(&record))
                .with_actor(recorded_by),
        )
        .await;

        Ok(record)
    }

    /// Checks a member out of an active record.
    ///
    /// `auto` marks the checkout as performed by the sweeper rather than
    /// a human.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `AlreadyClosed`, `AlreadyVoided`, or `Storage`.
    pub async fn checkout(
        &self,
        id: OccupancyId,
        recorded_by: StaffId,
        auto: bool,
    ) -> Result<OccupancyRecord, OccupancyError> {
        let mut record = self
            .store
            .occupancy(id)
            .await?
            .ok_or(OccupancyError::NotFound(id))?;
        record.close(self.clock.now(), auto)?;
        self.store_transition(&record).await?;

        info!(
            member = %record.member_id,
            resource = %record.resource,
            auto,
            "member checked out"
        );
        audit::emit(
            self.audit.as_ref(),
            AuditEvent::new(AuditEntity::Occupancy, id, AuditAction::Checkout, self.clock.now())
                .with_payload(audit::payload(&record))
                .with_actor(recorded_by),
        )
        .await;

        Ok(record)
    }

    /// Voids a record, refunding its credit by removing it from the
    /// consumption count.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `AlreadyVoided`, or `Storage`.
    pub async fn void(
        &self,
        id: OccupancyId,
        reason: impl Into<String>,
        recorded_by: StaffId,
    ) -> Result<OccupancyRecord, OccupancyError> {
        let mut record = self
            .store
            .occupancy(id)
            .await?
            .ok_or(OccupancyError::NotFound(id))?;
        record.void(reason, self.clock.now())?;
        self.store_transition(&record).await?;

        info!(
            member = %record.member_id,
            reason = record.void_reason.as_deref().unwrap_or(""),
            "occupancy voided"
        );
        audit::emit(
            self.audit.as_ref(),
            AuditEvent::new(AuditEntity::Occupancy, id, AuditAction::Void, self.clock.now())
                .with_payload(audit::payload(&record))
                .with_actor(recorded_by),
        )
        .await;

        Ok(record)
    }

    /// All active records as staff-facing views, oldest check-in first.
    ///
    /// # Errors
    ///
    /// Returns `Storage` on store failure.
    pub async fn list_active(&self) -> Result<Vec<ActiveOccupancy>, OccupancyError> {
        let records = self.store.list_active().await?;
        self.views(records).await
    }

    /// Active views for one facility, oldest check-in first.
    ///
    /// # Errors
    ///
    /// Returns `Storage` on store failure.
    pub async fn list_active_for(
        &self,
        resource: ResourceType,
    ) -> Result<Vec<ActiveOccupancy>, OccupancyError> {
        let records = self
            .store
            .list_active()
            .await?
            .into_iter()
            .filter(|r| r.resource == resource)
            .collect();
        self.views(records).await
    }

    /// Active records bucketed by remaining time against the policy.
    ///
    /// # Errors
    ///
    /// Returns `Storage` on store failure.
    pub async fn list_alerts(&self) -> Result<OccupancyAlerts, OccupancyError> {
        let views = self.list_active().await?;
        Ok(alerts::partition(views, &self.policy))
    }

    /// Closes every record past the time limit, marking them automatic.
    ///
    /// Failures on individual records are logged and skipped so one bad
    /// row never starves the rest of the sweep. Records another actor
    /// closed or voided between the query and the write are benign.
    ///
    /// # Errors
    ///
    /// Returns `Storage` only when the expired-record query itself fails.
    pub async fn sweep_expired(
        &self,
        recorded_by: StaffId,
    ) -> Result<Vec<OccupancyRecord>, OccupancyError> {
        let cutoff = self.clock.now() - Duration::minutes(self.policy.time_limit_minutes);
        let expired = self.store.expired_active(cutoff).await?;

        let mut closed = Vec::new();
        for record in expired {
            match self.checkout(record.id, recorded_by, true).await {
                Ok(record) => closed.push(record),
                Err(OccupancyError::AlreadyClosed(_) | OccupancyError::AlreadyVoided(_)) => {
                    debug!(record = %record.id, "expired record already terminal, skipping");
                }
                Err(err) => {
                    tracing::warn!(record = %record.id, %err, "failed to auto-close record");
                }
            }
        }

        Ok(closed)
    }

    /// Writes a terminal transition, translating a storage rejection into
    /// the terminal state another actor won with.
    async fn store_transition(&self, record: &OccupancyRecord) -> Result<(), OccupancyError> {
        match self.store.update_occupancy(record).await {
            Ok(()) => Ok(()),
            Err(StorageError::Constraint(ConstraintKind::OccupancyTerminal)) => {
                let stored = self.store.occupancy(record.id).await?;
                Err(match stored {
                    Some(row) if row.voided => OccupancyError::AlreadyVoided(record.id),
                    _ => OccupancyError::AlreadyClosed(record.id),
                })
            }
            Err(other) => Err(OccupancyError::Storage(other)),
        }
    }

    async fn views(
        &self,
        records: Vec<OccupancyRecord>,
    ) -> Result<Vec<ActiveOccupancy>, OccupancyError> {
        let now = self.clock.now();
        let mut views = Vec::with_capacity(records.len());
        for record in records {
            let member_name = match self.members.member(&record.member_id).await? {
                Some(profile) => profile.display_name,
                None => record.member_id.to_string(),
            };
            let elapsed_minutes = (now - record.checkin_at).num_minutes();
            views.push(ActiveOccupancy {
                id: record.id,
                member_id: record.member_id,
                member_name,
                resource: record.resource,
                lane: record.lane,
                checkin_at: record.checkin_at,
                elapsed_minutes,
                remaining_minutes: self.policy.time_limit_minutes - elapsed_minutes,
            });
        }
        Ok(views)
    }
}

/// Validates a lane request against the facility catalog.
fn validate_lane(resource: ResourceType, lane: Option<u8>) -> Result<Option<u8>, OccupancyError> {
    if !resource.is_open() {
        return Err(OccupancyError::ResourceClosed(resource));
    }
    match (resource.lane_count(), lane) {
        (Some(_), None) => Err(OccupancyError::LaneRequired(resource)),
        (None, Some(_)) => Err(OccupancyError::LaneNotApplicable(resource)),
        (Some(count), Some(lane)) if lane == 0 || lane > count => {
            Err(OccupancyError::LaneOutOfRange { resource, lane })
        }
        (_, lane) => Ok(lane),
    }
}
