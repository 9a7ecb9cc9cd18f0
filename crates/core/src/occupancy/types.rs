//! Occupancy domain types and the record state machine.
//!
//! A record is `Active` (no checkout, not voided) until exactly one of two
//! terminal transitions fires: `Closed` (checkout stamped) or `Voided`.
//! Voiding an open record also stamps the checkout so every voided record
//! has a terminal timestamp.

use chrono::{DateTime, Utc};
use clubhouse_shared::types::{MemberId, OccupancyId, StaffId};
use serde::{Deserialize, Serialize};

use super::error::OccupancyError;

/// The shared facilities a member can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    /// 25-meter adult pool, lane-based.
    PoolAdult,
    /// Kids pool, lane-based.
    PoolKids,
    /// Paddle court.
    PaddleCourt,
    /// Gym floor.
    Gym,
    /// Grill area (not yet open to members).
    GrillArea,
}

impl ResourceType {
    /// Staff-facing facility name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::PoolAdult => "Adult Pool",
            Self::PoolKids => "Kids Pool",
            Self::PaddleCourt => "Paddle Court",
            Self::Gym => "Gym",
            Self::GrillArea => "Grill Area",
        }
    }

    /// Number of lanes, for lane-based facilities.
    #[must_use]
    pub const fn lane_count(self) -> Option<u8> {
        match self {
            Self::PoolAdult => Some(8),
            Self::PoolKids => Some(5),
            Self::PaddleCourt | Self::Gym | Self::GrillArea => None,
        }
    }

    /// Whether check-in must name a lane.
    #[must_use]
    pub const fn requires_lane(self) -> bool {
        self.lane_count().is_some()
    }

    /// Whether the facility is currently open to members.
    #[must_use]
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::GrillArea)
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::PoolAdult => "POOL_ADULT",
            Self::PoolKids => "POOL_KIDS",
            Self::PaddleCourt => "PADDLE_COURT",
            Self::Gym => "GYM",
            Self::GrillArea => "GRILL_AREA",
        };
        write!(f, "{name}")
    }
}

/// One member's use of one facility from check-in to check-out.
///
/// Records are never deleted; a checked-in record "spends" one credit by
/// existing as a non-voided row in the consumption count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyRecord {
    /// Record identifier.
    pub id: OccupancyId,
    /// The occupying member.
    pub member_id: MemberId,
    /// The occupied facility.
    pub resource: ResourceType,
    /// Lane number, for lane-based facilities.
    pub lane: Option<u8>,
    /// Check-in instant.
    pub checkin_at: DateTime<Utc>,
    /// Check-out instant; `None` while the member is still inside.
    pub checkout_at: Option<DateTime<Utc>>,
    /// True when the sweeper, not a human, closed the record.
    pub auto_checkout: bool,
    /// One-way void flag.
    pub voided: bool,
    /// Reason supplied when voiding.
    pub void_reason: Option<String>,
    /// Staff member who recorded the check-in.
    pub recorded_by: StaffId,
}

impl OccupancyRecord {
    /// Creates a new active record at the given instant.
    #[must_use]
    pub fn new(
        member_id: MemberId,
        resource: ResourceType,
        lane: Option<u8>,
        recorded_by: StaffId,
        checkin_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: OccupancyId::new(),
            member_id,
            resource,
            lane,
            checkin_at,
            checkout_at: None,
            auto_checkout: false,
            voided: false,
            void_reason: None,
            recorded_by,
        }
    }

    /// True while the record has no checkout and is not voided.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.checkout_at.is_none() && !self.voided
    }

    /// Transitions `Active -> Closed`.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyVoided` or `AlreadyClosed` for terminal records.
    pub fn close(&mut self, at: DateTime<Utc>, auto: bool) -> Result<(), OccupancyError> {
        if self.voided {
            return Err(OccupancyError::AlreadyVoided(self.id));
        }
        if self.checkout_at.is_some() {
            return Err(OccupancyError::AlreadyClosed(self.id));
        }
        self.checkout_at = Some(at);
        self.auto_checkout = auto;
        Ok(())
    }

    /// Transitions `Active | Closed -> Voided`, stamping the checkout if
    /// the record was still open.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyVoided` if the record was voided before.
    pub fn void(&mut self, reason: impl Into<String>, at: DateTime<Utc>) -> Result<(), OccupancyError> {
        if self.voided {
            return Err(OccupancyError::AlreadyVoided(self.id));
        }
        self.voided = true;
        self.void_reason = Some(reason.into());
        if self.checkout_at.is_none() {
            self.checkout_at = Some(at);
        }
        Ok(())
    }
}

/// Staff-facing view of one active record with elapsed/remaining time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveOccupancy {
    /// Record identifier.
    pub id: OccupancyId,
    /// The occupying member.
    pub member_id: MemberId,
    /// Member display name, or the document number when the profile
    /// collaborator no longer knows the member.
    pub member_name: String,
    /// The occupied facility.
    pub resource: ResourceType,
    /// Lane number, for lane-based facilities.
    pub lane: Option<u8>,
    /// Check-in instant.
    pub checkin_at: DateTime<Utc>,
    /// Whole minutes since check-in.
    pub elapsed_minutes: i64,
    /// Whole minutes until the time limit; negative once expired.
    pub remaining_minutes: i64,
}

/// Active records partitioned by urgency.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OccupancyAlerts {
    /// Nearly out of time: `0 < remaining <= critical threshold`.
    pub critical: Vec<ActiveOccupancy>,
    /// Running low: `critical < remaining <= warning threshold`.
    pub warning: Vec<ActiveOccupancy>,
    /// Past the limit: `remaining <= 0`.
    pub expired: Vec<ActiveOccupancy>,
    /// Count across all three buckets.
    pub total: usize,
}
