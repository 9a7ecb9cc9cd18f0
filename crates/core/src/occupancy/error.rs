//! Occupancy error types for admission and state-machine violations.

use clubhouse_shared::types::{MemberId, OccupancyId};
use clubhouse_shared::ErrorKind;
use thiserror::Error;

use super::types::ResourceType;
use crate::storage::StorageError;

/// Errors that can occur during occupancy operations.
#[derive(Debug, Error)]
pub enum OccupancyError {
    // ========== Admission Errors ==========
    /// Member's derived balance does not cover one credit.
    #[error("Member {member_id} has insufficient balance ({balance})")]
    InsufficientBalance {
        /// The member who attempted check-in.
        member_id: MemberId,
        /// Their derived balance at the instant of the check.
        balance: i64,
    },

    /// Member already holds an active occupancy record.
    #[error("Member {0} already has an active occupancy")]
    AlreadyActive(MemberId),

    /// The requested lane is held by another active record.
    #[error("Lane {lane} of {resource} is occupied")]
    LaneOccupied {
        /// The lane-based facility.
        resource: ResourceType,
        /// The contested lane.
        lane: u8,
    },

    /// The facility is not open to members.
    #[error("{} is closed", .0.display_name())]
    ResourceClosed(ResourceType),

    // ========== Input Errors ==========
    /// A lane-based facility requires a lane number.
    #[error("{} requires a lane number", .0.display_name())]
    LaneRequired(ResourceType),

    /// A lane number was given for a facility without lanes.
    #[error("{} has no lanes", .0.display_name())]
    LaneNotApplicable(ResourceType),

    /// The lane number is outside the facility's range.
    #[error("Lane {lane} does not exist at {}", resource.display_name())]
    LaneOutOfRange {
        /// The lane-based facility.
        resource: ResourceType,
        /// The out-of-range lane.
        lane: u8,
    },

    // ========== State Errors ==========
    /// Occupancy record not found.
    #[error("Occupancy record not found: {0}")]
    NotFound(OccupancyId),

    /// Record already has a checkout stamped.
    #[error("Occupancy record {0} is already closed")]
    AlreadyClosed(OccupancyId),

    /// Record is voided.
    #[error("Occupancy record {0} is voided")]
    AlreadyVoided(OccupancyId),

    // ========== Storage Errors ==========
    /// Storage layer failure; never retried inside the core.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl OccupancyError {
    /// Classifies this error for the request layer.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            Self::AlreadyActive(_)
            | Self::LaneOccupied { .. }
            | Self::ResourceClosed(_)
            | Self::AlreadyClosed(_)
            | Self::AlreadyVoided(_) => ErrorKind::Conflict,
            Self::LaneRequired(_) | Self::LaneNotApplicable(_) | Self::LaneOutOfRange { .. } => {
                ErrorKind::InvalidInput
            }
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::AlreadyActive(_) => "ALREADY_ACTIVE",
            Self::LaneOccupied { .. } => "LANE_OCCUPIED",
            Self::ResourceClosed(_) => "RESOURCE_CLOSED",
            Self::LaneRequired(_) => "LANE_REQUIRED",
            Self::LaneNotApplicable(_) => "LANE_NOT_APPLICABLE",
            Self::LaneOutOfRange { .. } => "LANE_OUT_OF_RANGE",
            Self::NotFound(_) => "OCCUPANCY_NOT_FOUND",
            Self::AlreadyClosed(_) => "ALREADY_CLOSED",
            Self::AlreadyVoided(_) => "ALREADY_VOIDED",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        self.kind().status_code()
    }
}
