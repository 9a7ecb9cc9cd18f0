//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `DrawerId` where a
//! `PurchaseId` is expected. Members are the exception: they are keyed by
//! their natural document number, not by a surrogate UUID.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(StaffId, "Unique identifier for a staff user.");
typed_id!(PurchaseId, "Unique identifier for a credit purchase.");
typed_id!(OccupancyId, "Unique identifier for an occupancy record.");
typed_id!(DrawerId, "Unique identifier for a daily cash drawer.");

/// Natural identifier for a member (their document number).
///
/// Members are owned by the profile collaborator; the core only ever reads
/// this key plus the membership-tier flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    /// Creates a member ID from a document number.
    #[must_use]
    pub fn new(document: impl Into<String>) -> Self {
        Self(document.into())
    }

    /// Returns the document number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MemberId {
    fn from(document: &str) -> Self {
        Self(document.to_string())
    }
}

impl From<String> for MemberId {
    fn from(document: String) -> Self {
        Self(document)
    }
}
