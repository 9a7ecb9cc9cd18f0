//! Read-only member view.
//!
//! Member profiles are owned by the profile collaborator; the core only
//! reads the natural key, a display name for staff-facing listings, and
//! the membership-tier flag used by pricing.

use clubhouse_shared::types::MemberId;
use serde::{Deserialize, Serialize};

/// The slice of a member profile the core needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    /// Natural member key (document number).
    pub id: MemberId,
    /// Display name for staff-facing views.
    pub display_name: String,
    /// Whether the member qualifies for the local-resident tariff.
    pub is_local_tier: bool,
}

impl MemberProfile {
    /// Creates a member profile view.
    #[must_use]
    pub fn new(id: MemberId, display_name: impl Into<String>, is_local_tier: bool) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            is_local_tier,
        }
    }
}
