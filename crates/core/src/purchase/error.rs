//! Purchase error types.

use clubhouse_shared::types::{MemberId, PurchaseId};
use clubhouse_shared::ErrorKind;
use thiserror::Error;

use crate::pricing::InvalidPackageSize;
use crate::storage::StorageError;

/// Errors that can occur during purchase operations.
#[derive(Debug, Error)]
pub enum PurchaseError {
    /// The buying member is unknown to the profile collaborator.
    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    /// The requested credit amount is not an enumerated package.
    #[error(transparent)]
    InvalidPackageSize(#[from] InvalidPackageSize),

    /// Purchase not found.
    #[error("Purchase not found: {0}")]
    NotFound(PurchaseId),

    /// Purchase is already voided.
    #[error("Purchase {0} is already voided")]
    AlreadyVoided(PurchaseId),

    /// Storage layer failure; never retried inside the core.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl PurchaseError {
    /// Classifies this error for the request layer.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MemberNotFound(_) | Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidPackageSize(_) => ErrorKind::InvalidInput,
            Self::AlreadyVoided(_) => ErrorKind::Conflict,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MemberNotFound(_) => "MEMBER_NOT_FOUND",
            Self::InvalidPackageSize(_) => "INVALID_PACKAGE_SIZE",
            Self::NotFound(_) => "PURCHASE_NOT_FOUND",
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_and_status() {
        assert_eq!(
            PurchaseError::MemberNotFound(MemberId::new("1")).http_status_code(),
            404
        );
        assert_eq!(
            PurchaseError::from(InvalidPackageSize(7)).error_code(),
            "INVALID_PACKAGE_SIZE"
        );
        assert_eq!(PurchaseError::from(InvalidPackageSize(7)).http_status_code(), 400);
        assert_eq!(
            PurchaseError::AlreadyVoided(PurchaseId::new()).http_status_code(),
            409
        );
    }
}
