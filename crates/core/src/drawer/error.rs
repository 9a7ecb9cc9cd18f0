//! Cash drawer error types.

use chrono::NaiveDate;
use clubhouse_shared::ErrorKind;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during drawer operations.
#[derive(Debug, Error)]
pub enum DrawerError {
    /// A drawer already exists for the date.
    #[error("A drawer already exists for {0}")]
    AlreadyExists(NaiveDate),

    /// No drawer exists for the date.
    #[error("No drawer found for {0}")]
    NotFound(NaiveDate),

    /// The drawer for the date is already closed.
    #[error("Drawer for {0} is already closed")]
    AlreadyClosed(NaiveDate),

    /// Opening balance must be non-negative.
    #[error("Invalid opening balance: {0}")]
    InvalidOpeningBalance(Decimal),

    /// Declared balance must be non-negative.
    #[error("Invalid declared balance: {0}")]
    InvalidDeclaredBalance(Decimal),

    /// Storage layer failure; never retried inside the core.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl DrawerError {
    /// Classifies this error for the request layer.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::AlreadyExists(_) | Self::AlreadyClosed(_) => ErrorKind::Conflict,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidOpeningBalance(_) | Self::InvalidDeclaredBalance(_) => {
                ErrorKind::InvalidInput
            }
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyExists(_) => "DRAWER_ALREADY_EXISTS",
            Self::NotFound(_) => "DRAWER_NOT_FOUND",
            Self::AlreadyClosed(_) => "DRAWER_ALREADY_CLOSED",
            Self::InvalidOpeningBalance(_) => "INVALID_OPENING_BALANCE",
            Self::InvalidDeclaredBalance(_) => "INVALID_DECLARED_BALANCE",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        self.kind().status_code()
    }
}
