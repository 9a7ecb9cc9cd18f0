//! Ledger error types.

use clubhouse_shared::ErrorKind;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur computing ledger views.
///
/// Balance reads have no domain preconditions; the only failure mode is
/// the storage layer. An unknown member simply has an empty history and
/// reads as zero.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Storage layer failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl LedgerError {
    /// Classifies this error for the request layer.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        self.kind().status_code()
    }
}
