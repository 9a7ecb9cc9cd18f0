//! Error-kind taxonomy shared by all engines.
//!
//! Every engine error maps to exactly one kind; the request layer (out of
//! scope here) translates kinds to user-facing responses.

use serde::{Deserialize, Serialize};

/// Classification of an engine error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The referenced entity does not exist.
    NotFound,
    /// An invariant would be violated (already active, already closed,
    /// already voided, lane occupied, duplicate drawer for date).
    Conflict,
    /// The input itself is invalid (negative balance, bad package size,
    /// missing required field).
    InvalidInput,
    /// The member's derived balance does not cover the operation.
    InsufficientBalance,
    /// The storage layer failed; never retried inside the core.
    Storage,
}

impl ErrorKind {
    /// Returns the HTTP status code the request layer should use.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::Conflict | Self::InsufficientBalance => 409,
            Self::InvalidInput => 400,
            Self::Storage => 500,
        }
    }
}
