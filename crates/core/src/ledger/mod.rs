//! Derived credit ledger.
//!
//! There is no stored balance column anywhere. A member's balance is
//! always recomputed from the purchase and occupancy histories, so voids
//! on either side retroactively adjust it with no compensating writes.

mod error;
mod service;
mod types;

pub use error::LedgerError;
pub use service::LedgerService;
pub use types::{BalanceSummary, MemberHistory};
