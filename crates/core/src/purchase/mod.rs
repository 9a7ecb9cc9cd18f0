//! Credit purchases: package sales and non-destructive voids.

mod error;
mod service;
mod types;

pub use error::PurchaseError;
pub use service::PurchaseService;
pub use types::{CreditPurchase, PaymentMethod};
