//! Daily cash drawer: open, summarize, close.

mod error;
mod service;
mod types;

pub use error::DrawerError;
pub use service::DrawerService;
pub use types::{CashDrawer, DrawerSummary, DrawerTransaction};
