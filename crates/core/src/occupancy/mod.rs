//! Occupancy tracking: admission, checkout, void, and monitoring.

mod alerts;
mod error;
mod service;
mod types;

pub use alerts::partition;
pub use error::OccupancyError;
pub use service::OccupancyService;
pub use types::{ActiveOccupancy, OccupancyAlerts, OccupancyRecord, ResourceType};

#[cfg(test)]
mod alerts_props;
