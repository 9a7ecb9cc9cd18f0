//! Periodic expiry sweeper.
//!
//! Auto-checkout is the non-negotiable cap on free riding: a member who
//! walks out without checking out still stops occupying a lane within one
//! sweep interval of the time limit.

use std::sync::Arc;

use clubhouse_shared::config::SweeperConfig;
use clubhouse_shared::types::StaffId;
use tracing::{debug, error, info};

use crate::occupancy::OccupancyService;

/// Drives `sweep_expired` on a fixed cadence.
pub struct ExpirySweeper {
    occupancy: Arc<OccupancyService>,
    system_staff: StaffId,
    config: SweeperConfig,
}

impl ExpirySweeper {
    /// Creates a sweeper acting as the given system staff identity.
    #[must_use]
    pub fn new(occupancy: Arc<OccupancyService>, system_staff: StaffId, config: SweeperConfig) -> Self {
        Self { occupancy, system_staff, config }
    }

    /// Runs a single sweep, logging the outcome.
    ///
    /// Sweep failures are logged, not propagated; the next tick retries
    /// from scratch.
    pub async fn run_once(&self) {
        match self.occupancy.sweep_expired(self.system_staff).await {
            Ok(closed) if closed.is_empty() => {
                debug!("sweep found no expired occupancies");
            }
            Ok(closed) => {
                for record in &closed {
                    info!(
                        member = %record.member_id,
                        resource = %record.resource,
                        "auto-checkout after time limit"
                    );
                }
                info!(count = closed.len(), "sweep closed expired occupancies");
            }
            Err(err) => {
                error!(%err, "sweep failed");
            }
        }
    }

    /// Runs sweeps forever at the configured interval.
    ///
    /// The first tick fires immediately so a restart catches up on
    /// anything that expired while the process was down.
    pub async fn run(&self) {
        let period = std::time::Duration::from_secs(self.config.interval_minutes * 60);
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            self.run_once().await;
        }
    }
}
