//! Alert bucketing over active occupancy views.

use clubhouse_shared::config::OccupancyPolicy;

use super::types::{ActiveOccupancy, OccupancyAlerts};

/// Partitions active views into expired/critical/warning buckets.
///
/// Records with `remaining > warning_threshold_minutes` are dropped; each
/// bucket is sorted by remaining time ascending so the most urgent record
/// leads. `total` counts the three buckets, not the input.
#[must_use]
pub fn partition(views: Vec<ActiveOccupancy>, policy: &OccupancyPolicy) -> OccupancyAlerts {
    let mut alerts = OccupancyAlerts::default();

    for view in views {
        if view.remaining_minutes <= 0 {
            alerts.expired.push(view);
        } else if view.remaining_minutes <= policy.critical_threshold_minutes {
            alerts.critical.push(view);
        } else if view.remaining_minutes <= policy.warning_threshold_minutes {
            alerts.warning.push(view);
        }
    }

    alerts.expired.sort_by_key(|v| v.remaining_minutes);
    alerts.critical.sort_by_key(|v| v.remaining_minutes);
    alerts.warning.sort_by_key(|v| v.remaining_minutes);
    alerts.total = alerts.expired.len() + alerts.critical.len() + alerts.warning.len();
    alerts
}
