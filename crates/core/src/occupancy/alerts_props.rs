//! Property tests for alert bucketing.

use chrono::{TimeZone, Utc};
use clubhouse_shared::config::OccupancyPolicy;
use clubhouse_shared::types::{MemberId, OccupancyId};
use proptest::prelude::*;

use super::alerts::partition;
use super::types::{ActiveOccupancy, ResourceType};

fn view(remaining: i64) -> ActiveOccupancy {
    ActiveOccupancy {
        id: OccupancyId::new(),
        member_id: MemberId::new("10000001"),
        member_name: "Member".to_string(),
        resource: ResourceType::Gym,
        lane: None,
        checkin_at: Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap(),
        elapsed_minutes: 60 - remaining,
        remaining_minutes: remaining,
    }
}

proptest! {
    #[test]
    fn buckets_are_disjoint_and_total_matches(remaining in prop::collection::vec(-120i64..=120, 0..40)) {
        let policy = OccupancyPolicy::default();
        let alerts = partition(remaining.iter().copied().map(view).collect(), &policy);

        prop_assert_eq!(
            alerts.total,
            alerts.expired.len() + alerts.critical.len() + alerts.warning.len()
        );
        for v in &alerts.expired {
            prop_assert!(v.remaining_minutes <= 0);
        }
        for v in &alerts.critical {
            prop_assert!(v.remaining_minutes > 0);
            prop_assert!(v.remaining_minutes <= policy.critical_threshold_minutes);
        }
        for v in &alerts.warning {
            prop_assert!(v.remaining_minutes > policy.critical_threshold_minutes);
            prop_assert!(v.remaining_minutes <= policy.warning_threshold_minutes);
        }
    }

    #[test]
    fn buckets_sorted_by_remaining_ascending(remaining in prop::collection::vec(-120i64..=120, 0..40)) {
        let alerts = partition(
            remaining.iter().copied().map(view).collect(),
            &OccupancyPolicy::default(),
        );
        for bucket in [&alerts.expired, &alerts.critical, &alerts.warning] {
            prop_assert!(bucket
                .windows(2)
                .all(|w| w[0].remaining_minutes <= w[1].remaining_minutes));
        }
    }

    #[test]
    fn records_above_warning_threshold_are_dropped(remaining in prop::collection::vec(16i64..=120, 1..20)) {
        let alerts = partition(
            remaining.iter().copied().map(view).collect(),
            &OccupancyPolicy::default(),
        );
        prop_assert_eq!(alerts.total, 0);
    }
}
