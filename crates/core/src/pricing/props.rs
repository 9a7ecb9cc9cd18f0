//! Property tests for the price table and its fallback rule.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::{price, price_for_hours, PackageSize};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Out-of-catalog hour counts always price at `hours * price(1)`.
    #[test]
    fn prop_fallback_is_linear_in_hours(
        hours in 0i64..10_000,
        is_local in any::<bool>(),
    ) {
        prop_assume!(PackageSize::from_credits(hours).is_none());

        let expected = Decimal::from(hours) * price(PackageSize::One, is_local);
        prop_assert_eq!(price_for_hours(hours, is_local), expected);
    }

    /// Catalog sizes always resolve through the table.
    #[test]
    fn prop_catalog_sizes_match_table(is_local in any::<bool>()) {
        for package in PackageSize::ALL {
            prop_assert_eq!(
                price_for_hours(package.credits(), is_local),
                price(package, is_local)
            );
        }
    }

    /// The local tariff is strictly cheaper for every package.
    #[test]
    fn prop_local_tier_is_cheaper(_unit in any::<bool>()) {
        for package in PackageSize::ALL {
            prop_assert!(price(package, true) < price(package, false));
        }
    }

    /// Larger packages never cost less in total.
    #[test]
    fn prop_prices_increase_with_size(is_local in any::<bool>()) {
        let totals: Vec<Decimal> = PackageSize::ALL
            .iter()
            .map(|p| price(*p, is_local))
            .collect();
        for pair in totals.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }
}
