//! Package price table with membership-tier discount.
//!
//! Prices are whole lookups over the enumerated package sizes; there is one
//! tariff for local-tier members and one for everyone else.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
mod props;

/// The enumerated credit package sizes on sale.
///
/// This enum is the single authoritative validation point for package
/// sizes; raw integers from the request layer parse through [`TryFrom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum PackageSize {
    /// A single hour.
    One,
    /// Four hours.
    Four,
    /// Eight hours.
    Eight,
    /// Twelve hours.
    Twelve,
}

/// The requested credit amount is not one of the enumerated packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid package size: {0} (valid sizes are 1, 4, 8, 12)")]
pub struct InvalidPackageSize(pub i64);

impl PackageSize {
    /// All packages, smallest first.
    pub const ALL: [Self; 4] = [Self::One, Self::Four, Self::Eight, Self::Twelve];

    /// Returns the number of credits in this package.
    #[must_use]
    pub const fn credits(self) -> i64 {
        match self {
            Self::One => 1,
            Self::Four => 4,
            Self::Eight => 8,
            Self::Twelve => 12,
        }
    }

    /// Parses a raw credit amount into a package, if it matches one.
    #[must_use]
    pub const fn from_credits(credits: i64) -> Option<Self> {
        match credits {
            1 => Some(Self::One),
            4 => Some(Self::Four),
            8 => Some(Self::Eight),
            12 => Some(Self::Twelve),
            _ => None,
        }
    }
}

impl TryFrom<i64> for PackageSize {
    type Error = InvalidPackageSize;

    fn try_from(credits: i64) -> Result<Self, Self::Error> {
        Self::from_credits(credits).ok_or(InvalidPackageSize(credits))
    }
}

impl From<PackageSize> for i64 {
    fn from(package: PackageSize) -> Self {
        package.credits()
    }
}

/// Returns the price of a package for the given membership tier.
#[must_use]
pub fn price(package: PackageSize, is_local_tier: bool) -> Decimal {
    if is_local_tier {
        match package {
            PackageSize::One => Decimal::new(5_00, 2),
            PackageSize::Four => Decimal::new(18_00, 2),
            PackageSize::Eight => Decimal::new(32_00, 2),
            PackageSize::Twelve => Decimal::new(42_00, 2),
        }
    } else {
        match package {
            PackageSize::One => Decimal::new(8_00, 2),
            PackageSize::Four => Decimal::new(28_00, 2),
            PackageSize::Eight => Decimal::new(52_00, 2),
            PackageSize::Twelve => Decimal::new(72_00, 2),
        }
    }
}

/// Prices an arbitrary hour count, falling back to per-hour pricing.
///
/// Out-of-catalog sizes price at `hours * price(1)`. The fallback is
/// deliberately preserved from the source tariff table even though package
/// validation at the purchase seam normally prevents it from being reached.
#[must_use]
pub fn price_for_hours(hours: i64, is_local_tier: bool) -> Decimal {
    match PackageSize::from_credits(hours) {
        Some(package) => price(package, is_local_tier),
        None => Decimal::from(hours) * price(PackageSize::One, is_local_tier),
    }
}
