//! Money amounts at the processor and application boundaries.
//!
//! The application speaks major units (`49.99`), the processor speaks minor
//! units (`4999`). Every supported currency uses a factor of 100.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minor units per major unit for all supported currencies.
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Largest minor amount that survives an f64 round trip exactly.
const MAX_MINOR_AMOUNT: i64 = 9_007_199_254_740_991;

/// Reasons a major amount cannot become a processor amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Amount must be a number")]
    NotFinite,

    #[error("Amount must be greater than zero")]
    NotPositive,

    #[error("Amount is too large")]
    TooLarge,
}

/// Amount in minor currency units (cents for USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinorAmount(i64);

impl MinorAmount {
    /// Wraps an amount already expressed in minor units.
    pub fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Converts a major amount with `round(amount * 100)`.
    ///
    /// Halves round away from zero. The result must be at least one minor
    /// unit, so `0.004` is rejected even though it is positive.
    pub fn from_major(major: f64) -> Result<Self, AmountError> {
        if !major.is_finite() {
            return Err(AmountError::NotFinite);
        }

        let minor = (major * MINOR_UNITS_PER_MAJOR as f64).round();
        if minor < 1.0 {
            return Err(AmountError::NotPositive);
        }
        if minor > MAX_MINOR_AMOUNT as f64 {
            return Err(AmountError::TooLarge);
        }

        Ok(Self(minor as i64))
    }

    /// Raw minor-unit value.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Major-unit value (`amount / 100`).
    pub fn to_major(&self) -> f64 {
        self.0 as f64 / MINOR_UNITS_PER_MAJOR as f64
    }
}

impl std::fmt::Display for MinorAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn converts_major_to_minor() {
        assert_eq!(MinorAmount::from_major(49.99).unwrap().value(), 4999);
        assert_eq!(MinorAmount::from_major(150.0).unwrap().value(), 15000);
        assert_eq!(MinorAmount::from_major(0.01).unwrap().value(), 1);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(MinorAmount::from_major(10.125).unwrap().value(), 1013);
        assert_eq!(MinorAmount::from_major(0.015).unwrap().value(), 2);
    }

    #[test]
    fn float_noise_is_absorbed_by_rounding() {
        // 19.99 * 100 = 1998.9999999999998
        assert_eq!(MinorAmount::from_major(19.99).unwrap().value(), 1999);
        // 1.1 * 100 = 110.00000000000001
        assert_eq!(MinorAmount::from_major(1.1).unwrap().value(), 110);
    }

    #[test]
    fn rejects_zero_and_negative() {
        assert_eq!(MinorAmount::from_major(0.0), Err(AmountError::NotPositive));
        assert_eq!(MinorAmount::from_major(-5.0), Err(AmountError::NotPositive));
        assert_eq!(MinorAmount::from_major(0.004), Err(AmountError::NotPositive));
    }

    #[test]
    fn rejects_non_finite() {
        assert_eq!(MinorAmount::from_major(f64::NAN), Err(AmountError::NotFinite));
        assert_eq!(MinorAmount::from_major(f64::INFINITY), Err(AmountError::NotFinite));
    }

    #[test]
    fn rejects_amounts_beyond_exact_range() {
        assert_eq!(MinorAmount::from_major(1e17), Err(AmountError::TooLarge));
    }

    #[test]
    fn to_major_divides_by_hundred() {
        assert_eq!(MinorAmount::new(4999).to_major(), 49.99);
        assert_eq!(MinorAmount::new(100).to_major(), 1.0);
    }

    proptest! {
        #[test]
        fn from_major_matches_rounded_product(major in 0.01f64..1_000_000.0) {
            let minor = MinorAmount::from_major(major).unwrap();
            prop_assert_eq!(minor.value(), (major * 100.0).round() as i64);
        }

        #[test]
        fn whole_cents_survive_round_trip(cents in 1i64..100_000_000) {
            let major = MinorAmount::new(cents).to_major();
            prop_assert_eq!(MinorAmount::from_major(major).unwrap().value(), cents);
        }
    }
}
