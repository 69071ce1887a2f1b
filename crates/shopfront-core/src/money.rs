//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The catalog sends prices as JSON numbers:  "price": 109.95             │
//! │                                                                         │
//! │  Summed as floats:                                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                   │
//! │                                                                         │
//! │  OUR SOLUTION: convert once at the boundary, then integer cents         │
//! │    109.95 ──► 10995 cents ──► line price, cart total                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopfront_core::money::Money;
//!
//! let price = Money::from_decimal(109.95).unwrap();
//! assert_eq!(price.cents(), 10995);
//!
//! let line = price * 2;
//! assert_eq!(line.to_string(), "$219.90");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Money Type
// =============================================================================

/// Largest price accepted from a decimal amount: $1,000,000,000.00.
pub const MAX_DECIMAL_CENTS: i64 = 100_000_000_000;

/// A monetary value in the smallest currency unit (cents).
///
/// Serializes as an integer number of cents. Catalog prices, which arrive as
/// decimal numbers, go through [`decimal`] instead.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount (e.g. `109.95`) to cents, rounding to the
    /// nearest cent.
    ///
    /// ## Errors
    /// `CoreError::InvalidPrice` for NaN, infinities and amounts whose
    /// magnitude exceeds [`MAX_DECIMAL_CENTS`].
    ///
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(22.3).unwrap().cents(), 2230);
    /// assert_eq!(Money::from_decimal(0.1 + 0.2).unwrap().cents(), 30);
    /// assert!(Money::from_decimal(f64::NAN).is_err());
    /// assert!(Money::from_decimal(5e16).is_err());
    /// ```
    pub fn from_decimal(amount: f64) -> CoreResult<Self> {
        if !amount.is_finite() {
            return Err(CoreError::InvalidPrice {
                reason: format!("{amount} is not a finite number"),
            });
        }

        let cents = (amount * 100.0).round();
        if cents.abs() > MAX_DECIMAL_CENTS as f64 {
            return Err(CoreError::InvalidPrice {
                reason: format!("{amount} is out of range"),
            });
        }

        Ok(Money(cents as i64))
    }

    /// Returns the value as a decimal amount, for wire formats that expect one.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the fractional portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// assert_eq!(Money::from_cents(i64::MAX).multiply_quantity(2).cents(), i64::MAX);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

// Arithmetic saturates: cart totals come from remote prices times local
// counts and must never panic or wrap.

/// Shows money as `$12.34`. Localized formatting belongs to the frontend.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Decimal wire format
// =============================================================================

/// Serde adapter for fields that travel as decimal JSON numbers.
///
/// ```rust
/// use serde::Deserialize;
/// use shopfront_core::money::Money;
///
/// #[derive(Deserialize)]
/// struct Row {
///     #[serde(with = "shopfront_core::money::decimal")]
///     price: Money,
/// }
///
/// let row: Row = serde_json::from_str(r#"{"price": 7.95}"#).unwrap();
/// assert_eq!(row.price.cents(), 795);
/// ```
pub mod decimal {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Money;

    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = f64::deserialize(deserializer)?;
        if amount < 0.0 {
            return Err(D::Error::custom(format!(
                "price must not be negative, got {amount}"
            )));
        }
        Money::from_decimal(amount).map_err(D::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_decimal_rounds_to_nearest_cent() {
        assert_eq!(Money::from_decimal(109.95).unwrap().cents(), 10995);
        assert_eq!(Money::from_decimal(7.95).unwrap().cents(), 795);
        assert_eq!(Money::from_decimal(10.0).unwrap().cents(), 1000);
        assert_eq!(Money::from_decimal(0.005).unwrap().cents(), 1);
        assert!(Money::from_decimal(f64::INFINITY).is_err());
        assert!(Money::from_decimal(1e300).is_err());
    }

    #[test]
    fn test_from_decimal_ceiling() {
        assert_eq!(
            Money::from_decimal(1_000_000_000.0).unwrap().cents(),
            MAX_DECIMAL_CENTS
        );
        assert!(Money::from_decimal(1_000_000_000.01).is_err());
        assert!(Money::from_decimal(50_000_000_000_000_000.0).is_err());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(i64::MAX / 2);

        assert_eq!((huge * 3).cents(), i64::MAX);
        assert_eq!((huge + huge + huge).cents(), i64::MAX);

        let mut acc = huge;
        acc += huge;
        acc += huge;
        assert_eq!(acc.cents(), i64::MAX);

        let total: Money = [huge, huge, huge].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        let tripled: Money = a * 3;
        assert_eq!(tripled.cents(), 3000);

        let mut acc = Money::zero();
        acc += b;
        acc += b;
        assert_eq!(acc, a);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 5]
            .into_iter()
            .map(Money::from_cents)
            .sum();
        assert_eq!(total.cents(), 355);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_decimal_adapter_rejects_negative() {
        #[derive(Debug, serde::Deserialize)]
        struct Row {
            #[serde(with = "decimal")]
            #[allow(dead_code)]
            price: Money,
        }

        let err = serde_json::from_str::<Row>(r#"{"price": -1.5}"#).unwrap_err();
        assert!(err.to_string().contains("must not be negative"));
    }

    #[test]
    fn test_decimal_adapter_rejects_huge_price() {
        #[derive(Debug, serde::Deserialize)]
        struct Row {
            #[serde(with = "decimal")]
            #[allow(dead_code)]
            price: Money,
        }

        let err = serde_json::from_str::<Row>(r#"{"price": 50000000000000000}"#).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
