//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    12.30 × 2 = 24.599999999999998   ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Exact Decimals                                           │
//! │    12.30 × 2 = 24.60                ✅ exact                            │
//! │    Rounding happens only where we ask for it, to a known precision     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unlike a fixed "cents" integer, a quote can be configured for any
//! precision between 0 and 28 decimal places, so `Money` wraps a
//! [`rust_decimal::Decimal`] and every finalized value is rounded with
//! [`Money::round_dp`].
//!
//! ## Usage
//! ```rust
//! use pricequote_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let price = Money::new(Decimal::new(1320, 2)); // 13.20
//! let line = price.times_quantity(2);           // 26.40
//! assert_eq!(line, Money::new(Decimal::new(2640, 2)));
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Largest precision the decimal type can represent.
pub const MAX_DECIMAL_PLACES: u32 = 28;

/// Rounding rule applied to every finalized value.
///
/// Half away from zero: 2.675 → 2.68, -2.675 → -2.68.
pub const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

// =============================================================================
// Money Type
// =============================================================================

/// Represents an exact monetary value.
///
/// ## Design Decisions
/// - **Decimal (signed)**: Allows negative values for discount totals
/// - **Single field tuple struct**: Zero-cost abstraction over `Decimal`
/// - **Serialized as a string**: No precision is lost crossing JSON
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.value ──► LineItem.total ──► totals.products                  │
/// │                                             │                           │
/// │  Discount amount ──► AppliedDiscount.value ─┤                           │
/// │                                             ▼                           │
/// │                         totals.after_discounts ──► Tax derivation      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Wraps an exact decimal amount. No rounding is applied.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Returns the underlying decimal.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Rounds to `decimal_places` fractional digits using [`ROUNDING`].
    ///
    /// ## Example
    /// ```rust
    /// use pricequote_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let raw = Money::new(Decimal::new(1231442, 5)); // 12.31442
    /// assert_eq!(raw.round_dp(3), Money::new(Decimal::new(12314, 3)));
    /// ```
    #[inline]
    pub fn round_dp(self, decimal_places: u32) -> Self {
        Money(self.0.round_dp_with_strategy(decimal_places, ROUNDING))
    }

    /// Multiplies money by a quantity. Not rounded.
    #[inline]
    pub fn times_quantity(self, quantity: u32) -> Self {
        Money(self.0 * Decimal::from(quantity))
    }

    /// Returns the smaller of two amounts.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    /// Lossy conversion for presentation (JSON numbers).
    ///
    /// Never feed the result back into a calculation.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering. Locale/currency formatting lives in the
/// presentation layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(Money::new(dec!(2.675)).round_dp(2), Money::new(dec!(2.68)));
        assert_eq!(Money::new(dec!(-2.675)).round_dp(2), Money::new(dec!(-2.68)));
        assert_eq!(Money::new(dec!(2.674)).round_dp(2), Money::new(dec!(2.67)));
    }

    #[test]
    fn test_round_requested_places() {
        let raw = Money::new(dec!(12.31442));
        assert_eq!(raw.round_dp(3).amount(), dec!(12.314));
        assert_eq!(raw.round_dp(0).amount(), dec!(12));
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(dec!(10.00));
        let b = Money::new(dec!(5.50));

        assert_eq!((a + b).amount(), dec!(15.50));
        assert_eq!((a - b).amount(), dec!(4.50));
        assert_eq!((-b).amount(), dec!(-5.50));
        assert_eq!(a.times_quantity(3).amount(), dec!(30));
    }

    #[test]
    fn test_no_float_drift() {
        // 0.1 + 0.2 in binary floating point is 0.30000000000000004
        let sum = Money::new(dec!(0.1)) + Money::new(dec!(0.2));
        assert_eq!(sum.amount(), dec!(0.3));
    }

    #[test]
    fn test_min_and_sum() {
        let values = [Money::new(dec!(1.10)), Money::new(dec!(2.20))];
        let total: Money = values.iter().sum();
        assert_eq!(total.amount(), dec!(3.30));
        assert_eq!(values[0].min(values[1]), values[0]);
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::new(dec!(0.01)).is_positive());
        assert!(Money::new(dec!(-0.01)).is_negative());
    }

    #[test]
    fn test_serializes_as_exact_string() {
        let json = serde_json::to_string(&Money::new(dec!(28.90))).unwrap();
        assert_eq!(json, "\"28.90\"");
    }
}
