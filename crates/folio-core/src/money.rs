//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  The purchase validator compares the client total against a            │
//! │  server-side recomputation with EXACT equality (no tolerance).         │
//! │  One bit of float drift would reject a perfectly valid basket.         │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every price, total and discount is an i64 number of cents.          │
//! │    Sums and products of integers are exact, so equality is exact.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use folio_core::money::Money;
//! use folio_core::types::Percent;
//!
//! let total = Money::from_cents(10_000); // $100.00
//! let ten_pct = Percent::from_bps(1000); // 10.00%
//!
//! assert_eq!(total.percentage_of(ten_pct).cents(), 1_000); // $10.00 exactly
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::Percent;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: negative values are representable so that a negative
///   client-submitted total can be carried through validation and rejected
///   by a rule, not by a panic or saturation
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::money::Money;
    ///
    /// let price = Money::from_cents(2500); // $25.00
    /// assert_eq!(price.cents(), 2500);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, `None` on i64 overflow.
    ///
    /// Line totals in a basket are `unit price × quantity`; both sides are
    /// integers so the product is exact. The quantity is client-controlled,
    /// so overflow must surface as a checkable outcome rather than a panic
    /// (debug) or a silent wrap (release).
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(2500); // $25.00
    /// assert_eq!(unit_price.checked_mul_quantity(2), Some(Money::from_cents(5000)));
    /// assert_eq!(unit_price.checked_mul_quantity(i64::MAX), None);
    /// ```
    #[inline]
    pub const fn checked_mul_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, `None` on i64 overflow.
    #[inline]
    pub const fn checked_add(&self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Computes a percentage of this amount, rounding half up to the cent.
    ///
    /// ## Implementation
    /// Integer math with an i128 intermediate to prevent overflow:
    /// `(cents * bps + 5000) / 10000`. The +5000 provides the rounding
    /// (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::money::Money;
    /// use folio_core::types::Percent;
    ///
    /// let total = Money::from_cents(10_000);         // $100.00
    /// let value = total.percentage_of(Percent::from_bps(1000)); // 10.00%
    /// assert_eq!(value.cents(), 1_000);              // $10.00
    /// ```
    pub fn percentage_of(&self, percent: Percent) -> Money {
        let cents = (self.0 as i128 * percent.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money in a human-readable format.
///
/// For debugging and violation messages; the HTTP layer owns localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
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

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summing an iterator of Money values (basket recomputation).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
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
        let money = Money::from_cents(2500);
        assert_eq!(money.cents(), 2500);
        assert!(!money.is_zero());
        assert!(!money.is_negative());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
    }

    #[test]
    fn test_checked_mul_quantity_is_exact() {
        let unit_price = Money::from_cents(2500);
        assert_eq!(unit_price.checked_mul_quantity(2), Some(Money::from_cents(5000)));
        assert_eq!(unit_price.checked_mul_quantity(0), Some(Money::zero()));
    }

    #[test]
    fn test_checked_arithmetic_reports_overflow() {
        let unit_price = Money::from_cents(2500);
        assert_eq!(unit_price.checked_mul_quantity(i64::MAX), None);
        assert_eq!(unit_price.checked_mul_quantity(i64::MIN), None);

        let max = Money::from_cents(i64::MAX);
        assert_eq!(max.checked_add(Money::from_cents(1)), None);
        assert_eq!(max.checked_add(Money::zero()), Some(max));
    }

    #[test]
    fn test_percentage_exact() {
        // $100.00 at 10.00% = $10.00 with no drift
        let total = Money::from_cents(10_000);
        let value = total.percentage_of(Percent::from_bps(1000));
        assert_eq!(value.cents(), 1_000);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // $10.00 at 8.25% = $0.825 → 83 cents
        let amount = Money::from_cents(1000);
        assert_eq!(amount.percentage_of(Percent::from_bps(825)).cents(), 83);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300].iter().map(|c| Money::from_cents(*c)).sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_negative_flows_through() {
        let negative = Money::from_cents(-1);
        assert!(negative.is_negative());
        assert_eq!((negative + Money::from_cents(1)).cents(), 0);
    }
}
