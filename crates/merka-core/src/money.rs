//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The legacy database stores prices as REAL:                             │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Convert once at the boundary, add up in i64 cents, convert back     │
//! │    once when writing. Ticket totals are exact sums.                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use merka_core::money::Money;
//!
//! let corte = Money::from_major(150);          // $150.00
//! let tip = Money::from_decimal(12.5);         // $12.50, from a form field
//!
//! let total = corte + tip;
//! assert_eq!(total.cents(), 16250);
//! assert_eq!(total.to_decimal(), 162.5);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

use crate::types::CommissionRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Sums of many tickets never overflow in practice
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money is Used
/// ```text
/// Service.price ──► Detail.price ──┐
///                                  ├──► Ticket.total ──► DailyReport.total_sales
/// Sale form tip ──► Ticket.tip ────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use merka_core::money::Money;
    ///
    /// let price = Money::from_cents(15000);
    /// assert_eq!(price.cents(), 15000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Converts a decimal amount (a `REAL` column or a JSON number) to
    /// Money, rounding to the nearest cent.
    ///
    /// Only used at the edges: SQLite rows and request bodies. Callers
    /// reject non-finite values before calling this.
    ///
    /// ## Example
    /// ```rust
    /// use merka_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(150.0).cents(), 15000);
    /// assert_eq!(Money::from_decimal(0.1 + 0.2).cents(), 30);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Money((amount * 100.0).round() as i64)
    }

    /// Like [`Money::from_decimal`], but `None` when the amount is not
    /// finite or its cents exceed [`Money::MAX_DECIMAL_CENTS`].
    ///
    /// ## Example
    /// ```rust
    /// use merka_core::money::Money;
    ///
    /// assert_eq!(Money::try_from_decimal(10.5), Some(Money::from_cents(1050)));
    /// assert_eq!(Money::try_from_decimal(1e17), None);
    /// assert_eq!(Money::try_from_decimal(f64::NAN), None);
    /// ```
    pub fn try_from_decimal(amount: f64) -> Option<Self> {
        let cents = (amount * 100.0).round();
        if cents.is_finite() && cents.abs() <= Self::MAX_DECIMAL_CENTS as f64 {
            Some(Money(cents as i64))
        } else {
            None
        }
    }

    /// Largest cent count a `REAL` column holds exactly (2^53).
    pub const MAX_DECIMAL_CENTS: i64 = 1 << 53;

    /// Returns the value as a decimal amount, for writing `REAL` columns.
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
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

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Sums amounts, `None` on overflow.
    pub fn checked_sum(amounts: impl IntoIterator<Item = Money>) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
    }

    /// Calculates a barber's commission on this amount.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`, the +5000 rounds half up.
    ///
    /// ## Example
    /// ```rust
    /// use merka_core::money::Money;
    /// use merka_core::types::CommissionRate;
    ///
    /// let premium = Money::from_major(300);
    /// let rate = CommissionRate::from_percentage(60.0);
    /// assert_eq!(premium.commission(rate).cents(), 18000);
    /// ```
    pub fn commission(&self, rate: CommissionRate) -> Money {
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-oriented display; clients do their own locale formatting.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.major().abs(), self.cents_part())
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
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
        assert_eq!(money.major(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_decimal_rounds_to_cent() {
        assert_eq!(Money::from_decimal(150.0).cents(), 15000);
        assert_eq!(Money::from_decimal(0.1 + 0.2).cents(), 30);
        assert_eq!(Money::from_decimal(12.499).cents(), 1250);
        assert_eq!(Money::from_decimal(19.99).cents(), 1999);
        assert_eq!(Money::from_decimal(0.0).cents(), 0);
    }

    #[test]
    fn test_decimal_round_trip_for_legacy_prices() {
        for major in [100, 150, 200, 300] {
            let money = Money::from_major(major);
            assert_eq!(Money::from_decimal(money.to_decimal()), money);
        }
    }

    #[test]
    fn test_try_from_decimal_bounds() {
        assert_eq!(Money::try_from_decimal(0.0), Some(Money::zero()));
        assert_eq!(
            Money::try_from_decimal(1e13),
            Some(Money::from_cents(1_000_000_000_000_000))
        );
        assert_eq!(Money::try_from_decimal(1e17), None);
        assert_eq!(Money::try_from_decimal(f64::MAX), None);
        assert_eq!(Money::try_from_decimal(f64::INFINITY), None);
    }

    #[test]
    fn test_checked_add_overflow() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max.checked_add(Money::from_cents(1)), None);
        assert_eq!(
            Money::from_cents(100).checked_add(Money::from_cents(50)),
            Some(Money::from_cents(150))
        );
        assert_eq!(Money::checked_sum([max, Money::from_cents(1)]), None);
        assert_eq!(Money::checked_sum(Vec::new()), Some(Money::zero()));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(15000)), "$150.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_sum() {
        let lines = [Money::from_major(150), Money::from_major(100)];
        let total: Money = lines.iter().sum();
        assert_eq!(total, Money::from_major(250));
    }

    #[test]
    fn test_commission_rounding() {
        // $100.00 at 50% = $50.00
        let rate = CommissionRate::from_bps(5000);
        assert_eq!(Money::from_major(100).commission(rate).cents(), 5000);

        // $0.05 at 50% = 2.5 cents → 3 cents
        assert_eq!(Money::from_cents(5).commission(rate).cents(), 3);
    }
}
