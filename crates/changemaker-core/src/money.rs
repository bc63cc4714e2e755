//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    2.675 * 100 = 267.49999999999997 → 267 cents  ❌ Lost a cent!       │
//! │                                                                         │
//! │  OUR SOLUTION: Exact decimals in, integer cents inside                 │
//! │    Decimal("2.675") * 100 = 267.5 → 268 (half to even)                 │
//! │    Every solver works on i64 minor units from then on                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use changemaker_core::money::Money;
//! use rust_decimal::Decimal;
//! use std::str::FromStr;
//!
//! let owed = Money::from_decimal(Decimal::from_str("2.12").unwrap()).unwrap();
//! assert_eq!(owed.cents(), 212);
//!
//! // NEVER do this:
//! // let bad = Money::from_float(2.12); // NO SUCH METHOD EXISTS!
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Minor units per major unit for every supported currency (two-decimal cents).
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Negative owed amounts are accepted by the calculator
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Currency agnostic**: USD and EUR both have 100 minor units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use changemaker_core::money::Money;
    ///
    /// let change = Money::from_cents(88);
    /// assert_eq!(change.cents(), 88);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts an exact decimal amount into minor units.
    ///
    /// ## Rounding
    /// `amount * 100` is rounded half-to-even (Bankers Rounding), so
    /// sub-cent input never drifts in one direction:
    /// ```text
    /// 0.125 → 12.5 → 12     0.135 → 13.5 → 14
    /// ```
    ///
    /// ## Errors
    /// [`CoreError::AmountOutOfRange`] when the result does not fit in `i64`.
    ///
    /// ## Example
    /// ```rust
    /// use changemaker_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let half_cent = Decimal::new(125, 3); // 0.125
    /// assert_eq!(Money::from_decimal(half_cent).unwrap().cents(), 12);
    /// ```
    pub fn from_decimal(amount: Decimal) -> CoreResult<Self> {
        let out_of_range = || CoreError::AmountOutOfRange {
            amount: amount.to_string(),
        };

        amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven))
            .and_then(|rounded| rounded.to_i64())
            .map(Money)
            .ok_or_else(out_of_range)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars, euros) portion.
    ///
    /// ## Example
    /// ```rust
    /// use changemaker_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).major(), 10);
    /// assert_eq!(Money::from_cents(-550).major(), -5);
    /// ```
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_UNITS_PER_MAJOR
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_UNITS_PER_MAJOR).abs()
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

    /// Subtracts without wrapping; `None` on `i64` overflow.
    #[inline]
    pub const fn checked_sub(self, other: Money) -> Option<Money> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Returns the value as a two-decimal `Decimal` (for receipts).
    ///
    /// ## Example
    /// ```rust
    /// use changemaker_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(88).to_decimal().to_string(), "0.88");
    /// ```
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `major.minor` without a currency symbol.
///
/// ## Note
/// The symbol depends on the locale; callers that need it add it themselves.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
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
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_from_decimal_exact() {
        assert_eq!(Money::from_decimal(dec!(2.12)).unwrap().cents(), 212);
        assert_eq!(Money::from_decimal(dec!(3.00)).unwrap().cents(), 300);
        assert_eq!(Money::from_decimal(dec!(3)).unwrap().cents(), 300);
        assert_eq!(Money::from_decimal(dec!(-1.00)).unwrap().cents(), -100);
        assert_eq!(Money::from_decimal(dec!(0)).unwrap().cents(), 0);
    }

    #[test]
    fn test_from_decimal_rounds_half_to_even() {
        assert_eq!(Money::from_decimal(dec!(0.125)).unwrap().cents(), 12);
        assert_eq!(Money::from_decimal(dec!(0.135)).unwrap().cents(), 14);
        assert_eq!(Money::from_decimal(dec!(2.675)).unwrap().cents(), 268);
        assert_eq!(Money::from_decimal(dec!(-0.125)).unwrap().cents(), -12);
        assert_eq!(Money::from_decimal(dec!(0.1249)).unwrap().cents(), 12);
        assert_eq!(Money::from_decimal(dec!(0.1251)).unwrap().cents(), 13);
    }

    #[test]
    fn test_from_decimal_out_of_range() {
        let huge = Decimal::MAX;
        let err = Money::from_decimal(huge).unwrap_err();
        assert!(matches!(err, CoreError::AmountOutOfRange { .. }));

        // Fits in Decimal after scaling, but not in i64
        let too_big = Decimal::from(100_000_000_000_000_000i64);
        assert!(Money::from_decimal(too_big).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(-5)), "-0.05");
        assert_eq!(format!("{}", Money::zero()), "0.00");
    }

    #[test]
    fn test_checked_sub() {
        let paid = Money::from_cents(300);
        let owed = Money::from_cents(212);
        assert_eq!(paid.checked_sub(owed), Some(Money::from_cents(88)));
        assert_eq!(owed.checked_sub(paid), Some(Money::from_cents(-88)));
        assert_eq!(Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)), None);
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(Money::from_cents(88).to_decimal(), dec!(0.88));
        assert_eq!(Money::from_cents(16700).to_decimal(), dec!(167.00));
        assert!(Money::zero().is_zero());
        assert!(Money::from_cents(-1).is_negative());
    }
}
