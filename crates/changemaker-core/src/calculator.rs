//! # Change Calculator
//!
//! Orchestrates one cash transaction: converts amounts, checks the payment,
//! and picks a solver.
//!
//! ## Dispatch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  calculate_change(owed, paid, divisor, seed)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  owed_minor, paid_minor = round_half_even(amount × 100)                 │
//! │  change = paid_minor - owed_minor                                       │
//! │       │                                                                 │
//! │       ├── change < 0  → InsufficientPayment                             │
//! │       ├── change == 0 → {} (is_random = false)                          │
//! │       │                                                                 │
//! │       ├── owed_minor % divisor == 0 → RandomChangeGenerator (true)      │
//! │       └── otherwise                 → minimum_change       (false)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `%` truncates toward zero, so a negative owed amount with a non-zero
//! remainder (e.g. -100 % 3 == -1) always takes the minimum path.

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::format::format_change_string;
use crate::money::Money;
use crate::solver::{minimum_change, RandomChangeGenerator};
use crate::types::{Breakdown, ChangeResult, Locale};
use crate::validation::validate_divisor;

/// Change calculator bound to one catalog.
///
/// Cheap to clone; the catalog is shared read-only.
#[derive(Debug, Clone)]
pub struct ChangeCalculator {
    catalog: Arc<Catalog>,
}

impl ChangeCalculator {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        ChangeCalculator { catalog }
    }

    /// Calculator over the built-in catalog of `locale`.
    pub fn for_locale(locale: Locale) -> Self {
        ChangeCalculator::new(Arc::new(Catalog::for_locale(locale)))
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[inline]
    pub fn locale(&self) -> Locale {
        self.catalog.locale()
    }

    /// Raw `paid - owed` in minor units. May be negative; no payment check.
    ///
    /// ## Example
    /// ```rust
    /// use changemaker_core::{ChangeCalculator, Locale};
    /// use rust_decimal::Decimal;
    ///
    /// let calculator = ChangeCalculator::for_locale(Locale::EnUs);
    /// let delta = calculator
    ///     .change_amount_minor_units(Decimal::new(212, 2), Decimal::new(300, 2))
    ///     .unwrap();
    /// assert_eq!(delta, 88);
    /// ```
    pub fn change_amount_minor_units(&self, amount_owed: Decimal, amount_paid: Decimal) -> CoreResult<i64> {
        let (owed, paid) = to_minor_units(amount_owed, amount_paid)?;
        Ok(difference(owed, paid)?.cents())
    }

    /// Calculates the change for one transaction.
    ///
    /// ## Errors
    /// - [`CoreError::InsufficientPayment`] when paid < owed
    /// - [`CoreError::Validation`] when `divisor` is zero
    /// - [`CoreError::AmountOutOfRange`] for amounts beyond `i64` cents or
    ///   change above [`MAX_CHANGE_MINOR`](crate::solver::MAX_CHANGE_MINOR)
    /// - [`CoreError::UnsatisfiableChange`] for catalogs without a unit coin
    ///
    /// ## Example
    /// ```rust
    /// use changemaker_core::{ChangeCalculator, Locale};
    /// use rust_decimal::Decimal;
    ///
    /// let calculator = ChangeCalculator::for_locale(Locale::EnUs);
    /// let result = calculator
    ///     .calculate_change(Decimal::new(212, 2), Decimal::new(300, 2), 3, None)
    ///     .unwrap();
    ///
    /// assert!(!result.is_random); // 212 % 3 != 0
    /// assert_eq!(result.denominations.get("quarter"), Some(3));
    /// assert_eq!(result.total_minor_units, 88);
    /// ```
    pub fn calculate_change(
        &self,
        amount_owed: Decimal,
        amount_paid: Decimal,
        divisor: u32,
        seed: Option<u64>,
    ) -> CoreResult<ChangeResult> {
        let (owed, paid) = to_minor_units(amount_owed, amount_paid)?;
        self.calculate_change_minor(owed, paid, divisor, seed)
    }

    /// Same as [`calculate_change`](Self::calculate_change) on amounts
    /// already in minor units.
    pub fn calculate_change_minor(
        &self,
        owed: Money,
        paid: Money,
        divisor: u32,
        seed: Option<u64>,
    ) -> CoreResult<ChangeResult> {
        validate_divisor(divisor)?;

        let change = difference(owed, paid)?;
        if change.is_negative() {
            return Err(CoreError::InsufficientPayment { owed, paid });
        }
        if change.is_zero() {
            return Ok(ChangeResult::no_change());
        }

        let is_random = owed.cents() % i64::from(divisor) == 0;
        debug!(
            owed_minor = owed.cents(),
            change_minor = change.cents(),
            divisor,
            is_random,
            locale = %self.locale(),
            "dispatching change calculation"
        );

        let denominations = if is_random {
            RandomChangeGenerator::new(seed).generate(change.cents(), &self.catalog)?
        } else {
            minimum_change(change.cents(), &self.catalog)?
        };

        Ok(ChangeResult {
            total_minor_units: denominations.total_minor_units(),
            denominations,
            is_random,
        })
    }

    /// Renders a breakdown with this calculator's catalog names.
    pub fn format_change_string(&self, denominations: &Breakdown) -> String {
        format_change_string(denominations, &self.catalog)
    }
}

fn to_minor_units(amount_owed: Decimal, amount_paid: Decimal) -> CoreResult<(Money, Money)> {
    Ok((Money::from_decimal(amount_owed)?, Money::from_decimal(amount_paid)?))
}

fn difference(owed: Money, paid: Money) -> CoreResult<Money> {
    paid.checked_sub(owed).ok_or_else(|| CoreError::AmountOutOfRange {
        amount: format!("{} - {}", paid, owed),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
