//! Property-based tests for change calculation.
//!
//! - Sum invariant: every result adds up to `paid - owed`
//! - Optimality: the DP never uses more pieces than an independent count
//! - Determinism: a seed fixes the random breakdown
//! - Dispatch: the divisibility rule alone picks the solver

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::calculator::ChangeCalculator;
use crate::catalog::Catalog;
use crate::error::CoreError;
use crate::format::format_change_string;
use crate::solver::{minimum_change, RandomChangeGenerator};
use crate::types::{Breakdown, Locale};

/// Strategy for amounts in cents (0.00 to 500.00).
fn cents() -> impl Strategy<Value = i64> {
    0i64..50_000
}

/// Strategy for either built-in locale.
fn locale() -> impl Strategy<Value = Locale> {
    prop_oneof![Just(Locale::EnUs), Just(Locale::FrFr)]
}

/// Fewest pieces by plain per-coin DP, written independently of the solver.
fn reference_piece_count(values: &[i64], amount: i64) -> Option<u64> {
    let amount = amount as usize;
    let mut best: Vec<Option<u64>> = vec![None; amount + 1];
    best[0] = Some(0);
    for &value in values {
        let value = value as usize;
        for current in value..=amount {
            if let Some(rest) = best[current - value] {
                let candidate = rest + 1;
                if best[current].map_or(true, |b| candidate < b) {
                    best[current] = Some(candidate);
                }
            }
        }
    }
    best[amount]
}

fn uses_only_catalog(breakdown: &Breakdown, catalog: &Catalog) -> bool {
    breakdown.iter().all(|tally| {
        catalog
            .by_name(tally.name())
            .is_some_and(|d| d.value_minor() == tally.value_minor())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// For any paid ≥ owed the breakdown sums to the change exactly.
    #[test]
    fn prop_result_sums_to_change(
        owed in cents(),
        extra in 0i64..20_000,
        divisor in 1u32..10,
        seed in any::<u64>(),
        locale in locale(),
    ) {
        let calculator = ChangeCalculator::for_locale(locale);
        let paid = owed + extra;
        let result = calculator
            .calculate_change(Decimal::new(owed, 2), Decimal::new(paid, 2), divisor, Some(seed))
            .unwrap();

        prop_assert_eq!(result.total_minor_units, extra);
        prop_assert_eq!(result.denominations.total_minor_units(), extra);
        prop_assert!(uses_only_catalog(&result.denominations, calculator.catalog()));
        prop_assert_eq!(result.is_random, extra != 0 && owed % i64::from(divisor) == 0);
    }

    /// Paying less than owed is always rejected.
    #[test]
    fn prop_underpayment_rejected(owed in 1i64..50_000, short in 1i64..1_000) {
        let calculator = ChangeCalculator::for_locale(Locale::EnUs);
        let paid = owed - short;
        let err = calculator
            .calculate_change(Decimal::new(owed, 2), Decimal::new(paid, 2), 3, None)
            .unwrap_err();
        prop_assert!(
            matches!(err, CoreError::InsufficientPayment { .. }),
            "expected InsufficientPayment, got {:?}",
            err
        );
    }

    /// The DP uses no more pieces than any exact combination.
    #[test]
    fn prop_minimum_is_optimal(change in 1i64..5_000, locale in locale()) {
        let catalog = Catalog::for_locale(locale);
        let values: Vec<i64> = catalog.values().collect();
        let breakdown = minimum_change(change, &catalog).unwrap();

        prop_assert_eq!(breakdown.total_minor_units(), change);
        prop_assert_eq!(Some(breakdown.piece_count()), reference_piece_count(&values, change));
    }

    /// Optimality also holds for catalogs where greedy fails.
    #[test]
    fn prop_minimum_is_optimal_non_canonical(change in 1i64..500) {
        let catalog = Catalog::from_table(
            Locale::EnUs,
            &[(12, "twelve", "twelves"), (9, "nine", "nines"), (4, "four", "fours"), (1, "one", "ones")],
        )
        .unwrap();
        let values: Vec<i64> = catalog.values().collect();
        let breakdown = minimum_change(change, &catalog).unwrap();

        prop_assert_eq!(breakdown.total_minor_units(), change);
        prop_assert_eq!(Some(breakdown.piece_count()), reference_piece_count(&values, change));
    }

    /// Same seed, same breakdown (including order).
    #[test]
    fn prop_random_is_deterministic(change in 1i64..5_000, seed in any::<u64>(), locale in locale()) {
        let catalog = Catalog::for_locale(locale);
        let first = RandomChangeGenerator::seeded(seed).generate(change, &catalog).unwrap();
        let second = RandomChangeGenerator::seeded(seed).generate(change, &catalog).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.total_minor_units(), change);
    }

    /// The formatter never pluralizes a single piece and never fails.
    #[test]
    fn prop_formatter_is_total(change in 0i64..5_000, seed in any::<u64>()) {
        let catalog = Catalog::us_dollar();
        let breakdown = RandomChangeGenerator::seeded(seed).generate(change, &catalog).unwrap();
        let formatted = format_change_string(&breakdown, &catalog);

        if breakdown.is_empty() {
            prop_assert_eq!(formatted.as_str(), "No change");
        } else {
            let segments: Vec<&str> = formatted.split(',').collect();
            prop_assert_eq!(segments.len(), breakdown.len());
            for (segment, tally) in segments.iter().zip(breakdown.iter()) {
                let denomination = catalog.by_name(tally.name()).unwrap();
                let expected = if tally.count() == 1 {
                    format!("1 {}", denomination.singular())
                } else {
                    format!("{} {}", tally.count(), denomination.plural())
                };
                prop_assert_eq!(*segment, expected.as_str());
            }
        }
    }
}

#[test]
fn test_dispatch_branches_reachable() {
    let calculator = ChangeCalculator::for_locale(Locale::EnUs);
    let minimum = calculator
        .calculate_change(Decimal::new(212, 2), Decimal::new(300, 2), 3, None)
        .unwrap();
    let random = calculator
        .calculate_change(Decimal::new(333, 2), Decimal::new(500, 2), 3, None)
        .unwrap();

    assert!(!minimum.is_random);
    assert!(random.is_random);
    assert_eq!(random.total_minor_units, 167);
}
