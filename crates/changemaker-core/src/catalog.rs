//! # Denomination Catalogs
//!
//! The coins and bills a register can hand out, one catalog per locale.
//!
//! ## Catalog Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog (en-US)             sorted DESCENDING by value, unique values  │
//! │                                                                         │
//! │  index │ value │ singular              │ plural                         │
//! │  ──────┼───────┼───────────────────────┼─────────────────────────────   │
//! │    0   │ 10000 │ hundred dollar bill   │ hundred dollar bills           │
//! │   ...  │  ...  │ ...                   │ ...                            │
//! │    6   │    25 │ quarter               │ quarters                       │
//! │    9   │     1 │ penny                 │ pennies                        │
//! │                                                                         │
//! │  Solvers work on catalog positions; names appear only in results.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{CoreResult, ValidationError};
use crate::types::Locale;
use crate::validation::validate_denomination;

// =============================================================================
// Built-in Tables
// =============================================================================

/// US dollar denominations (value in cents, singular, plural).
pub const USD_DENOMINATIONS: &[(i64, &str, &str)] = &[
    (10000, "hundred dollar bill", "hundred dollar bills"),
    (5000, "fifty dollar bill", "fifty dollar bills"),
    (2000, "twenty dollar bill", "twenty dollar bills"),
    (1000, "ten dollar bill", "ten dollar bills"),
    (500, "five dollar bill", "five dollar bills"),
    (100, "dollar", "dollars"),
    (25, "quarter", "quarters"),
    (10, "dime", "dimes"),
    (5, "nickel", "nickels"),
    (1, "penny", "pennies"),
];

/// Euro denominations (value in cents, singular, plural).
pub const EUR_DENOMINATIONS: &[(i64, &str, &str)] = &[
    (10000, "hundred euro bill", "hundred euro bills"),
    (5000, "fifty euro bill", "fifty euro bills"),
    (2000, "twenty euro bill", "twenty euro bills"),
    (1000, "ten euro bill", "ten euro bills"),
    (500, "five euro bill", "five euro bills"),
    (200, "two euro coin", "two euro coins"),
    (100, "euro", "euros"),
    (20, "twenty cent coin", "twenty cent coins"),
    (10, "ten cent coin", "ten cent coins"),
    (5, "five cent coin", "five cent coins"),
    (2, "two cent coin", "two cent coins"),
    (1, "cent", "cents"),
];

// =============================================================================
// Denomination
// =============================================================================

/// A single coin or bill: face value plus display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Denomination {
    value_minor: i64,
    singular: String,
    plural: String,
}

impl Denomination {
    /// Creates a denomination.
    ///
    /// ## Rules
    /// - `value_minor` must be positive
    /// - both names must be non-empty
    pub fn new(
        value_minor: i64,
        singular: impl Into<String>,
        plural: impl Into<String>,
    ) -> CoreResult<Self> {
        let singular = singular.into();
        let plural = plural.into();
        validate_denomination(value_minor, &singular, &plural)?;

        Ok(Denomination {
            value_minor,
            singular,
            plural,
        })
    }

    #[inline]
    pub fn value_minor(&self) -> i64 {
        self.value_minor
    }

    #[inline]
    pub fn singular(&self) -> &str {
        &self.singular
    }

    #[inline]
    pub fn plural(&self) -> &str {
        &self.plural
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The complete, sorted set of denominations for one locale.
///
/// Immutable after construction; share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    locale: Locale,
    denominations: Vec<Denomination>,
}

impl Catalog {
    /// Builds a catalog, sorting denominations by descending value.
    ///
    /// ## Errors
    /// - empty denomination list
    /// - two denominations with the same value
    /// - two denominations with the same singular name (results are keyed
    ///   by name, so the key must identify one face value)
    ///
    /// ## Example
    /// ```rust
    /// use changemaker_core::catalog::{Catalog, Denomination};
    /// use changemaker_core::Locale;
    ///
    /// let catalog = Catalog::new(Locale::EnUs, vec![
    ///     Denomination::new(1, "penny", "pennies").unwrap(),
    ///     Denomination::new(25, "quarter", "quarters").unwrap(),
    /// ]).unwrap();
    ///
    /// assert_eq!(catalog.values().collect::<Vec<_>>(), vec![25, 1]);
    /// ```
    pub fn new(locale: Locale, mut denominations: Vec<Denomination>) -> CoreResult<Self> {
        if denominations.is_empty() {
            return Err(ValidationError::Required {
                field: "denominations".to_string(),
            }
            .into());
        }

        denominations.sort_by(|a, b| b.value_minor.cmp(&a.value_minor));

        if let Some(pair) = denominations
            .windows(2)
            .find(|pair| pair[0].value_minor == pair[1].value_minor)
        {
            return Err(ValidationError::Duplicate {
                field: "denomination value".to_string(),
                value: pair[1].value_minor.to_string(),
            }
            .into());
        }

        let mut names = HashSet::with_capacity(denominations.len());
        for denomination in &denominations {
            if !names.insert(denomination.singular.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "denomination name".to_string(),
                    value: denomination.singular.clone(),
                }
                .into());
            }
        }

        Ok(Catalog {
            locale,
            denominations,
        })
    }

    /// Builds a catalog from a `(value, singular, plural)` table.
    pub fn from_table(locale: Locale, table: &[(i64, &str, &str)]) -> CoreResult<Self> {
        let denominations = table
            .iter()
            .map(|&(value, singular, plural)| Denomination::new(value, singular, plural))
            .collect::<CoreResult<Vec<_>>>()?;

        Catalog::new(locale, denominations)
    }

    /// Built-in tables are already sorted and unique (checked by unit tests),
    /// so they skip validation and cannot fail.
    fn builtin(locale: Locale, table: &[(i64, &str, &str)]) -> Self {
        let denominations = table
            .iter()
            .map(|&(value_minor, singular, plural)| Denomination {
                value_minor,
                singular: singular.to_string(),
                plural: plural.to_string(),
            })
            .collect();

        Catalog {
            locale,
            denominations,
        }
    }

    /// The en-US (USD) catalog.
    pub fn us_dollar() -> Self {
        Catalog::builtin(Locale::EnUs, USD_DENOMINATIONS)
    }

    /// The fr-FR (EUR) catalog.
    pub fn euro() -> Self {
        Catalog::builtin(Locale::FrFr, EUR_DENOMINATIONS)
    }

    /// The built-in catalog for a locale.
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::EnUs => Catalog::us_dollar(),
            Locale::FrFr => Catalog::euro(),
        }
    }

    #[inline]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Denominations, largest first.
    #[inline]
    pub fn denominations(&self) -> &[Denomination] {
        &self.denominations
    }

    /// Face values, largest first.
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.denominations.iter().map(|d| d.value_minor)
    }

    pub fn len(&self) -> usize {
        self.denominations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.denominations.is_empty()
    }

    /// Smallest face value in the catalog.
    pub fn smallest_value(&self) -> Option<i64> {
        self.denominations.last().map(|d| d.value_minor)
    }

    /// Looks up the `(singular, plural)` names for a face value.
    pub fn names_for(&self, value_minor: i64) -> Option<(&str, &str)> {
        // Descending order, so compare in reverse.
        self.denominations
            .binary_search_by(|d| value_minor.cmp(&d.value_minor))
            .ok()
            .map(|index| {
                let d = &self.denominations[index];
                (d.singular.as_str(), d.plural.as_str())
            })
    }

    /// Looks up a denomination by its singular name.
    pub fn by_name(&self, singular: &str) -> Option<&Denomination> {
        self.denominations.iter().find(|d| d.singular == singular)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
