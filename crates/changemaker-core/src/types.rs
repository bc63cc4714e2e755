//! # Domain Types
//!
//! Core domain types used throughout Changemaker.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Locale      │   │  ChangeResult   │   │   Breakdown     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  en-US (USD)    │   │  denominations ─┼──►│  [Tally, ...]   │       │
//! │  │  fr-FR (EUR)    │   │  is_random      │   │  selection order│       │
//! │  └─────────────────┘   │  total_minor    │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │  ChangeRequest  │──►│  ChangeReceipt  │   (request / response pair)  │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::catalog::Denomination;
use crate::error::CoreError;
use crate::DEFAULT_DIVISOR;

// =============================================================================
// Locale
// =============================================================================

/// A supported currency locale. Each maps to exactly one catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Locale {
    /// US dollars.
    #[serde(rename = "en-US")]
    EnUs,
    /// Euros.
    #[serde(rename = "fr-FR")]
    FrFr,
}

impl Locale {
    /// Every known locale, default first.
    pub const ALL: [Locale; 2] = [Locale::EnUs, Locale::FrFr];

    /// Returns the BCP 47 style tag (`"en-US"`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::FrFr => "fr-FR",
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::EnUs
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::ALL
            .into_iter()
            .find(|locale| locale.as_str() == s.trim())
            .ok_or_else(|| CoreError::UnsupportedLocale(s.to_string()))
    }
}

// =============================================================================
// Breakdown
// =============================================================================

/// How many of one denomination were handed out.
///
/// Read-only outside this module; only [`Breakdown::add`] creates or grows
/// a tally, so a breakdown's total always matches what the solver counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    name: String,
    value_minor: i64,
    count: u64,
}

impl Tally {
    /// Singular denomination name, the mapping key ("quarter").
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Face value in minor units.
    #[inline]
    pub fn value_minor(&self) -> i64 {
        self.value_minor
    }

    /// Number of pieces.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Value contributed by this tally (`value × count`).
    #[inline]
    pub fn subtotal_minor(&self) -> i64 {
        self.value_minor * self.count as i64
    }
}

/// Ordered mapping from denomination name to count.
///
/// Insertion order is selection order: the first denomination picked by a
/// solver comes first, and the formatter renders in this order.
///
/// Serializes as a JSON object (`{"quarter": 3, "dime": 1}`) preserving order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breakdown {
    tallies: Vec<Tally>,
}

impl Breakdown {
    /// Creates an empty breakdown ("No change").
    pub fn new() -> Self {
        Breakdown::default()
    }

    /// Adds `count` pieces of `denomination`, merging with an existing entry.
    pub fn add(&mut self, denomination: &Denomination, count: u64) {
        match self
            .tallies
            .iter_mut()
            .find(|tally| tally.name == denomination.singular())
        {
            Some(tally) => tally.count += count,
            None => self.tallies.push(Tally {
                name: denomination.singular().to_string(),
                value_minor: denomination.value_minor(),
                count,
            }),
        }
    }

    /// Count for a denomination name, if present.
    pub fn get(&self, name: &str) -> Option<u64> {
        self.tallies
            .iter()
            .find(|tally| tally.name == name)
            .map(|tally| tally.count)
    }

    /// Iterates tallies in selection order.
    pub fn iter(&self) -> std::slice::Iter<'_, Tally> {
        self.tallies.iter()
    }

    /// Number of distinct denominations.
    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    /// Sum of `value × count` over all tallies.
    pub fn total_minor_units(&self) -> i64 {
        self.tallies.iter().map(Tally::subtotal_minor).sum()
    }

    /// Total number of coins and bills.
    pub fn piece_count(&self) -> u64 {
        self.tallies.iter().map(|tally| tally.count).sum()
    }
}

impl<'a> IntoIterator for &'a Breakdown {
    type Item = &'a Tally;
    type IntoIter = std::slice::Iter<'a, Tally>;

    fn into_iter(self) -> Self::IntoIter {
        self.tallies.iter()
    }
}

impl Serialize for Breakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tallies.len()))?;
        for tally in &self.tallies {
            map.serialize_entry(&tally.name, &tally.count)?;
        }
        map.end()
    }
}

// =============================================================================
// Change Result
// =============================================================================

/// Outcome of one `calculate_change` call.
///
/// ## Invariant
/// `denominations.total_minor_units() == total_minor_units`, which equals the
/// requested change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct ChangeResult {
    /// Denomination name → count, in selection order.
    #[ts(type = "Record<string, number>")]
    pub denominations: Breakdown,

    /// Whether the random generator was selected by the divisibility rule.
    pub is_random: bool,

    /// Change handed out, in minor units.
    pub total_minor_units: i64,
}

impl ChangeResult {
    /// Result for an exact payment.
    pub fn no_change() -> Self {
        ChangeResult {
            denominations: Breakdown::new(),
            is_random: false,
            total_minor_units: 0,
        }
    }

    /// Splits into the `(denominations, is_random)` pair.
    pub fn into_parts(self) -> (Breakdown, bool) {
        (self.denominations, self.is_random)
    }
}

// =============================================================================
// Request / Receipt
// =============================================================================

fn default_divisor() -> u32 {
    DEFAULT_DIVISOR
}

/// A change request as received from a front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChangeRequest {
    /// Amount owed by the customer.
    #[ts(type = "string")]
    pub amount_owed: Decimal,

    /// Amount paid by the customer.
    #[ts(type = "string")]
    pub amount_paid: Decimal,

    /// Currency locale (default: en-US).
    #[serde(default)]
    pub locale: Locale,

    /// Divisor for the random-change rule (default: 3).
    #[serde(default = "default_divisor")]
    pub divisor: u32,

    /// Seed for reproducible random change.
    #[serde(default)]
    #[ts(type = "number | null")]
    pub seed: Option<u64>,
}

impl ChangeRequest {
    /// Creates a request with default locale and divisor.
    pub fn new(amount_owed: Decimal, amount_paid: Decimal) -> Self {
        ChangeRequest {
            amount_owed,
            amount_paid,
            locale: Locale::default(),
            divisor: DEFAULT_DIVISOR,
            seed: None,
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_divisor(mut self, divisor: u32) -> Self {
        self.divisor = divisor;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// The answer to a [`ChangeRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct ChangeReceipt {
    /// Change as a two-decimal amount ("0.88").
    #[ts(type = "string")]
    pub change_amount: Decimal,

    /// Change in minor units (88).
    pub change_minor_units: i64,

    #[ts(type = "Record<string, number>")]
    pub denominations: Breakdown,

    /// Human-readable rendering ("3 quarters,1 dime,3 pennies").
    pub formatted_change: String,

    pub is_random: bool,

    pub locale: Locale,
}

// =============================================================================
// Unit Tests
// =============================================================================
