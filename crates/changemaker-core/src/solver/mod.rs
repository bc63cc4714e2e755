//! # Change Solvers
//!
//! Two ways to break a change amount into denominations.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  change (minor units) + &Catalog                                        │
//! │       │                                                                 │
//! │       ├──► minimum::minimum_change     exact DP, fewest pieces          │
//! │       │                                                                 │
//! │       └──► random::RandomChangeGenerator                                │
//! │                 uniform pick among fitting denominations,               │
//! │                 falls back to minimum_change if the sum is off          │
//! │                                                                         │
//! │  Both count by catalog position (Tallies) and name only at the end.    │
//! │  Both reject change above MAX_CHANGE_MINOR with AmountOutOfRange.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod minimum;
pub mod random;

pub use minimum::minimum_change;
pub use random::RandomChangeGenerator;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Breakdown;

/// Largest change either solver accepts: 100,000.00 in minor units.
///
/// The DP keeps two `u32` tables of `change + 1` entries (80 MB at this
/// bound); the random walk draws at most `change` pieces.
pub const MAX_CHANGE_MINOR: i64 = 10_000_000;

/// Checks `change_minor` against [`MAX_CHANGE_MINOR`] and returns it as a
/// table index.
///
/// ## Errors
/// [`CoreError::AmountOutOfRange`] above the bound.
pub(crate) fn change_index(change_minor: i64) -> CoreResult<usize> {
    if change_minor > MAX_CHANGE_MINOR {
        return Err(CoreError::AmountOutOfRange {
            amount: Money::from_cents(change_minor).to_string(),
        });
    }
    usize::try_from(change_minor).map_err(|_| CoreError::AmountOutOfRange {
        amount: Money::from_cents(change_minor).to_string(),
    })
}

/// Per-position piece counts plus the order positions were first selected.
#[derive(Debug)]
pub(crate) struct Tallies {
    counts: Vec<u64>,
    order: Vec<usize>,
}

impl Tallies {
    pub(crate) fn new(catalog: &Catalog) -> Self {
        Tallies {
            counts: vec![0; catalog.len()],
            order: Vec::new(),
        }
    }

    /// Counts one piece of the denomination at `index`.
    pub(crate) fn record(&mut self, index: usize) {
        if self.counts[index] == 0 {
            self.order.push(index);
        }
        self.counts[index] += 1;
    }

    /// Value reached by the recorded pieces, `None` on overflow.
    pub(crate) fn total_minor(&self, catalog: &Catalog) -> Option<i64> {
        catalog
            .values()
            .zip(&self.counts)
            .try_fold(0i64, |total, (value, &count)| {
                let count = i64::try_from(count).ok()?;
                total.checked_add(value.checked_mul(count)?)
            })
    }

    /// Names the counts, in first-selection order.
    pub(crate) fn into_breakdown(self, catalog: &Catalog) -> Breakdown {
        let denominations = catalog.denominations();
        let mut breakdown = Breakdown::new();
        for index in self.order {
            breakdown.add(&denominations[index], self.counts[index]);
        }
        breakdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_index_bounds() {
        assert_eq!(change_index(0).unwrap(), 0);
        assert_eq!(change_index(MAX_CHANGE_MINOR).unwrap(), 10_000_000);

        let err = change_index(MAX_CHANGE_MINOR + 1).unwrap_err();
        assert!(matches!(
            err,
            CoreError::AmountOutOfRange { ref amount } if amount == "100000.01"
        ));
        assert!(change_index(i64::MAX).is_err());
    }

    #[test]
    fn test_tallies_order_and_total() {
        let catalog = Catalog::us_dollar();
        let mut tallies = Tallies::new(&catalog);

        // dime (7), penny (9), dime again
        tallies.record(7);
        tallies.record(9);
        tallies.record(7);

        assert_eq!(tallies.total_minor(&catalog), Some(21));

        let breakdown = tallies.into_breakdown(&catalog);
        let names: Vec<&str> = breakdown.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["dime", "penny"]);
        assert_eq!(breakdown.get("dime"), Some(2));
    }
}
