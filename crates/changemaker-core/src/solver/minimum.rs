//! Minimum-piece change via unbounded coin-change dynamic programming.

use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::solver::{change_index, Tallies};
use crate::types::Breakdown;

/// Sentinel for amounts no combination reaches.
const UNREACHABLE: u32 = u32::MAX;

/// Sentinel for "no denomination recorded".
const NO_CHOICE: u32 = u32::MAX;

/// Breaks `change_minor` into the fewest pieces the catalog allows.
///
/// ## Algorithm
/// ```text
/// best[0] = 0
/// for amount in 1..=change:
///     for (i, value) in catalog (largest first):
///         if value <= amount and best[amount - value] + 1 < best[amount]:
///             best[amount] = best[amount - value] + 1
///             choice[amount] = i
/// walk choice[] back from change to 0, counting pieces
/// ```
/// Only strict improvements overwrite, so ties keep the larger denomination
/// met earlier in the scan. O(change × |catalog|) time, O(change) space.
///
/// ## Errors
/// - [`CoreError::UnsatisfiableChange`] if no exact combination exists
///   (catalog without a unit denomination) or `change_minor` is negative
/// - [`CoreError::AmountOutOfRange`] above
///   [`MAX_CHANGE_MINOR`](crate::solver::MAX_CHANGE_MINOR) or when the
///   tables cannot be allocated
///
/// ## Example
/// ```rust
/// use changemaker_core::catalog::Catalog;
/// use changemaker_core::solver::minimum_change;
///
/// let change = minimum_change(88, &Catalog::us_dollar()).unwrap();
/// assert_eq!(change.get("quarter"), Some(3));
/// assert_eq!(change.get("dime"), Some(1));
/// assert_eq!(change.get("penny"), Some(3));
/// ```
pub fn minimum_change(change_minor: i64, catalog: &Catalog) -> CoreResult<Breakdown> {
    if change_minor == 0 {
        return Ok(Breakdown::new());
    }
    if change_minor < 0 {
        return Err(CoreError::UnsatisfiableChange { change_minor });
    }

    let target = change_index(change_minor)?;

    // Values too large to index can never fit, treat them as usize::MAX.
    let values: Vec<usize> = catalog
        .values()
        .map(|value| usize::try_from(value).unwrap_or(usize::MAX))
        .collect();

    let mut best = dp_table(target, UNREACHABLE, change_minor)?;
    let mut choice = dp_table(target, NO_CHOICE, change_minor)?;
    best[0] = 0;

    for amount in 1..=target {
        for (index, &value) in values.iter().enumerate() {
            if value > amount {
                continue;
            }
            let rest = best[amount - value];
            if rest != UNREACHABLE && rest + 1 < best[amount] {
                best[amount] = rest + 1;
                choice[amount] = index as u32;
            }
        }
    }

    if best[target] == UNREACHABLE {
        return Err(CoreError::UnsatisfiableChange { change_minor });
    }

    let mut tallies = Tallies::new(catalog);
    let mut amount = target;
    while amount > 0 {
        let index = choice[amount] as usize;
        tallies.record(index);
        amount -= values[index];
    }

    debug!(
        change_minor,
        pieces = best[target],
        locale = %catalog.locale(),
        "minimum change solved"
    );

    Ok(tallies.into_breakdown(catalog))
}

/// A `target + 1` table filled with `fill`, or `AmountOutOfRange` if the
/// allocation fails.
fn dp_table(target: usize, fill: u32, change_minor: i64) -> CoreResult<Vec<u32>> {
    let len = target + 1;
    let mut table = Vec::new();
    table
        .try_reserve_exact(len)
        .map_err(|_| CoreError::AmountOutOfRange {
            amount: Money::from_cents(change_minor).to_string(),
        })?;
    table.resize(len, fill);
    Ok(table)
}

// =============================================================================
// Unit Tests
// =============================================================================
