//! Human-readable rendering of a change breakdown.

use crate::catalog::Catalog;
use crate::types::Breakdown;

/// Rendering of an empty breakdown.
pub const NO_CHANGE: &str = "No change";

/// Renders a breakdown as `"3 quarters,1 dime,3 pennies"`.
///
/// ## Rules
/// - segments follow the breakdown's selection order, joined by `,`
/// - zero counts are skipped
/// - count 1 uses the singular name, anything else the plural
/// - an empty breakdown renders as [`NO_CHANGE`]
///
/// Names missing from `catalog` are rendered as written.
///
/// ## Example
/// ```rust
/// use changemaker_core::catalog::Catalog;
/// use changemaker_core::format::format_change_string;
/// use changemaker_core::solver::minimum_change;
///
/// let catalog = Catalog::us_dollar();
/// let change = minimum_change(88, &catalog).unwrap();
/// assert_eq!(format_change_string(&change, &catalog), "3 quarters,1 dime,3 pennies");
/// ```
pub fn format_change_string(breakdown: &Breakdown, catalog: &Catalog) -> String {
    let segments: Vec<String> = breakdown
        .iter()
        .filter(|tally| tally.count() > 0)
        .map(|tally| {
            if tally.count() == 1 {
                format!("1 {}", tally.name())
            } else {
                let plural = catalog
                    .by_name(tally.name())
                    .map(|d| d.plural())
                    .unwrap_or(tally.name());
                format!("{} {}", tally.count(), plural)
            }
        })
        .collect();

    if segments.is_empty() {
        return NO_CHANGE.to_string();
    }

    segments.join(",")
}
