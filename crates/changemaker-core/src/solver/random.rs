//! Randomized change: repeatedly hand out any denomination that still fits.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::solver::{change_index, minimum_change, Tallies};
use crate::types::Breakdown;

/// Random change generator owning its own random source.
///
/// Create one per call (or per worker): the RNG is never shared, so
/// concurrent requests cannot disturb each other's seeded sequences.
///
/// ## Example
/// ```rust
/// use changemaker_core::catalog::Catalog;
/// use changemaker_core::solver::RandomChangeGenerator;
///
/// let catalog = Catalog::us_dollar();
/// let a = RandomChangeGenerator::seeded(42).generate(300, &catalog).unwrap();
/// let b = RandomChangeGenerator::seeded(42).generate(300, &catalog).unwrap();
///
/// assert_eq!(a, b);
/// assert_eq!(a.total_minor_units(), 300);
/// ```
#[derive(Debug, Clone)]
pub struct RandomChangeGenerator {
    rng: ChaCha8Rng,
}

impl RandomChangeGenerator {
    /// Reproducible generator: same seed, same output.
    pub fn seeded(seed: u64) -> Self {
        RandomChangeGenerator {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        RandomChangeGenerator {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Seeded when `seed` is given, entropy-seeded otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => RandomChangeGenerator::seeded(seed),
            None => RandomChangeGenerator::from_entropy(),
        }
    }

    /// Breaks `change_minor` into randomly chosen denominations.
    ///
    /// ## Algorithm
    /// ```text
    /// remaining = change
    /// loop:
    ///     eligible = denominations with value <= remaining
    ///     eligible empty? → stop
    ///     pick one uniformly, count it, remaining -= value
    /// until remaining == 0
    ///
    /// total(counts) != change? → minimum_change(change)
    /// ```
    ///
    /// The fallback only triggers for catalogs without a unit denomination;
    /// it is silent apart from a `warn!` log line. Change above
    /// [`MAX_CHANGE_MINOR`](crate::solver::MAX_CHANGE_MINOR) is rejected
    /// with [`CoreError::AmountOutOfRange`] before any draw.
    pub fn generate(&mut self, change_minor: i64, catalog: &Catalog) -> CoreResult<Breakdown> {
        random_change(change_minor, catalog, &mut self.rng)
    }
}

/// Random decomposition using a caller-provided random source.
pub fn random_change<R: Rng + ?Sized>(
    change_minor: i64,
    catalog: &Catalog,
    rng: &mut R,
) -> CoreResult<Breakdown> {
    if change_minor < 0 {
        return Err(CoreError::UnsatisfiableChange { change_minor });
    }
    change_index(change_minor)?;

    let values: Vec<i64> = catalog.values().collect();
    let mut tallies = Tallies::new(catalog);
    let mut remaining = change_minor;

    while remaining > 0 {
        // Largest first, so everything from `first_fit` on is eligible.
        let first_fit = values.partition_point(|&value| value > remaining);
        if first_fit == values.len() {
            break;
        }

        let index = rng.gen_range(first_fit..values.len());
        tallies.record(index);
        remaining -= values[index];
    }

    if tallies.total_minor(catalog) != Some(change_minor) {
        warn!(
            change_minor,
            remaining,
            locale = %catalog.locale(),
            "random change did not reach the target, using minimum change"
        );
        return minimum_change(change_minor, catalog);
    }

    let breakdown = tallies.into_breakdown(catalog);
    debug!(
        change_minor,
        pieces = breakdown.piece_count(),
        locale = %catalog.locale(),
        "random change generated"
    );

    Ok(breakdown)
}

// =============================================================================
// Unit Tests
// =============================================================================
