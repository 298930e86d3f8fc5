//! Benchmark support utilities for the solver.
//!
//! Provides deterministic clustered delivery points for reproducible
//! benchmarks.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use skyroute_core::{Point, PointSet};

/// Seed for deterministic random number generation in benchmarks.
pub const BENCHMARK_SEED: u64 = 42;

/// Number of neighbourhoods the deliveries are drawn from.
const NEIGHBOURHOOD_COUNT: usize = 4;

/// Half-width of each neighbourhood in metres.
const NEIGHBOURHOOD_SPREAD: f64 = 150.0;

/// Side of the square holding the neighbourhood centres, in metres.
const AREA_SIZE: f64 = 5_000.0;

/// Generate `count` delivery points spread across a few neighbourhoods.
///
/// Points are assigned to neighbourhoods round-robin.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "Required for coordinate offset")]
pub fn generate_deliveries(count: usize, seed: u64) -> PointSet {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let centres: Vec<(f64, f64)> = (0..NEIGHBOURHOOD_COUNT)
        .map(|_| (rng.gen_range(0.0..AREA_SIZE), rng.gen_range(0.0..AREA_SIZE)))
        .collect();

    centres
        .iter()
        .cycle()
        .take(count)
        .map(|&(x, y)| {
            Point::new(
                x + rng.gen_range(-NEIGHBOURHOOD_SPREAD..=NEIGHBOURHOOD_SPREAD),
                y + rng.gen_range(-NEIGHBOURHOOD_SPREAD..=NEIGHBOURHOOD_SPREAD),
            )
        })
        .collect()
}
