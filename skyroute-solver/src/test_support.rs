//! Test-only utilities for `skyroute-solver`.
//!
//! The helpers in this module are available to unit tests, behaviour tests and
//! benchmarks. They are gated behind the `test-support` feature (and
//! `cfg(test)`).

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use skyroute_core::{Point, PointSet};

use crate::Clustering;

/// Generate `per_cluster` points scattered uniformly within `spread` of each
/// centre in `centres`.
///
/// Points are emitted centre by centre, so indices `c * per_cluster ..
/// (c + 1) * per_cluster` belong to centre `c`.
///
/// # Examples
/// ```rust
/// use skyroute_solver::test_support::clustered_points;
///
/// let points = clustered_points(&[(0.0, 0.0), (100.0, 100.0)], 10, 2.0, 42);
/// assert_eq!(points.len(), 20);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "offsets are added to floating-point centres"
)]
pub fn clustered_points(
    centres: &[(f64, f64)],
    per_cluster: usize,
    spread: f64,
    seed: u64,
) -> PointSet {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    centres
        .iter()
        .flat_map(|&(x, y)| std::iter::repeat_n((x, y), per_cluster))
        .map(|(x, y)| {
            Point::new(
                x + rng.gen_range(-spread..=spread),
                y + rng.gen_range(-spread..=spread),
            )
        })
        .collect()
}

/// Whether every index in `0..n` appears in exactly one cluster of
/// `clustering`, and the labels agree with the member lists.
#[must_use]
pub fn is_partition(clustering: &Clustering, n: usize) -> bool {
    let mut seen = HashSet::with_capacity(n);
    for (label, members) in clustering.members().iter().enumerate() {
        for &index in members {
            if index >= n || !seen.insert(index) {
                return false;
            }
            if clustering.labels().get(index) != Some(&label) {
                return false;
            }
        }
    }
    seen.len() == n && clustering.labels().len() == n
}
