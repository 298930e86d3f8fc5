//! Proptest strategies for solver property-based tests.
//!
//! The generators keep coordinates on the millimetre grid used by
//! [`Point`], so generated inputs survive rounding unchanged.

use std::collections::HashSet;

use proptest::prelude::*;
use skyroute_core::{Point, PointSet};

/// Strategy for a single coordinate pair inside a 2 km square.
fn coordinate_strategy() -> impl Strategy<Value = (f64, f64)> {
    (-1_000_000_i32..=1_000_000, -1_000_000_i32..=1_000_000)
        .prop_map(|(x, y)| (f64::from(x) / 1_000.0, f64::from(y) / 1_000.0))
}

/// Strategy for a point set with between `min_count` and `max_count` points.
///
/// Duplicates are allowed; they exercise empty-cluster recovery.
pub fn point_set_strategy(min_count: usize, max_count: usize) -> impl Strategy<Value = PointSet> {
    proptest::collection::vec(coordinate_strategy(), min_count..=max_count)
        .prop_map(|coords| coords.into_iter().map(Point::from).collect())
}

/// Strategy for a point set paired with a valid cluster count.
pub fn point_set_with_k(
    min_count: usize,
    max_count: usize,
    max_k: usize,
) -> impl Strategy<Value = (PointSet, usize)> {
    point_set_strategy(min_count, max_count).prop_flat_map(move |points| {
        let upper = points.len().min(max_k);
        (Just(points), 1..=upper)
    })
}

/// Assert that `route` visits exactly the indices in `members`, once each.
///
/// # Errors
///
/// Returns a proptest failure if any member is missing or repeated.
pub fn assert_permutation_of(
    route: &[usize],
    members: &[usize],
) -> Result<(), proptest::test_runner::TestCaseError> {
    let unique: HashSet<usize> = route.iter().copied().collect();
    proptest::prop_assert_eq!(unique.len(), route.len(), "route repeats a stop: {:?}", route);
    let expected: HashSet<usize> = members.iter().copied().collect();
    proptest::prop_assert_eq!(unique, expected);
    Ok(())
}

/// Assert that `members` and `labels` describe the same partition of `0..n`.
///
/// # Errors
///
/// Returns a proptest failure if a point is missing, repeated or mislabelled.
pub fn assert_partition(
    members: &[Vec<usize>],
    labels: &[usize],
    n: usize,
) -> Result<(), proptest::test_runner::TestCaseError> {
    proptest::prop_assert_eq!(labels.len(), n);
    let mut seen = HashSet::with_capacity(n);
    for (label, cluster) in members.iter().enumerate() {
        for &index in cluster {
            proptest::prop_assert!(seen.insert(index), "point {} assigned twice", index);
            proptest::prop_assert_eq!(labels.get(index), Some(&label));
        }
    }
    proptest::prop_assert_eq!(seen.len(), n);
    Ok(())
}
