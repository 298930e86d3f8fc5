//! Sum-of-squared-error scoring for clusterings.

use skyroute_core::{Point, PointSet};

/// Sum of squared distances from `center` to each point of `cluster`.
///
/// # Examples
///
/// ```
/// use skyroute_core::Point;
/// use skyroute_solver::cluster::squared_error;
///
/// let cluster = [Point::new(1.0, 2.0), Point::new(3.0, 4.0), Point::new(5.0, 6.0)];
/// let sse = squared_error(&Point::new(3.0, 4.0), &cluster);
/// assert!((sse - 16.0).abs() < 1e-9);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "squared error is a floating-point sum"
)]
pub fn squared_error<'a, I>(center: &Point, cluster: I) -> f64
where
    I: IntoIterator<Item = &'a Point>,
{
    cluster
        .into_iter()
        .map(|point| {
            let distance = center.distance(point);
            distance * distance
        })
        .sum()
}

/// Total squared error of a clustering.
///
/// `centers[c]` is paired with the point indices in `members[c]`; indices
/// outside `points` contribute nothing.
pub fn sum_squared_error(centers: &[Point], members: &[Vec<usize>], points: &PointSet) -> f64 {
    centers
        .iter()
        .zip(members)
        .map(|(center, cluster)| {
            squared_error(
                center,
                cluster.iter().filter_map(|&i| points.as_slice().get(i)),
            )
        })
        .sum()
}
