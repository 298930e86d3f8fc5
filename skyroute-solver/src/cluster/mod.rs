//! k-means partitioning of delivery points.
//!
//! [`cluster`] runs Lloyd's algorithm from a random initial selection of
//! centres until the assignment stops changing. A cluster that loses all of
//! its points is reseeded at a random input point instead of being dropped, so
//! the result always has exactly `k` centres. [`best_of_restarts`] repeats the
//! whole procedure and keeps the result with the lowest sum of squared errors.

mod restarts;
mod sse;

pub use restarts::{ScoredClustering, best_of_restarts};
pub use sse::{squared_error, sum_squared_error};

use geo::{Centroid, MultiPoint};
use log::{debug, warn};
use rand::Rng;
use rand::seq::index;
use skyroute_core::{Point, PointSet};
use thiserror::Error;

/// Default bound on refinement iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 1_000;

/// Tuning for a single clustering run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterConfig {
    /// Upper bound on refinement iterations before the run is reported as
    /// unconverged.
    pub max_iterations: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Errors returned by [`cluster`] and [`best_of_restarts`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClusterError {
    /// `k` was zero or larger than the number of points.
    #[error("cannot form {k} clusters from {points} points")]
    InvalidClusterCount {
        /// Requested cluster count.
        k: usize,
        /// Available points.
        points: usize,
    },
    /// No restart trials were requested.
    #[error("at least one clustering trial is required")]
    NoTrials,
}

/// The outcome of one clustering run.
///
/// `labels[i]` is the cluster of point `i`; `members[c]` lists the points of
/// cluster `c` in ascending order. Every point index appears in exactly one
/// member list.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    centers: Vec<Point>,
    labels: Vec<usize>,
    members: Vec<Vec<usize>>,
    iterations: usize,
    converged: bool,
}

impl Clustering {
    /// Number of clusters.
    #[must_use]
    pub fn k(&self) -> usize {
        self.centers.len()
    }

    /// Centre of each cluster.
    #[must_use]
    pub fn centers(&self) -> &[Point] {
        &self.centers
    }

    /// Cluster index of each point.
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Point indices of each cluster.
    #[must_use]
    pub fn members(&self) -> &[Vec<usize>] {
        &self.members
    }

    /// Point indices of cluster `index`, if it exists.
    #[must_use]
    pub fn cluster(&self, index: usize) -> Option<&[usize]> {
        self.members.get(index).map(Vec::as_slice)
    }

    /// Refinement iterations performed.
    #[must_use]
    pub const fn iterations(&self) -> usize {
        self.iterations
    }

    /// Whether the assignment reached a fixed point within the iteration bound.
    #[must_use]
    pub const fn converged(&self) -> bool {
        self.converged
    }

    /// Sum of squared errors of this clustering over `points`.
    #[must_use]
    pub fn sse(&self, points: &PointSet) -> f64 {
        sum_squared_error(&self.centers, &self.members, points)
    }
}

/// Partition `points` into `k` clusters.
///
/// Initial centres are `k` distinct input points drawn without replacement.
/// Each iteration moves every centre to the mean of its points and reassigns
/// every point to its nearest centre, preferring the lowest centre index on
/// ties. The run stops once an assignment repeats, or after
/// [`ClusterConfig::max_iterations`] iterations, in which case the result is
/// flagged as unconverged.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use skyroute_core::{Point, PointSet};
/// use skyroute_solver::cluster::{ClusterConfig, cluster};
///
/// let points: PointSet = [(0.0, 0.0), (0.0, 1.0), (50.0, 50.0), (51.0, 50.0)]
///     .into_iter()
///     .map(Point::from)
///     .collect();
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let clustering = cluster(2, &points, &ClusterConfig::default(), &mut rng)?;
/// assert_eq!(clustering.k(), 2);
/// assert_eq!(clustering.labels()[0], clustering.labels()[1]);
/// assert_ne!(clustering.labels()[0], clustering.labels()[2]);
/// # Ok::<(), skyroute_solver::ClusterError>(())
/// ```
pub fn cluster<R>(
    k: usize,
    points: &PointSet,
    config: &ClusterConfig,
    rng: &mut R,
) -> Result<Clustering, ClusterError>
where
    R: Rng + ?Sized,
{
    let n = points.len();
    if k == 0 || k > n {
        return Err(ClusterError::InvalidClusterCount { k, points: n });
    }

    let centers: Vec<Point> = index::sample(rng, n, k)
        .into_iter()
        .filter_map(|i| points.get(i))
        .collect();
    Ok(refine(centers, points, config.max_iterations.max(1), rng))
}

// Lloyd iterations from the given centres. On the unconverged exit the centres
// are moved once more so they stay the means of the returned assignment.
fn refine<R>(
    mut centers: Vec<Point>,
    points: &PointSet,
    max_iterations: usize,
    rng: &mut R,
) -> Clustering
where
    R: Rng + ?Sized,
{
    let k = centers.len();
    let mut labels = assign(points, &centers);
    let mut iterations = 0_usize;

    let converged = loop {
        iterations += 1;
        update_centers(&mut centers, &labels, points, rng);
        let next = assign(points, &centers);
        if next == labels {
            break true;
        }
        labels = next;
        if iterations >= max_iterations {
            warn!("clustering with k = {k} did not converge within {max_iterations} iterations");
            update_centers(&mut centers, &labels, points, rng);
            break false;
        }
    };

    let members = group_members(&labels, k);
    Clustering {
        centers,
        labels,
        members,
        iterations,
        converged,
    }
}

/// Coordinate-wise mean of `cluster`, or `None` when it is empty.
///
/// # Examples
///
/// ```
/// use skyroute_core::Point;
/// use skyroute_solver::cluster::centroid;
///
/// let cluster = [Point::new(1.0, 2.0), Point::new(3.0, 4.0), Point::new(5.0, 6.0)];
/// assert_eq!(centroid(&cluster), Some(Point::new(3.0, 4.0)));
/// assert_eq!(centroid(std::iter::empty()), None);
/// ```
pub fn centroid<'a, I>(cluster: I) -> Option<Point>
where
    I: IntoIterator<Item = &'a Point>,
{
    let multi: MultiPoint<f64> = cluster.into_iter().map(Point::coord).collect();
    multi.centroid().map(|mean| Point::new(mean.x(), mean.y()))
}

fn assign(points: &PointSet, centers: &[Point]) -> Vec<usize> {
    points
        .iter()
        .map(|point| nearest_center(point, centers))
        .collect()
}

// Strict comparison keeps the lowest index on ties.
fn nearest_center(point: &Point, centers: &[Point]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (index, center) in centers.iter().enumerate() {
        let distance = point.distance(center);
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best
}

fn update_centers<R>(centers: &mut [Point], labels: &[usize], points: &PointSet, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let members = group_members(labels, centers.len());
    for (index, (center, cluster)) in centers.iter_mut().zip(&members).enumerate() {
        if let Some(mean) = centroid(cluster.iter().filter_map(|&i| points.as_slice().get(i))) {
            *center = mean;
        } else if let Some(reseed) = points.get(rng.gen_range(0..points.len())) {
            debug!("cluster {index} is empty; reseeding its centre at {reseed:?}");
            *center = reseed;
        }
    }
}

fn group_members(labels: &[usize], k: usize) -> Vec<Vec<usize>> {
    let mut members = vec![Vec::new(); k];
    for (point, &label) in labels.iter().enumerate() {
        if let Some(cluster) = members.get_mut(label) {
            cluster.push(point);
        }
    }
    members
}
