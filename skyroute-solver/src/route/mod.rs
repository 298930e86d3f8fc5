//! Time-boxed route search within one cluster.
//!
//! A single attempt builds a closed tour with a randomised nearest-neighbour
//! heuristic: from the current position it scans the unvisited stops for the
//! closest one, but each time a strictly closer stop turns up it may keep the
//! previous candidate instead, with probability [`SkipChance`]. The search
//! repeats attempts until a [`Deadline`] passes and keeps the shortest tour.

use std::collections::HashSet;
use std::time::Duration;

use log::trace;
use rand::Rng;
use skyroute_core::{Clock, Deadline, Point, PointSet, Route};
use thiserror::Error;

/// Default probability of keeping a farther candidate.
pub const DEFAULT_SKIP_CHANCE: f64 = 0.1;

/// Default wall-clock budget per cluster.
pub const DEFAULT_SEARCH_DURATION: Duration = Duration::from_secs(1);

/// Probability in `[0, 1]` of ignoring a strictly closer candidate.
///
/// Zero reduces each attempt to plain greedy nearest neighbour.
///
/// # Examples
///
/// ```
/// use skyroute_solver::SkipChance;
///
/// assert!(SkipChance::new(0.25).is_ok());
/// assert!(SkipChance::new(1.5).is_err());
/// assert!(SkipChance::GREEDY.is_greedy());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SkipChance(f64);

impl SkipChance {
    /// Never skip: deterministic greedy construction.
    pub const GREEDY: Self = Self(0.0);

    /// Validate a probability.
    pub fn new(probability: f64) -> Result<Self, RouteSearchError> {
        if (0.0..=1.0).contains(&probability) {
            Ok(Self(probability))
        } else {
            Err(RouteSearchError::InvalidSkipChance { value: probability })
        }
    }

    /// The probability.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Whether attempts are deterministic.
    #[must_use]
    pub fn is_greedy(self) -> bool {
        self.0 <= 0.0
    }

    fn skips<R>(self, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        !self.is_greedy() && rng.gen_bool(self.0)
    }
}

impl Default for SkipChance {
    fn default() -> Self {
        Self(DEFAULT_SKIP_CHANCE)
    }
}

impl TryFrom<f64> for SkipChance {
    type Error = RouteSearchError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Budget and exploration settings for [`search_route`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSearchConfig {
    /// Wall-clock budget for one cluster.
    pub duration: Duration,
    /// Exploration strategy for each attempt.
    pub skip_chance: SkipChance,
}

impl Default for RouteSearchConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_SEARCH_DURATION,
            skip_chance: SkipChance::default(),
        }
    }
}

/// Errors returned by the route constructor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteSearchError {
    /// A skip probability outside `[0, 1]`.
    #[error("skip chance must be between 0 and 1, got {value}")]
    InvalidSkipChance {
        /// Rejected probability.
        value: f64,
    },
    /// A member index outside the point set.
    #[error("cluster member {index} is outside the {available}-point input")]
    UnknownMember {
        /// Offending index.
        index: usize,
        /// Size of the point set.
        available: usize,
    },
    /// A member index listed twice.
    #[error("cluster member {index} is listed more than once")]
    DuplicateMember {
        /// Offending index.
        index: usize,
    },
}

/// Outcome of [`search_route`].
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSearch {
    route: Route,
    attempts: u64,
    improvements: u64,
}

impl RouteSearch {
    /// Shortest route found.
    #[must_use]
    pub const fn route(&self) -> &Route {
        &self.route
    }

    /// Tours constructed before the deadline.
    #[must_use]
    pub const fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Attempts that beat the best tour so far, excluding the first.
    #[must_use]
    pub const fn improvements(&self) -> u64 {
        self.improvements
    }

    /// Consume the search, returning the route.
    #[must_use]
    pub fn into_route(self) -> Route {
        self.route
    }
}

/// Build one randomised nearest-neighbour tour of `members` from `start`.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use skyroute_core::{Point, PointSet};
/// use skyroute_solver::SkipChance;
/// use skyroute_solver::route::construct_route;
///
/// let points: PointSet = [(3.0, 0.0), (1.0, 0.0), (2.0, 0.0)]
///     .into_iter()
///     .map(Point::from)
///     .collect();
/// let mut rng = ChaCha8Rng::seed_from_u64(0);
/// let start = Point::new(0.0, 0.0);
/// let route = construct_route(start, &[0, 1, 2], &points, SkipChance::GREEDY, &mut rng)?;
/// assert_eq!(route.order(), &[1, 2, 0]);
/// assert!((route.length() - 6.0).abs() < 1e-9);
/// # Ok::<(), skyroute_solver::RouteSearchError>(())
/// ```
pub fn construct_route<R>(
    start: Point,
    members: &[usize],
    points: &PointSet,
    skip_chance: SkipChance,
    rng: &mut R,
) -> Result<Route, RouteSearchError>
where
    R: Rng + ?Sized,
{
    let stops = resolve_members(members, points)?;
    Ok(build_tour(start, stops, skip_chance, rng))
}

/// Search for a short closed tour of `members` until `config.duration` has
/// elapsed on `clock`.
///
/// At least one attempt is always made. A greedy [`SkipChance`] stops after
/// the first attempt, since every further attempt would be identical. An
/// empty member set yields [`Route::empty`] without reading the clock.
pub fn search_route<R, C>(
    start: Point,
    members: &[usize],
    points: &PointSet,
    config: &RouteSearchConfig,
    rng: &mut R,
    clock: &C,
) -> Result<RouteSearch, RouteSearchError>
where
    R: Rng + ?Sized,
    C: Clock + ?Sized,
{
    let stops = resolve_members(members, points)?;
    if stops.is_empty() {
        return Ok(RouteSearch {
            route: Route::empty(),
            attempts: 0,
            improvements: 0,
        });
    }

    let deadline = Deadline::start(clock, config.duration);
    let mut best = build_tour(start, stops.clone(), config.skip_chance, rng);
    let mut attempts = 1_u64;
    let mut improvements = 0_u64;

    if !config.skip_chance.is_greedy() {
        while !deadline.expired(clock) {
            let candidate = build_tour(start, stops.clone(), config.skip_chance, rng);
            attempts += 1;
            if candidate.length() < best.length() {
                trace!(
                    "attempt {attempts} shortened the route from {:.3} to {:.3}",
                    best.length(),
                    candidate.length()
                );
                best = candidate;
                improvements += 1;
            }
        }
    }

    Ok(RouteSearch {
        route: best,
        attempts,
        improvements,
    })
}

fn resolve_members(
    members: &[usize],
    points: &PointSet,
) -> Result<Vec<(usize, Point)>, RouteSearchError> {
    let mut seen = HashSet::with_capacity(members.len());
    members
        .iter()
        .map(|&index| {
            if !seen.insert(index) {
                return Err(RouteSearchError::DuplicateMember { index });
            }
            points
                .get(index)
                .map(|point| (index, point))
                .ok_or(RouteSearchError::UnknownMember {
                    index,
                    available: points.len(),
                })
        })
        .collect()
}

#[expect(
    clippy::float_arithmetic,
    reason = "route length is a floating-point sum of legs"
)]
fn build_tour<R>(
    start: Point,
    mut remaining: Vec<(usize, Point)>,
    skip_chance: SkipChance,
    rng: &mut R,
) -> Route
where
    R: Rng + ?Sized,
{
    let mut order = Vec::with_capacity(remaining.len());
    let mut length = 0.0;
    let mut current = start;
    while let Some(position) = pick_next(&current, &remaining, skip_chance, rng) {
        let (index, point) = remaining.remove(position);
        length += current.distance(&point);
        order.push(index);
        current = point;
    }
    length += current.distance(&start);
    Route::new(order, length)
}

// The first candidate always seeds the running best; only later, strictly
// closer candidates are subject to skipping.
fn pick_next<R>(
    current: &Point,
    remaining: &[(usize, Point)],
    skip_chance: SkipChance,
    rng: &mut R,
) -> Option<usize>
where
    R: Rng + ?Sized,
{
    let mut best: Option<(usize, f64)> = None;
    for (position, (_, point)) in remaining.iter().enumerate() {
        let distance = current.distance(point);
        best = match best {
            None => Some((position, distance)),
            Some((_, best_distance)) if distance < best_distance && !skip_chance.skips(rng) => {
                Some((position, distance))
            }
            kept => kept,
        };
    }
    best.map(|(position, _)| position)
}
