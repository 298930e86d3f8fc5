//! Fleet planning: clustering, routing and solution assembly.
//!
//! [`Planner`] ties the two solver stages together. For each fleet size it
//! keeps the best of [`PlannerConfig::restarts`] clusterings, places one
//! launch pad at every cluster centre, searches each cluster for a short
//! closed tour and hands the figures to [`Solution::new`] for validation.

use std::ops::RangeInclusive;

use log::debug;
use rand::Rng;
use skyroute_core::{
    Clock, MAX_DRONES, PointSet, Solution, SolutionError, SolutionParts, SystemClock,
};
use thiserror::Error;

use crate::cluster::{ClusterConfig, ClusterError, ScoredClustering, best_of_restarts};
use crate::route::{RouteSearchConfig, RouteSearchError, search_route};

/// Default clustering trials per fleet size.
pub const DEFAULT_RESTARTS: usize = 100;

/// Settings shared by every fleet size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerConfig {
    /// Clustering trials per fleet size.
    pub restarts: usize,
    /// Largest fleet size to plan for.
    pub max_drones: u8,
    /// Tuning for each clustering trial.
    pub cluster: ClusterConfig,
    /// Budget and exploration for each drone's route search.
    pub route_search: RouteSearchConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            restarts: DEFAULT_RESTARTS,
            max_drones: MAX_DRONES,
            cluster: ClusterConfig::default(),
            route_search: RouteSearchConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// Check the configuration before any planning starts.
    ///
    /// # Examples
    ///
    /// ```
    /// use skyroute_solver::{PlannerConfig, PlannerConfigError};
    ///
    /// let config = PlannerConfig { max_drones: 5, ..PlannerConfig::default() };
    /// assert_eq!(config.validate(), Err(PlannerConfigError::InvalidMaxDrones { value: 5 }));
    /// ```
    pub fn validate(&self) -> Result<(), PlannerConfigError> {
        if self.restarts == 0 {
            return Err(PlannerConfigError::NoRestarts);
        }
        if self.max_drones == 0 || self.max_drones > MAX_DRONES {
            return Err(PlannerConfigError::InvalidMaxDrones {
                value: self.max_drones,
            });
        }
        if self.cluster.max_iterations == 0 {
            return Err(PlannerConfigError::ZeroIterations);
        }
        if self.route_search.duration.is_zero() {
            return Err(PlannerConfigError::ZeroSearchDuration);
        }
        Ok(())
    }
}

/// Errors raised by [`PlannerConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlannerConfigError {
    /// `restarts` was zero.
    #[error("at least one clustering restart is required")]
    NoRestarts,
    /// `max_drones` was outside `1..=4`.
    #[error("max drones must be between 1 and {MAX_DRONES}, got {value}")]
    InvalidMaxDrones {
        /// Rejected fleet size.
        value: u8,
    },
    /// The route search budget was zero.
    #[error("route search duration must be greater than zero")]
    ZeroSearchDuration,
    /// The clustering iteration bound was zero.
    #[error("clustering needs at least one iteration")]
    ZeroIterations,
}

/// Errors raised while planning a single fleet size.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// There was nothing to plan for.
    #[error("no delivery points to plan for")]
    EmptyPointSet,
    /// The fleet size was outside the configured range.
    #[error("cannot plan for {drones} drones; the limit is {max}")]
    UnsupportedFleetSize {
        /// Requested fleet size.
        drones: u8,
        /// Configured maximum.
        max: u8,
    },
    /// Clustering failed.
    #[error(transparent)]
    Cluster(#[from] ClusterError),
    /// Route search failed.
    #[error(transparent)]
    Route(#[from] RouteSearchError),
    /// The assembled figures were inconsistent.
    #[error(transparent)]
    Solution(#[from] SolutionError),
}

/// The plan for one fleet size.
#[derive(Debug, Clone, PartialEq)]
pub struct FleetPlan {
    clustering: ScoredClustering,
    solution: Solution,
}

impl FleetPlan {
    /// The winning clustering and its score.
    #[must_use]
    pub const fn clustering(&self) -> &ScoredClustering {
        &self.clustering
    }

    /// The validated solution.
    #[must_use]
    pub const fn solution(&self) -> &Solution {
        &self.solution
    }

    /// Number of drones in the fleet.
    #[must_use]
    pub const fn drones(&self) -> u8 {
        self.solution.drone_count()
    }

    /// Consume the plan, returning the solution.
    #[must_use]
    pub fn into_solution(self) -> Solution {
        self.solution
    }
}

/// Plans delivery routes for every fleet size up to a limit.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use skyroute_core::{Point, PointSet};
/// use skyroute_solver::{Planner, PlannerConfig, RouteSearchConfig};
///
/// let points: PointSet = [(0.0, 0.0), (1.0, 0.0), (40.0, 40.0), (41.0, 40.0)]
///     .into_iter()
///     .map(Point::from)
///     .collect();
/// let config = PlannerConfig {
///     restarts: 10,
///     max_drones: 2,
///     route_search: RouteSearchConfig {
///         duration: Duration::from_millis(5),
///         ..RouteSearchConfig::default()
///     },
///     ..PlannerConfig::default()
/// };
/// let planner = Planner::new(config)?;
/// let plans = planner.plan(&points, &mut ChaCha8Rng::seed_from_u64(1));
/// assert_eq!(plans.len(), 2);
/// # Ok::<(), skyroute_solver::PlannerConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Planner<C = SystemClock> {
    config: PlannerConfig,
    clock: C,
}

impl Planner<SystemClock> {
    /// Create a planner reading wall-clock time.
    pub fn new(config: PlannerConfig) -> Result<Self, PlannerConfigError> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Planner<C> {
    /// Create a planner reading time from `clock`.
    pub fn with_clock(config: PlannerConfig, clock: C) -> Result<Self, PlannerConfigError> {
        config.validate()?;
        Ok(Self { config, clock })
    }

    /// The validated configuration.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Fleet sizes worth planning for `points` delivery points.
    ///
    /// A fleet never has more drones than points, so small inputs shrink the
    /// range.
    #[must_use]
    pub fn fleet_sizes(&self, points: usize) -> RangeInclusive<u8> {
        let cap = u8::try_from(points).unwrap_or(u8::MAX);
        1..=cap.min(self.config.max_drones)
    }

    /// Plan routes for a fleet of `drones`.
    pub fn plan_fleet<R>(
        &self,
        points: &PointSet,
        drones: u8,
        rng: &mut R,
    ) -> Result<FleetPlan, PlanError>
    where
        R: Rng + ?Sized,
    {
        if points.is_empty() {
            return Err(PlanError::EmptyPointSet);
        }
        if drones == 0 || drones > self.config.max_drones {
            return Err(PlanError::UnsupportedFleetSize {
                drones,
                max: self.config.max_drones,
            });
        }

        let clustering = best_of_restarts(
            usize::from(drones),
            points,
            self.config.restarts,
            &self.config.cluster,
            rng,
        )?;
        debug!(
            "{drones} drone(s): best clustering from trial {} with SSE {:.3}",
            clustering.trial(),
            clustering.sse()
        );

        let parts = self.route_clusters(points, drones, &clustering, rng)?;
        let solution = Solution::new(parts)?;
        debug!(
            "{drones} drone(s): total route {:.3}",
            solution.total_route_length()
        );
        Ok(FleetPlan {
            clustering,
            solution,
        })
    }

    /// Plan every fleet size from one drone up to the configured limit.
    ///
    /// Each entry stands alone: a failure for one fleet size does not stop
    /// the others.
    pub fn plan<R>(&self, points: &PointSet, rng: &mut R) -> Vec<Result<FleetPlan, PlanError>>
    where
        R: Rng + ?Sized,
    {
        if points.is_empty() {
            return vec![Err(PlanError::EmptyPointSet)];
        }
        self.fleet_sizes(points.len())
            .map(|drones| self.plan_fleet(points, drones, rng))
            .collect()
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "the fleet total is a sum of route lengths"
    )]
    fn route_clusters<R>(
        &self,
        points: &PointSet,
        drones: u8,
        scored: &ScoredClustering,
        rng: &mut R,
    ) -> Result<SolutionParts, PlanError>
    where
        R: Rng + ?Sized,
    {
        let clustering = scored.clustering();
        let mut parts = SolutionParts {
            drone_count: drones,
            total_points: points.len(),
            launch_pads: clustering.centers().to_vec(),
            ..SolutionParts::default()
        };
        for (drone, (pad, members)) in clustering
            .centers()
            .iter()
            .zip(clustering.members())
            .enumerate()
        {
            let search = search_route(
                *pad,
                members,
                points,
                &self.config.route_search,
                rng,
                &self.clock,
            )?;
            debug!(
                "{drones} drone(s): drone {} route {:.3} after {} attempts",
                drone + 1,
                search.route().length(),
                search.attempts()
            );
            let route = search.into_route();
            parts.total_route_length += route.length();
            parts.served.push(members.len());
            parts.route_lengths.push(route.length());
            parts.routes.push(route.into_order());
        }
        Ok(parts)
    }
}
