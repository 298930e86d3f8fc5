//! Facade crate for the Skyroute drone fleet planner.
//!
//! This crate re-exports the core domain types and exposes the clustering and
//! routing engine behind the `solver` feature.

#![forbid(unsafe_code)]

pub use skyroute_core::{
    COORDINATE_PRECISION, Clock, Deadline, DronePlan, MAX_DRONES, Point, PointSet, Route,
    RouteError, Solution, SolutionError, SolutionParts, SystemClock,
};

#[cfg(feature = "solver")]
pub use skyroute_solver::{
    ClusterConfig, ClusterError, Clustering, FleetPlan, PlanError, Planner, PlannerConfig,
    PlannerConfigError, RouteSearch, RouteSearchConfig, RouteSearchError, ScoredClustering,
    SkipChance,
};
