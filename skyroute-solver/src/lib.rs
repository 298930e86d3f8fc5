//! Clustering and routing engine for Skyroute.
//!
//! Planning a fleet happens in two stages. [`cluster`] partitions the
//! delivery points around one launch pad per drone, keeping the lowest-SSE
//! result of many random restarts. [`route`] then searches each cluster for a
//! short closed tour with a randomised nearest-neighbour heuristic, repeating
//! attempts until a wall-clock budget runs out. [`Planner`] drives both stages
//! for every fleet size and assembles a validated
//! [`Solution`](skyroute_core::Solution).
//!
//! Randomness and time are always injected: callers pass a [`rand::Rng`] and a
//! [`Clock`](skyroute_core::Clock), which keeps every search reproducible under
//! a fixed seed and a fake clock.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cluster;
pub mod planner;
pub mod route;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use cluster::{ClusterConfig, ClusterError, Clustering, ScoredClustering};
pub use planner::{FleetPlan, PlanError, Planner, PlannerConfig, PlannerConfigError};
pub use route::{RouteSearch, RouteSearchConfig, RouteSearchError, SkipChance};
