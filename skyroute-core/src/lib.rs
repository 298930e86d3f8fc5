//! Core domain types for the Skyroute planner.
//!
//! These models are shared by the clustering and routing engine and by the
//! command-line front end. Constructors that carry invariants return `Result`
//! so invalid plans surface early instead of reaching an exporter.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod clock;
pub mod point;
pub mod route;
pub mod solution;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, Deadline, SystemClock};
pub use point::{COORDINATE_PRECISION, Point, PointSet};
pub use route::{Route, RouteError};
pub use solution::{DronePlan, MAX_DRONES, Solution, SolutionError, SolutionParts};
