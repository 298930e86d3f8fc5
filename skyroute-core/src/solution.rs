//! Validated fleet solutions.
//!
//! A [`Solution`] combines the launch pads chosen by clustering with the
//! routes found for each drone. [`Solution::new`] checks every structural
//! invariant eagerly, so a `Solution` value is always safe to export.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use crate::Point;

/// Largest supported fleet.
pub const MAX_DRONES: u8 = 4;

const ROMAN_NUMERALS: [&str; MAX_DRONES as usize] = ["i", "ii", "iii", "iv"];

/// Unvalidated inputs for [`Solution::new`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolutionParts {
    /// Number of drones in the fleet.
    pub drone_count: u8,
    /// Number of delivery points in the input.
    pub total_points: usize,
    /// Sum of all route lengths.
    pub total_route_length: f64,
    /// Launch pad of each drone.
    pub launch_pads: Vec<Point>,
    /// Points served by each drone.
    pub served: Vec<usize>,
    /// Route length flown by each drone.
    pub route_lengths: Vec<f64>,
    /// Point indices visited by each drone, in order.
    pub routes: Vec<Vec<usize>>,
}

/// Invariant violations reported by [`Solution::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolutionError {
    /// The drone count was outside `1..=4`.
    #[error("drone count must be between 1 and {MAX_DRONES}, got {count}")]
    InvalidDroneCount {
        /// Rejected count.
        count: u8,
    },
    /// The total route length was negative or not finite.
    #[error("total route length must be a non-negative number, got {length}")]
    InvalidRouteLength {
        /// Rejected length.
        length: f64,
    },
    /// The number of launch pads differs from the number of drones.
    #[error("{drones} drones need {drones} launch pads, got {pads}")]
    LaunchPadCountMismatch {
        /// Drone count.
        drones: u8,
        /// Launch pads supplied.
        pads: usize,
    },
    /// A per-drone figure list has the wrong length.
    #[error("{figure} lists {actual} entries for {drones} drones")]
    DroneFigureMismatch {
        /// Name of the mismatched list.
        figure: &'static str,
        /// Drone count.
        drones: u8,
        /// Entries supplied.
        actual: usize,
    },
    /// The drones serve a different number of points than the input holds.
    #[error("drones serve {served} points, but the input holds {total}")]
    ServedCountMismatch {
        /// Sum of served counts.
        served: usize,
        /// Points in the input.
        total: usize,
    },
    /// A drone's served count disagrees with its route.
    #[error("drone {drone} serves {served} points but its route has {stops} stops")]
    RouteSizeMismatch {
        /// One-based drone number.
        drone: usize,
        /// Declared served count.
        served: usize,
        /// Stops in the route.
        stops: usize,
    },
    /// Two drones share a launch pad.
    #[error("launch pad [{x}, {y}] is used by more than one drone")]
    DuplicateLaunchPad {
        /// Pad x coordinate.
        x: f64,
        /// Pad y coordinate.
        y: f64,
    },
    /// A point is visited more than once across all routes.
    #[error("point {index} is visited more than once")]
    DuplicateRoutePoint {
        /// Zero-based point index.
        index: usize,
    },
}

/// A validated plan for a fleet of drones.
///
/// # Examples
///
/// ```
/// use skyroute_core::{Point, Solution, SolutionParts};
///
/// # fn main() -> Result<(), skyroute_core::SolutionError> {
/// let solution = Solution::new(SolutionParts {
///     drone_count: 1,
///     total_points: 2,
///     total_route_length: 4.0,
///     launch_pads: vec![Point::new(1.0, 0.0)],
///     served: vec![2],
///     route_lengths: vec![4.0],
///     routes: vec![vec![1, 0]],
/// })?;
/// assert_eq!(solution.drone_count(), 1);
/// assert_eq!(solution.drones().count(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Solution {
    drone_count: u8,
    total_points: usize,
    total_route_length: f64,
    launch_pads: Vec<Point>,
    served: Vec<usize>,
    route_lengths: Vec<f64>,
    routes: Vec<Vec<usize>>,
}

impl Solution {
    /// Validate `parts` and construct a [`Solution`].
    pub fn new(parts: SolutionParts) -> Result<Self, SolutionError> {
        validate(&parts)?;
        let SolutionParts {
            drone_count,
            total_points,
            total_route_length,
            launch_pads,
            served,
            route_lengths,
            routes,
        } = parts;
        Ok(Self {
            drone_count,
            total_points,
            total_route_length,
            launch_pads,
            served,
            route_lengths,
            routes,
        })
    }

    /// Number of drones.
    #[must_use]
    pub const fn drone_count(&self) -> u8 {
        self.drone_count
    }

    /// Number of points served by the fleet.
    #[must_use]
    pub const fn total_points(&self) -> usize {
        self.total_points
    }

    /// Sum of all route lengths.
    #[must_use]
    pub const fn total_route_length(&self) -> f64 {
        self.total_route_length
    }

    /// Launch pad per drone.
    #[must_use]
    pub fn launch_pads(&self) -> &[Point] {
        &self.launch_pads
    }

    /// Served point count per drone.
    #[must_use]
    pub fn served(&self) -> &[usize] {
        &self.served
    }

    /// Route length per drone.
    #[must_use]
    pub fn route_lengths(&self) -> &[f64] {
        &self.route_lengths
    }

    /// Ordered point indices per drone.
    #[must_use]
    pub fn routes(&self) -> &[Vec<usize>] {
        &self.routes
    }

    /// Iterate over a per-drone view of the plan.
    pub fn drones(&self) -> impl Iterator<Item = DronePlan<'_>> + '_ {
        self.launch_pads
            .iter()
            .zip(&self.served)
            .zip(&self.route_lengths)
            .zip(&self.routes)
            .enumerate()
            .map(|(index, (((pad, served), length), route))| DronePlan {
                index,
                launch_pad: *pad,
                served: *served,
                route_length: *length,
                route,
            })
    }
}

/// One drone's share of a [`Solution`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DronePlan<'a> {
    /// Zero-based drone index.
    pub index: usize,
    /// Launch and landing point.
    pub launch_pad: Point,
    /// Number of points served.
    pub served: usize,
    /// Closed route length.
    pub route_length: f64,
    /// Point indices in visiting order.
    pub route: &'a [usize],
}

fn validate(parts: &SolutionParts) -> Result<(), SolutionError> {
    let drones = parts.drone_count;
    if !(1..=MAX_DRONES).contains(&drones) {
        return Err(SolutionError::InvalidDroneCount { count: drones });
    }
    if !parts.total_route_length.is_finite() || parts.total_route_length < 0.0 {
        return Err(SolutionError::InvalidRouteLength {
            length: parts.total_route_length,
        });
    }
    let expected = usize::from(drones);
    if parts.launch_pads.len() != expected {
        return Err(SolutionError::LaunchPadCountMismatch {
            drones,
            pads: parts.launch_pads.len(),
        });
    }
    for (figure, actual) in [
        ("served counts", parts.served.len()),
        ("route lengths", parts.route_lengths.len()),
        ("routes", parts.routes.len()),
    ] {
        if actual != expected {
            return Err(SolutionError::DroneFigureMismatch {
                figure,
                drones,
                actual,
            });
        }
    }
    let served: usize = parts.served.iter().sum();
    if served != parts.total_points {
        return Err(SolutionError::ServedCountMismatch {
            served,
            total: parts.total_points,
        });
    }
    for (drone, (served, route)) in parts.served.iter().zip(&parts.routes).enumerate() {
        if *served != route.len() {
            return Err(SolutionError::RouteSizeMismatch {
                drone: drone + 1,
                served: *served,
                stops: route.len(),
            });
        }
    }
    let mut pads = HashSet::with_capacity(expected);
    if let Some(pad) = parts.launch_pads.iter().find(|pad| !pads.insert(**pad)) {
        return Err(SolutionError::DuplicateLaunchPad {
            x: pad.x(),
            y: pad.y(),
        });
    }
    let mut visited = HashSet::with_capacity(parts.total_points);
    if let Some(index) = parts
        .routes
        .iter()
        .flatten()
        .find(|index| !visited.insert(**index))
    {
        return Err(SolutionError::DuplicateRoutePoint { index: *index });
    }
    Ok(())
}

impl fmt::Display for Solution {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "launch pads are reported as whole metres"
    )]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "\tIf you use {} drone(s), the total route will be {:.1} meters",
            self.drone_count, self.total_route_length
        )?;
        for (drone, numeral) in self.drones().zip(ROMAN_NUMERALS) {
            writeln!(
                f,
                "\t{numeral}.\tLanding Pad {} should be at [{},{}], serving {} locations, route is {:.1} meters",
                drone.index + 1,
                drone.launch_pad.x().trunc() as i64,
                drone.launch_pad.y().trunc() as i64,
                drone.served,
                drone.route_length,
            )?;
        }
        Ok(())
    }
}
