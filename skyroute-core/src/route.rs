//! Closed drone routes.
//!
//! A route lists point indices in visiting order. Its length includes the leg
//! from the launch pad to the first stop and the leg back from the last stop.

use thiserror::Error;

use crate::{Point, PointSet};

/// An ordered visit of point indices with its total length.
///
/// # Examples
/// ```
/// use skyroute_core::{Point, PointSet, Route};
///
/// let points = PointSet::new(vec![Point::new(3.0, 4.0)]);
/// let route = Route::measure(Point::new(0.0, 0.0), vec![0], &points)?;
/// assert_eq!(route.order(), &[0]);
/// assert!((route.length() - 10.0).abs() < 1e-9);
/// # Ok::<(), skyroute_core::RouteError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    order: Vec<usize>,
    length: f64,
}

/// Errors returned by [`Route::measure`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The order referenced an index outside the point set.
    #[error("route visits point {index}, but only {available} points exist")]
    UnknownPoint {
        /// Offending index.
        index: usize,
        /// Size of the point set.
        available: usize,
    },
}

impl Route {
    /// Construct a route from an order and a precomputed length.
    #[must_use]
    pub const fn new(order: Vec<usize>, length: f64) -> Self {
        Self { order, length }
    }

    /// Construct an empty route of zero length.
    ///
    /// # Examples
    /// ```
    /// use skyroute_core::Route;
    ///
    /// let route = Route::empty();
    /// assert!(route.is_empty());
    /// assert_eq!(route.length(), 0.0);
    /// ```
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Vec::new(), 0.0)
    }

    /// Build a route and compute its closed length from `start`.
    ///
    /// An empty order has zero length.
    #[expect(
        clippy::float_arithmetic,
        reason = "route length is a floating-point sum of legs"
    )]
    pub fn measure(start: Point, order: Vec<usize>, points: &PointSet) -> Result<Self, RouteError> {
        let mut length = 0.0;
        let mut current = start;
        for &index in &order {
            let next = points.get(index).ok_or(RouteError::UnknownPoint {
                index,
                available: points.len(),
            })?;
            length += current.distance(&next);
            current = next;
        }
        length += current.distance(&start);
        Ok(Self::new(order, length))
    }

    /// Point indices in visiting order.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Total closed length.
    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }

    /// Number of stops.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the route has no stops.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Consume the route, returning its order.
    #[must_use]
    pub fn into_order(self) -> Vec<usize> {
        self.order
    }
}
