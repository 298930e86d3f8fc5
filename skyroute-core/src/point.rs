//! Planar delivery points.
//!
//! A [`Point`] rounds its coordinates on construction so that equality and
//! hashing are stable across arithmetic noise. A [`PointSet`] fixes the order
//! of the input: its indices are the identifiers used by clustering, routing
//! and exported solutions.

use std::hash::{Hash, Hasher};

use geo::Coord;

/// Number of decimal places kept for each coordinate.
pub const COORDINATE_PRECISION: i32 = 3;

/// An immutable 2-D location rounded to [`COORDINATE_PRECISION`] places.
///
/// Equality and hashing consider only the rounded coordinate pair, so two
/// points that print identically compare equal.
///
/// # Examples
///
/// ```
/// use skyroute_core::Point;
///
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(3.0, 4.0004);
/// assert_eq!(b, Point::new(3.0, 4.0));
/// assert!((a.distance(&b) - 5.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Coord<f64>", into = "Coord<f64>")
)]
pub struct Point {
    coord: Coord<f64>,
}

impl Point {
    /// Construct a point, rounding both coordinates.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            coord: Coord {
                x: round_coordinate(x),
                y: round_coordinate(y),
            },
        }
    }

    /// Rounded x coordinate.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.coord.x
    }

    /// Rounded y coordinate.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.coord.y
    }

    /// The rounded coordinate as a `geo` value.
    #[must_use]
    pub const fn coord(&self) -> Coord<f64> {
        self.coord
    }

    /// Euclidean distance to `other`.
    ///
    /// The result is not rounded; callers decide how to present it.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "Euclidean distance is floating-point by definition"
    )]
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.coord.x - other.coord.x;
        let dy = self.coord.y - other.coord.y;
        (dx * dx + dy * dy).sqrt()
    }

    const fn key(&self) -> (u64, u64) {
        (canonical_bits(self.coord.x), canonical_bits(self.coord.y))
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "decimal rounding scales the value around an integer round"
)]
fn round_coordinate(value: f64) -> f64 {
    let scale = 10_f64.powi(COORDINATE_PRECISION);
    (value * scale).round() / scale
}

const NEGATIVE_ZERO_BITS: u64 = 1 << 63;

// Negative zero must hash like positive zero.
const fn canonical_bits(value: f64) -> u64 {
    let bits = value.to_bits();
    if bits == NEGATIVE_ZERO_BITS { 0 } else { bits }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl From<Coord<f64>> for Point {
    fn from(coord: Coord<f64>) -> Self {
        Self::new(coord.x, coord.y)
    }
}

impl From<Point> for Coord<f64> {
    fn from(point: Point) -> Self {
        point.coord
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// An ordered, index-stable collection of points.
///
/// Clustering and routing refer to points by their index in this set rather
/// than by value, which keeps coincident points distinct.
///
/// # Examples
///
/// ```
/// use skyroute_core::{Point, PointSet};
///
/// let points: PointSet = [(0.0, 0.0), (1.0, 1.0)].into_iter().map(Point::from).collect();
/// assert_eq!(points.len(), 2);
/// assert_eq!(points.get(1), Some(Point::new(1.0, 1.0)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    /// Wrap an ordered vector of points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Number of points.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set holds no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// Iterate over the points in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Borrow the points as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }
}

impl FromIterator<Point> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
