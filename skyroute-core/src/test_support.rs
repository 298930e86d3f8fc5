//! Test-only helpers shared by unit and behaviour tests.
//!
//! The helpers are gated behind the `test-support` feature (and `cfg(test)`).

use std::cell::Cell;
use std::time::{Duration, Instant};

use crate::{Clock, Point, PointSet};

/// Deterministic [`Clock`] that advances a fixed step on every read.
///
/// Time-boxed searches read the clock once per attempt, so a search with a
/// budget of `n * step` performs a predictable number of attempts regardless
/// of machine speed.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use skyroute_core::Clock;
/// use skyroute_core::test_support::StepClock;
///
/// let clock = StepClock::new(Duration::from_millis(10));
/// let first = clock.now();
/// assert_eq!(clock.now() - first, Duration::from_millis(10));
/// ```
#[derive(Debug)]
pub struct StepClock {
    origin: Instant,
    step: Duration,
    reads: Cell<u32>,
}

impl StepClock {
    /// Create a clock advancing `step` per read.
    #[must_use]
    pub fn new(step: Duration) -> Self {
        Self {
            origin: Instant::now(),
            step,
            reads: Cell::new(0),
        }
    }

    /// Number of times the clock has been read.
    #[must_use]
    pub fn reads(&self) -> u32 {
        self.reads.get()
    }
}

impl Clock for StepClock {
    fn now(&self) -> Instant {
        let reads = self.reads.get();
        self.reads.set(reads.saturating_add(1));
        self.origin + self.step.saturating_mul(reads)
    }
}

/// Build a [`PointSet`] from coordinate pairs.
#[must_use]
pub fn point_set(coords: &[(f64, f64)]) -> PointSet {
    coords.iter().copied().map(Point::from).collect()
}
