//! Wall-clock access for time-boxed searches.
//!
//! Searches never call [`Instant::now`] directly. They read time through a
//! [`Clock`] so tests can substitute a deterministic implementation.

use std::time::{Duration, Instant};

/// A monotonic time source.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use skyroute_core::{Clock, Deadline, SystemClock};
///
/// let deadline = Deadline::start(&SystemClock, Duration::from_secs(60));
/// assert!(!deadline.expired(&SystemClock));
/// ```
pub trait Clock {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// [`Clock`] backed by [`Instant::now`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// A wall-clock deadline measured from the moment it was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    started_at: Instant,
    budget: Duration,
}

impl Deadline {
    /// Start a deadline `budget` from now on `clock`.
    pub fn start<C: Clock + ?Sized>(clock: &C, budget: Duration) -> Self {
        Self {
            started_at: clock.now(),
            budget,
        }
    }

    /// The configured budget.
    #[must_use]
    pub const fn budget(&self) -> Duration {
        self.budget
    }

    /// Time elapsed since the deadline started.
    pub fn elapsed<C: Clock + ?Sized>(&self, clock: &C) -> Duration {
        clock.now().saturating_duration_since(self.started_at)
    }

    /// Whether the budget has been used up.
    pub fn expired<C: Clock + ?Sized>(&self, clock: &C) -> bool {
        self.elapsed(clock) >= self.budget
    }
}
