//! Wall-clock completion estimate shown before planning starts.

use std::ops::RangeInclusive;
use std::time::Duration;

use chrono::{NaiveTime, TimeDelta};

const SECONDS_PER_DAY: u64 = 86_400;

/// Time of day at which every fleet size will have been planned.
///
/// Each drone of each fleet size spends `per_drone` searching for its route,
/// so the total is `per_drone` times the sum of the fleet sizes. The result
/// wraps past midnight.
pub fn completion_time(
    now: NaiveTime,
    fleet_sizes: RangeInclusive<u8>,
    per_drone: Duration,
) -> NaiveTime {
    let drones: u32 = fleet_sizes.map(u32::from).sum();
    let total = per_drone.saturating_mul(drones);
    let within_day = Duration::new(total.as_secs() % SECONDS_PER_DAY, total.subsec_nanos());
    let delta = TimeDelta::from_std(within_day).unwrap_or_else(|_| TimeDelta::zero());
    now.overflowing_add_signed(delta).0
}

/// The estimate line, e.g. `There are 12 nodes: Solutions will be available by 03:05pm`.
pub fn estimate_line(nodes: usize, ready_at: NaiveTime) -> String {
    format!(
        "There are {nodes} nodes: Solutions will be available by {}",
        ready_at.format("%I:%M%P")
    )
}
