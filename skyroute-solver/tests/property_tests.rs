//! Property-based tests for the clustering and routing engine.
//!
//! # Invariants tested
//!
//! - **Partition:** every point is assigned to exactly one of `k` clusters.
//! - **Restart monotonicity:** more restarts under the same seed never raise
//!   the best SSE.
//! - **Route validity:** a constructed route is a permutation of its cluster
//!   and its length matches a fresh measurement.
//! - **Anytime monotonicity:** a longer budget never yields a longer route.

mod proptest_support;

use std::time::Duration;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skyroute_core::test_support::StepClock;
use skyroute_core::{Point, Route};
use skyroute_solver::cluster::{ClusterConfig, best_of_restarts, cluster};
use skyroute_solver::route::{construct_route, search_route};
use skyroute_solver::{RouteSearchConfig, SkipChance};

use proptest_support::{
    assert_partition, assert_permutation_of, point_set_strategy, point_set_with_k,
};

const STEP: Duration = Duration::from_millis(1);

fn search_config(steps: u32, skip: f64) -> RouteSearchConfig {
    RouteSearchConfig {
        duration: STEP * steps,
        skip_chance: SkipChance::new(skip).expect("valid probability"),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: clustering always yields a partition into exactly `k` parts.
    #[test]
    fn clustering_partitions_the_input(
        seed in any::<u64>(),
        (points, k) in point_set_with_k(1, 40, 4),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let clustering = cluster(k, &points, &ClusterConfig::default(), &mut rng)
            .expect("valid cluster count");
        prop_assert_eq!(clustering.k(), k);
        assert_partition(clustering.members(), clustering.labels(), points.len())?;
    }

    /// Property: the best SSE never gets worse with more restarts.
    #[test]
    fn restarts_are_monotone(
        seed in any::<u64>(),
        (points, k) in point_set_with_k(2, 30, 4),
        extra in 1_usize..10,
    ) {
        let config = ClusterConfig::default();
        let mut few_rng = ChaCha8Rng::seed_from_u64(seed);
        let few = best_of_restarts(k, &points, 2, &config, &mut few_rng).expect("valid restarts");
        let mut many_rng = ChaCha8Rng::seed_from_u64(seed);
        let many = best_of_restarts(k, &points, 2 + extra, &config, &mut many_rng)
            .expect("valid restarts");
        prop_assert!(many.sse() <= few.sse());
    }

    /// Property: a route is a permutation of its members with a consistent length.
    #[test]
    fn routes_are_valid_permutations(
        seed in any::<u64>(),
        points in point_set_strategy(1, 25),
        skip in 0.0_f64..=1.0,
    ) {
        let members: Vec<usize> = (0..points.len()).rev().collect();
        let start = Point::new(0.0, 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let skip = SkipChance::new(skip).expect("valid probability");
        let route = construct_route(start, &members, &points, skip, &mut rng)
            .expect("members are valid");

        assert_permutation_of(route.order(), &members)?;
        let measured = Route::measure(start, route.order().to_vec(), &points)
            .expect("known points");
        let tolerance = 1e-6 * measured.length().max(1.0);
        prop_assert!((measured.length() - route.length()).abs() <= tolerance);
    }

    /// Property: extending the search budget never lengthens the best route.
    #[test]
    fn longer_budgets_never_hurt(
        seed in any::<u64>(),
        points in point_set_strategy(2, 20),
        short in 1_u32..10,
        extra in 1_u32..20,
    ) {
        let members: Vec<usize> = (0..points.len()).collect();
        let start = Point::new(0.0, 0.0);
        let quick = search_route(
            start,
            &members,
            &points,
            &search_config(short, 0.3),
            &mut ChaCha8Rng::seed_from_u64(seed),
            &StepClock::new(STEP),
        )
        .expect("members are valid");
        let patient = search_route(
            start,
            &members,
            &points,
            &search_config(short + extra, 0.3),
            &mut ChaCha8Rng::seed_from_u64(seed),
            &StepClock::new(STEP),
        )
        .expect("members are valid");
        prop_assert!(patient.route().length() <= quick.route().length());
        prop_assert!(patient.attempts() >= quick.attempts());
    }
}
