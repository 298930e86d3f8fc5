//! Criterion benchmarks for the clustering and routing engine.
//!
//! Measures best-of-N clustering and single route constructions across input
//! sizes (100, 500, 2000 deliveries) to track performance and detect
//! regressions. The time-boxed search itself is not benchmarked: its running
//! time is its budget.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package skyroute-solver
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skyroute_core::Point;
use skyroute_solver::SkipChance;
use skyroute_solver::cluster::{ClusterConfig, best_of_restarts};
use skyroute_solver::route::construct_route;

mod bench_support;

use bench_support::{BENCHMARK_SEED, generate_deliveries};

/// Input sizes to benchmark.
const PROBLEM_SIZES: &[usize] = &[100, 500, 2_000];

/// Clustering trials per benchmark iteration.
const RESTARTS: usize = 10;

/// Fleet size used for clustering benchmarks.
const DRONES: usize = 4;

fn bench_restarts(c: &mut Criterion) {
    let mut group = c.benchmark_group("best_of_restarts");
    group.sample_size(20);

    for &size in PROBLEM_SIZES {
        let points = generate_deliveries(size, BENCHMARK_SEED);
        group.throughput(Throughput::Elements(u64::try_from(size).unwrap_or(u64::MAX)));
        group.bench_with_input(BenchmarkId::new("points", size), &size, |b, _| {
            let mut rng = ChaCha8Rng::seed_from_u64(BENCHMARK_SEED);
            b.iter(|| {
                #[expect(
                    clippy::let_underscore_must_use,
                    reason = "benchmark discards the clustering result"
                )]
                let _ = best_of_restarts(
                    DRONES,
                    &points,
                    RESTARTS,
                    &ClusterConfig::default(),
                    &mut rng,
                );
            });
        });
    }

    group.finish();
}

fn bench_route_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct_route");
    let start = Point::new(2_500.0, 2_500.0);

    for &size in PROBLEM_SIZES {
        let points = generate_deliveries(size, BENCHMARK_SEED);
        let members: Vec<usize> = (0..points.len()).collect();
        group.throughput(Throughput::Elements(u64::try_from(size).unwrap_or(u64::MAX)));
        group.bench_with_input(BenchmarkId::new("stops", size), &size, |b, _| {
            let mut rng = ChaCha8Rng::seed_from_u64(BENCHMARK_SEED);
            b.iter(|| {
                #[expect(
                    clippy::let_underscore_must_use,
                    reason = "Benchmarking route construction, result is intentionally discarded"
                )]
                let _ = construct_route(start, &members, &points, SkipChance::default(), &mut rng);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_restarts, bench_route_construction);
criterion_main!(benches);
