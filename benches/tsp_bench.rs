//! Criterion benchmarks for the local search core.
//!
//! Measures one steepest-descent run to convergence from a fixed random
//! tour, and a single neighborhood delta sweep, on random Euclidean
//! instances.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_tsp::cancel::CancellationToken;
use u_tsp::distance::DistanceMatrix;
use u_tsp::local_search::{Neighborhood, SteepestDescent};
use u_tsp::models::City;
use u_tsp::solver::{random_tour, worker_rng};

fn random_instance(n: usize) -> DistanceMatrix {
    let mut rng = StdRng::seed_from_u64(42);
    let cities: Vec<City> = (0..n)
        .map(|i| City::new(i, rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)))
        .collect();
    DistanceMatrix::from_cities(&cities)
}

fn bench_descent(c: &mut Criterion) {
    let mut group = c.benchmark_group("steepest_descent");
    group.sample_size(10);

    for &n in &[50usize, 100, 200] {
        let dm = random_instance(n);
        let start = random_tour(&dm, &mut worker_rng(Some(7), 0));
        let cancel = CancellationToken::new();

        for nb in [Neighborhood::Swap, Neighborhood::Reversal] {
            let engine = SteepestDescent::new(nb);
            group.bench_with_input(
                BenchmarkId::new(format!("{nb:?}"), n),
                &start,
                |b, start| {
                    b.iter(|| engine.improve(black_box(start.clone()), &dm, &cancel));
                },
            );
        }
    }
    group.finish();
}

fn bench_delta_sweep(c: &mut Criterion) {
    let dm = random_instance(500);
    let tour = random_tour(&dm, &mut worker_rng(Some(7), 0));
    let cities = tour.cities();

    c.bench_function("swap_delta_sweep_500", |b| {
        b.iter(|| {
            let mut best = 0.0f64;
            for i in 0..cities.len() - 1 {
                for j in (i + 1)..cities.len() {
                    best = best.min(Neighborhood::Swap.delta(black_box(cities), &dm, i, j));
                }
            }
            best
        });
    });
}

criterion_group!(benches, bench_descent, bench_delta_sweep);
criterion_main!(benches);
