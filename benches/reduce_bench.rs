//! Strategy comparison: barrier vs global lock vs bag of tasks, with the
//! single-thread and rayon reductions as baselines.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use matrix_reduce::implementations::rayon::rayon_reduce;
use matrix_reduce::implementations::single::single_reduce;
use matrix_reduce::{Grid, Reducer, Strategy};

const SIDE: usize = 1000;
const SEED: u64 = 1;

/// All strategies plus baselines on one 1000x1000 matrix, 4 workers.
fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("strategies");
    group.sample_size(20);

    let grid = Grid::random(SIDE, SIDE, SEED);
    group.throughput(Throughput::Elements((SIDE * SIDE) as u64));

    group.bench_function("single", |b| b.iter(|| single_reduce(black_box(&grid))));
    group.bench_function("rayon", |b| b.iter(|| rayon_reduce(black_box(&grid))));

    for strategy in Strategy::ALL {
        let reducer = Reducer::new(4, strategy).expect("reducer");
        group.bench_with_input(BenchmarkId::new(strategy.name(), 4), &grid, |b, grid| {
            b.iter(|| reducer.reduce(black_box(grid)));
        });
    }

    group.finish();
}

/// Scaling with worker count, 1..=10 (the driver's limit).
fn bench_worker_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("worker_scaling");
    group.sample_size(20);

    let grid = Grid::random(SIDE, SIDE, SEED);
    group.throughput(Throughput::Elements((SIDE * SIDE) as u64));

    for workers in [1, 2, 4, 8, 10] {
        for strategy in Strategy::ALL {
            let reducer = Reducer::new(workers, strategy).expect("reducer");
            group.bench_with_input(BenchmarkId::new(strategy.name(), workers), &grid, |b, grid| {
                b.iter(|| reducer.reduce(black_box(grid)));
            });
        }
    }

    group.finish();
}

/// Bag-of-tasks claim granularity: small slices mean more lock traffic.
fn bench_slice_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("slice_size");
    group.sample_size(20);

    let grid = Grid::random(SIDE, SIDE, SEED);

    for slice_size in [1, 10, 100] {
        let reducer = Reducer::new(4, Strategy::DynamicBag)
            .and_then(|r| r.with_slice_size(slice_size))
            .expect("reducer");
        group.bench_with_input(BenchmarkId::new("dynamic-bag", slice_size), &grid, |b, grid| {
            b.iter(|| reducer.reduce(black_box(grid)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_strategies, bench_worker_scaling, bench_slice_size);
criterion_main!(benches);
