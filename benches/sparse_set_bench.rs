//! Benchmark for SparseSet and SparseItemSet.
//!
//! Compares membership-heavy workloads against `BTreeSet` and `Vec<bool>`.

use std::collections::BTreeSet;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use flatcoll::sparse::{SparseItemSet, SparseSet};
use std::hint::black_box;

// =============================================================================
// add / contains Benchmark
// =============================================================================

fn benchmark_add_contains(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("sparse_add_contains");

    for size in [1000_usize, 10000] {
        group.bench_with_input(BenchmarkId::new("SparseSet", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut set = SparseSet::with_capacity(size);
                for value in (0..size).step_by(3) {
                    set.add(black_box(value));
                }
                let hits = (0..size).filter(|value| set.contains(*value)).count();
                black_box(hits)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut set = BTreeSet::new();
                for value in (0..size).step_by(3) {
                    set.insert(black_box(value));
                }
                let hits = (0..size).filter(|value| set.contains(value)).count();
                black_box(hits)
            });
        });
    }

    group.finish();
}

// =============================================================================
// clear Benchmark
// =============================================================================

fn benchmark_clear(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("sparse_clear");

    for size in [1000_usize, 100_000] {
        group.bench_with_input(BenchmarkId::new("SparseSet", size), &size, |bencher, &size| {
            let mut set = SparseSet::with_capacity(size);
            bencher.iter(|| {
                set.add(black_box(size / 2));
                set.clear();
                black_box(set.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("Vec<bool>", size), &size, |bencher, &size| {
            let mut flags = vec![false; size];
            bencher.iter(|| {
                flags[black_box(size / 2)] = true;
                flags.fill(false);
                black_box(flags.len())
            });
        });
    }

    group.finish();
}

// =============================================================================
// Component Iteration Benchmark
// =============================================================================

fn benchmark_item_iteration(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("sparse_item_values");

    for size in [1000_usize, 10000] {
        let set: SparseItemSet<f32> = (0..size)
            .step_by(4)
            .map(|index| (index, index as f32))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &set, |bencher, set| {
            bencher.iter(|| {
                let total: f32 = set.values().sum();
                black_box(total)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(
    benches,
    benchmark_add_contains,
    benchmark_clear,
    benchmark_item_iteration
);

criterion_main!(benches);
