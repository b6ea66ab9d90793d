//! Benchmark for ArrayList vs standard Vec.
//!
//! Compares appends, front removal and predicate compaction, the operations
//! whose cost is dominated by element shifting.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use flatcoll::list::ArrayList;
use std::hint::black_box;

// =============================================================================
// add Benchmark
// =============================================================================

fn benchmark_add(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("add");

    for size in [100, 1000, 10000] {
        group.bench_with_input(BenchmarkId::new("ArrayList", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut list = ArrayList::new();
                for index in 0..size {
                    list.add(black_box(index));
                }
                black_box(list)
            });
        });

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut vector = Vec::new();
                for index in 0..size {
                    vector.push(black_box(index));
                }
                black_box(vector)
            });
        });
    }

    group.finish();
}

// =============================================================================
// remove_at(0) Benchmark
// =============================================================================

fn benchmark_remove_front(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("remove_front");

    for size in [100, 1000] {
        let list: ArrayList<i32> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("ArrayList", size), &list, |bencher, list| {
            bencher.iter(|| {
                let mut list = list.clone();
                while !list.is_empty() {
                    let _ = black_box(list.remove_at(0));
                }
                black_box(list)
            });
        });
    }

    group.finish();
}

// =============================================================================
// remove_all Benchmark
// =============================================================================

fn benchmark_remove_all(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("remove_all");

    for size in [1000, 10000] {
        let list: ArrayList<i32> = (0..size).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &list, |bencher, list| {
            bencher.iter(|| {
                let mut list = list.clone();
                let removed = list.remove_all(|value| value % 3 == 0);
                black_box(removed)
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
    benchmark_add,
    benchmark_remove_front,
    benchmark_remove_all
);

criterion_main!(benches);
