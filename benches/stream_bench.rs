//! Benchmark for Stream traversal against eager iterators.
//!
//! The "cold" variants build a fresh stream per iteration; the "memoized"
//! variants traverse a stream whose cells were already forced.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use memostream::stream::Stream;
use std::hint::black_box;

// =============================================================================
// map / filter / take Pipeline Benchmark
// =============================================================================

fn benchmark_pipeline(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("pipeline");

    for size in [100, 1000, 10000] {
        group.bench_with_input(BenchmarkId::new("Stream_cold", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let total = Stream::iterate(0_u64, |n| n + 1)
                    .map(|n| n * 3)
                    .filter(|n| n % 2 == 0)
                    .take(size)
                    .fold_left(0_u64, |total, n| total + n);
                black_box(total)
            });
        });

        let memoized = Stream::iterate(0_u64, |n| n + 1)
            .map(|n| n * 3)
            .filter(|n| n % 2 == 0)
            .take(size);
        let _ = memoized.fold_left(0_u64, |total, n| total + n);

        group.bench_with_input(BenchmarkId::new("Stream_memoized", size), &size, |bencher, _| {
            bencher.iter(|| black_box(memoized.fold_left(0_u64, |total, n| total + n)));
        });

        group.bench_with_input(BenchmarkId::new("Iterator", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let total: u64 = (0_u64..)
                    .map(|n| n * 3)
                    .filter(|n| n % 2 == 0)
                    .take(size)
                    .sum();
                black_box(total)
            });
        });
    }

    group.finish();
}

// =============================================================================
// append Benchmark
// =============================================================================

fn benchmark_append(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("append");

    for size in [100, 1000] {
        let left: Stream<usize> = (0..size).collect();
        let right: Stream<usize> = (size..size * 2).collect();

        group.bench_with_input(BenchmarkId::new("Stream_append", size), &size, |bencher, _| {
            bencher.iter(|| black_box(left.append(&right).to_vec()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_pipeline, benchmark_append);
criterion_main!(benches);
