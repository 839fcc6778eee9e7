//! Basic benchmarks for the `adaptive_pool` crate.
#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;
use std::iter;
use std::time::{Duration, Instant};

use adaptive_pool::{AdaptivePool, FixedPool};
use alloc_tracker::Allocator;
use criterion::{Criterion, criterion_group, criterion_main};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

#[global_allocator]
static ALLOCATOR: Allocator<std::alloc::System> = Allocator::system();

type TestItem = usize;

fn entrypoint(c: &mut Criterion) {
    let allocs = alloc_tracker::Session::new();

    let mut group = c.benchmark_group("adaptive_basic");

    let allocs_op = allocs.operation("build_empty");
    group.bench_function("build_empty", |b| {
        b.iter_custom(|iters| {
            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                drop(black_box(AdaptivePool::<TestItem>::new(0, |index| index)));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("acquire_release_cycle");
    group.bench_function("acquire_release_cycle", |b| {
        b.iter_custom(|iters| {
            let mut pool = AdaptivePool::<TestItem>::new(1, |index| index);

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                let item = pool.acquire().expect("pool was built with an item");
                pool.release(black_box(item));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("acquire_grow");
    group.bench_function("acquire_grow", |b| {
        b.iter_custom(|iters| {
            let mut pools = iter::repeat_with(|| AdaptivePool::<TestItem>::new(0, |index| index))
                .take(usize::try_from(iters).unwrap())
                .collect::<Vec<_>>();

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for pool in &mut pools {
                _ = black_box(pool.acquire());
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("forced_reuse_at_ceiling");
    group.bench_function("forced_reuse_at_ceiling", |b| {
        b.iter_custom(|iters| {
            let mut pool = AdaptivePool::builder()
                .factory(|index| index)
                .initial_count(0)
                .max_count(8)
                .build();

            // Fill the pool to its ceiling so every further acquisition is
            // a forced reuse.
            for _ in 0..8 {
                _ = pool.acquire().expect("growth cannot fail below max_count");
            }

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                _ = black_box(pool.acquire());
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("tick_between_reviews");
    group.bench_function("tick_between_reviews", |b| {
        b.iter_custom(|iters| {
            let mut pool = AdaptivePool::<TestItem>::new(16, |index| index);

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                pool.tick(black_box(Duration::ZERO));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("tick_with_review");
    group.bench_function("tick_with_review", |b| {
        b.iter_custom(|iters| {
            let mut pool = AdaptivePool::<TestItem>::new(16, |index| index);
            let mut now = Duration::ZERO;

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                // Jump past the schedule every time so each tick runs a
                // review.
                now = now.saturating_add(Duration::from_millis(5_100));
                pool.tick(black_box(now));
            }

            start.elapsed()
        });
    });

    group.finish();

    let mut group = c.benchmark_group("fixed_basic");

    let allocs_op = allocs.operation("fixed_acquire_release_cycle");
    group.bench_function("fixed_acquire_release_cycle", |b| {
        b.iter_custom(|iters| {
            let mut pool = FixedPool::<TestItem>::new(1, |index| index);

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                let item = pool.acquire().expect("pool was built with an item");
                pool.release(black_box(item));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("fixed_forced_reuse");
    group.bench_function("fixed_forced_reuse", |b| {
        b.iter_custom(|iters| {
            let mut pool = FixedPool::<TestItem>::new(8, |index| index);

            // Exhaust the pool so every further acquisition is a forced
            // reuse.
            for _ in 0..8 {
                _ = pool.acquire().expect("pool was built with items");
            }

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                _ = black_box(pool.acquire());
            }

            start.elapsed()
        });
    });

    group.finish();

    allocs.print_to_stdout();
}
