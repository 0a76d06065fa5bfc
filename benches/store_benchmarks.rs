//! Benchmarks for the concurrent containers
//!
//! Single-threaded costs of add / contains / pop / all, plus a mixed
//! reader/writer workload compared against a bare `std::sync::RwLock<HashSet>`.

use concurrent_store::{ConcurrentMap, ConcurrentSet, MetricsCollector};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use std::collections::HashSet;
use std::sync::{Arc, Barrier, RwLock};
use std::thread;
use std::time::Duration;

const PREFILL: usize = 1_000;
const OPERATIONS_PER_THREAD: usize = 10_000;

fn url(i: usize) -> String {
    format!("https://{:08x}.com", i.wrapping_mul(0x9E37_79B9))
}

fn filled_set(size: usize) -> ConcurrentSet<String> {
    (0..size).map(url).collect()
}

fn bench_set_single_thread(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_single_thread");

    group.bench_function("add_existing", |b| {
        let set = ConcurrentSet::new();
        let value = url(0);
        b.iter(|| set.add(black_box(value.clone())))
    });

    group.bench_function("contains_miss", |b| {
        let set = filled_set(PREFILL);
        let probe = url(PREFILL + 1);
        b.iter(|| black_box(set.contains(black_box(&probe))))
    });

    group.bench_function("pop", |b| {
        b.iter_batched(
            || filled_set(PREFILL),
            |set| {
                while set.pop().is_ok() {}
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("all", |b| {
        let set = filled_set(PREFILL);
        b.iter(|| black_box(set.all()))
    });

    group.bench_function("add_with_metrics_disabled", |b| {
        let set = ConcurrentSet::new();
        set.set_metrics_enabled(false);
        let value = url(0);
        b.iter(|| set.add(black_box(value.clone())))
    });

    group.finish();
}

fn bench_map_single_thread(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_single_thread");

    for size in [100, PREFILL, 10 * PREFILL] {
        group.bench_with_input(BenchmarkId::new("add", size), &size, |b, &size| {
            b.iter(|| {
                let map = ConcurrentMap::with_capacity(size);
                for i in 0..size {
                    map.add(black_box(i), i);
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("get", size), &size, |b, &size| {
            let map: ConcurrentMap<usize, usize> = (0..size).map(|i| (i, i)).collect();
            b.iter(|| {
                for i in 0..size {
                    black_box(map.get(&i));
                }
            })
        });
    }

    group.finish();
}

fn bench_set_concurrent(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_concurrent_mixed");
    group.measurement_time(Duration::from_secs(10));

    for num_threads in [2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("concurrent_set", num_threads),
            &num_threads,
            |b, &num_threads| {
                b.iter(|| {
                    let set = Arc::new(ConcurrentSet::new());
                    let barrier = Arc::new(Barrier::new(num_threads));
                    let handles: Vec<_> = (0..num_threads)
                        .map(|thread_id| {
                            let set = Arc::clone(&set);
                            let barrier = Arc::clone(&barrier);
                            thread::spawn(move || {
                                barrier.wait();
                                for i in 0..OPERATIONS_PER_THREAD {
                                    let value = thread_id * OPERATIONS_PER_THREAD + i;
                                    if i % 4 == 0 {
                                        set.add(value);
                                    } else {
                                        black_box(set.contains(&(value / 2)));
                                    }
                                }
                            })
                        })
                        .collect();

                    for handle in handles {
                        handle.join().unwrap();
                    }
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("std_rwlock_hashset", num_threads),
            &num_threads,
            |b, &num_threads| {
                b.iter(|| {
                    let set = Arc::new(RwLock::new(HashSet::new()));
                    let barrier = Arc::new(Barrier::new(num_threads));
                    let handles: Vec<_> = (0..num_threads)
                        .map(|thread_id| {
                            let set = Arc::clone(&set);
                            let barrier = Arc::clone(&barrier);
                            thread::spawn(move || {
                                barrier.wait();
                                for i in 0..OPERATIONS_PER_THREAD {
                                    let value = thread_id * OPERATIONS_PER_THREAD + i;
                                    if i % 4 == 0 {
                                        set.write().unwrap().insert(value);
                                    } else {
                                        black_box(set.read().unwrap().contains(&(value / 2)));
                                    }
                                }
                            })
                        })
                        .collect();

                    for handle in handles {
                        handle.join().unwrap();
                    }
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_set_single_thread,
    bench_map_single_thread,
    bench_set_concurrent
);
criterion_main!(benches);
