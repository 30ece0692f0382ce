use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use ratethrottler::{RateThrottler, WindowPolicy};
use std::hint::black_box;
use std::time::{Duration, SystemTime};

fn benchmark_throttle(c: &mut Criterion) {
    let mut group = c.benchmark_group("throttle");
    group.throughput(Throughput::Elements(1));
    group.measurement_time(Duration::from_secs(10));

    // Full history, wide window: exercises the deny fast path.
    group.bench_function("single_key_denied", |b| {
        let throttler = RateThrottler::new();
        throttler
            .configure("bench", WindowPolicy::hours(1_000, 1))
            .unwrap();
        for _ in 0..1_000 {
            throttler.throttle("bench").unwrap();
        }

        b.iter(|| {
            let denied = throttler
                .throttle_at(black_box("bench"), black_box(SystemTime::now()))
                .unwrap();
            black_box(denied)
        });
    });

    // Zero-length window: every call evicts and admits.
    group.bench_function("single_key_rollover", |b| {
        let throttler = RateThrottler::new();
        throttler
            .configure("bench", WindowPolicy::seconds(100, 0))
            .unwrap();

        b.iter(|| {
            let denied = throttler
                .throttle_at(black_box("bench"), black_box(SystemTime::now()))
                .unwrap();
            black_box(denied)
        });
    });

    // Simulate real-world usage across many keys.
    group.bench_function("rotating_keys_100", |b| {
        let throttler = RateThrottler::new();
        for i in 0..100 {
            throttler
                .configure(&format!("key_{i}"), WindowPolicy::seconds(100, 0))
                .unwrap();
        }
        let mut counter = 0u64;

        b.iter(|| {
            let key = format!("key_{}", counter % 100);
            counter += 1;

            let denied = throttler
                .throttle_at(black_box(&key), black_box(SystemTime::now()))
                .unwrap();
            black_box(denied)
        });
    });

    group.finish();
}

fn benchmark_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");

    group.bench_function("take_snapshot_100_keys", |b| {
        let throttler = RateThrottler::new();
        for i in 0..100 {
            let key = format!("key_{i}");
            throttler
                .configure(&key, WindowPolicy::hours(50, 1))
                .unwrap();
            for _ in 0..50 {
                throttler.throttle(&key).unwrap();
            }
        }

        b.iter(|| black_box(throttler.take_snapshot().unwrap()));
    });

    group.bench_function("reconstruct_100_keys", |b| {
        let source = RateThrottler::new();
        for i in 0..100 {
            let key = format!("key_{i}");
            source.configure(&key, WindowPolicy::hours(50, 1)).unwrap();
            for _ in 0..50 {
                source.throttle(&key).unwrap();
            }
        }
        let snapshot = source.take_snapshot().unwrap();
        let target = RateThrottler::new();

        b.iter(|| target.reconstruct(black_box(&snapshot)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, benchmark_throttle, benchmark_snapshot);
criterion_main!(benches);
