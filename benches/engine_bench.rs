//! Benchmark suite for numeri-algo
//!
//! Run with: cargo bench

use criterion::{criterion_group, criterion_main, Criterion};
use numeri_algo::{AttemptLog, AttemptRecord, AttemptType, NumberConverter};

fn bench_to_word_full_range(c: &mut Criterion) {
    let converter = NumberConverter::new();
    c.bench_function("NumberConverter::to_word 0..=1000", |b| {
        b.iter(|| {
            for n in 0..=1000u32 {
                let _ = converter.to_word(n);
            }
        })
    });
}

fn bench_metrics_over_large_log(c: &mut Criterion) {
    let mut log = AttemptLog::new();
    for n in 0..1000u32 {
        log.record(AttemptRecord::new(
            n % 100,
            "risposta",
            "risposta",
            n % 3 != 0,
            1000,
            false,
            AttemptType::Initial,
        ));
    }
    c.bench_function("AttemptLog::metrics 1000 records", |b| {
        b.iter(|| log.metrics())
    });
}

criterion_group!(benches, bench_to_word_full_range, bench_metrics_over_large_log);
criterion_main!(benches);
