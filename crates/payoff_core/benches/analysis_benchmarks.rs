//! Criterion benchmarks for payoff_core.
//!
//! Measures leg validation, grid sampling and the full analysis of a
//! four-leg strategy.

use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use payoff_core::analysis::{analyze, validate_legs};
use payoff_core::contract::RawContract;
use payoff_core::engine::sample_curve;

fn iron_condor() -> Vec<RawContract> {
    let expiry = Utc::now() + Duration::days(30);
    vec![
        RawContract::new("put", 90.0, 1.0, 1.2, "long", expiry),
        RawContract::new("put", 95.0, 2.0, 2.1, "short", expiry),
        RawContract::new("call", 105.0, 2.0, 2.1, "short", expiry),
        RawContract::new("call", 110.0, 1.0, 1.2, "long", expiry),
    ]
}

fn bench_validate_legs(c: &mut Criterion) {
    let raw = iron_condor();
    c.bench_function("validate_legs", |b| {
        b.iter(|| validate_legs(black_box(&raw)).unwrap())
    });
}

fn bench_sample_curve(c: &mut Criterion) {
    let contracts = validate_legs(&iron_condor()).unwrap();
    c.bench_function("sample_curve", |b| {
        b.iter(|| sample_curve(black_box(&contracts)))
    });
}

fn bench_analyze(c: &mut Criterion) {
    let contracts = validate_legs(&iron_condor()).unwrap();
    c.bench_function("analyze", |b| b.iter(|| analyze(black_box(&contracts))));
}

criterion_group!(benches, bench_validate_legs, bench_sample_curve, bench_analyze);
criterion_main!(benches);
