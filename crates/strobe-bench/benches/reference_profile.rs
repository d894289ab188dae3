//! Criterion benchmarks for whole ticks through the public entry points.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use strobe_bench::{bench_config, counter_profile, reference_profile, stress_profile};
use strobe_engine::{evaluate, Simulator, Strategy};
use strobe_test_utils::full_adder;

fn bench_tick_1k(c: &mut Criterion) {
    let cfg = bench_config(Strategy::AutoSelect);
    let mut sim = Simulator::new(reference_profile(42)).unwrap();

    // Warm up: the first tick always runs level order over everything
    sim.step(&cfg).unwrap();

    c.bench_function("tick_1k", |b| {
        b.iter(|| {
            let info = sim.step(&cfg).unwrap();
            black_box(&info);
        });
    });
}

fn bench_tick_10k(c: &mut Criterion) {
    let cfg = bench_config(Strategy::AutoSelect);
    let mut sim = Simulator::new(stress_profile(42)).unwrap();

    sim.step(&cfg).unwrap();

    c.bench_function("tick_10k", |b| {
        b.iter(|| {
            let info = sim.step(&cfg).unwrap();
            black_box(&info);
        });
    });
}

fn bench_1000_ticks_counter(c: &mut Criterion) {
    let cfg = bench_config(Strategy::EventDrivenOnly);
    c.bench_function("1000_ticks_counter_64", |b| {
        b.iter(|| {
            let mut sim = Simulator::new(counter_profile(64)).unwrap();
            let info = sim.run(1000, &cfg).unwrap();
            black_box(&info);
        });
    });
}

fn bench_stateless_evaluate(c: &mut Criterion) {
    let cfg = bench_config(Strategy::AutoSelect);
    let circuit = full_adder(true, true, false);
    c.bench_function("evaluate_full_adder", |b| {
        b.iter(|| {
            let result = evaluate(black_box(&circuit), &cfg).unwrap();
            black_box(&result);
        });
    });
}

criterion_group!(
    benches,
    bench_tick_1k,
    bench_tick_10k,
    bench_1000_ticks_counter,
    bench_stateless_evaluate
);
criterion_main!(benches);
