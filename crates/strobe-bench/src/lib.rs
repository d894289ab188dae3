//! Benchmark profiles and utilities for the Strobe logic engine.
//!
//! Provides pre-built circuits and configs for benchmarking:
//!
//! - [`reference_profile`]: 1K-gate random circuit with feedback
//! - [`stress_profile`]: 10K-gate random circuit with feedback
//! - [`counter_profile`]: wide ripple counter, mostly quiet between edges
//! - [`bench_config`]: stepped clock config shared by all benches

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use strobe_core::Circuit;
use strobe_engine::{EvaluationConfig, Strategy};
use strobe_test_utils::{random_circuit, ripple_counter};

/// Seconds of logical time per benchmark tick. Four ticks per period of a
/// 1 Hz clock.
pub const BENCH_STEP_SECONDS: f64 = 0.25;

/// Build a reference benchmark circuit: 1K gates, feedback allowed.
pub fn reference_profile(seed: u64) -> Circuit {
    random_circuit(seed, 1_000, true)
}

/// Build a stress benchmark circuit: 10K gates, feedback allowed.
///
/// Same generator as [`reference_profile`] at 10x the gate count.
pub fn stress_profile(seed: u64) -> Circuit {
    random_circuit(seed, 10_000, true)
}

/// Build a `bits`-wide ripple counter.
///
/// Most stages sit idle on most ticks, which is where event-driven
/// propagation pays off.
pub fn counter_profile(bits: usize) -> Circuit {
    ripple_counter(bits)
}

/// Stepped-clock config with the given strategy and default cap.
pub fn bench_config(strategy: Strategy) -> EvaluationConfig {
    EvaluationConfig::stepped(BENCH_STEP_SECONDS).with_strategy(strategy)
}
