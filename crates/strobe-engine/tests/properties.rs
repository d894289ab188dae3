//! Behavioural properties of the evaluator on the gallery circuits.

use strobe_core::{Circuit, GateKind};
use strobe_engine::{evaluate, EvaluationConfig, SettleOutcome, Simulator};
use strobe_test_utils::{
    clocked_divider, d_flip_flop, full_adder, half_adder, init_tracing, johnson_counter, lfsr4,
    ring_oscillator, ripple_counter, sr_latch_beside_ring, sr_latch_primitive, CircuitBuilder,
};

fn bits(sim: &Simulator, prefix: &str, n: usize) -> Vec<bool> {
    (0..n)
        .map(|i| sim.output(&format!("{prefix}{i}"), 0).unwrap())
        .collect()
}

fn as_number(bits: &[bool]) -> u32 {
    bits.iter()
        .enumerate()
        .map(|(i, &b)| (b as u32) << i)
        .sum()
}

// ── Combinational ───────────────────────────────────────────────

#[test]
fn two_input_gates_match_truth_tables() {
    let cases: [(GateKind, [bool; 4]); 5] = [
        (GateKind::And, [false, false, false, true]),
        (GateKind::Or, [false, true, true, true]),
        (GateKind::Xor, [false, true, true, false]),
        (GateKind::Nand, [true, true, true, false]),
        (GateKind::Nor, [true, false, false, false]),
    ];
    for (kind, expected) in cases {
        for (row, want) in expected.iter().enumerate() {
            let a = row & 2 != 0;
            let b = row & 1 != 0;
            let c = CircuitBuilder::new()
                .input("a", a)
                .input("b", b)
                .gate("g", kind)
                .wire("a", "g", 0)
                .wire("b", "g", 1)
                .build();
            let out = evaluate(&c, &EvaluationConfig::default()).unwrap();
            assert_eq!(out.circuit.output("g", 0), Some(*want), "{kind} {a} {b}");
        }
    }
}

#[test]
fn half_adder_truth_table() {
    for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
        let out = evaluate(&half_adder(a, b), &EvaluationConfig::default()).unwrap();
        assert_eq!(out.circuit.output("sum", 0), Some(a ^ b));
        assert_eq!(out.circuit.output("carry", 0), Some(a && b));
        assert_eq!(out.evaluation_info.outcome, SettleOutcome::Converged);
    }
}

#[test]
fn full_adder_adds() {
    for n in 0..8u32 {
        let (a, b, cin) = (n & 1 != 0, n & 2 != 0, n & 4 != 0);
        let out = evaluate(&full_adder(a, b, cin), &EvaluationConfig::default()).unwrap();
        let total = a as u32 + b as u32 + cin as u32;
        assert_eq!(out.circuit.output("sum", 0), Some(total & 1 == 1));
        assert_eq!(out.circuit.output("cout", 0), Some(total >= 2));
    }
}

#[test]
fn settled_combinational_circuit_is_a_fixed_point() {
    init_tracing();
    let cfg = EvaluationConfig::default();
    let first = evaluate(&full_adder(true, false, true), &cfg).unwrap();
    let second = evaluate(&first.circuit, &cfg).unwrap();
    let mut expected = first.circuit.clone();
    expected.tick = second.circuit.tick;
    assert_eq!(second.circuit, expected);
    assert_eq!(second.evaluation_info.iterations, 1);
}

#[test]
fn unwired_pin_reads_stored_value() {
    let mut c = CircuitBuilder::new()
        .input("a", true)
        .gate("g", GateKind::And)
        .wire("a", "g", 0)
        .build();
    let out = evaluate(&c, &EvaluationConfig::default()).unwrap();
    assert_eq!(out.circuit.output("g", 0), Some(false));

    c.gate_mut("g").unwrap().inputs[1] = Some(true);
    let out = evaluate(&c, &EvaluationConfig::default()).unwrap();
    assert_eq!(out.circuit.output("g", 0), Some(true));
}

// ── SR latch ────────────────────────────────────────────────────

#[test]
fn sr_latch_holds_after_set_and_reset() {
    let mut sim = Simulator::new(sr_latch_primitive()).unwrap();
    let cfg = EvaluationConfig::default();
    sim.step(&cfg).unwrap();
    assert_eq!(sim.output("q", 0), Some(false));

    sim.set_input("s", true).unwrap();
    sim.step(&cfg).unwrap();
    assert_eq!(sim.output("q", 0), Some(true));
    assert_eq!(sim.output("q_bar", 0), Some(false));

    sim.set_input("s", false).unwrap();
    sim.run(3, &cfg).unwrap();
    assert_eq!(sim.output("q", 0), Some(true));

    sim.set_input("r", true).unwrap();
    sim.step(&cfg).unwrap();
    sim.set_input("r", false).unwrap();
    sim.run(3, &cfg).unwrap();
    assert_eq!(sim.output("q", 0), Some(false));
    assert_eq!(sim.output("q_bar", 0), Some(true));
}

#[test]
fn sr_latch_both_asserted_then_released_resets() {
    let mut sim = Simulator::new(sr_latch_primitive()).unwrap();
    let cfg = EvaluationConfig::default();
    sim.set_input("s", true).unwrap();
    sim.set_input("r", true).unwrap();
    sim.step(&cfg).unwrap();
    assert_eq!(sim.output("latch", 0), Some(false));
    assert_eq!(sim.output("latch", 1), Some(false));

    sim.set_input("s", false).unwrap();
    sim.set_input("r", false).unwrap();
    sim.step(&cfg).unwrap();
    assert_eq!(sim.output("latch", 0), Some(false));
    assert_eq!(sim.output("latch", 1), Some(true));
}

// ── D flip-flop ─────────────────────────────────────────────────

#[test]
fn flip_flop_samples_only_on_rising_edge() {
    let mut sim = Simulator::new(d_flip_flop()).unwrap();
    let cfg = EvaluationConfig::default();

    sim.set_input("d", true).unwrap();
    sim.step(&cfg).unwrap();
    assert_eq!(sim.output("q", 0), Some(false), "no edge yet");

    sim.set_input("clk", true).unwrap();
    sim.step(&cfg).unwrap();
    assert_eq!(sim.output("q", 0), Some(true), "captured on rising edge");
    assert_eq!(sim.output("q_bar", 0), Some(false));

    sim.set_input("d", false).unwrap();
    sim.step(&cfg).unwrap();
    assert_eq!(sim.output("q", 0), Some(true), "clock held high");

    sim.set_input("clk", false).unwrap();
    sim.step(&cfg).unwrap();
    assert_eq!(sim.output("q", 0), Some(true), "falling edge ignored");

    sim.set_input("clk", true).unwrap();
    sim.step(&cfg).unwrap();
    assert_eq!(sim.output("q", 0), Some(false), "second rising edge");
}

#[test]
fn data_through_logic_must_settle_before_the_edge() {
    let c = CircuitBuilder::new()
        .input("d", false)
        .input("clk", false)
        .gate("buf", GateKind::Buffer)
        .gate("ff", GateKind::DFlipFlop)
        .wire("d", "buf", 0)
        .wire("buf", "ff", 0)
        .wire("clk", "ff", 1)
        .build();
    let mut sim = Simulator::new(c).unwrap();
    let cfg = EvaluationConfig::default();
    sim.step(&cfg).unwrap();

    sim.set_input("d", true).unwrap();
    sim.set_input("clk", true).unwrap();
    sim.step(&cfg).unwrap();
    assert_eq!(sim.output("buf", 0), Some(true));
    assert_eq!(sim.output("ff", 0), Some(false), "D changed in the edge tick");

    sim.set_input("clk", false).unwrap();
    sim.step(&cfg).unwrap();
    sim.set_input("clk", true).unwrap();
    sim.step(&cfg).unwrap();
    assert_eq!(sim.output("ff", 0), Some(true), "D settled a tick earlier");
}

#[test]
fn flip_flop_behind_inverter_chain_captures_once() {
    let c = CircuitBuilder::new()
        .input("d", true)
        .input("clk", false)
        .gate("i1", GateKind::Not)
        .gate("i2", GateKind::Not)
        .gate("ff", GateKind::DFlipFlop)
        .wire("clk", "i1", 0)
        .wire("i1", "i2", 0)
        .wire("d", "ff", 0)
        .wire("i2", "ff", 1)
        .build();
    let mut sim = Simulator::new(c).unwrap();
    let cfg = EvaluationConfig::default();
    sim.step(&cfg).unwrap();
    sim.set_input("clk", true).unwrap();
    sim.step(&cfg).unwrap();
    assert_eq!(sim.output("ff", 0), Some(true));
    sim.step(&cfg).unwrap();
    assert_eq!(sim.output("ff", 0), Some(true));
}

// ── Feedback ────────────────────────────────────────────────────

#[test]
fn ring_oscillator_toggles_every_tick() {
    let mut sim = Simulator::new(ring_oscillator(3)).unwrap();
    let cfg = EvaluationConfig::default();
    let mut previous = None;
    for _ in 0..6 {
        let info = sim.step(&cfg).unwrap();
        assert_eq!(info.outcome, SettleOutcome::IterationCapped);
        assert_eq!(info.iterations, 6);
        let n0 = sim.output("n0", 0).unwrap();
        if let Some(p) = previous {
            assert_ne!(n0, p);
        }
        previous = Some(n0);
    }
}

#[test]
fn latch_settles_beside_free_running_ring() {
    let mut sim = Simulator::new(sr_latch_beside_ring()).unwrap();
    let cfg = EvaluationConfig::default();
    // (s, r, expected q)
    let drive = [
        (false, false, false),
        (true, false, true),
        (false, false, true),
        (false, true, false),
        (false, false, false),
        (true, false, true),
    ];
    let mut previous = None;
    for (s, r, q) in drive {
        sim.set_input("s", s).unwrap();
        sim.set_input("r", r).unwrap();
        let info = sim.step(&cfg).unwrap();
        assert_eq!(info.outcome, SettleOutcome::IterationCapped);
        assert_eq!(sim.output("q", 0), Some(q), "s={s} r={r}");
        assert_eq!(sim.output("q_bar", 0), Some(!q), "s={s} r={r}");
        let n0 = sim.output("n0", 0).unwrap();
        if let Some(p) = previous {
            assert_ne!(n0, p);
        }
        previous = Some(n0);
    }
}

#[test]
fn ring_oscillator_respects_configured_cap() {
    let cfg = EvaluationConfig {
        max_iterations_per_tick: Some(3),
        ..EvaluationConfig::default()
    };
    let out = evaluate(&ring_oscillator(5), &cfg).unwrap();
    assert_eq!(out.evaluation_info.iterations, 3);
    assert_eq!(out.evaluation_info.outcome, SettleOutcome::IterationCapped);
}

#[test]
fn delay_mode_gives_feedback_one_tick_of_delay() {
    let cfg = EvaluationConfig {
        delay_mode: true,
        ..EvaluationConfig::default()
    };
    let mut sim = Simulator::new(ring_oscillator(3)).unwrap();
    let info = sim.step(&cfg).unwrap();
    assert_eq!(info.outcome, SettleOutcome::SinglePass);
    assert_eq!(info.iterations, 1);
    let first = bits(&sim, "n", 3);
    sim.step(&cfg).unwrap();
    assert_ne!(bits(&sim, "n", 3), first);
}

// ── Counters ────────────────────────────────────────────────────

#[test]
fn johnson_counter_cycles_through_eight_states() {
    let mut sim = Simulator::new(johnson_counter(4)).unwrap();
    let cfg = EvaluationConfig::stepped(0.5);
    sim.step(&cfg).unwrap();
    let mut states = vec![bits(&sim, "ff", 4)];
    for _ in 0..8 {
        sim.run(2, &cfg).unwrap();
        states.push(bits(&sim, "ff", 4));
    }
    let expected: Vec<Vec<bool>> = [
        "0000", "1000", "1100", "1110", "1111", "0111", "0011", "0001", "0000",
    ]
    .iter()
    .map(|s| s.chars().map(|c| c == '1').collect())
    .collect();
    assert_eq!(states, expected);
}

#[test]
fn lfsr_has_maximal_period() {
    let mut sim = Simulator::new(lfsr4()).unwrap();
    let cfg = EvaluationConfig::stepped(0.5);
    sim.step(&cfg).unwrap();
    let start = as_number(&bits(&sim, "r", 4));
    let mut seen = vec![start];
    loop {
        sim.run(2, &cfg).unwrap();
        let state = as_number(&bits(&sim, "r", 4));
        if state == start {
            break;
        }
        assert_ne!(state, 0, "LFSR locked up");
        assert!(!seen.contains(&state), "repeated {state} early");
        seen.push(state);
        assert!(seen.len() <= 15);
    }
    assert_eq!(seen.len(), 15);
}

#[test]
fn ripple_counter_counts_rising_edges() {
    let mut sim = Simulator::new(ripple_counter(4)).unwrap();
    let cfg = EvaluationConfig::stepped(0.5);
    sim.step(&cfg).unwrap();
    for edges in 0..20u32 {
        assert_eq!(as_number(&bits(&sim, "c", 4)), edges % 16);
        sim.run(2, &cfg).unwrap();
    }
}

#[test]
fn divider_halves_the_clock() {
    let mut sim = Simulator::new(clocked_divider(1.0)).unwrap();
    let cfg = EvaluationConfig::stepped(0.5);
    sim.step(&cfg).unwrap();
    for edges in 1..=6u32 {
        sim.run(2, &cfg).unwrap();
        assert_eq!(sim.output("out", 0), Some(edges % 2 == 1));
    }
}

#[test]
fn input_gates_are_never_recomputed() {
    let c: Circuit = CircuitBuilder::new().input("a", true).build();
    let out = evaluate(&c, &EvaluationConfig::default()).unwrap();
    assert_eq!(out.circuit.output("a", 0), Some(true));
    assert_eq!(out.evaluation_info.gate_evaluations, 0);
}
