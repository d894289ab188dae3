//! Gallery circuits used across the test suites and benchmarks.
//!
//! Gate ids are part of each fixture's contract; tests address gates by id.

use strobe_core::{Circuit, GateKind};

use crate::CircuitBuilder;

/// Half adder. Inputs `a`, `b`; outputs `sum` (XOR) and `carry` (AND).
pub fn half_adder(a: bool, b: bool) -> Circuit {
    CircuitBuilder::new()
        .input("a", a)
        .input("b", b)
        .gate("sum", GateKind::Xor)
        .gate("carry", GateKind::And)
        .wire("a", "sum", 0)
        .wire("b", "sum", 1)
        .wire("a", "carry", 0)
        .wire("b", "carry", 1)
        .build()
}

/// Full adder. Inputs `a`, `b`, `cin`; outputs `sum` and `cout`.
pub fn full_adder(a: bool, b: bool, cin: bool) -> Circuit {
    CircuitBuilder::new()
        .input("a", a)
        .input("b", b)
        .input("cin", cin)
        .gate("x1", GateKind::Xor)
        .gate("sum", GateKind::Xor)
        .gate("a1", GateKind::And)
        .gate("a2", GateKind::And)
        .gate("cout", GateKind::Or)
        .wire("a", "x1", 0)
        .wire("b", "x1", 1)
        .wire("x1", "sum", 0)
        .wire("cin", "sum", 1)
        .wire("a", "a1", 0)
        .wire("b", "a1", 1)
        .wire("x1", "a2", 0)
        .wire("cin", "a2", 1)
        .wire("a1", "cout", 0)
        .wire("a2", "cout", 1)
        .build()
}

/// SR-LATCH primitive. Inputs `s`, `r`; latch `latch`; taps `q`, `q_bar`.
pub fn sr_latch_primitive() -> Circuit {
    CircuitBuilder::new()
        .input("s", false)
        .input("r", false)
        .gate("latch", GateKind::SrLatch)
        .gate("q", GateKind::Output)
        .gate("q_bar", GateKind::Output)
        .wire("s", "latch", 0)
        .wire("r", "latch", 1)
        .wire_pin("latch", 0, "q", 0)
        .wire_pin("latch", 1, "q_bar", 0)
        .outputs("q_bar", &[true])
        .build()
}

/// Cross-coupled NOR latch. Inputs `s`, `r`; `q = NOR(r, q_bar)`,
/// `q_bar = NOR(s, q)`. Starts reset.
pub fn sr_latch_nor_pair() -> Circuit {
    CircuitBuilder::new()
        .input("s", false)
        .input("r", false)
        .gate("q", GateKind::Nor)
        .gate("q_bar", GateKind::Nor)
        .wire("r", "q", 0)
        .wire("q_bar", "q", 1)
        .wire("s", "q_bar", 0)
        .wire("q", "q_bar", 1)
        .outputs("q_bar", &[true])
        .build()
}

/// Lone D flip-flop with both pins on INPUT gates. Inputs `d`, `clk`;
/// flip-flop `ff`; taps `q`, `q_bar`.
pub fn d_flip_flop() -> Circuit {
    CircuitBuilder::new()
        .input("d", false)
        .input("clk", false)
        .gate("ff", GateKind::DFlipFlop)
        .gate("q", GateKind::Output)
        .gate("q_bar", GateKind::Output)
        .wire("d", "ff", 0)
        .wire("clk", "ff", 1)
        .wire_pin("ff", 0, "q", 0)
        .wire_pin("ff", 1, "q_bar", 0)
        .outputs("q_bar", &[true])
        .build()
}

/// Cross-coupled NOR latch (`s`, `r`, `q`, `q_bar`) sharing a circuit with
/// an unconnected 3-NOT ring (`n0`, `n1`, `n2`).
pub fn sr_latch_beside_ring() -> Circuit {
    let mut circuit = sr_latch_nor_pair();
    let ring = ring_oscillator(3);
    circuit.gates.extend(ring.gates);
    for mut wire in ring.wires {
        wire.id = format!("ring_{}", wire.id);
        circuit.wires.push(wire);
    }
    circuit
}

/// Ring of `n` NOT gates `n0 -> n1 -> ... -> n0`.
pub fn ring_oscillator(n: usize) -> Circuit {
    let mut b = CircuitBuilder::new();
    for i in 0..n {
        b = b.gate(&format!("n{i}"), GateKind::Not);
    }
    for i in 0..n {
        b = b.wire(&format!("n{i}"), &format!("n{}", (i + 1) % n), 0);
    }
    b.build()
}

/// Johnson (twisted-ring) counter of `bits` flip-flops `ff0..` on a 1 Hz
/// clock `clk`. `ff0.D` takes the complement of the last stage.
pub fn johnson_counter(bits: usize) -> Circuit {
    let mut b = CircuitBuilder::new().clock("clk", 1.0);
    for i in 0..bits {
        b = b.gate(&format!("ff{i}"), GateKind::DFlipFlop);
    }
    for i in 0..bits {
        let ff = format!("ff{i}");
        b = b.wire("clk", &ff, 1);
        b = if i == 0 {
            b.wire_pin(&format!("ff{}", bits - 1), 1, &ff, 0)
        } else {
            b.wire(&format!("ff{}", i - 1), &ff, 0)
        };
    }
    b.build()
}

/// 4-bit Fibonacci LFSR `r0..r3` on a 1 Hz clock `clk`, taps on `r2` and
/// `r3` (x^4 + x^3 + 1), seeded with `r0 = 1`. Maximal period 15.
pub fn lfsr4() -> Circuit {
    let mut b = CircuitBuilder::new()
        .clock("clk", 1.0)
        .flip_flop("r0", true, false);
    for i in 1..4 {
        b = b.gate(&format!("r{i}"), GateKind::DFlipFlop);
    }
    b = b
        .gate("fb", GateKind::Xor)
        .wire("r2", "fb", 0)
        .wire("r3", "fb", 1)
        .wire("fb", "r0", 0);
    for i in 0..4 {
        let r = format!("r{i}");
        b = b.wire("clk", &r, 1);
        if i > 0 {
            b = b.wire(&format!("r{}", i - 1), &r, 0);
        }
    }
    b.build()
}

/// Asynchronous ripple counter of `bits` toggle-wired flip-flops `c0..`.
///
/// Each stage feeds its `Q̄` back into `D`; stage `i > 0` is clocked by
/// the `Q̄` of stage `i - 1`, so it toggles when the previous stage falls.
/// The count reads `c0` as the least significant bit.
pub fn ripple_counter(bits: usize) -> Circuit {
    let mut b = CircuitBuilder::new().clock("clk", 1.0);
    for i in 0..bits {
        // Q̄ of the previous stage starts high; record it so the first
        // tick is not mistaken for an edge.
        b = b.flip_flop(&format!("c{i}"), false, i > 0);
    }
    for i in 0..bits {
        let c = format!("c{i}");
        b = b.wire_pin(&c, 1, &c, 0);
        b = if i == 0 {
            b.wire("clk", &c, 1)
        } else {
            b.wire_pin(&format!("c{}", i - 1), 1, &c, 1)
        };
    }
    b.build()
}

/// Divide-by-two: flip-flop `div` toggles on each rising edge of `clk`,
/// observed on OUTPUT `out`.
pub fn clocked_divider(frequency: f64) -> Circuit {
    CircuitBuilder::new()
        .clock("clk", frequency)
        .gate("div", GateKind::DFlipFlop)
        .gate("out", GateKind::Output)
        .wire_pin("div", 1, "div", 0)
        .wire("clk", "div", 1)
        .wire("div", "out", 0)
        .build()
}

/// Every gallery fixture, named.
pub fn gallery() -> Vec<(&'static str, Circuit)> {
    vec![
        ("half_adder", half_adder(true, false)),
        ("full_adder", full_adder(true, true, false)),
        ("sr_latch_primitive", sr_latch_primitive()),
        ("sr_latch_nor_pair", sr_latch_nor_pair()),
        ("d_flip_flop", d_flip_flop()),
        ("ring_oscillator", ring_oscillator(3)),
        ("sr_latch_beside_ring", sr_latch_beside_ring()),
        ("johnson_counter", johnson_counter(4)),
        ("lfsr4", lfsr4()),
        ("ripple_counter", ripple_counter(4)),
        ("clocked_divider", clocked_divider(2.0)),
    ]
}
