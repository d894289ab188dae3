//! Seeded random circuits for property tests and benchmarks.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use strobe_core::{Circuit, Gate, GateKind, GateState, PinRef, Wire};

const LOGIC_KINDS: [GateKind; 10] = [
    GateKind::And,
    GateKind::Or,
    GateKind::Not,
    GateKind::Nand,
    GateKind::Nor,
    GateKind::Xor,
    GateKind::Buffer,
    GateKind::Output,
    GateKind::DFlipFlop,
    GateKind::SrLatch,
];

/// A reproducible random circuit of `gates` gates.
///
/// The first gates are four INPUTs and one running CLOCK; the rest are
/// drawn from the logic and sequential kinds. Each input pin is wired with
/// probability 0.9. With `feedback == false` pins only read from earlier
/// gates, so the only cycles are through flip-flop D pins.
pub fn random_circuit(seed: u64, gates: usize, feedback: bool) -> Circuit {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut circuit = Circuit::new();
    let sources = 5.min(gates);

    for i in 0..sources {
        let gate = if i == 4 {
            Gate::clock(format!("g{i}"), 1.0)
        } else {
            Gate::input(format!("g{i}"), rng.random_bool(0.5))
        };
        circuit.gates.push(gate);
    }
    for i in sources..gates {
        let kind = LOGIC_KINDS[rng.random_range(0..LOGIC_KINDS.len())];
        let mut gate = Gate::new(format!("g{i}"), kind);
        if let GateState::DFlipFlop { ref mut q, .. } = gate.state {
            *q = rng.random_bool(0.5);
            gate.outputs[0] = *q;
        }
        circuit.gates.push(gate);
    }

    for to in sources..gates {
        let kind = circuit.gates[to].kind;
        for pin in 0..kind.input_arity() {
            if !rng.random_bool(0.9) {
                continue;
            }
            let from = if feedback || (kind == GateKind::DFlipFlop && pin == 0) {
                rng.random_range(0..gates)
            } else {
                rng.random_range(0..to)
            };
            let from_kind = circuit.gates[from].kind;
            let from_pin = rng.random_range(0..from_kind.readable_output_pins()) as i32;
            let id = format!("w{}", circuit.wires.len());
            let to_id = circuit.gates[to].id.clone();
            let from_id = circuit.gates[from].id.clone();
            circuit.wires.push(Wire::new(
                id,
                PinRef::new(from_id, from_pin),
                PinRef::new(to_id, pin as i32),
            ));
        }
    }
    circuit
}

/// Flip a random subset of the circuit's INPUT gates.
pub fn perturb_inputs(circuit: &mut Circuit, seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for gate in circuit.gates.iter_mut() {
        if gate.kind == GateKind::Input && rng.random_bool(0.3) {
            if let Some(out) = gate.outputs.first_mut() {
                *out = !*out;
            }
        }
    }
}
