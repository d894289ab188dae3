//! Circuit builders, gallery fixtures and test helpers for Strobe development.
//!
//! Provides a chaining [`CircuitBuilder`], the standard gallery circuits in
//! [`fixtures`], seeded random circuit generators, a [`MockSnapshot`] for
//! code that reads through [`SignalSnapshot`], and [`init_tracing`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod random;

pub use fixtures::*;
pub use random::{perturb_inputs, random_circuit};

use strobe_core::{
    Circuit, Gate, GateIndex, GateKind, GateState, Generation, PinRef, SignalSlot,
    SignalSnapshot, TickId, Wire,
};
use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber filtered by `RUST_LOG`, once per process.
///
/// Safe to call from every test; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Chaining builder for test circuits.
///
/// Wires get sequential ids `w0`, `w1`, ... in the order they are added.
#[derive(Default)]
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an INPUT gate.
    pub fn input(self, id: &str, value: bool) -> Self {
        self.with_gate(Gate::input(id, value))
    }

    /// Add a running CLOCK gate.
    pub fn clock(self, id: &str, frequency: f64) -> Self {
        self.with_gate(Gate::clock(id, frequency))
    }

    /// Add a gate of `kind` in its default state.
    pub fn gate(self, id: &str, kind: GateKind) -> Self {
        self.with_gate(Gate::new(id, kind))
    }

    /// Add a D flip-flop with a preset state.
    pub fn flip_flop(self, id: &str, q: bool, prev_clock: bool) -> Self {
        let mut gate = Gate::new(id, GateKind::DFlipFlop);
        gate.state = GateState::DFlipFlop { q, prev_clock };
        gate.outputs[0] = q;
        self.with_gate(gate)
    }

    /// Add an arbitrary gate.
    pub fn with_gate(mut self, gate: Gate) -> Self {
        self.circuit.gates.push(gate);
        self
    }

    /// Set the stored outputs of an already-added gate.
    pub fn outputs(mut self, id: &str, outputs: &[bool]) -> Self {
        if let Some(gate) = self.circuit.gate_mut(id) {
            gate.outputs = outputs.to_vec();
        }
        self
    }

    /// Wire the primary output of `from` to pin `to_pin` of `to`.
    pub fn wire(self, from: &str, to: &str, to_pin: i32) -> Self {
        self.wire_pin(from, -1, to, to_pin)
    }

    /// Wire output pin `from_pin` of `from` to pin `to_pin` of `to`.
    pub fn wire_pin(mut self, from: &str, from_pin: i32, to: &str, to_pin: i32) -> Self {
        let id = format!("w{}", self.circuit.wires.len());
        self.circuit.wires.push(Wire::new(
            id,
            PinRef::new(from, from_pin),
            PinRef::new(to, to_pin),
        ));
        self
    }

    pub fn build(self) -> Circuit {
        self.circuit
    }
}

/// Mock snapshot implementing [`SignalSnapshot`].
pub struct MockSnapshot {
    slots: Vec<SignalSlot>,
    tick: TickId,
    generation: Generation,
}

impl MockSnapshot {
    pub fn new(slots: Vec<SignalSlot>, tick: TickId, generation: Generation) -> Self {
        Self {
            slots,
            tick,
            generation,
        }
    }
}

impl SignalSnapshot for MockSnapshot {
    fn slot(&self, gate: GateIndex) -> Option<&SignalSlot> {
        self.slots.get(gate.get())
    }

    fn slots(&self) -> &[SignalSlot] {
        &self.slots
    }

    fn tick_id(&self) -> TickId {
        self.tick
    }

    fn generation(&self) -> Generation {
        self.generation
    }
}
