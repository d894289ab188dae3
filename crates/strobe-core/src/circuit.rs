//! Caller-facing circuit values: [`Circuit`], [`Gate`], [`Wire`], [`PinRef`].
//!
//! A `Circuit` is a plain value. The evaluator reads it, never keeps a
//! reference to it, and hands back a new one. Only pin values, outputs,
//! gate state, `is_active` and `tick` ever change between ticks; the gate
//! and wire sets are fixed by whoever built the circuit.

use serde::{Deserialize, Serialize};

use crate::error::CircuitError;
use crate::gate::{ClockState, GateKind, GateState};
use crate::id::TickId;
use crate::schema::{CircuitDoc, MetadataDefault};

/// One end of a wire: a gate id plus a pin index.
///
/// `pin_index == -1` on the driving end means the gate's primary output.
/// On the driven end it is accepted as pin 0.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PinRef {
    /// Id of the gate.
    pub gate_id: String,
    /// Pin index, or `-1` for the primary pin.
    pub pin_index: i32,
}

impl PinRef {
    /// Reference a specific pin.
    pub fn new(gate_id: impl Into<String>, pin_index: i32) -> Self {
        Self {
            gate_id: gate_id.into(),
            pin_index,
        }
    }

    /// Reference the gate's primary pin (`-1`).
    pub fn primary(gate_id: impl Into<String>) -> Self {
        Self::new(gate_id, -1)
    }

    /// The pin as a slot index: `-1` maps to 0, other negatives to `None`.
    pub fn resolved_pin(&self) -> Option<usize> {
        match self.pin_index {
            -1 => Some(0),
            n => usize::try_from(n).ok(),
        }
    }
}

/// A directed connection from an output pin to an input pin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wire {
    /// Unique wire id.
    pub id: String,
    /// Driving gate and output pin.
    pub from: PinRef,
    /// Driven gate and input pin.
    pub to: PinRef,
    /// Signal currently carried, refreshed after every tick.
    pub is_active: bool,
}

impl Wire {
    /// A wire with `is_active = false`.
    pub fn new(id: impl Into<String>, from: PinRef, to: PinRef) -> Self {
        Self {
            id: id.into(),
            from,
            to,
            is_active: false,
        }
    }
}

/// A gate instance.
#[derive(Clone, Debug, PartialEq)]
pub struct Gate {
    /// Unique gate id.
    pub id: String,
    /// Gate kind.
    pub kind: GateKind,
    /// Last value seen on each input pin; `None` until first driven.
    pub inputs: Vec<Option<bool>>,
    /// Output values (`Q`, `Q̄` for SR-LATCH).
    pub outputs: Vec<bool>,
    /// Kind-specific state.
    pub state: GateState,
}

impl Gate {
    /// A freshly placed gate of `kind` with default state.
    pub fn new(id: impl Into<String>, kind: GateKind) -> Self {
        let state = GateState::default_for(kind);
        let mut outputs = vec![false; kind.output_arity()];
        if let GateState::SrLatch { q, q_bar } = state {
            outputs = vec![q, q_bar];
        }
        Self {
            id: id.into(),
            kind,
            inputs: vec![None; kind.input_arity()],
            outputs,
            state,
        }
    }

    /// An INPUT gate holding `value`.
    pub fn input(id: impl Into<String>, value: bool) -> Self {
        let mut gate = Self::new(id, GateKind::Input);
        gate.outputs[0] = value;
        gate
    }

    /// A running CLOCK at `frequency` Hz.
    pub fn clock(id: impl Into<String>, frequency: f64) -> Self {
        let mut gate = Self::new(id, GateKind::Clock);
        gate.state = GateState::Clock(ClockState::running(frequency));
        gate
    }

    /// Value readable on output pin `pin`.
    ///
    /// Pin 1 of a D flip-flop is the complement of its stored `Q`.
    pub fn output(&self, pin: usize) -> Option<bool> {
        match (self.kind, pin) {
            (GateKind::DFlipFlop, 1) => self.outputs.first().map(|q| !q),
            _ => self.outputs.get(pin).copied(),
        }
    }
}

/// The unit of evaluation: a set of gates and the wires between them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CircuitDoc", into = "CircuitDoc")]
pub struct Circuit {
    /// Gates, in a stable order. The order defines gate indices.
    pub gates: Vec<Gate>,
    /// Wires.
    pub wires: Vec<Wire>,
    /// Completed evaluation ticks; 0 for a circuit never evaluated.
    pub tick: TickId,
}

impl Circuit {
    /// An empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a gate by id.
    pub fn gate(&self, id: &str) -> Option<&Gate> {
        self.gates.iter().find(|g| g.id == id)
    }

    /// Look up a gate by id, mutably.
    pub fn gate_mut(&mut self, id: &str) -> Option<&mut Gate> {
        self.gates.iter_mut().find(|g| g.id == id)
    }

    /// Look up a wire by id.
    pub fn wire(&self, id: &str) -> Option<&Wire> {
        self.wires.iter().find(|w| w.id == id)
    }

    /// Set the output of an INPUT gate. Returns `false` if `id` is not an
    /// INPUT gate.
    pub fn set_input(&mut self, id: &str, value: bool) -> bool {
        match self.gate_mut(id) {
            Some(gate) if gate.kind == GateKind::Input => {
                if let Some(out) = gate.outputs.first_mut() {
                    *out = value;
                }
                true
            }
            _ => false,
        }
    }

    /// Read output pin `pin` of gate `id`.
    pub fn output(&self, id: &str, pin: usize) -> Option<bool> {
        self.gate(id)?.output(pin)
    }

    /// Parse a circuit from its JSON document form.
    ///
    /// Unknown gate kinds fail with [`CircuitError::UnsupportedGateKind`].
    /// Missing or malformed metadata is replaced by documented defaults,
    /// each reported in the returned list.
    pub fn from_json(json: &str) -> Result<(Self, Vec<MetadataDefault>), CircuitError> {
        let doc: CircuitDoc = serde_json::from_str(json)?;
        doc.into_circuit()
    }

    /// Render the circuit as its JSON document form.
    pub fn to_json(&self) -> Result<String, CircuitError> {
        Ok(serde_json::to_string(&CircuitDoc::from(self.clone()))?)
    }
}
