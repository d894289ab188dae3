//! JSON document shapes for circuits and the lenient metadata reader.
//!
//! The document form mirrors what editors and gallery fixtures produce:
//! gate kinds travel as strings and kind-specific state lives in an
//! untyped `metadata` object. [`CircuitDoc::into_circuit`] turns a document
//! into a typed [`Circuit`], failing fast on unknown kinds and falling back
//! to documented defaults for missing metadata.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::circuit::{Circuit, Gate, PinRef, Wire};
use crate::error::CircuitError;
use crate::gate::{ClockState, GateKind, GateState};
use crate::id::TickId;

/// A default the reader substituted for a missing or malformed value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDefault {
    /// Gate the default was applied to.
    pub gate: String,
    /// Field that was missing or malformed.
    pub field: String,
    /// The value applied, rendered as text.
    pub applied: String,
}

impl MetadataDefault {
    pub(crate) fn record(
        defaults: &mut Vec<MetadataDefault>,
        gate: &str,
        field: &str,
        applied: impl ToString,
    ) {
        let applied = applied.to_string();
        tracing::warn!(gate, field, %applied, "metadata default applied");
        defaults.push(MetadataDefault {
            gate: gate.to_string(),
            field: field.to_string(),
            applied,
        });
    }
}

fn primary_pin() -> i32 {
    -1
}

/// Document form of [`PinRef`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinRefDoc {
    /// Gate id.
    pub gate_id: String,
    /// Pin index; `-1` (the default) is the primary pin.
    #[serde(default = "primary_pin")]
    pub pin_index: i32,
}

/// Document form of [`Wire`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDoc {
    /// Wire id.
    pub id: String,
    /// Driving end.
    pub from: PinRefDoc,
    /// Driven end.
    pub to: PinRefDoc,
    /// Cached signal value.
    #[serde(default)]
    pub is_active: bool,
}

/// Document form of [`Gate`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateDoc {
    /// Gate id.
    pub id: String,
    /// Kind name, e.g. `"NAND"` or `"D-FF"`.
    #[serde(alias = "type")]
    pub kind: String,
    /// Pin values; `null` for an unset pin.
    #[serde(default)]
    pub inputs: Vec<Option<bool>>,
    /// Output values.
    #[serde(default)]
    pub outputs: Vec<bool>,
    /// Kind-specific state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// Document form of [`Circuit`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitDoc {
    /// Gates.
    pub gates: Vec<GateDoc>,
    /// Wires.
    #[serde(default)]
    pub wires: Vec<WireDoc>,
    /// Completed ticks.
    #[serde(default)]
    pub tick: TickId,
}

impl CircuitDoc {
    /// Convert to a typed circuit, reporting every default applied.
    pub fn into_circuit(self) -> Result<(Circuit, Vec<MetadataDefault>), CircuitError> {
        let mut defaults = Vec::new();
        let mut gates = Vec::with_capacity(self.gates.len());
        for doc in self.gates {
            gates.push(doc.into_gate(&mut defaults)?);
        }
        let wires = self
            .wires
            .into_iter()
            .map(|w| Wire {
                id: w.id,
                from: PinRef::new(w.from.gate_id, w.from.pin_index),
                to: PinRef::new(w.to.gate_id, w.to.pin_index),
                is_active: w.is_active,
            })
            .collect();
        Ok((
            Circuit {
                gates,
                wires,
                tick: self.tick,
            },
            defaults,
        ))
    }
}

impl GateDoc {
    fn into_gate(self, defaults: &mut Vec<MetadataDefault>) -> Result<Gate, CircuitError> {
        let kind: GateKind = self
            .kind
            .parse()
            .map_err(|_| CircuitError::UnsupportedGateKind {
                gate: self.id.clone(),
                kind: self.kind.clone(),
            })?;
        let meta = self.metadata.unwrap_or_default();
        let id = self.id;

        let state = read_state(kind, &id, &meta, &self.outputs, defaults);

        let mut inputs = self.inputs;
        if !inputs.is_empty() && inputs.len() != kind.input_arity() {
            MetadataDefault::record(
                defaults,
                &id,
                "inputs",
                format!("{} pins", kind.input_arity()),
            );
        }
        inputs.resize(kind.input_arity(), None);

        let mut outputs = self.outputs;
        if !outputs.is_empty() && outputs.len() != kind.output_arity() {
            MetadataDefault::record(
                defaults,
                &id,
                "outputs",
                format!("{} values", kind.output_arity()),
            );
        }
        outputs.resize(kind.output_arity(), false);
        match state {
            GateState::DFlipFlop { q, .. } => outputs[0] = q,
            GateState::SrLatch { q, q_bar } => {
                outputs[0] = q;
                outputs[1] = q_bar;
            }
            GateState::Combinational | GateState::Clock(_) => {}
        }

        Ok(Gate {
            id,
            kind,
            inputs,
            outputs,
            state,
        })
    }
}

fn read_bool(meta: &Map<String, Value>, key: &str) -> Option<bool> {
    meta.get(key).and_then(Value::as_bool)
}

fn read_f64(meta: &Map<String, Value>, key: &str) -> Option<f64> {
    meta.get(key).and_then(Value::as_f64).filter(|v| v.is_finite())
}

fn read_state(
    kind: GateKind,
    id: &str,
    meta: &Map<String, Value>,
    outputs: &[bool],
    defaults: &mut Vec<MetadataDefault>,
) -> GateState {
    match kind {
        GateKind::Clock => {
            let frequency = match read_f64(meta, "frequency").filter(|f| *f > 0.0) {
                Some(f) => f,
                None => {
                    MetadataDefault::record(
                        defaults,
                        id,
                        "frequency",
                        ClockState::DEFAULT_FREQUENCY,
                    );
                    ClockState::DEFAULT_FREQUENCY
                }
            };
            let is_running = match read_bool(meta, "isRunning") {
                Some(r) => r,
                None => {
                    MetadataDefault::record(defaults, id, "isRunning", false);
                    false
                }
            };
            let origin = read_f64(meta, "startTime").or_else(|| read_f64(meta, "origin"));
            GateState::Clock(ClockState {
                frequency,
                is_running,
                origin,
            })
        }
        GateKind::DFlipFlop => {
            let q = match read_bool(meta, "qOutput").or_else(|| outputs.first().copied()) {
                Some(q) => q,
                None => {
                    MetadataDefault::record(defaults, id, "qOutput", false);
                    false
                }
            };
            let prev_clock = match read_bool(meta, "previousClockState") {
                Some(p) => p,
                None => {
                    MetadataDefault::record(defaults, id, "previousClockState", false);
                    false
                }
            };
            GateState::DFlipFlop { q, prev_clock }
        }
        GateKind::SrLatch => {
            let q = match read_bool(meta, "q").or_else(|| outputs.first().copied()) {
                Some(q) => q,
                None => {
                    MetadataDefault::record(defaults, id, "q", false);
                    false
                }
            };
            let q_bar = match read_bool(meta, "qBar").or_else(|| outputs.get(1).copied()) {
                Some(qb) => qb,
                None => {
                    MetadataDefault::record(defaults, id, "qBar", !q);
                    !q
                }
            };
            GateState::SrLatch { q, q_bar }
        }
        GateKind::Input
        | GateKind::Output
        | GateKind::And
        | GateKind::Or
        | GateKind::Not
        | GateKind::Nand
        | GateKind::Nor
        | GateKind::Xor
        | GateKind::Buffer => GateState::Combinational,
    }
}

fn write_metadata(state: &GateState) -> Option<Map<String, Value>> {
    let value = match state {
        GateState::Combinational => return None,
        GateState::Clock(clock) => {
            let mut v = json!({
                "frequency": clock.frequency,
                "isRunning": clock.is_running,
            });
            if let Some(origin) = clock.origin {
                v["startTime"] = json!(origin);
            }
            v
        }
        GateState::DFlipFlop { q, prev_clock } => json!({
            "qOutput": q,
            "previousClockState": prev_clock,
        }),
        GateState::SrLatch { q, q_bar } => json!({ "q": q, "qBar": q_bar }),
    };
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

impl From<Circuit> for CircuitDoc {
    fn from(c: Circuit) -> Self {
        let gates = c
            .gates
            .into_iter()
            .map(|g| GateDoc {
                metadata: write_metadata(&g.state),
                id: g.id,
                kind: g.kind.as_str().to_string(),
                inputs: g.inputs,
                outputs: g.outputs,
            })
            .collect();
        let wires = c
            .wires
            .into_iter()
            .map(|w| WireDoc {
                id: w.id,
                from: PinRefDoc {
                    gate_id: w.from.gate_id,
                    pin_index: w.from.pin_index,
                },
                to: PinRefDoc {
                    gate_id: w.to.gate_id,
                    pin_index: w.to.pin_index,
                },
                is_active: w.is_active,
            })
            .collect();
        Self {
            gates,
            wires,
            tick: c.tick,
        }
    }
}

impl TryFrom<CircuitDoc> for Circuit {
    type Error = CircuitError;

    fn try_from(doc: CircuitDoc) -> Result<Self, Self::Error> {
        doc.into_circuit().map(|(circuit, _)| circuit)
    }
}
