//! Compiled wiring tables and the topology validator that builds them.

use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;
use strobe_core::error::WireEnd;
use strobe_core::{Circuit, CircuitError, GateIndex, GateKind, TopologyError, MAX_PINS};

use crate::rank::rank_gates;

// ── Routing types ──────────────────────────────────────────────────

/// A gate output pin that drives something.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Driver {
    /// Driving gate.
    pub gate: GateIndex,
    /// Output pin on the driving gate.
    pub pin: u8,
}

/// Where an input pin takes its value from during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinSource {
    /// No wire. The pin keeps its stored value.
    Unwired,
    /// Read the driver's current output.
    Live(Driver),
    /// Read the driver's output as it was at the start of the tick.
    ///
    /// Used for the D pin of a flip-flop, which samples before the edge. A
    /// change to D (or anything feeding it) is only captured if it was
    /// published at least one tick before the rising clock edge.
    Sampled(Driver),
}

impl PinSource {
    /// The driver, if the pin is wired.
    pub fn driver(self) -> Option<Driver> {
        match self {
            Self::Unwired => None,
            Self::Live(d) | Self::Sampled(d) => Some(d),
        }
    }
}

/// One listener on a gate's outputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sink {
    /// Listening gate.
    pub gate: GateIndex,
    /// Driver output pin.
    pub from_pin: u8,
    /// Input pin on the listening gate.
    pub to_pin: u8,
    /// Whether a change must re-evaluate the listener within the tick.
    pub sensitive: bool,
    /// Whether the listener ranks at or before the driver.
    pub back_edge: bool,
}

/// A wire resolved to dense indices, kept for `is_active` refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WireRoute {
    /// Position of the wire in the circuit's wire list.
    pub wire: usize,
    /// Driving output.
    pub from: Driver,
    /// Driven gate.
    pub to: GateIndex,
    /// Driven pin.
    pub to_pin: u8,
}

// ── Netlist ────────────────────────────────────────────────────────

/// Validated, index-addressed form of a circuit's topology.
///
/// Only topology lives here. Signal values live in the arena, so one
/// netlist serves every tick of a circuit whose gate and wire sets are
/// unchanged.
#[derive(Clone, Debug)]
pub struct Netlist {
    ids: IndexMap<String, GateIndex>,
    kinds: Vec<GateKind>,
    fan_in: Vec<[PinSource; MAX_PINS]>,
    /// CSR offsets: sinks of gate `g` are `fan_out[offsets[g]..offsets[g + 1]]`.
    fan_out_offsets: Vec<u32>,
    fan_out: Vec<Sink>,
    rank: Vec<u32>,
    order: Vec<GateIndex>,
    clocks: Vec<GateIndex>,
    routes: Vec<WireRoute>,
    back_edges: usize,
}

impl Netlist {
    /// Validate `circuit` and build its routing tables.
    ///
    /// # Errors
    ///
    /// Returns [`CircuitError::InvalidTopology`] for duplicate ids, wires
    /// that reference missing gates or pins, and input pins driven twice.
    pub fn compile(circuit: &Circuit) -> Result<Self, CircuitError> {
        let n = circuit.gates.len();
        if u32::try_from(n).is_err() {
            return Err(TopologyError::TooManyGates { count: n }.into());
        }

        let mut ids = IndexMap::with_capacity(n);
        let mut kinds = Vec::with_capacity(n);
        let mut clocks = Vec::new();
        for (i, gate) in circuit.gates.iter().enumerate() {
            let idx = GateIndex(i as u32);
            match ids.entry(gate.id.clone()) {
                Entry::Occupied(_) => {
                    return Err(TopologyError::DuplicateGateId {
                        id: gate.id.clone(),
                    }
                    .into())
                }
                Entry::Vacant(v) => {
                    v.insert(idx);
                }
            }
            kinds.push(gate.kind);
            if gate.kind == GateKind::Clock {
                clocks.push(idx);
            }
        }

        let mut wire_ids = IndexSet::with_capacity(circuit.wires.len());
        let mut fan_in = vec![[PinSource::Unwired; MAX_PINS]; n];
        let mut drivers_of: Vec<[Option<usize>; MAX_PINS]> = vec![[None; MAX_PINS]; n];
        let mut routes = Vec::with_capacity(circuit.wires.len());

        for (w, wire) in circuit.wires.iter().enumerate() {
            if !wire_ids.insert(wire.id.as_str()) {
                return Err(TopologyError::DuplicateWireId {
                    id: wire.id.clone(),
                }
                .into());
            }
            let lookup = |gate_id: &str, end: WireEnd| {
                ids.get(gate_id)
                    .copied()
                    .ok_or_else(|| TopologyError::UnknownGate {
                        wire: wire.id.clone(),
                        gate: gate_id.to_string(),
                        end,
                    })
            };
            let from = lookup(&wire.from.gate_id, WireEnd::From)?;
            let to = lookup(&wire.to.gate_id, WireEnd::To)?;

            let from_kind = kinds[from.get()];
            let from_pin = checked_pin(
                &wire.id,
                &wire.from.gate_id,
                WireEnd::From,
                wire.from.pin_index,
                from_kind.readable_output_pins(),
            )?;
            let to_kind = kinds[to.get()];
            let to_pin = checked_pin(
                &wire.id,
                &wire.to.gate_id,
                WireEnd::To,
                wire.to.pin_index,
                to_kind.input_arity(),
            )?;

            if let Some(existing) = drivers_of[to.get()][to_pin] {
                return Err(TopologyError::PinAlreadyDriven {
                    wire: wire.id.clone(),
                    existing: circuit.wires[existing].id.clone(),
                    gate: wire.to.gate_id.clone(),
                    pin: to_pin,
                }
                .into());
            }
            drivers_of[to.get()][to_pin] = Some(w);

            let driver = Driver {
                gate: from,
                pin: from_pin as u8,
            };
            fan_in[to.get()][to_pin] = if is_sampled(to_kind, to_pin) {
                PinSource::Sampled(driver)
            } else {
                PinSource::Live(driver)
            };
            routes.push(WireRoute {
                wire: w,
                from: driver,
                to,
                to_pin: to_pin as u8,
            });
        }

        let edges: Vec<(u32, u32)> = routes
            .iter()
            .filter(|r| !is_sampled(kinds[r.to.get()], r.to_pin as usize))
            .map(|r| (r.from.gate.0, r.to.0))
            .collect();
        let ranking = rank_gates(n, &edges);

        let mut per_gate: Vec<SmallVec<[Sink; 4]>> = vec![SmallVec::new(); n];
        let mut back_edges = 0;
        for r in &routes {
            let sensitive = !is_sampled(kinds[r.to.get()], r.to_pin as usize);
            let back_edge = ranking.rank[r.to.get()] <= ranking.rank[r.from.gate.get()];
            if sensitive && back_edge {
                back_edges += 1;
            }
            per_gate[r.from.gate.get()].push(Sink {
                gate: r.to,
                from_pin: r.from.pin,
                to_pin: r.to_pin,
                sensitive,
                back_edge,
            });
        }
        let mut fan_out_offsets = Vec::with_capacity(n + 1);
        let mut fan_out = Vec::with_capacity(routes.len());
        fan_out_offsets.push(0);
        for sinks in per_gate {
            fan_out.extend(sinks);
            fan_out_offsets.push(fan_out.len() as u32);
        }

        tracing::debug!(
            gates = n,
            wires = routes.len(),
            back_edges,
            cycle_breaks = ranking.promotions,
            "netlist compiled"
        );

        Ok(Self {
            ids,
            kinds,
            fan_in,
            fan_out_offsets,
            fan_out,
            rank: ranking.rank,
            order: ranking.order.into_iter().map(GateIndex).collect(),
            clocks,
            routes,
            back_edges,
        })
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether the netlist has no gates.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Dense index of the gate with id `id`.
    pub fn gate_index(&self, id: &str) -> Option<GateIndex> {
        self.ids.get(id).copied()
    }

    /// Id of the gate at `gate`.
    pub fn gate_id(&self, gate: GateIndex) -> Option<&str> {
        self.ids.get_index(gate.get()).map(|(id, _)| id.as_str())
    }

    /// Kind of the gate at `gate`.
    pub fn kind(&self, gate: GateIndex) -> GateKind {
        self.kinds[gate.get()]
    }

    /// Kinds of all gates, by index.
    pub fn kinds(&self) -> &[GateKind] {
        &self.kinds
    }

    /// Pin sources of `gate`. Pins beyond the kind's arity are `Unwired`.
    pub fn fan_in(&self, gate: GateIndex) -> &[PinSource; MAX_PINS] {
        &self.fan_in[gate.get()]
    }

    /// Whether any input pin of `gate` has a wire.
    pub fn has_wired_inputs(&self, gate: GateIndex) -> bool {
        self.fan_in[gate.get()]
            .iter()
            .any(|s| !matches!(s, PinSource::Unwired))
    }

    /// Listeners on the outputs of `gate`.
    pub fn fan_out(&self, gate: GateIndex) -> &[Sink] {
        let g = gate.get();
        let start = self.fan_out_offsets[g] as usize;
        let end = self.fan_out_offsets[g + 1] as usize;
        &self.fan_out[start..end]
    }

    /// Position of `gate` in the evaluation order.
    pub fn rank(&self, gate: GateIndex) -> u32 {
        self.rank[gate.get()]
    }

    /// Gates in evaluation order.
    pub fn order(&self) -> &[GateIndex] {
        &self.order
    }

    /// CLOCK gates, by index.
    pub fn clocks(&self) -> &[GateIndex] {
        &self.clocks
    }

    /// Every wire, resolved.
    pub fn routes(&self) -> &[WireRoute] {
        &self.routes
    }

    /// Number of sensitive wires whose listener ranks at or before its driver.
    pub fn back_edge_count(&self) -> usize {
        self.back_edges
    }

    /// Whether the circuit has combinational feedback.
    pub fn has_feedback(&self) -> bool {
        self.back_edges > 0
    }
}

/// The D pin of a flip-flop samples tick-start state.
fn is_sampled(kind: GateKind, pin: usize) -> bool {
    kind == GateKind::DFlipFlop && pin == 0
}

fn checked_pin(
    wire: &str,
    gate: &str,
    end: WireEnd,
    pin_index: i32,
    available: usize,
) -> Result<usize, TopologyError> {
    let pin = match pin_index {
        -1 => Some(0),
        n => usize::try_from(n).ok(),
    };
    match pin {
        Some(p) if p < available => Ok(p),
        _ => Err(TopologyError::PinOutOfRange {
            wire: wire.to_string(),
            gate: gate.to_string(),
            end,
            pin: pin_index,
            available,
        }),
    }
}
