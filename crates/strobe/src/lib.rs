//! Strobe: a tick-based evaluation engine for digital logic circuits.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Strobe sub-crates. For most users, adding `strobe` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use strobe::prelude::*;
//!
//! // A half adder: sum = a XOR b, carry = a AND b.
//! let mut circuit = Circuit::new();
//! circuit.gates.push(Gate::input("a", true));
//! circuit.gates.push(Gate::input("b", true));
//! circuit.gates.push(Gate::new("sum", GateKind::Xor));
//! circuit.gates.push(Gate::new("carry", GateKind::And));
//! for (i, (from, to, pin)) in [("a", "sum", 0), ("b", "sum", 1), ("a", "carry", 0), ("b", "carry", 1)]
//!     .into_iter()
//!     .enumerate()
//! {
//!     circuit.wires.push(Wire::new(format!("w{i}"), PinRef::primary(from), PinRef::new(to, pin)));
//! }
//!
//! let result = evaluate(&circuit, &EvaluationConfig::default()).unwrap();
//! assert_eq!(result.circuit.output("sum", 0), Some(false));
//! assert_eq!(result.circuit.output("carry", 0), Some(true));
//! assert_eq!(result.evaluation_info.outcome, SettleOutcome::Converged);
//! ```
//!
//! Stepping the same circuit many times is cheaper through a [`Simulator`](engine::Simulator),
//! which validates the topology once:
//!
//! ```rust
//! use strobe::prelude::*;
//!
//! let json = r#"{
//!     "gates": [
//!         { "id": "clk", "type": "CLOCK", "metadata": { "frequency": 1, "isRunning": true } },
//!         { "id": "div", "type": "D-FF", "metadata": { "qOutput": false, "previousClockState": false } }
//!     ],
//!     "wires": [
//!         { "id": "w0", "from": { "gateId": "clk" }, "to": { "gateId": "div", "pinIndex": 1 } },
//!         { "id": "w1", "from": { "gateId": "div", "pinIndex": 1 }, "to": { "gateId": "div", "pinIndex": 0 } }
//!     ]
//! }"#;
//! let mut sim = Simulator::from_json(json).unwrap();
//! let cfg = EvaluationConfig::stepped(0.5);
//! sim.run(2, &cfg).unwrap();
//! assert_eq!(sim.output("div", 0), Some(true));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `strobe-core` | Circuit values, gate kinds, IDs, errors, JSON schema |
//! | [`arena`] | `strobe-arena` | Ping-pong signal storage and snapshots |
//! | [`netlist`] | `strobe-netlist` | Topology validation, fan-out, canonical ranks |
//! | [`logic`] | `strobe-logic` | Gate truth tables, latch and flip-flop transitions, clock phase |
//! | [`engine`] | `strobe-engine` | Scheduler, tick engine, `evaluate`, `Simulator` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, circuit values, and errors (`strobe-core`).
///
/// Contains [`types::Circuit`], [`types::GateKind`], the document schema
/// and the [`types::SignalSnapshot`] trait.
pub use strobe_core as types;

/// Ping-pong signal storage (`strobe-arena`).
pub use strobe_arena as arena;

/// Compiled topology (`strobe-netlist`).
///
/// [`netlist::Netlist::compile`] validates a circuit and derives fan-out and
/// the canonical evaluation order.
pub use strobe_netlist as netlist;

/// Pure gate semantics (`strobe-logic`).
pub use strobe_logic as logic;

/// Scheduling and entry points (`strobe-engine`).
///
/// [`engine::evaluate()`] for one stateless tick, [`engine::Simulator`]
/// for repeated stepping.
pub use strobe_engine as engine;

/// Common imports for typical Strobe usage.
///
/// ```rust
/// use strobe::prelude::*;
/// ```
pub mod prelude {
    // Circuit values
    pub use strobe_core::{Circuit, Gate, GateKind, GateState, PinRef, TickId, Wire};

    // Errors
    pub use strobe_core::{CircuitError, TopologyError};
    pub use strobe_engine::{ConfigError, EvaluateError, SimulatorError};

    // Engine
    pub use strobe_engine::{
        evaluate, evaluate_json, ClockMode, EvaluationConfig, EvaluationInfo, EvaluationResult,
        SettleOutcome, Simulator, Strategy, StrategyUsed,
    };
}
