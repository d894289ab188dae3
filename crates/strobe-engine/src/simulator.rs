//! Lockstep simulator: accept once, step many times.
//!
//! [`Simulator`] is the stateful counterpart of [`evaluate`](crate::evaluate()).
//! Topology is validated when the circuit is accepted; every
//! [`step()`](Simulator::step) afterwards reuses the compiled netlist and
//! the signal arena.
//!
//! # Example
//!
//! ```ignore
//! let mut sim = Simulator::new(johnson_counter(4))?;
//! let config = EvaluationConfig::stepped(0.5);
//! for _ in 0..16 {
//!     sim.step(&config)?;
//! }
//! assert_eq!(sim.output("ff0", 0), Some(false));
//! ```

use std::error::Error;
use std::fmt;

use strobe_core::{Circuit, GateKind, GateState, SignalSnapshot, TickId};
use strobe_netlist::Netlist;
use tracing::instrument;

use crate::config::EvaluationConfig;
use crate::error::EvaluateError;
use crate::metrics::EvaluationInfo;
use crate::tick::TickEngine;

// ── SimulatorError ──────────────────────────────────────────────

/// Errors from [`Simulator`] operations.
#[derive(Clone, Debug, PartialEq)]
pub enum SimulatorError {
    /// No gate has this id.
    UnknownGate {
        /// The id asked for.
        id: String,
    },
    /// The gate exists but is not an INPUT.
    NotAnInput {
        /// The gate id.
        id: String,
        /// Its kind.
        kind: GateKind,
    },
    /// The gate exists but is not a CLOCK.
    NotAClock {
        /// The gate id.
        id: String,
        /// Its kind.
        kind: GateKind,
    },
    /// Accepting or stepping the circuit failed.
    Evaluate(EvaluateError),
}

impl fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownGate { id } => write!(f, "unknown gate '{id}'"),
            Self::NotAnInput { id, kind } => write!(f, "gate '{id}' is {kind}, not INPUT"),
            Self::NotAClock { id, kind } => write!(f, "gate '{id}' is {kind}, not CLOCK"),
            Self::Evaluate(e) => write!(f, "{e}"),
        }
    }
}

impl Error for SimulatorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Evaluate(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EvaluateError> for SimulatorError {
    fn from(e: EvaluateError) -> Self {
        Self::Evaluate(e)
    }
}

// ── Simulator ───────────────────────────────────────────────────

/// A circuit accepted for repeated stepping.
#[derive(Debug)]
pub struct Simulator {
    engine: TickEngine,
}

impl Simulator {
    /// Accept `circuit`, validating its topology once.
    pub fn new(circuit: Circuit) -> Result<Self, SimulatorError> {
        Ok(Self {
            engine: TickEngine::new(circuit)?,
        })
    }

    /// Accept a circuit document. Metadata defaults are reported by the
    /// first [`step()`](Simulator::step).
    pub fn from_json(json: &str) -> Result<Self, SimulatorError> {
        let (circuit, defaults) = Circuit::from_json(json).map_err(EvaluateError::from)?;
        Ok(Self {
            engine: TickEngine::with_defaults(circuit, defaults)?,
        })
    }

    /// Execute one tick.
    #[instrument(level = "debug", skip_all, fields(tick = self.engine.current_tick().0))]
    pub fn step(&mut self, config: &EvaluationConfig) -> Result<EvaluationInfo, SimulatorError> {
        Ok(self.engine.execute_tick(config)?)
    }

    /// Execute `ticks` ticks, returning the report of the last one.
    pub fn run(
        &mut self,
        ticks: u64,
        config: &EvaluationConfig,
    ) -> Result<Option<EvaluationInfo>, SimulatorError> {
        let mut last = None;
        for _ in 0..ticks {
            last = Some(self.step(config)?);
        }
        Ok(last)
    }

    /// Set an INPUT gate's output for the next tick.
    pub fn set_input(&mut self, id: &str, value: bool) -> Result<(), SimulatorError> {
        let gate = self.expect_kind(id, GateKind::Input)?;
        if let Some(slot) = self.engine.slot_mut(gate) {
            slot.outputs[0] = value;
        }
        Ok(())
    }

    /// Start or pause a CLOCK. A paused clock holds its current level.
    pub fn set_clock_running(&mut self, id: &str, running: bool) -> Result<(), SimulatorError> {
        let gate = self.expect_kind(id, GateKind::Clock)?;
        if let Some(slot) = self.engine.slot_mut(gate) {
            if let GateState::Clock(ref mut clock) = slot.state {
                clock.is_running = running;
            }
        }
        Ok(())
    }

    /// Value on output pin `pin` of gate `id`.
    pub fn output(&self, id: &str, pin: usize) -> Option<bool> {
        let netlist = self.engine.netlist();
        let gate = netlist.gate_index(id)?;
        let kind = netlist.kind(gate);
        if pin >= kind.readable_output_pins() {
            return None;
        }
        let snapshot = self.engine.snapshot();
        Some(snapshot.slot(gate)?.output(kind, pin))
    }

    /// The circuit as of the last tick.
    pub fn snapshot(&self) -> Circuit {
        self.engine.to_circuit()
    }

    /// Rewind to the accepted circuit.
    pub fn reset(&mut self) -> Result<(), SimulatorError> {
        Ok(self.engine.reset()?)
    }

    /// Completed ticks.
    pub fn current_tick(&self) -> TickId {
        self.engine.current_tick()
    }

    /// Report of the most recent tick.
    pub fn last_info(&self) -> Option<&EvaluationInfo> {
        self.engine.last_info()
    }

    /// Fingerprint of the current state.
    pub fn state_hash(&self) -> u64 {
        self.engine.state_hash()
    }

    /// The compiled netlist, for introspection.
    pub fn netlist(&self) -> &Netlist {
        self.engine.netlist()
    }

    fn expect_kind(
        &self,
        id: &str,
        want: GateKind,
    ) -> Result<strobe_core::GateIndex, SimulatorError> {
        let netlist = self.engine.netlist();
        let gate = netlist
            .gate_index(id)
            .ok_or_else(|| SimulatorError::UnknownGate { id: id.to_string() })?;
        let kind = netlist.kind(gate);
        if kind == want {
            return Ok(gate);
        }
        let id = id.to_string();
        Err(match want {
            GateKind::Clock => SimulatorError::NotAClock { id, kind },
            _ => SimulatorError::NotAnInput { id, kind },
        })
    }
}
