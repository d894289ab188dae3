//! Tick engine: the single-threaded evaluation loop.
//!
//! [`TickEngine`] wires together the compiled netlist, the signal arena
//! and the scheduler. Each [`execute_tick()`](TickEngine::execute_tick)
//! drives the clocks, settles the circuit, publishes the staging buffer
//! and reports what happened.

use smallvec::SmallVec;
use strobe_arena::{SignalArena, Snapshot};
use strobe_core::{
    Circuit, GateIndex, GateState, MetadataDefault, SignalSlot, SignalSnapshot, TickId,
};
use strobe_logic::drive_clock;
use strobe_netlist::Netlist;

use crate::config::EvaluationConfig;
use crate::error::EvaluateError;
use crate::hash::state_hash;
use crate::metrics::{EvaluationInfo, SettleOutcome};
use crate::scheduler::{Scheduler, SettlePlan, SettleState};
use crate::strategy::select_strategy;

// ── TickEngine ───────────────────────────────────────────────────

/// Owns everything needed to step one accepted circuit.
///
/// The accepted circuit is kept as a template: ids, kinds and wires never
/// change, so [`to_circuit()`](TickEngine::to_circuit) clones it and writes
/// the published signal state back in.
#[derive(Debug)]
pub struct TickEngine {
    netlist: Netlist,
    arena: SignalArena,
    scheduler: Scheduler,
    template: Circuit,
    initial_slots: Vec<SignalSlot>,
    current_tick: TickId,
    load_defaults: Vec<MetadataDefault>,
    pending_defaults: Vec<MetadataDefault>,
    last_info: Option<EvaluationInfo>,
}

impl TickEngine {
    /// Accept a circuit: validate its topology and load its signal state.
    pub fn new(circuit: Circuit) -> Result<Self, EvaluateError> {
        Self::with_defaults(circuit, Vec::new())
    }

    /// Accept a circuit parsed from JSON, carrying forward the defaults the
    /// parser applied so the first tick can report them.
    pub fn with_defaults(
        circuit: Circuit,
        mut defaults: Vec<MetadataDefault>,
    ) -> Result<Self, EvaluateError> {
        let netlist = Netlist::compile(&circuit)?;
        let mut slots = Vec::with_capacity(circuit.gates.len());
        for gate in &circuit.gates {
            let (slot, repaired) = SignalSlot::from_gate(gate);
            defaults.extend(repaired);
            slots.push(slot);
        }
        let current_tick = circuit.tick;
        Ok(Self {
            scheduler: Scheduler::new(netlist.len()),
            arena: SignalArena::new(slots.clone(), current_tick),
            netlist,
            template: circuit,
            initial_slots: slots,
            current_tick,
            pending_defaults: defaults.clone(),
            load_defaults: defaults,
            last_info: None,
        })
    }

    /// Execute one tick.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError::Config`] if `config` fails validation. The
    /// arena is untouched in that case.
    pub fn execute_tick(
        &mut self,
        config: &EvaluationConfig,
    ) -> Result<EvaluationInfo, EvaluateError> {
        config.validate()?;
        let gate_count = self.netlist.len();
        let completed = self.current_tick;
        let strategy = select_strategy(config.strategy, gate_count, completed);
        let cap = config.resolved_iteration_cap(gate_count);
        let t = config.time_at(completed);
        let next_tick = completed.next();

        let report = {
            let mut guard = self.arena.begin_tick()?;
            let changed = drive_clocks(&self.netlist, guard.staging, t);
            self.scheduler.settle(
                &self.netlist,
                &mut guard,
                SettlePlan {
                    strategy,
                    changed_clocks: &changed,
                    first_evaluation: completed == TickId(0),
                    cap,
                    delay_mode: config.delay_mode,
                },
            )?
        };
        self.arena.publish(next_tick)?;
        self.current_tick = next_tick;

        let hash = state_hash(&self.arena.snapshot());
        if report.outcome == SettleOutcome::IterationCapped {
            tracing::warn!(
                tick = next_tick.0,
                cap,
                "iteration cap reached; oscillating gates rolled back"
            );
        }
        tracing::debug!(
            tick = next_tick.0,
            ?strategy,
            sweeps = report.sweeps,
            outcome = ?report.outcome,
            gate_evaluations = report.gate_evaluations,
            "tick settled"
        );

        let info = EvaluationInfo {
            strategy_used: strategy,
            iterations: report.sweeps,
            outcome: report.outcome,
            gate_evaluations: report.gate_evaluations,
            tick: next_tick,
            state_hash: hash,
            metadata_defaults: std::mem::take(&mut self.pending_defaults),
        };
        self.last_info = Some(info.clone());
        Ok(info)
    }

    /// The compiled netlist.
    pub fn netlist(&self) -> &Netlist {
        &self.netlist
    }

    /// Read-only view of the published signal state.
    pub fn snapshot(&self) -> Snapshot<'_> {
        self.arena.snapshot()
    }

    /// Mutable access to one published slot, for edits between ticks.
    pub(crate) fn slot_mut(&mut self, gate: GateIndex) -> Option<&mut SignalSlot> {
        self.arena.published_mut().get_mut(gate.get())
    }

    /// Completed ticks.
    pub fn current_tick(&self) -> TickId {
        self.current_tick
    }

    /// Report of the most recent tick, if any.
    pub fn last_info(&self) -> Option<&EvaluationInfo> {
        self.last_info.as_ref()
    }

    /// Scheduler state after the most recent tick.
    pub fn settle_state(&self) -> SettleState {
        self.scheduler.state()
    }

    /// Fingerprint of the published state.
    pub fn state_hash(&self) -> u64 {
        state_hash(&self.arena.snapshot())
    }

    /// The circuit as of the last published tick.
    ///
    /// Pins, outputs and state come from the arena; every wire's
    /// `is_active` is recomputed from its driver.
    pub fn to_circuit(&self) -> Circuit {
        let snapshot = self.arena.snapshot();
        let slots = snapshot.slots();
        let mut circuit = self.template.clone();
        for (gate, slot) in circuit.gates.iter_mut().zip(slots) {
            slot.store(gate);
        }
        for route in self.netlist.routes() {
            let driver = &slots[route.from.gate.get()];
            circuit.wires[route.wire].is_active =
                driver.output(self.netlist.kind(route.from.gate), route.from.pin as usize);
        }
        circuit.tick = self.current_tick;
        circuit
    }

    /// Rewind to the accepted circuit.
    pub fn reset(&mut self) -> Result<(), EvaluateError> {
        self.arena.reset(&self.initial_slots, self.template.tick)?;
        self.scheduler.reset();
        self.current_tick = self.template.tick;
        self.pending_defaults = self.load_defaults.clone();
        self.last_info = None;
        Ok(())
    }
}

/// Drive every CLOCK to time `t`. Returns the clocks whose output changed.
fn drive_clocks(
    netlist: &Netlist,
    staging: &mut [SignalSlot],
    t: f64,
) -> SmallVec<[GateIndex; 4]> {
    let mut changed = SmallVec::new();
    for &clock in netlist.clocks() {
        let slot = &mut staging[clock.get()];
        if let GateState::Clock(mut state) = slot.state {
            let level = drive_clock(&mut state, slot.outputs[0], t);
            slot.state = GateState::Clock(state);
            if level != slot.outputs[0] {
                slot.outputs[0] = level;
                changed.push(clock);
            }
        }
    }
    changed
}
