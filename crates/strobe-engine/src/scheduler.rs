//! Settle loop: seeding, rank-ordered sweeps, and the iteration cap.
//!
//! A tick settles in sweeps. Each sweep walks the netlist's canonical
//! order and evaluates the gates marked dirty, reading the current values
//! of their drivers. When a gate's outputs change, its sensitive
//! listeners are marked: listeners ranked later join the running sweep,
//! listeners ranked at or before the changed gate (feedback) join the next
//! one.
//!
//! The two strategies differ only in the seed set. Level order marks every
//! evaluable gate. Event-driven marks gates whose stored pins no longer
//! match their drivers, plus the listeners of clocks that just toggled.
//! Gates outside the event seed set have pins that already match their
//! drivers, so evaluating them is a no-op and both paths reach the same
//! state.
//!
//! When the sweep cap is reached, only the gates still changing in the last
//! two sweeps are treated as oscillating. Those are rolled back to their
//! values after the first sweep and frozen. The rest of the circuit keeps
//! what it settled to, and a repair pass re-evaluates any gate whose pins
//! read a rolled-back value.
//!
//! ```text
//! Idle ──► Seeding ──► Propagating ──┬──► Converged
//!                         ▲    │     ├──► IterationCapped
//!                         └────┘     └──► SinglePass (delay mode)
//! ```

use strobe_arena::{ArenaError, TickGuard};
use strobe_core::{GateIndex, SignalSlot};
use strobe_logic::step_gate;
use strobe_netlist::{Netlist, PinSource};

use crate::metrics::{SettleOutcome, StrategyUsed};

// ── State machine ──────────────────────────────────────────────────

/// Where the scheduler is in the current (or last) settle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettleState {
    /// No settle has run since construction or reset.
    Idle,
    /// Building the first sweep's dirty set.
    Seeding,
    /// Running sweep `sweep` (1-based).
    Propagating {
        /// Current sweep.
        sweep: u32,
    },
    /// Finished with the given outcome.
    Done(SettleOutcome),
}

/// Inputs to one settle.
#[derive(Clone, Copy, Debug)]
pub struct SettlePlan<'a> {
    /// Seeding policy.
    pub strategy: StrategyUsed,
    /// Clocks whose output changed this tick.
    pub changed_clocks: &'a [GateIndex],
    /// The circuit has never been evaluated; seed everything.
    pub first_evaluation: bool,
    /// Maximum sweeps.
    pub cap: u32,
    /// Stop after one sweep.
    pub delay_mode: bool,
}

/// What one settle did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettleReport {
    /// Sweeps executed.
    pub sweeps: u32,
    /// How the loop ended.
    pub outcome: SettleOutcome,
    /// Gate evaluations across all sweeps.
    pub gate_evaluations: u64,
}

// ── Scheduler ──────────────────────────────────────────────────────

/// Reusable settle machinery for one netlist.
///
/// Dirty flags are indexed by rank, so a sweep is a single forward scan.
#[derive(Debug)]
pub struct Scheduler {
    dirty: Vec<bool>,
    next: Vec<bool>,
    /// Sweep in which each gate's outputs last changed; 0 for never.
    last_change: Vec<u32>,
    /// Gates rolled back at the cap; skipped by the repair pass.
    frozen: Vec<bool>,
    oscillating: Vec<GateIndex>,
    state: SettleState,
}

impl Scheduler {
    /// A scheduler for a netlist of `gate_count` gates.
    pub fn new(gate_count: usize) -> Self {
        Self {
            dirty: vec![false; gate_count],
            next: vec![false; gate_count],
            last_change: vec![0; gate_count],
            frozen: vec![false; gate_count],
            oscillating: Vec::new(),
            state: SettleState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> SettleState {
        self.state
    }

    /// Return to `Idle`.
    pub fn reset(&mut self) {
        self.dirty.fill(false);
        self.next.fill(false);
        self.last_change.fill(0);
        self.frozen.fill(false);
        self.oscillating.clear();
        self.state = SettleState::Idle;
    }

    /// Settle one tick inside `guard`.
    ///
    /// Clocks must already have been driven into `guard.staging`.
    pub fn settle(
        &mut self,
        netlist: &Netlist,
        guard: &mut TickGuard<'_>,
        plan: SettlePlan<'_>,
    ) -> Result<SettleReport, ArenaError> {
        self.state = SettleState::Seeding;
        self.dirty.fill(false);
        self.next.fill(false);
        self.last_change.fill(0);
        self.frozen.fill(false);
        self.seed(netlist, guard, &plan);

        let cap = plan.cap.max(1);
        let mut sweeps = 0u32;
        let mut evaluations = 0u64;
        let outcome = loop {
            sweeps += 1;
            self.state = SettleState::Propagating { sweep: sweeps };
            let evaluated = self.sweep(netlist, guard, sweeps);
            evaluations += evaluated;

            let pending = self.next.iter().any(|&d| d);
            tracing::trace!(sweep = sweeps, evaluated, pending, "sweep complete");
            if !pending {
                break SettleOutcome::Converged;
            }
            if plan.delay_mode {
                break SettleOutcome::SinglePass;
            }
            if sweeps == 1 {
                guard.save_checkpoint();
            }
            if sweeps >= cap {
                self.freeze_oscillating(netlist, guard, sweeps)?;
                let (repair_sweeps, repaired) = self.repair(netlist, guard, cap, sweeps);
                sweeps += repair_sweeps;
                evaluations += repaired;
                break SettleOutcome::IterationCapped;
            }
            std::mem::swap(&mut self.dirty, &mut self.next);
            self.next.fill(false);
        };

        self.state = SettleState::Done(outcome);
        Ok(SettleReport {
            sweeps,
            outcome,
            gate_evaluations: evaluations,
        })
    }

    fn seed(&mut self, netlist: &Netlist, guard: &TickGuard<'_>, plan: &SettlePlan<'_>) {
        let everything = plan.strategy == StrategyUsed::LevelOrder || plan.first_evaluation;
        for &gate in netlist.order() {
            if !is_evaluable(netlist, gate) {
                continue;
            }
            if everything || pins_stale(netlist, gate, guard.base, &*guard.staging) {
                self.dirty[netlist.rank(gate) as usize] = true;
            }
        }
        for &clock in plan.changed_clocks {
            for sink in netlist.fan_out(clock) {
                if sink.sensitive {
                    self.dirty[netlist.rank(sink.gate) as usize] = true;
                }
            }
        }
    }

    /// Roll the gates that changed in either of the last two sweeps back to
    /// their first-sweep values and freeze them.
    fn freeze_oscillating(
        &mut self,
        netlist: &Netlist,
        guard: &mut TickGuard<'_>,
        sweeps: u32,
    ) -> Result<(), ArenaError> {
        let window = sweeps.saturating_sub(1).max(1);
        self.oscillating.clear();
        for (pos, &gate) in netlist.order().iter().enumerate() {
            if self.last_change[pos] >= window {
                self.frozen[pos] = true;
                self.oscillating.push(gate);
            }
        }
        tracing::trace!(frozen = self.oscillating.len(), "oscillating gates rolled back");
        guard.restore_slots(&self.oscillating)
    }

    /// Settle everything outside the frozen set against the rolled-back
    /// values, for at most `cap` sweeps. Returns sweeps run and gates
    /// evaluated.
    fn repair(
        &mut self,
        netlist: &Netlist,
        guard: &mut TickGuard<'_>,
        cap: u32,
        mut sweep_no: u32,
    ) -> (u32, u64) {
        self.dirty.fill(false);
        self.next.fill(false);
        let mut seeded = false;
        for (pos, &gate) in netlist.order().iter().enumerate() {
            if !self.frozen[pos]
                && is_evaluable(netlist, gate)
                && pins_stale(netlist, gate, guard.base, &*guard.staging)
            {
                self.dirty[pos] = true;
                seeded = true;
            }
        }
        if !seeded {
            return (0, 0);
        }

        let mut sweeps = 0;
        let mut evaluations = 0;
        while sweeps < cap {
            sweeps += 1;
            sweep_no += 1;
            evaluations += self.sweep(netlist, guard, sweep_no);
            if !self.next.iter().any(|&d| d) {
                break;
            }
            std::mem::swap(&mut self.dirty, &mut self.next);
            self.next.fill(false);
        }
        (sweeps, evaluations)
    }

    /// One rank-ordered pass. Returns the number of gates evaluated.
    fn sweep(&mut self, netlist: &Netlist, guard: &mut TickGuard<'_>, sweep_no: u32) -> u64 {
        let mut evaluated = 0;
        for (pos, &gate) in netlist.order().iter().enumerate() {
            if !self.dirty[pos] {
                continue;
            }
            self.dirty[pos] = false;
            if self.frozen[pos] {
                continue;
            }
            evaluated += 1;
            if !evaluate_gate(netlist, gate, guard.base, guard.staging) {
                continue;
            }
            self.last_change[pos] = sweep_no;
            for sink in netlist.fan_out(gate) {
                if !sink.sensitive {
                    continue;
                }
                let r = netlist.rank(sink.gate) as usize;
                if sink.back_edge {
                    self.next[r] = true;
                } else {
                    self.dirty[r] = true;
                }
            }
        }
        evaluated
    }
}

/// Sources are driven from outside; gates with nothing wired keep their
/// stored outputs.
fn is_evaluable(netlist: &Netlist, gate: GateIndex) -> bool {
    !netlist.kind(gate).is_source() && netlist.has_wired_inputs(gate)
}

/// Value an input pin would read right now.
#[inline]
fn read_source(
    netlist: &Netlist,
    source: PinSource,
    base: &[SignalSlot],
    staging: &[SignalSlot],
) -> Option<bool> {
    match source {
        PinSource::Unwired => None,
        PinSource::Live(d) => {
            Some(staging[d.gate.get()].output(netlist.kind(d.gate), d.pin as usize))
        }
        PinSource::Sampled(d) => {
            Some(base[d.gate.get()].output(netlist.kind(d.gate), d.pin as usize))
        }
    }
}

fn pins_stale(
    netlist: &Netlist,
    gate: GateIndex,
    base: &[SignalSlot],
    staging: &[SignalSlot],
) -> bool {
    let arity = netlist.kind(gate).input_arity();
    let stored = &staging[gate.get()].pins;
    netlist.fan_in(gate)[..arity]
        .iter()
        .zip(stored)
        .any(|(&src, &pin)| match read_source(netlist, src, base, staging) {
            Some(v) => pin != Some(v),
            None => false,
        })
}

/// Evaluate one gate into staging. Returns whether its outputs changed.
fn evaluate_gate(
    netlist: &Netlist,
    gate: GateIndex,
    base: &[SignalSlot],
    staging: &mut [SignalSlot],
) -> bool {
    let kind = netlist.kind(gate);
    let mut slot = staging[gate.get()];
    for (pin, &src) in netlist.fan_in(gate)[..kind.input_arity()].iter().enumerate() {
        if let Some(v) = read_source(netlist, src, base, staging) {
            slot.pins[pin] = Some(v);
        }
    }
    let pins = [
        slot.pins[0].unwrap_or(false),
        slot.pins[1].unwrap_or(false),
    ];
    let changed = match step_gate(kind, pins, base[gate.get()].state) {
        Some(update) => {
            let changed = update.outputs != slot.outputs;
            slot.outputs = update.outputs;
            slot.state = update.state;
            changed
        }
        None => false,
    };
    staging[gate.get()] = slot;
    changed
}
