//! The fixed-size per-gate record stored in the signal arena.

use crate::circuit::Gate;
use crate::gate::{GateKind, GateState};
use crate::schema::MetadataDefault;

/// Maximum pins on either side of any gate kind.
pub const MAX_PINS: usize = 2;

/// Everything the evaluator tracks for one gate between ticks.
///
/// Slots are `Copy` so a whole buffer can be checkpointed with a single
/// `copy_from_slice`. Unused pins stay `None` / `false`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SignalSlot {
    /// Last value seen on each input pin.
    pub pins: [Option<bool>; MAX_PINS],
    /// Stored outputs. Only `outputs[0]` is meaningful for single-output kinds.
    pub outputs: [bool; MAX_PINS],
    /// Kind-specific state.
    pub state: GateState,
}

impl Default for SignalSlot {
    fn default() -> Self {
        Self {
            pins: [None; MAX_PINS],
            outputs: [false; MAX_PINS],
            state: GateState::Combinational,
        }
    }
}

impl SignalSlot {
    /// Load a gate into a slot, repairing anything that does not fit its kind.
    ///
    /// A state variant that belongs to another kind is replaced by the
    /// kind's default. Sequential outputs are re-derived from state so the
    /// two can never disagree.
    pub fn from_gate(gate: &Gate) -> (Self, Vec<MetadataDefault>) {
        let mut defaults = Vec::new();
        let kind = gate.kind;
        let state = if gate.state.matches_kind(kind) {
            gate.state
        } else {
            let fallback = GateState::default_for(kind);
            MetadataDefault::record(&mut defaults, &gate.id, "state", format!("{fallback:?}"));
            fallback
        };

        let mut slot = Self {
            state,
            ..Self::default()
        };
        for (dst, src) in slot
            .pins
            .iter_mut()
            .zip(gate.inputs.iter())
            .take(kind.input_arity())
        {
            *dst = *src;
        }
        for (dst, src) in slot
            .outputs
            .iter_mut()
            .zip(gate.outputs.iter())
            .take(kind.output_arity())
        {
            *dst = *src;
        }
        slot.sync_outputs();
        (slot, defaults)
    }

    /// Copy outputs from sequential state.
    pub fn sync_outputs(&mut self) {
        match self.state {
            GateState::DFlipFlop { q, .. } => self.outputs[0] = q,
            GateState::SrLatch { q, q_bar } => self.outputs = [q, q_bar],
            GateState::Combinational | GateState::Clock(_) => {}
        }
    }

    /// Value readable on output pin `pin` of a gate of `kind`.
    #[inline]
    pub fn output(&self, kind: GateKind, pin: usize) -> bool {
        match (kind, pin) {
            (GateKind::DFlipFlop, 1) => !self.outputs[0],
            (_, p) if p < MAX_PINS => self.outputs[p],
            _ => false,
        }
    }

    /// Write the slot back into a gate of the same kind.
    pub fn store(&self, gate: &mut Gate) {
        let kind = gate.kind;
        gate.inputs.clear();
        gate.inputs.extend_from_slice(&self.pins[..kind.input_arity()]);
        gate.outputs.clear();
        gate.outputs.extend_from_slice(&self.outputs[..kind.output_arity()]);
        gate.state = self.state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::ClockState;

    #[test]
    fn mismatched_state_is_replaced_and_reported() {
        let mut ff = Gate::new("ff", GateKind::DFlipFlop);
        ff.state = GateState::Clock(ClockState::default());
        let (slot, defaults) = SignalSlot::from_gate(&ff);
        assert_eq!(slot.state, GateState::default_for(GateKind::DFlipFlop));
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].field, "state");
    }

    #[test]
    fn latch_outputs_follow_state() {
        let mut sr = Gate::new("sr", GateKind::SrLatch);
        sr.state = GateState::SrLatch {
            q: true,
            q_bar: false,
        };
        sr.outputs = vec![false, false];
        let (slot, defaults) = SignalSlot::from_gate(&sr);
        assert!(defaults.is_empty());
        assert_eq!(slot.outputs, [true, false]);
    }

    #[test]
    fn store_round_trips_through_a_gate() {
        let mut and = Gate::new("g", GateKind::And);
        and.inputs = vec![Some(true), None];
        and.outputs = vec![true];
        let (slot, _) = SignalSlot::from_gate(&and);
        let mut fresh = Gate::new("g", GateKind::And);
        slot.store(&mut fresh);
        assert_eq!(fresh, and);
    }

    #[test]
    fn flip_flop_complement_pin_is_virtual() {
        let mut slot = SignalSlot::default();
        slot.outputs[0] = true;
        assert!(!slot.output(GateKind::DFlipFlop, 1));
        assert!(slot.output(GateKind::And, 0));
        assert!(!slot.output(GateKind::And, 7));
    }
}
