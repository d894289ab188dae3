use strobe_core::{GateKind, GateState};

use crate::combinational::combinational_output;
use crate::sequential::{d_flip_flop, sr_latch};

/// New outputs and state produced by one gate evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GateUpdate {
    /// Stored outputs. `outputs[1]` is only meaningful for SR-LATCH.
    pub outputs: [bool; 2],
    /// New kind-specific state.
    pub state: GateState,
}

/// Evaluate one gate.
///
/// `pins` are the resolved input values. `base` is the gate's state at
/// the start of the tick. Returns `None` for INPUT and CLOCK, whose
/// outputs are set from outside, and for a state that does not belong to
/// `kind`.
pub fn step_gate(kind: GateKind, pins: [bool; 2], base: GateState) -> Option<GateUpdate> {
    match (kind, base) {
        (GateKind::Input | GateKind::Clock, _) => None,
        (GateKind::DFlipFlop, GateState::DFlipFlop { q, prev_clock }) => {
            let (q, prev_clock) = d_flip_flop(pins[0], pins[1], q, prev_clock);
            Some(GateUpdate {
                outputs: [q, false],
                state: GateState::DFlipFlop { q, prev_clock },
            })
        }
        (GateKind::SrLatch, GateState::SrLatch { q, q_bar }) => {
            let (q, q_bar) = sr_latch(pins[0], pins[1], q, q_bar);
            Some(GateUpdate {
                outputs: [q, q_bar],
                state: GateState::SrLatch { q, q_bar },
            })
        }
        (GateKind::DFlipFlop | GateKind::SrLatch, _) => None,
        (kind, _) => combinational_output(kind, pins).map(|out| GateUpdate {
            outputs: [out, false],
            state: GateState::Combinational,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_are_never_stepped() {
        assert!(step_gate(GateKind::Input, [true, true], GateState::Combinational).is_none());
        assert!(step_gate(
            GateKind::Clock,
            [true, true],
            GateState::default_for(GateKind::Clock)
        )
        .is_none());
    }

    #[test]
    fn flip_flop_step_is_idempotent_within_a_tick() {
        let base = GateState::DFlipFlop {
            q: false,
            prev_clock: false,
        };
        let first = step_gate(GateKind::DFlipFlop, [true, true], base).unwrap();
        let again = step_gate(GateKind::DFlipFlop, [true, true], base).unwrap();
        assert_eq!(first, again);
        assert!(first.outputs[0]);
    }

    #[test]
    fn nand_steps_to_combinational_state() {
        let up = step_gate(GateKind::Nand, [true, true], GateState::Combinational).unwrap();
        assert_eq!(up.outputs, [false, false]);
        assert_eq!(up.state, GateState::Combinational);
    }

    #[test]
    fn mismatched_state_is_refused() {
        assert!(step_gate(GateKind::SrLatch, [false, false], GateState::Combinational).is_none());
    }
}
