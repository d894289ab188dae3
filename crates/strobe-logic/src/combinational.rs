//! Boolean functions for stateless gate kinds.

use strobe_core::GateKind;

/// Output of a combinational gate given its resolved pins.
///
/// `pins[1]` is ignored by single-input kinds. Returns `None` for kinds
/// that are not combinational.
pub fn combinational_output(kind: GateKind, pins: [bool; 2]) -> Option<bool> {
    let [a, b] = pins;
    let out = match kind {
        GateKind::And => a && b,
        GateKind::Or => a || b,
        GateKind::Nand => !(a && b),
        GateKind::Nor => !(a || b),
        GateKind::Xor => a ^ b,
        GateKind::Not => !a,
        GateKind::Buffer | GateKind::Output => a,
        GateKind::Input | GateKind::Clock | GateKind::DFlipFlop | GateKind::SrLatch => {
            return None
        }
    };
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAIRS: [[bool; 2]; 4] = [[false, false], [false, true], [true, false], [true, true]];

    fn table(kind: GateKind) -> Vec<bool> {
        PAIRS
            .iter()
            .map(|p| combinational_output(kind, *p).unwrap())
            .collect()
    }

    #[test]
    fn two_input_truth_tables() {
        assert_eq!(table(GateKind::And), vec![false, false, false, true]);
        assert_eq!(table(GateKind::Or), vec![false, true, true, true]);
        assert_eq!(table(GateKind::Xor), vec![false, true, true, false]);
        assert_eq!(table(GateKind::Nand), vec![true, true, true, false]);
        assert_eq!(table(GateKind::Nor), vec![true, false, false, false]);
    }

    #[test]
    fn single_input_kinds_ignore_second_pin() {
        assert_eq!(table(GateKind::Not), vec![true, true, false, false]);
        assert_eq!(table(GateKind::Buffer), vec![false, false, true, true]);
        assert_eq!(table(GateKind::Output), vec![false, false, true, true]);
    }

    #[test]
    fn stateful_and_source_kinds_are_not_combinational() {
        for kind in GateKind::ALL {
            assert_eq!(
                combinational_output(kind, [false, false]).is_some(),
                kind.is_combinational(),
                "{kind}"
            );
        }
    }
}
