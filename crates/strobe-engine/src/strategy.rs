//! Strategy selection.
//!
//! Both paths share the same sweep semantics and differ only in which
//! gates start dirty, so the choice affects cost, never results.

use strobe_core::TickId;

use crate::config::Strategy;
use crate::metrics::StrategyUsed;

/// Circuits at or below this many gates always take the level-order path
/// under [`Strategy::AutoSelect`].
pub const SMALL_CIRCUIT_GATES: usize = 32;

/// Pick the path for one tick.
///
/// `completed` is the circuit's tick counter before this evaluation; a
/// never-evaluated circuit has no trustworthy stored pins, so
/// `AutoSelect` evaluates everything.
pub fn select_strategy(strategy: Strategy, gate_count: usize, completed: TickId) -> StrategyUsed {
    match strategy {
        Strategy::EventDrivenOnly => StrategyUsed::EventDriven,
        Strategy::AutoSelect if gate_count <= SMALL_CIRCUIT_GATES || completed == TickId(0) => {
            StrategyUsed::LevelOrder
        }
        Strategy::AutoSelect => StrategyUsed::EventDriven,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_circuits_use_level_order() {
        assert_eq!(
            select_strategy(Strategy::AutoSelect, SMALL_CIRCUIT_GATES, TickId(5)),
            StrategyUsed::LevelOrder
        );
    }

    #[test]
    fn large_circuits_go_event_driven_after_first_tick() {
        let n = SMALL_CIRCUIT_GATES + 1;
        assert_eq!(
            select_strategy(Strategy::AutoSelect, n, TickId(0)),
            StrategyUsed::LevelOrder
        );
        assert_eq!(
            select_strategy(Strategy::AutoSelect, n, TickId(1)),
            StrategyUsed::EventDriven
        );
    }

    #[test]
    fn event_driven_only_is_unconditional() {
        assert_eq!(
            select_strategy(Strategy::EventDrivenOnly, 1, TickId(0)),
            StrategyUsed::EventDriven
        );
    }
}
