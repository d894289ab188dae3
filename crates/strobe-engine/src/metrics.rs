//! Per-tick evaluation report.

use serde::{Deserialize, Serialize};
use strobe_core::{MetadataDefault, TickId};

/// The propagation path a tick actually took.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyUsed {
    /// Every evaluable gate re-evaluated in rank order.
    LevelOrder,
    /// Only gates reached by a change re-evaluated.
    EventDriven,
}

/// How the settle loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SettleOutcome {
    /// No further changes were pending.
    Converged,
    /// The sweep cap was reached with changes still pending. Gates still
    /// changing in the last two sweeps kept their first-sweep values; the
    /// rest of the circuit kept what it settled to.
    IterationCapped,
    /// Delay mode: one sweep ran and feedback changes were left for the
    /// next tick.
    SinglePass,
}

/// Report returned with every evaluated tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationInfo {
    /// Path taken.
    pub strategy_used: StrategyUsed,
    /// Sweeps executed (at least 1). On a capped tick this includes the
    /// repair sweeps run after the rollback.
    pub iterations: u32,
    /// How settling ended.
    pub outcome: SettleOutcome,
    /// Individual gate evaluations across all sweeps.
    pub gate_evaluations: u64,
    /// Completed ticks after this one.
    pub tick: TickId,
    /// Fingerprint of outputs, pins and sequential state after the tick.
    pub state_hash: u64,
    /// Defaults substituted while loading the circuit.
    #[serde(default)]
    pub metadata_defaults: Vec<MetadataDefault>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_serializes_in_wire_form() {
        let info = EvaluationInfo {
            strategy_used: StrategyUsed::LevelOrder,
            iterations: 2,
            outcome: SettleOutcome::IterationCapped,
            gate_evaluations: 9,
            tick: TickId(4),
            state_hash: 17,
            metadata_defaults: Vec::new(),
        };
        let v = serde_json::to_value(&info).unwrap();
        assert_eq!(v["strategyUsed"], "LEVEL_ORDER");
        assert_eq!(v["outcome"], "ITERATION_CAPPED");
        assert_eq!(v["gateEvaluations"], 9);
        assert_eq!(v["tick"], 4);
        let back: EvaluationInfo = serde_json::from_value(v).unwrap();
        assert_eq!(back, info);
    }
}
