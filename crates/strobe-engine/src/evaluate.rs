//! The stateless `evaluate` entry point.

use serde::{Deserialize, Serialize};
use strobe_core::Circuit;
use tracing::instrument;

use crate::config::EvaluationConfig;
use crate::error::EvaluateError;
use crate::metrics::EvaluationInfo;
use crate::tick::TickEngine;

/// A new circuit value and the report for the tick that produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    /// The circuit after one tick.
    pub circuit: Circuit,
    /// What the tick did.
    pub evaluation_info: EvaluationInfo,
}

/// Evaluate one tick of `circuit`.
///
/// The input is never modified or retained. Topology is validated on
/// every call; callers stepping the same circuit repeatedly should use a
/// [`Simulator`](crate::Simulator) instead.
///
/// # Errors
///
/// [`EvaluateError::Config`] for an invalid config and
/// [`EvaluateError::Circuit`] for an invalid topology. Reaching the
/// iteration cap is not an error.
#[instrument(level = "debug", skip_all, fields(gates = circuit.gates.len(), tick = circuit.tick.0))]
pub fn evaluate(
    circuit: &Circuit,
    config: &EvaluationConfig,
) -> Result<EvaluationResult, EvaluateError> {
    config.validate()?;
    let mut engine = TickEngine::new(circuit.clone())?;
    run_one(&mut engine, config)
}

/// Parse a circuit document and evaluate one tick of it.
///
/// Defaults applied while reading gate metadata are reported in
/// `evaluation_info.metadata_defaults`.
#[instrument(level = "debug", skip_all)]
pub fn evaluate_json(
    circuit_json: &str,
    config: &EvaluationConfig,
) -> Result<EvaluationResult, EvaluateError> {
    config.validate()?;
    let (circuit, defaults) = Circuit::from_json(circuit_json)?;
    let mut engine = TickEngine::with_defaults(circuit, defaults)?;
    run_one(&mut engine, config)
}

fn run_one(
    engine: &mut TickEngine,
    config: &EvaluationConfig,
) -> Result<EvaluationResult, EvaluateError> {
    let evaluation_info = engine.execute_tick(config)?;
    Ok(EvaluationResult {
        circuit: engine.to_circuit(),
        evaluation_info,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strobe_core::{CircuitError, TickId};
    use strobe_test_utils::half_adder;

    #[test]
    fn input_circuit_is_not_modified() {
        let c = half_adder(true, true);
        let before = c.clone();
        let result = evaluate(&c, &EvaluationConfig::default()).unwrap();
        assert_eq!(c, before);
        assert_eq!(result.circuit.tick, TickId(1));
    }

    #[test]
    fn json_round_trip_reports_defaults() {
        let json = r#"{
            "gates": [
                { "id": "clk", "kind": "CLOCK" },
                { "id": "out", "kind": "OUTPUT" }
            ],
            "wires": [
                { "id": "w", "from": { "gateId": "clk", "pinIndex": -1 }, "to": { "gateId": "out", "pinIndex": 0 } }
            ]
        }"#;
        let result = evaluate_json(json, &EvaluationConfig::default()).unwrap();
        let fields: Vec<_> = result
            .evaluation_info
            .metadata_defaults
            .iter()
            .map(|d| d.field.as_str())
            .collect();
        assert_eq!(fields, vec!["frequency", "isRunning"]);
        let v = serde_json::to_value(&result).unwrap();
        assert_eq!(v["circuit"]["gates"][0]["metadata"]["frequency"], 1.0);
        assert_eq!(v["evaluationInfo"]["tick"], 1);
    }

    #[test]
    fn unknown_kind_surfaces_as_circuit_error() {
        let json = r#"{ "gates": [ { "id": "x", "kind": "TRISTATE" } ] }"#;
        assert!(matches!(
            evaluate_json(json, &EvaluationConfig::default()),
            Err(EvaluateError::Circuit(CircuitError::UnsupportedGateKind { .. }))
        ));
    }
}
