//! Circuits supplied as JSON documents, the way editors hand them over.

use strobe_core::{CircuitError, TopologyError};
use strobe_engine::{evaluate_json, ConfigError, EvaluateError, EvaluationConfig, Simulator};

const SR_LATCH: &str = r#"{
    "gates": [
        { "id": "s", "type": "INPUT", "outputs": [true] },
        { "id": "r", "type": "INPUT", "outputs": [false] },
        { "id": "latch", "type": "SR-LATCH", "metadata": { "q": false, "qBar": true } }
    ],
    "wires": [
        { "id": "ws", "from": { "gateId": "s" }, "to": { "gateId": "latch", "pinIndex": 0 } },
        { "id": "wr", "from": { "gateId": "r" }, "to": { "gateId": "latch", "pinIndex": 1 } }
    ]
}"#;

const BARE_FLIP_FLOP: &str = r#"{
    "gates": [
        { "id": "clk", "type": "CLOCK", "metadata": { "frequency": 2, "isRunning": true } },
        { "id": "ff", "type": "D-FF" }
    ],
    "wires": [
        { "id": "w0", "from": { "gateId": "clk" }, "to": { "gateId": "ff", "pinIndex": 1 } },
        { "id": "w1", "from": { "gateId": "ff", "pinIndex": 1 }, "to": { "gateId": "ff", "pinIndex": 0 } }
    ]
}"#;

#[test]
fn sr_latch_document_sets_and_reports_wires() {
    let result = evaluate_json(SR_LATCH, &EvaluationConfig::default()).unwrap();
    let c = &result.circuit;
    assert_eq!(c.output("latch", 0), Some(true));
    assert_eq!(c.output("latch", 1), Some(false));
    assert!(c.wire("ws").unwrap().is_active);
    assert!(!c.wire("wr").unwrap().is_active);
    assert!(result.evaluation_info.metadata_defaults.is_empty());
}

#[test]
fn missing_flip_flop_metadata_is_defaulted_and_reported() {
    let result = evaluate_json(BARE_FLIP_FLOP, &EvaluationConfig::default()).unwrap();
    let fields: Vec<_> = result
        .evaluation_info
        .metadata_defaults
        .iter()
        .map(|d| (d.gate.as_str(), d.field.as_str()))
        .collect();
    assert_eq!(fields, vec![("ff", "qOutput"), ("ff", "previousClockState")]);
}

#[test]
fn result_serializes_with_camel_case_fields() {
    let result = evaluate_json(SR_LATCH, &EvaluationConfig::default()).unwrap();
    let v = serde_json::to_value(&result).unwrap();
    let info = &v["evaluationInfo"];
    assert_eq!(info["strategyUsed"], "LEVEL_ORDER");
    assert_eq!(info["outcome"], "CONVERGED");
    assert_eq!(info["iterations"], 1);
    assert_eq!(v["circuit"]["gates"][2]["metadata"]["q"], true);
    assert_eq!(v["circuit"]["tick"], 1);
}

#[test]
fn config_can_be_read_from_json() {
    let cfg: EvaluationConfig =
        serde_json::from_str(r#"{ "strategy": "EVENT_DRIVEN_ONLY", "maxIterationsPerTick": 4 }"#)
            .unwrap();
    let mut sim = Simulator::from_json(BARE_FLIP_FLOP).unwrap();
    let info = sim.step(&cfg).unwrap();
    assert_eq!(info.metadata_defaults.len(), 2);
    assert!(info.iterations <= 4);
}

#[test]
fn unsupported_kind_is_rejected() {
    let json = r#"{ "gates": [ { "id": "m", "type": "MUX" } ] }"#;
    let err = evaluate_json(json, &EvaluationConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        EvaluateError::Circuit(CircuitError::UnsupportedGateKind { .. })
    ));
}

#[test]
fn doubly_driven_pin_is_rejected() {
    let json = r#"{
        "gates": [
            { "id": "a", "type": "INPUT" },
            { "id": "b", "type": "INPUT" },
            { "id": "n", "type": "NOT" }
        ],
        "wires": [
            { "id": "w0", "from": { "gateId": "a" }, "to": { "gateId": "n", "pinIndex": 0 } },
            { "id": "w1", "from": { "gateId": "b" }, "to": { "gateId": "n", "pinIndex": 0 } }
        ]
    }"#;
    match evaluate_json(json, &EvaluationConfig::default()) {
        Err(EvaluateError::Circuit(CircuitError::InvalidTopology(
            TopologyError::PinAlreadyDriven { wire, existing, .. },
        ))) => {
            assert_eq!(wire, "w1");
            assert_eq!(existing, "w0");
        }
        other => panic!("expected PinAlreadyDriven, got {other:?}"),
    }
}

#[test]
fn dangling_wire_is_rejected() {
    let json = r#"{
        "gates": [ { "id": "a", "type": "INPUT" } ],
        "wires": [ { "id": "w0", "from": { "gateId": "a" }, "to": { "gateId": "ghost", "pinIndex": 0 } } ]
    }"#;
    let err = evaluate_json(json, &EvaluationConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        EvaluateError::Circuit(CircuitError::InvalidTopology(TopologyError::UnknownGate { .. }))
    ));
}

#[test]
fn malformed_document_is_rejected() {
    let err = evaluate_json("{ not json", &EvaluationConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        EvaluateError::Circuit(CircuitError::MalformedDocument { .. })
    ));
}

#[test]
fn invalid_config_is_rejected_before_parsing() {
    let cfg = EvaluationConfig {
        logical_time: f64::NAN,
        ..EvaluationConfig::default()
    };
    let err = evaluate_json("{ not json", &cfg).unwrap_err();
    assert!(matches!(
        err,
        EvaluateError::Config(ConfigError::InvalidLogicalTime { .. })
    ));
}
