//! Evaluation configuration, validation, and error types.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};
use strobe_core::TickId;

// ── Strategy ───────────────────────────────────────────────────────

/// Which propagation paths the selector may choose from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Strategy {
    /// Level order for small or never-evaluated circuits, event-driven otherwise.
    #[default]
    AutoSelect,
    /// Always the event-driven path.
    EventDrivenOnly,
}

// ── ClockMode ──────────────────────────────────────────────────────

/// Where clock time comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClockMode {
    /// Use [`EvaluationConfig::logical_time`] as the time in seconds.
    #[default]
    LogicalTime,
    /// Derive time from the tick counter: `t = tick * step_seconds`.
    Step {
        /// Seconds of logical time per tick.
        #[serde(rename = "stepSeconds")]
        step_seconds: f64,
    },
}

// ── EvaluationConfig ───────────────────────────────────────────────

/// Per-call evaluation settings.
///
/// Every field has a default, so `{}` is a valid JSON config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EvaluationConfig {
    /// Strategy selection policy. Default: `AUTO_SELECT`.
    pub strategy: Strategy,
    /// Run exactly one sweep per tick, so feedback paths carry one tick of
    /// delay. Default: `false`.
    pub delay_mode: bool,
    /// Sweep cap per tick. `None` = `2 × gate count`, at least 2.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_iterations_per_tick: Option<u32>,
    /// Logical time in seconds, used by [`ClockMode::LogicalTime`]. Default: 0.
    pub logical_time: f64,
    /// Clock time source. Default: [`ClockMode::LogicalTime`].
    pub clock_mode: ClockMode,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::AutoSelect,
            delay_mode: false,
            max_iterations_per_tick: None,
            logical_time: 0.0,
            clock_mode: ClockMode::LogicalTime,
        }
    }
}

impl EvaluationConfig {
    /// Default config at logical time `t`.
    pub fn at_time(t: f64) -> Self {
        Self {
            logical_time: t,
            ..Self::default()
        }
    }

    /// Default config whose clocks advance `step_seconds` per tick.
    pub fn stepped(step_seconds: f64) -> Self {
        Self {
            clock_mode: ClockMode::Step { step_seconds },
            ..Self::default()
        }
    }

    /// Replace the strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations_per_tick == Some(0) {
            return Err(ConfigError::ZeroIterationCap);
        }
        if !self.logical_time.is_finite() || self.logical_time < 0.0 {
            return Err(ConfigError::InvalidLogicalTime {
                value: self.logical_time,
            });
        }
        if let ClockMode::Step { step_seconds } = self.clock_mode {
            if !step_seconds.is_finite() || step_seconds <= 0.0 {
                return Err(ConfigError::InvalidStepSeconds {
                    value: step_seconds,
                });
            }
        }
        Ok(())
    }

    /// The sweep cap for a circuit of `gate_count` gates.
    pub fn resolved_iteration_cap(&self, gate_count: usize) -> u32 {
        match self.max_iterations_per_tick {
            Some(n) => n.max(1),
            None => {
                let doubled = gate_count.saturating_mul(2).max(2);
                u32::try_from(doubled).unwrap_or(u32::MAX)
            }
        }
    }

    /// Logical time for evaluating the tick that follows `completed` ticks.
    pub fn time_at(&self, completed: TickId) -> f64 {
        match self.clock_mode {
            ClockMode::LogicalTime => self.logical_time,
            ClockMode::Step { step_seconds } => completed.0 as f64 * step_seconds,
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`EvaluationConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `maxIterationsPerTick` was 0.
    ZeroIterationCap,
    /// `logicalTime` is NaN, infinite or negative.
    InvalidLogicalTime {
        /// The invalid value.
        value: f64,
    },
    /// `stepSeconds` is NaN, infinite, zero or negative.
    InvalidStepSeconds {
        /// The invalid value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroIterationCap => write!(f, "maxIterationsPerTick must be at least 1"),
            Self::InvalidLogicalTime { value } => {
                write!(f, "logicalTime must be finite and >= 0, got {value}")
            }
            Self::InvalidStepSeconds { value } => {
                write!(f, "stepSeconds must be finite and > 0, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_the_default_config() {
        let cfg: EvaluationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, EvaluationConfig::default());
        cfg.validate().unwrap();
    }

    #[test]
    fn json_uses_wire_names() {
        let cfg: EvaluationConfig = serde_json::from_str(
            r#"{
                "strategy": "EVENT_DRIVEN_ONLY",
                "delayMode": true,
                "maxIterationsPerTick": 7,
                "logicalTime": 1.5,
                "clockMode": { "step": { "stepSeconds": 0.25 } }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.strategy, Strategy::EventDrivenOnly);
        assert!(cfg.delay_mode);
        assert_eq!(cfg.max_iterations_per_tick, Some(7));
        assert_eq!(cfg.clock_mode, ClockMode::Step { step_seconds: 0.25 });
        let back = serde_json::to_value(&cfg).unwrap();
        assert_eq!(back["strategy"], "EVENT_DRIVEN_ONLY");
        assert_eq!(back["clockMode"]["step"]["stepSeconds"], 0.25);
    }

    #[test]
    fn zero_cap_is_rejected() {
        let cfg = EvaluationConfig {
            max_iterations_per_tick: Some(0),
            ..EvaluationConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroIterationCap));
    }

    #[test]
    fn bad_times_are_rejected() {
        assert!(matches!(
            EvaluationConfig::at_time(f64::NAN).validate(),
            Err(ConfigError::InvalidLogicalTime { .. })
        ));
        assert!(matches!(
            EvaluationConfig::at_time(-1.0).validate(),
            Err(ConfigError::InvalidLogicalTime { .. })
        ));
        assert!(matches!(
            EvaluationConfig::stepped(0.0).validate(),
            Err(ConfigError::InvalidStepSeconds { .. })
        ));
    }

    #[test]
    fn default_cap_scales_with_gate_count() {
        let cfg = EvaluationConfig::default();
        assert_eq!(cfg.resolved_iteration_cap(0), 2);
        assert_eq!(cfg.resolved_iteration_cap(1), 2);
        assert_eq!(cfg.resolved_iteration_cap(10), 20);
        let capped = EvaluationConfig {
            max_iterations_per_tick: Some(3),
            ..cfg
        };
        assert_eq!(capped.resolved_iteration_cap(10), 3);
    }

    #[test]
    fn step_mode_derives_time_from_tick() {
        let cfg = EvaluationConfig::stepped(0.5);
        assert_eq!(cfg.time_at(TickId(0)), 0.0);
        assert_eq!(cfg.time_at(TickId(3)), 1.5);
        assert_eq!(EvaluationConfig::at_time(2.0).time_at(TickId(9)), 2.0);
    }
}
