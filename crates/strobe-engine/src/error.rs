//! Errors surfaced by [`evaluate`](crate::evaluate()) and the tick engine.

use std::error::Error;
use std::fmt;

use strobe_arena::ArenaError;
use strobe_core::CircuitError;

use crate::config::ConfigError;

/// Everything that can stop a circuit from being evaluated.
#[derive(Clone, Debug, PartialEq)]
pub enum EvaluateError {
    /// The circuit was rejected at acceptance.
    Circuit(CircuitError),
    /// The configuration failed validation.
    Config(ConfigError),
    /// The signal arena refused an operation.
    Arena(ArenaError),
}

impl fmt::Display for EvaluateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circuit(e) => write!(f, "circuit: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Arena(e) => write!(f, "arena: {e}"),
        }
    }
}

impl Error for EvaluateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Circuit(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Arena(e) => Some(e),
        }
    }
}

impl From<CircuitError> for EvaluateError {
    fn from(e: CircuitError) -> Self {
        Self::Circuit(e)
    }
}

impl From<ConfigError> for EvaluateError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ArenaError> for EvaluateError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}
