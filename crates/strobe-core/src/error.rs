//! Error types for circuit acceptance.
//!
//! Structural problems are fatal and surface when a circuit is accepted,
//! never per tick. Missing optional metadata is not an error; see
//! [`MetadataDefault`](crate::schema::MetadataDefault).

use std::error::Error;
use std::fmt;

/// An unrecognised gate kind name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseGateKindError {
    /// The name as written.
    pub kind: String,
}

impl fmt::Display for ParseGateKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported gate kind '{}'", self.kind)
    }
}

impl Error for ParseGateKindError {}

/// Which end of a wire a pin reference belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WireEnd {
    /// The driving (output) end.
    From,
    /// The driven (input) end.
    To,
}

impl fmt::Display for WireEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::From => f.write_str("from"),
            Self::To => f.write_str("to"),
        }
    }
}

/// Structural defects in a circuit's gate/wire graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TopologyError {
    /// Two gates share an id.
    DuplicateGateId {
        /// The repeated id.
        id: String,
    },
    /// Two wires share an id.
    DuplicateWireId {
        /// The repeated id.
        id: String,
    },
    /// A wire names a gate that does not exist.
    UnknownGate {
        /// The offending wire.
        wire: String,
        /// The missing gate id.
        gate: String,
        /// Which end of the wire.
        end: WireEnd,
    },
    /// A wire addresses a pin the gate does not have.
    PinOutOfRange {
        /// The offending wire.
        wire: String,
        /// The gate addressed.
        gate: String,
        /// Which end of the wire.
        end: WireEnd,
        /// The pin index as written.
        pin: i32,
        /// Number of pins available on that side of the gate.
        available: usize,
    },
    /// Two wires drive the same input pin.
    PinAlreadyDriven {
        /// The second wire.
        wire: String,
        /// The wire that already drives the pin.
        existing: String,
        /// The driven gate.
        gate: String,
        /// The driven pin.
        pin: usize,
    },
    /// More gates than a `u32` index can address.
    TooManyGates {
        /// The gate count.
        count: usize,
    },
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateGateId { id } => write!(f, "duplicate gate id '{id}'"),
            Self::DuplicateWireId { id } => write!(f, "duplicate wire id '{id}'"),
            Self::UnknownGate { wire, gate, end } => {
                write!(f, "wire '{wire}' {end} references unknown gate '{gate}'")
            }
            Self::PinOutOfRange {
                wire,
                gate,
                end,
                pin,
                available,
            } => write!(
                f,
                "wire '{wire}' {end} pin {pin} is out of range for gate '{gate}' ({available} pins)"
            ),
            Self::PinAlreadyDriven {
                wire,
                existing,
                gate,
                pin,
            } => write!(
                f,
                "wire '{wire}' drives gate '{gate}' pin {pin}, already driven by '{existing}'"
            ),
            Self::TooManyGates { count } => write!(f, "gate count {count} exceeds u32::MAX"),
        }
    }
}

impl Error for TopologyError {}

/// Errors raised when a circuit is accepted for evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CircuitError {
    /// The gate/wire graph is malformed.
    InvalidTopology(TopologyError),
    /// A gate names a kind the engine does not implement.
    UnsupportedGateKind {
        /// The gate id.
        gate: String,
        /// The kind name as written.
        kind: String,
    },
    /// The circuit document is not valid JSON for the circuit schema.
    MalformedDocument {
        /// Parser message.
        reason: String,
    },
}

impl fmt::Display for CircuitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTopology(e) => write!(f, "invalid topology: {e}"),
            Self::UnsupportedGateKind { gate, kind } => {
                write!(f, "gate '{gate}' has unsupported kind '{kind}'")
            }
            Self::MalformedDocument { reason } => write!(f, "malformed circuit document: {reason}"),
        }
    }
}

impl Error for CircuitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTopology(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TopologyError> for CircuitError {
    fn from(e: TopologyError) -> Self {
        Self::InvalidTopology(e)
    }
}

impl From<serde_json::Error> for CircuitError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedDocument {
            reason: e.to_string(),
        }
    }
}
