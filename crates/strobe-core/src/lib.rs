//! Core types and errors for the Strobe logic evaluation engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the value types exchanged with callers ([`Circuit`], [`Gate`], [`Wire`]),
//! the gate model ([`GateKind`], [`GateState`]), strongly-typed indices,
//! the per-gate signal slot stored by the arena, and the error taxonomy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod circuit;
pub mod error;
pub mod gate;
pub mod id;
pub mod schema;
pub mod signal;
pub mod traits;

pub use circuit::{Circuit, Gate, PinRef, Wire};
pub use error::{CircuitError, ParseGateKindError, TopologyError, WireEnd};
pub use gate::{ClockState, GateKind, GateState};
pub use id::{GateIndex, Generation, TickId};
pub use schema::{CircuitDoc, GateDoc, MetadataDefault, PinRefDoc, WireDoc};
pub use signal::{SignalSlot, MAX_PINS};
pub use traits::SignalSnapshot;
