//! Topology validation and compiled wiring tables.
//!
//! [`Netlist::compile`] runs once per accepted circuit. It rejects
//! structural defects up front and precomputes everything the per-tick
//! hot path needs: which output feeds each input pin, who listens to each
//! output, and the order gates are evaluated in.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod netlist;
pub mod rank;

pub use netlist::{Driver, Netlist, PinSource, Sink, WireRoute};
pub use rank::{rank_gates, Ranking};
