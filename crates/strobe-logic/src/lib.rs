//! Gate semantics for the Strobe logic engine.
//!
//! Everything here is a pure function. [`step_gate`] is the single
//! dispatch point the scheduler calls; the submodules hold the per-family
//! transition functions it delegates to.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod clock;
pub mod combinational;
pub mod sequential;
mod step;

pub use clock::{clock_level, drive_clock};
pub use combinational::combinational_output;
pub use sequential::{d_flip_flop, sr_latch};
pub use step::{step_gate, GateUpdate};
