//! Double-buffered signal storage for the Strobe logic engine.
//!
//! # Architecture
//!
//! ```text
//! SignalArena (orchestrator)
//! ├── Vec<SignalSlot> × 2 (alternating published/staging)
//! └── checkpoint Vec<SignalSlot> (per-tick rollback point)
//! ```
//!
//! The published buffer is the state at the start of a tick. Sequential
//! gates sample from it, so a flip-flop chain shifts one stage per edge
//! no matter how the scheduler orders evaluation inside the tick.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod pingpong;
pub mod read;

pub use error::ArenaError;
pub use pingpong::{SignalArena, TickGuard};
pub use read::Snapshot;
