//! Tick scheduling and the `evaluate` entry point for the Strobe logic engine.
//!
//! Provides the stateless [`evaluate()`] function, the stateful
//! [`Simulator`] for repeated stepping, and the [`TickEngine`] both are
//! built on.
//!
//! # Architecture
//!
//! ```text
//! evaluate / Simulator
//! └── TickEngine
//!     ├── Netlist     (validated topology, canonical ranks)
//!     ├── SignalArena (tick-start base + staging, generation counter)
//!     └── Scheduler   (seeding, sweeps, iteration cap)
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod evaluate;
pub mod hash;
pub mod metrics;
pub mod scheduler;
pub mod simulator;
pub mod strategy;
pub mod tick;

pub use config::{ClockMode, ConfigError, EvaluationConfig, Strategy};
pub use error::EvaluateError;
pub use evaluate::{evaluate, evaluate_json, EvaluationResult};
pub use hash::state_hash;
pub use metrics::{EvaluationInfo, SettleOutcome, StrategyUsed};
pub use scheduler::{Scheduler, SettlePlan, SettleReport, SettleState};
pub use simulator::{Simulator, SimulatorError};
pub use strategy::{select_strategy, SMALL_CIRCUIT_GATES};
pub use tick::TickEngine;
