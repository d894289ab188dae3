//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// `publish()` was called without a preceding `begin_tick()`.
    PublishWithoutBegin,
    /// The generation counter reached `u64::MAX`.
    GenerationOverflow,
    /// `restore_slots()` was called before any checkpoint was taken.
    NoCheckpoint,
    /// A slot buffer of the wrong length was supplied.
    SlotCountMismatch {
        /// Slots the arena holds.
        expected: usize,
        /// Slots supplied.
        got: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PublishWithoutBegin => {
                write!(f, "publish() called without a preceding begin_tick()")
            }
            Self::GenerationOverflow => write!(f, "generation counter overflow"),
            Self::NoCheckpoint => write!(f, "no checkpoint taken this tick"),
            Self::SlotCountMismatch { expected, got } => {
                write!(f, "slot count mismatch: expected {expected}, got {got}")
            }
        }
    }
}

impl Error for ArenaError {}
