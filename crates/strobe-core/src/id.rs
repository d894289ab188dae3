//! Strongly-typed indices and counters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Dense index of a gate inside a compiled netlist.
///
/// Gates are numbered in the order they appear in the accepted
/// [`Circuit`](crate::Circuit). `GateIndex(n)` addresses the n-th gate and
/// the n-th slot of the signal arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GateIndex(pub u32);

impl GateIndex {
    /// The index as a `usize`, for slice access.
    #[inline]
    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for GateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for GateIndex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Number of completed evaluation ticks.
///
/// `TickId(0)` marks a circuit that has never been evaluated.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TickId(pub u64);

impl TickId {
    /// The tick that follows this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Arena generation, incremented each time a tick is published.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(pub u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Generation {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_next_saturates() {
        assert_eq!(TickId(3).next(), TickId(4));
        assert_eq!(TickId(u64::MAX).next(), TickId(u64::MAX));
    }

    #[test]
    fn tick_serializes_as_number() {
        let json = serde_json::to_string(&TickId(7)).unwrap();
        assert_eq!(json, "7");
    }
}
