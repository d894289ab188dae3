//! Read-side abstraction over published signal state.

use crate::id::{GateIndex, Generation, TickId};
use crate::signal::SignalSlot;

/// Read-only access to a published signal snapshot.
///
/// Decouples consumers (write-back, hashing, introspection) from the
/// arena that produced the snapshot.
pub trait SignalSnapshot {
    /// The slot for `gate`, or `None` if the index is out of range.
    fn slot(&self, gate: GateIndex) -> Option<&SignalSlot>;

    /// All slots in gate-index order.
    fn slots(&self) -> &[SignalSlot];

    /// The tick at which this snapshot was published.
    fn tick_id(&self) -> TickId;

    /// The arena generation of this snapshot.
    fn generation(&self) -> Generation;
}
