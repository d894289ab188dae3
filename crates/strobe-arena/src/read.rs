//! Read-only view of the published buffer.

use strobe_core::{GateIndex, Generation, SignalSlot, SignalSnapshot, TickId};

/// Borrowed view of the published generation.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    slots: &'a [SignalSlot],
    tick_id: TickId,
    generation: Generation,
}

impl<'a> Snapshot<'a> {
    pub(crate) fn new(slots: &'a [SignalSlot], tick_id: TickId, generation: Generation) -> Self {
        Self {
            slots,
            tick_id,
            generation,
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the snapshot holds no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl SignalSnapshot for Snapshot<'_> {
    fn slot(&self, gate: GateIndex) -> Option<&SignalSlot> {
        self.slots.get(gate.get())
    }

    fn slots(&self) -> &[SignalSlot] {
        self.slots
    }

    fn tick_id(&self) -> TickId {
        self.tick_id
    }

    fn generation(&self) -> Generation {
        self.generation
    }
}
