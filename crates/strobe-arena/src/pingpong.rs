//! Double-buffered ping-pong arena orchestrator.
//!
//! [`SignalArena`] keeps two slot buffers that alternate between "staging"
//! (writable) and "published" (readable) roles. The lifecycle per tick is:
//! 1. `begin_tick()`: copy published into staging, hand out a [`TickGuard`]
//! 2. The scheduler reads tick-start state from `base` and writes `staging`
//! 3. `publish()`: swap buffers, advance the generation
//! 4. `snapshot()`: borrow the published buffer

use strobe_core::{GateIndex, Generation, SignalSlot, TickId};

use crate::error::ArenaError;
use crate::read::Snapshot;

/// Access to both buffers for the duration of one tick.
///
/// Created by [`SignalArena::begin_tick()`] and dropped before
/// [`SignalArena::publish()`].
#[must_use]
pub struct TickGuard<'a> {
    /// Tick-start state (the published buffer). Read-only.
    pub base: &'a [SignalSlot],
    /// Working state, initialised from `base`.
    pub staging: &'a mut [SignalSlot],
    checkpoint: &'a mut Vec<SignalSlot>,
    has_checkpoint: &'a mut bool,
}

impl TickGuard<'_> {
    /// Record the current staging contents as the rollback point.
    pub fn save_checkpoint(&mut self) {
        self.checkpoint.clear();
        self.checkpoint.extend_from_slice(self.staging);
        *self.has_checkpoint = true;
    }

    /// Overwrite the staging slots of `gates` with their checkpointed
    /// contents. Every other slot keeps its current value.
    pub fn restore_slots(&mut self, gates: &[GateIndex]) -> Result<(), ArenaError> {
        if !*self.has_checkpoint {
            return Err(ArenaError::NoCheckpoint);
        }
        for gate in gates {
            let i = gate.get();
            self.staging[i] = self.checkpoint[i];
        }
        Ok(())
    }

    /// Whether a checkpoint has been taken this tick.
    pub fn has_checkpoint(&self) -> bool {
        *self.has_checkpoint
    }
}

/// Double-buffered slot storage with a generation counter.
///
/// ```text
/// buffer_a  ←─── staging (even generations) / published (odd)
/// buffer_b  ←─── published (even generations) / staging (odd)
/// ```
#[derive(Debug)]
pub struct SignalArena {
    buffer_a: Vec<SignalSlot>,
    buffer_b: Vec<SignalSlot>,
    checkpoint: Vec<SignalSlot>,
    has_checkpoint: bool,
    /// Current generation (incremented on publish).
    generation: u64,
    /// Generation computed by `begin_tick()`, consumed by `publish()`.
    next_generation: u64,
    tick_in_progress: bool,
    /// Which buffer is currently staging (false = A staging, true = B staging).
    b_is_staging: bool,
    last_tick_id: TickId,
}

impl SignalArena {
    /// Create an arena whose published buffer holds `slots`.
    pub fn new(slots: Vec<SignalSlot>, tick_id: TickId) -> Self {
        let checkpoint = Vec::with_capacity(slots.len());
        Self {
            buffer_a: slots.clone(),
            buffer_b: slots,
            checkpoint,
            has_checkpoint: false,
            generation: 0,
            next_generation: 0,
            tick_in_progress: false,
            b_is_staging: false,
            last_tick_id: tick_id,
        }
    }

    /// Number of slots per buffer.
    pub fn len(&self) -> usize {
        self.buffer_a.len()
    }

    /// Whether the arena holds no slots.
    pub fn is_empty(&self) -> bool {
        self.buffer_a.is_empty()
    }

    /// Begin a new tick.
    ///
    /// Staging is overwritten with the published buffer and the checkpoint
    /// is cleared. Calling this again without `publish()` abandons the
    /// previous tick's staging writes.
    pub fn begin_tick(&mut self) -> Result<TickGuard<'_>, ArenaError> {
        let next_gen = self
            .generation
            .checked_add(1)
            .ok_or(ArenaError::GenerationOverflow)?;
        self.tick_in_progress = true;
        self.next_generation = next_gen;
        self.has_checkpoint = false;

        let (base, staging) = if self.b_is_staging {
            (&self.buffer_a, &mut self.buffer_b)
        } else {
            (&self.buffer_b, &mut self.buffer_a)
        };
        staging.copy_from_slice(base);

        Ok(TickGuard {
            base,
            staging,
            checkpoint: &mut self.checkpoint,
            has_checkpoint: &mut self.has_checkpoint,
        })
    }

    /// Publish the staging buffer as generation `next_generation`.
    pub fn publish(&mut self, tick_id: TickId) -> Result<(), ArenaError> {
        if !self.tick_in_progress {
            return Err(ArenaError::PublishWithoutBegin);
        }
        self.generation = self.next_generation;
        self.tick_in_progress = false;
        self.b_is_staging = !self.b_is_staging;
        self.last_tick_id = tick_id;
        Ok(())
    }

    /// Read-only view of the published generation.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(
            self.published(),
            self.last_tick_id,
            Generation(self.generation),
        )
    }

    /// The published buffer.
    pub fn published(&self) -> &[SignalSlot] {
        if self.b_is_staging {
            &self.buffer_a
        } else {
            &self.buffer_b
        }
    }

    /// The published buffer, for edits made between ticks.
    ///
    /// Edits do not advance the generation; the next tick picks them up
    /// as its tick-start state.
    pub fn published_mut(&mut self) -> &mut [SignalSlot] {
        if self.b_is_staging {
            &mut self.buffer_a
        } else {
            &mut self.buffer_b
        }
    }

    /// Current generation.
    pub fn generation(&self) -> Generation {
        Generation(self.generation)
    }

    /// Tick of the last publish (or the tick the arena was created at).
    pub fn tick_id(&self) -> TickId {
        self.last_tick_id
    }

    /// Replace both buffers with `slots` and rewind the generation to 0.
    pub fn reset(&mut self, slots: &[SignalSlot], tick_id: TickId) -> Result<(), ArenaError> {
        if slots.len() != self.buffer_a.len() {
            return Err(ArenaError::SlotCountMismatch {
                expected: self.buffer_a.len(),
                got: slots.len(),
            });
        }
        self.buffer_a.copy_from_slice(slots);
        self.buffer_b.copy_from_slice(slots);
        self.checkpoint.clear();
        self.has_checkpoint = false;
        self.generation = 0;
        self.next_generation = 0;
        self.tick_in_progress = false;
        self.b_is_staging = false;
        self.last_tick_id = tick_id;
        Ok(())
    }
}
