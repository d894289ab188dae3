//! State fingerprint for determinism checks.
//!
//! Uses FNV-1a over every slot's pins, outputs and sequential state. Not
//! cryptographic; it exists so two runs can be compared with one `u64`.

use strobe_core::{GateState, SignalSnapshot};

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Pin encoding: 0 unset, 1 low, 2 high.
#[inline]
fn pin_byte(pin: Option<bool>) -> u8 {
    match pin {
        None => 0,
        Some(false) => 1,
        Some(true) => 2,
    }
}

/// Hash the snapshot's slots and tick.
///
/// The gate index is folded in at each slot boundary so slot order
/// matters.
pub fn state_hash(snapshot: &dyn SignalSnapshot) -> u64 {
    let mut hash = fnv1a_u64(FNV_OFFSET, snapshot.tick_id().0);
    for (i, slot) in snapshot.slots().iter().enumerate() {
        hash = fnv1a_u64(hash, i as u64);
        for pin in slot.pins {
            hash = fnv1a_byte(hash, pin_byte(pin));
        }
        for out in slot.outputs {
            hash = fnv1a_byte(hash, out as u8);
        }
        hash = match slot.state {
            GateState::Combinational => fnv1a_byte(hash, 0),
            GateState::Clock(clock) => {
                let h = fnv1a_byte(hash, 1);
                let h = fnv1a_u64(h, clock.frequency.to_bits());
                let h = fnv1a_byte(h, clock.is_running as u8);
                fnv1a_u64(h, clock.origin.map_or(u64::MAX, f64::to_bits))
            }
            GateState::DFlipFlop { q, prev_clock } => {
                let h = fnv1a_byte(hash, 2);
                let h = fnv1a_byte(h, q as u8);
                fnv1a_byte(h, prev_clock as u8)
            }
            GateState::SrLatch { q, q_bar } => {
                let h = fnv1a_byte(hash, 3);
                let h = fnv1a_byte(h, q as u8);
                fnv1a_byte(h, q_bar as u8)
            }
        };
    }
    hash
}
