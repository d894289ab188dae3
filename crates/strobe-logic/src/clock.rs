//! Square-wave clock driven by logical time.
//!
//! A clock at `f` Hz spends `1 / (2f)` seconds low, then the same high.
//! Time is always supplied by the caller; nothing here reads a wall clock.

use strobe_core::ClockState;

/// Clock level `t_rel` seconds after its origin.
///
/// Returns `false` for a non-positive or non-finite frequency or time.
pub fn clock_level(t_rel: f64, frequency: f64) -> bool {
    if !(frequency.is_finite() && frequency > 0.0 && t_rel.is_finite()) {
        return false;
    }
    let half_periods = (t_rel.max(0.0) * frequency * 2.0).floor();
    half_periods.rem_euclid(2.0) >= 1.0
}

/// Drive a clock to logical time `t`, returning its new output.
///
/// The first time a running clock is driven, `t` becomes its origin. A
/// paused clock keeps `current` and does not anchor.
pub fn drive_clock(state: &mut ClockState, current: bool, t: f64) -> bool {
    if !state.is_running || !t.is_finite() {
        return current;
    }
    let origin = *state.origin.get_or_insert(t);
    clock_level(t - origin, state.frequency)
}
