//! Transition functions for the SR latch and the D flip-flop.
//!
//! Both take the state at the start of the tick, never the state left by
//! an earlier evaluation in the same tick. Evaluating either one twice
//! with the same pins gives the same answer.

/// Next `(q, q_bar)` of a NOR-style SR latch.
///
/// | S | R | result |
/// |---|---|--------|
/// | 0 | 0 | hold (reset if the held pair is not complementary) |
/// | 1 | 0 | `(1, 0)` |
/// | 0 | 1 | `(0, 1)` |
/// | 1 | 1 | `(0, 0)` |
pub fn sr_latch(s: bool, r: bool, q: bool, q_bar: bool) -> (bool, bool) {
    match (s, r) {
        (false, false) if q == q_bar => (false, true),
        (false, false) => (q, q_bar),
        (true, false) => (true, false),
        (false, true) => (false, true),
        (true, true) => (false, false),
    }
}

/// Next `(q, prev_clock)` of a rising-edge D flip-flop.
///
/// `d` must be the tick-start value of the data input. Callers of
/// `evaluate` should change D one tick before the clock edge that is meant
/// to capture it; a D change in the same tick as the edge is missed.
pub fn d_flip_flop(d: bool, clk: bool, q: bool, prev_clock: bool) -> (bool, bool) {
    let rising_edge = clk && !prev_clock;
    let q = if rising_edge { d } else { q };
    (q, clk)
}
