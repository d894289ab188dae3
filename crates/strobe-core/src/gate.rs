//! The gate model: [`GateKind`], kind-specific [`GateState`], and pin arities.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseGateKindError;

/// Classification of a gate.
///
/// Each kind fixes the number of input pins it reads and the number of
/// output values it stores. Dispatch over kinds is always an exhaustive
/// `match`, so adding a kind is a compile error everywhere it matters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GateKind {
    /// Externally toggled source. Its output is authoritative state.
    Input,
    /// Observation tap mirroring its single input.
    Output,
    /// Two-input conjunction.
    And,
    /// Two-input disjunction.
    Or,
    /// Single-input negation.
    Not,
    /// Two-input negated conjunction.
    Nand,
    /// Two-input negated disjunction.
    Nor,
    /// Two-input exclusive or.
    Xor,
    /// Single-input identity.
    Buffer,
    /// Square-wave source driven by logical time.
    Clock,
    /// Rising-edge D flip-flop. Pins: `0 = D`, `1 = CLK`.
    DFlipFlop,
    /// Cross-coupled NOR latch. Pins: `0 = S`, `1 = R`; outputs `Q`, `Q̄`.
    SrLatch,
}

impl GateKind {
    /// Every kind, in declaration order.
    pub const ALL: [GateKind; 12] = [
        GateKind::Input,
        GateKind::Output,
        GateKind::And,
        GateKind::Or,
        GateKind::Not,
        GateKind::Nand,
        GateKind::Nor,
        GateKind::Xor,
        GateKind::Buffer,
        GateKind::Clock,
        GateKind::DFlipFlop,
        GateKind::SrLatch,
    ];

    /// Number of input pins.
    pub fn input_arity(self) -> usize {
        match self {
            Self::Input | Self::Clock => 0,
            Self::Output | Self::Not | Self::Buffer => 1,
            Self::And
            | Self::Or
            | Self::Nand
            | Self::Nor
            | Self::Xor
            | Self::DFlipFlop
            | Self::SrLatch => 2,
        }
    }

    /// Number of output values stored on the gate.
    pub fn output_arity(self) -> usize {
        match self {
            Self::SrLatch => 2,
            _ => 1,
        }
    }

    /// Number of output pins a wire may read from.
    ///
    /// A D flip-flop stores only `Q` but exposes `Q̄` as a virtual pin 1.
    pub fn readable_output_pins(self) -> usize {
        match self {
            Self::SrLatch | Self::DFlipFlop => 2,
            _ => 1,
        }
    }

    /// Whether the kind carries state across ticks.
    pub fn is_sequential(self) -> bool {
        matches!(self, Self::DFlipFlop | Self::SrLatch)
    }

    /// Whether the kind is a pure boolean function of its pins.
    pub fn is_combinational(self) -> bool {
        matches!(
            self,
            Self::Output
                | Self::And
                | Self::Or
                | Self::Not
                | Self::Nand
                | Self::Nor
                | Self::Xor
                | Self::Buffer
        )
    }

    /// Whether the gate's output is set from outside the evaluator
    /// (inputs by the caller, clocks by logical time) rather than from pins.
    pub fn is_source(self) -> bool {
        matches!(self, Self::Input | Self::Clock)
    }

    /// Canonical wire name, as used in circuit JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Input => "INPUT",
            Self::Output => "OUTPUT",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::Nand => "NAND",
            Self::Nor => "NOR",
            Self::Xor => "XOR",
            Self::Buffer => "BUFFER",
            Self::Clock => "CLOCK",
            Self::DFlipFlop => "D-FF",
            Self::SrLatch => "SR-LATCH",
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GateKind {
    type Err = ParseGateKindError;

    /// Parse a kind name. Matching is case-insensitive and accepts the
    /// common spellings found in gallery content (`D-FF`, `DFF`, `D_FF`,
    /// `SR-LATCH`, `SR_LATCH`, `BUF`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let kind = match upper.as_str() {
            "INPUT" => Self::Input,
            "OUTPUT" => Self::Output,
            "AND" => Self::And,
            "OR" => Self::Or,
            "NOT" => Self::Not,
            "NAND" => Self::Nand,
            "NOR" => Self::Nor,
            "XOR" => Self::Xor,
            "BUFFER" | "BUF" => Self::Buffer,
            "CLOCK" => Self::Clock,
            "D-FF" | "DFF" | "D_FF" => Self::DFlipFlop,
            "SR-LATCH" | "SR_LATCH" | "SRLATCH" => Self::SrLatch,
            _ => {
                return Err(ParseGateKindError {
                    kind: s.to_string(),
                })
            }
        };
        Ok(kind)
    }
}

/// Clock parameters and phase anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockState {
    /// Toggle frequency in Hz. One period is one low half and one high half.
    pub frequency: f64,
    /// A paused clock holds its last output.
    pub is_running: bool,
    /// Logical time at which the clock was first driven. `None` until then.
    pub origin: Option<f64>,
}

impl ClockState {
    /// Frequency applied when the metadata omits or garbles it.
    pub const DEFAULT_FREQUENCY: f64 = 1.0;

    /// A clock at `frequency` Hz, running, not yet anchored.
    pub fn running(frequency: f64) -> Self {
        Self {
            frequency,
            is_running: true,
            origin: None,
        }
    }
}

impl Default for ClockState {
    /// 1 Hz, paused.
    fn default() -> Self {
        Self {
            frequency: Self::DEFAULT_FREQUENCY,
            is_running: false,
            origin: None,
        }
    }
}

/// Kind-specific state carried by a gate across ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GateState {
    /// Stateless gates (including INPUT and OUTPUT).
    Combinational,
    /// CLOCK state.
    Clock(ClockState),
    /// D-FF latched value and the clock level seen on the previous tick.
    DFlipFlop {
        /// Latched output.
        q: bool,
        /// Clock level recorded at the end of the previous tick.
        prev_clock: bool,
    },
    /// SR-LATCH complementary outputs.
    SrLatch {
        /// `Q` output.
        q: bool,
        /// `Q̄` output.
        q_bar: bool,
    },
}

impl GateState {
    /// Initial state for a freshly placed gate of `kind`.
    pub fn default_for(kind: GateKind) -> Self {
        match kind {
            GateKind::Clock => Self::Clock(ClockState::default()),
            GateKind::DFlipFlop => Self::DFlipFlop {
                q: false,
                prev_clock: false,
            },
            GateKind::SrLatch => Self::SrLatch {
                q: false,
                q_bar: true,
            },
            GateKind::Input
            | GateKind::Output
            | GateKind::And
            | GateKind::Or
            | GateKind::Not
            | GateKind::Nand
            | GateKind::Nor
            | GateKind::Xor
            | GateKind::Buffer => Self::Combinational,
        }
    }

    /// Whether this state variant is the one `kind` carries.
    pub fn matches_kind(&self, kind: GateKind) -> bool {
        match self {
            Self::Combinational => !matches!(
                kind,
                GateKind::Clock | GateKind::DFlipFlop | GateKind::SrLatch
            ),
            Self::Clock(_) => kind == GateKind::Clock,
            Self::DFlipFlop { .. } => kind == GateKind::DFlipFlop,
            Self::SrLatch { .. } => kind == GateKind::SrLatch,
        }
    }
}
