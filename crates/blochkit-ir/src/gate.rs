//! The gate catalog.
//!
//! Every gate maps to a [`GateAction`]: either a direct rotation of one
//! qubit's Bloch vector, or a composite [`Procedure`] over several qubits.
//! The multi-qubit procedures are per-qubit approximations; qubits are never
//! entangled because each one is stored as an independent Bloch vector.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::fmt;
use std::str::FromStr;

use blochkit_geom::{Axis, Vec3};

use crate::error::{IrError, IrResult};

/// Gates understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gate {
    // Single-qubit Pauli gates
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford + T gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
    /// iSWAP gate.
    ISwap,

    // Three-qubit gates
    /// Toffoli gate (CCX).
    CCX,
    /// Fredkin gate (CSWAP).
    CSwap,
}

/// How a gate changes the per-qubit Bloch vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateAction {
    /// Rotate the single operand about `axis` by `angle`.
    Rotation {
        /// Rotation axis.
        axis: Axis,
        /// Rotation angle in radians.
        angle: f64,
    },
    /// A multi-qubit transform.
    Composite(Procedure),
}

/// Multi-qubit procedures, tagged by shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Procedure {
    /// Rotate the last operand about `axis` by `angle · Π p₁(control)`, where
    /// the leading operands are controls and `p₁ = (1 − cos θ) / 2`.
    ControlledRotation {
        /// Rotation axis of the target.
        axis: Axis,
        /// Full-strength angle, reached when every control is |1⟩.
        angle: f64,
    },
    /// Exchange the two operands' states verbatim.
    Swap,
    /// Each operand receives the other's prior vector rotated about `axis`
    /// by `angle`.
    PhasedSwap {
        /// Rotation axis applied to the exchanged vectors.
        axis: Axis,
        /// Rotation angle in radians.
        angle: f64,
    },
    /// Blend the two targets toward each other by the control's |1⟩
    /// probability, then renormalize.
    ControlledSwap,
}

const ALL_GATES: [Gate; 14] = [
    Gate::X,
    Gate::Y,
    Gate::Z,
    Gate::H,
    Gate::S,
    Gate::Sdg,
    Gate::T,
    Gate::Tdg,
    Gate::CX,
    Gate::CZ,
    Gate::Swap,
    Gate::ISwap,
    Gate::CCX,
    Gate::CSwap,
];

/// The Hadamard rotation axis, (X + Z) unnormalized.
pub const HADAMARD_AXIS: Vec3 = Vec3::new(1.0, 0.0, 1.0);

impl Gate {
    /// Every gate in catalog order.
    pub fn all() -> &'static [Gate] {
        &ALL_GATES
    }

    /// The lowercase mnemonic used in history records and emitted code.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Gate::X => "x",
            Gate::Y => "y",
            Gate::Z => "z",
            Gate::H => "h",
            Gate::S => "s",
            Gate::Sdg => "sdg",
            Gate::T => "t",
            Gate::Tdg => "tdg",
            Gate::CX => "cx",
            Gate::CZ => "cz",
            Gate::Swap => "swap",
            Gate::ISwap => "iswap",
            Gate::CCX => "ccx",
            Gate::CSwap => "cswap",
        }
    }

    /// Human-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            Gate::X => "X",
            Gate::Y => "Y",
            Gate::Z => "Z",
            Gate::H => "H",
            Gate::S => "S",
            Gate::Sdg => "S†",
            Gate::T => "T",
            Gate::Tdg => "T†",
            Gate::CX => "CNOT",
            Gate::CZ => "CZ",
            Gate::Swap => "SWAP",
            Gate::ISwap => "iSWAP",
            Gate::CCX => "CCX",
            Gate::CSwap => "CSWAP",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        match self {
            Gate::X
            | Gate::Y
            | Gate::Z
            | Gate::H
            | Gate::S
            | Gate::Sdg
            | Gate::T
            | Gate::Tdg => 1,

            Gate::CX | Gate::CZ | Gate::Swap | Gate::ISwap => 2,

            Gate::CCX | Gate::CSwap => 3,
        }
    }

    /// Resolve the gate to its effect on Bloch vectors.
    pub fn action(&self) -> GateAction {
        match self {
            Gate::X => rotation(Axis::X, PI),
            Gate::Y => rotation(Axis::Y, PI),
            Gate::Z => rotation(Axis::Z, PI),
            Gate::H => rotation(Axis::Arbitrary(HADAMARD_AXIS), PI),
            Gate::S => rotation(Axis::Z, FRAC_PI_2),
            Gate::Sdg => rotation(Axis::Z, -FRAC_PI_2),
            Gate::T => rotation(Axis::Z, FRAC_PI_4),
            Gate::Tdg => rotation(Axis::Z, -FRAC_PI_4),

            Gate::CX | Gate::CCX => GateAction::Composite(Procedure::ControlledRotation {
                axis: Axis::X,
                angle: PI,
            }),
            Gate::CZ => GateAction::Composite(Procedure::ControlledRotation {
                axis: Axis::Z,
                angle: PI,
            }),
            Gate::Swap => GateAction::Composite(Procedure::Swap),
            Gate::ISwap => GateAction::Composite(Procedure::PhasedSwap {
                axis: Axis::Z,
                angle: FRAC_PI_2,
            }),
            Gate::CSwap => GateAction::Composite(Procedure::ControlledSwap),
        }
    }

    /// Operands used when the caller does not name any.
    ///
    /// Controls come first: CX/CZ act `q[0] → q[1]`, CCX `q[0], q[1] → q[2]`,
    /// CSWAP `q[0] ? q[1] ↔ q[2]`. Single-qubit gates default to `q[0]`.
    pub fn default_operands(&self) -> &'static [u32] {
        match self.num_qubits() {
            1 => &[0],
            2 => &[0, 1],
            _ => &[0, 1, 2],
        }
    }

    /// Whether the engine animates this gate rather than applying it at once.
    pub fn is_animated(&self) -> bool {
        matches!(
            self.action(),
            GateAction::Rotation { .. }
                | GateAction::Composite(Procedure::ControlledRotation { .. })
        )
    }

    /// Strict lookup by record mnemonic (case-insensitive, no aliases).
    pub fn from_mnemonic(name: &str) -> Option<Gate> {
        ALL_GATES
            .iter()
            .copied()
            .find(|g| g.name().eq_ignore_ascii_case(name))
    }
}

fn rotation(axis: Axis, angle: f64) -> GateAction {
    GateAction::Rotation { axis, angle }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Gate {
    type Err = IrError;

    /// Lenient lookup accepting common aliases (`cnot`, `toffoli`, `s+`, …).
    fn from_str(s: &str) -> IrResult<Self> {
        let lower = s.trim().to_lowercase();
        if let Some(gate) = Gate::from_mnemonic(&lower) {
            return Ok(gate);
        }
        let gate = match lower.as_str() {
            "not" | "pauli-x" => Gate::X,
            "hadamard" => Gate::H,
            "s+" | "s†" | "sdag" | "sdagger" => Gate::Sdg,
            "t+" | "t†" | "tdag" | "tdagger" => Gate::Tdg,
            "cnot" => Gate::CX,
            "toffoli" | "ccnot" => Gate::CCX,
            "fredkin" => Gate::CSwap,
            _ => return Err(IrError::UnknownGate(s.to_string())),
        };
        Ok(gate)
    }
}
