//! Gate dispatch outcomes and per-gate effect planning.

use thiserror::Error;

use blochkit_geom::Axis;
use blochkit_ir::{Gate, GateAction, GateRecord, Procedure};

use crate::register::Register;
use crate::state::QubitState;

/// What happened to a user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A gate animation was started.
    Animating,
    /// The change took effect immediately.
    Applied,
    /// The action was rejected and nothing changed.
    Ignored(IgnoreReason),
}

impl Dispatch {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Dispatch::Ignored(_))
    }
}

/// Why an action was rejected. These mirror disabled controls, not faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IgnoreReason {
    #[error("an animation is in flight")]
    Busy,

    #[error("{gate} needs {required} qubits, register has {available}")]
    NotEnoughQubits {
        gate: Gate,
        required: usize,
        available: usize,
    },

    #[error("qubit q[{qubit}] does not exist in a {len}-qubit register")]
    OutOfRange { qubit: u32, len: usize },

    #[error("invalid operands: {0}")]
    InvalidOperands(String),

    #[error("register already holds {0} qubits")]
    AtCapacity(usize),

    #[error("the last qubit cannot be removed")]
    LastQubit,
}

/// How a validated gate record changes the register.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum GatePlan {
    /// Sweep `target` about `axis` from 0 to `angle`.
    Rotate {
        target: usize,
        axis: Axis,
        angle: f64,
    },
    /// Write these states at once.
    Instant(Vec<(usize, QubitState)>),
}

/// Resolve a record against the current register.
///
/// Control probabilities are read here, once, so an animation never sees
/// them change. Operand indices must already be in range.
pub(crate) fn plan(record: &GateRecord, register: &Register, epsilon: f64) -> GatePlan {
    let ops: Vec<usize> = record.qubits().iter().map(|&q| q as usize).collect();
    let state = |i: usize| register.get(i).unwrap_or_default();
    let project = |v| QubitState::from_cartesian_with_epsilon(v, epsilon);

    match record.gate().action() {
        GateAction::Rotation { axis, angle } => GatePlan::Rotate {
            target: ops[0],
            axis,
            angle,
        },
        GateAction::Composite(Procedure::ControlledRotation { axis, angle }) => {
            let (target, controls) = match ops.split_last() {
                Some((&target, controls)) => (target, controls),
                None => return GatePlan::Instant(Vec::new()),
            };
            let weight: f64 = controls.iter().map(|&c| state(c).prob_one()).product();
            GatePlan::Rotate {
                target,
                axis,
                angle: angle * weight,
            }
        }
        GateAction::Composite(Procedure::Swap) => {
            let (a, b) = (ops[0], ops[1]);
            GatePlan::Instant(vec![(a, state(b)), (b, state(a))])
        }
        GateAction::Composite(Procedure::PhasedSwap { axis, angle }) => {
            let (a, b) = (ops[0], ops[1]);
            let va = state(a).to_cartesian();
            let vb = state(b).to_cartesian();
            GatePlan::Instant(vec![
                (a, project(axis.rotate(vb, angle))),
                (b, project(axis.rotate(va, angle))),
            ])
        }
        GateAction::Composite(Procedure::ControlledSwap) => {
            let (c, a, b) = (ops[0], ops[1], ops[2]);
            let p = state(c).prob_one();
            let va = state(a).to_cartesian();
            let vb = state(b).to_cartesian();
            GatePlan::Instant(vec![
                (a, project(va.lerp(vb, p).normalized())),
                (b, project(vb.lerp(va, p).normalized())),
            ])
        }
    }
}

/// Whether `gate` can run on a register of `len` qubits at all.
pub(crate) fn check_arity(gate: Gate, len: usize) -> Result<(), IgnoreReason> {
    if gate.num_qubits() > len {
        return Err(IgnoreReason::NotEnoughQubits {
            gate,
            required: gate.num_qubits(),
            available: len,
        });
    }
    Ok(())
}
