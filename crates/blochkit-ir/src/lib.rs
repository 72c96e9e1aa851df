//! Blochkit Gate Catalog and History Records
//!
//! This crate names the operations the engine can perform and records what
//! it did. It has no notion of time or of mutable qubit state; see
//! `blochkit-engine` for that.
//!
//! # Core Components
//!
//! - **Gates**: [`Gate`] with its [`GateAction`] (a direct rotation or a
//!   composite multi-qubit [`Procedure`])
//! - **Matrices**: [`GateMatrix`] for the textbook unitary of each gate
//! - **Records**: [`GateRecord`] and [`HistoryEntry`] for one applied gate
//! - **History**: [`History`], the append-only log the code emitters read
//!
//! # Example: Resolving a gate
//!
//! ```rust
//! use blochkit_geom::Axis;
//! use blochkit_ir::{Gate, GateAction};
//! use std::f64::consts::FRAC_PI_2;
//!
//! let s: Gate = "s".parse().unwrap();
//! assert_eq!(s.action(), GateAction::Rotation { axis: Axis::Z, angle: FRAC_PI_2 });
//! ```
//!
//! # Example: Reading a text log
//!
//! ```rust
//! use blochkit_ir::{Gate, History, HistoryEntry};
//!
//! let history = History::from_text("h q[0]\ncx q[0],q[1]\nmeasure q[1]");
//! assert!(history.contains_gate(Gate::CX));
//! assert_eq!(
//!     history.last(),
//!     Some(&HistoryEntry::Unrecognized("measure q[1]".into()))
//! );
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Bloch-sphere action |
//! |------|--------|---------------------|
//! | `X`, `Y`, `Z` | 1 | π about the matching axis |
//! | `H` | 1 | π about (1, 0, 1) |
//! | `S`, `Sdg` | 1 | ±π/2 about Z |
//! | `T`, `Tdg` | 1 | ±π/4 about Z |
//! | `CX`, `CZ` | 2 | target turned by π·p₁(control) about X / Z |
//! | `Swap` | 2 | exact exchange |
//! | `ISwap` | 2 | exchange, each vector turned π/2 about Z |
//! | `CCX` | 3 | target turned by π·p₁(c₁)·p₁(c₂) about X |
//! | `CSwap` | 3 | targets blended toward each other by p₁(control) |

pub mod error;
pub mod gate;
pub mod history;
mod lexer;
pub mod matrix;
pub mod record;

pub use error::{IrError, IrResult};
pub use gate::{Gate, GateAction, HADAMARD_AXIS, Procedure};
pub use history::History;
pub use matrix::GateMatrix;
pub use record::{GateRecord, HistoryEntry};
