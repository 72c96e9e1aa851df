//! Circuit Code Emitters for Blochkit
//!
//! Turns a gate [`History`] into code that rebuilds the same gate sequence in
//! other tools. Emission is a pure function of the history and the qubit
//! count: the same input always yields byte-identical output, and no input
//! makes it fail. History entries that are not recognized gate records are
//! carried through as comments.
//!
//! # Example
//!
//! ```rust
//! use blochkit_codegen::{CodeFormat, serialize};
//! use blochkit_ir::History;
//!
//! let history = History::from_text("h q[0]\ncx q[0],q[1]");
//! let code = serialize(CodeFormat::Qiskit, &history, 2);
//! assert!(code.contains("qc = QuantumCircuit(2)"));
//! assert!(code.contains("qc.cx(0, 1)"));
//!
//! let qasm = serialize(CodeFormat::Qasm3, &history, 2);
//! assert!(qasm.contains("cx q[0], q[1];"));
//! ```

mod qasm3;
mod qiskit;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use blochkit_ir::History;

pub use qasm3::emit_qasm3;
pub use qiskit::{NO_GATES_PLACEHOLDER, emit_qiskit};

/// Target language for emitted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeFormat {
    /// Python using `qiskit.QuantumCircuit`.
    #[default]
    Qiskit,
    /// OpenQASM 3.0 source.
    Qasm3,
}

/// Error returned when a format name is not recognized.
#[derive(Debug, Error)]
#[error("Unknown code format: '{0}'. Available: qiskit, qasm3")]
pub struct UnknownFormat(pub String);

impl FromStr for CodeFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "qiskit" | "python" | "py" => Ok(CodeFormat::Qiskit),
            "qasm3" | "qasm" | "openqasm" => Ok(CodeFormat::Qasm3),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for CodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeFormat::Qiskit => write!(f, "qiskit"),
            CodeFormat::Qasm3 => write!(f, "qasm3"),
        }
    }
}

/// Emit `history` in the requested format.
pub fn serialize(format: CodeFormat, history: &History, num_qubits: usize) -> String {
    match format {
        CodeFormat::Qiskit => emit_qiskit(history, num_qubits),
        CodeFormat::Qasm3 => emit_qasm3(history, num_qubits),
    }
}

/// Split raw entry text into lines so every line can carry a comment marker.
pub(crate) fn comment_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.trim_end_matches('\r'))
}
