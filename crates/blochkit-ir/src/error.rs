//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur building or parsing gate records.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate name not in the catalog.
    #[error("Unknown gate: {0}")]
    UnknownGate(String),

    /// Gate requires a different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: usize,
        /// Actual number of qubits provided.
        got: usize,
    },

    /// The same qubit appears twice in one operation.
    #[error("Duplicate qubit q[{qubit}] in operation (gate: {gate_name})")]
    DuplicateQubit {
        /// The duplicate qubit index.
        qubit: u32,
        /// Name of the gate.
        gate_name: String,
    },

    /// A history line contains a character the record lexer does not accept.
    #[error("Lexer error at position {position}: {message}")]
    LexerError {
        /// Byte offset of the offending token.
        position: usize,
        /// Description of the problem.
        message: String,
    },

    /// A history line lexed cleanly but does not have a known record shape.
    #[error("Unrecognized record shape: {0}")]
    UnrecognizedShape(String),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
