//! Qiskit emitter.

use blochkit_ir::{Gate, GateRecord, History, HistoryEntry};

use crate::comment_lines;

/// Placeholder emitted when the history holds no entries.
pub const NO_GATES_PLACEHOLDER: &str = "# (no gates applied yet)";

/// Emit a history as a Qiskit Python snippet.
///
/// The circuit width is `max(1, num_qubits)`. Lines are joined with `\n`
/// and the snippet has no trailing newline. Entries that are not gate
/// records are carried over as `#` comments.
pub fn emit_qiskit(history: &History, num_qubits: usize) -> String {
    let mut emitter = QiskitEmitter::new();
    emitter.emit_history(history, num_qubits);
    emitter.finish()
}

struct QiskitEmitter {
    lines: Vec<String>,
}

impl QiskitEmitter {
    fn new() -> Self {
        Self { lines: Vec::new() }
    }

    fn emit_history(&mut self, history: &History, num_qubits: usize) {
        self.line("from qiskit import QuantumCircuit");
        if history.contains_gate(Gate::ISwap) {
            self.line("from qiskit.circuit.library import iSwapGate");
        }
        self.line(format!("qc = QuantumCircuit({})", num_qubits.max(1)));

        if history.is_empty() {
            self.line(NO_GATES_PLACEHOLDER);
        }

        for entry in history {
            match entry {
                HistoryEntry::Gate(record) => self.emit_record(record),
                HistoryEntry::Unrecognized(text) => {
                    for raw in comment_lines(text) {
                        self.line(format!("# {raw}"));
                    }
                }
            }
        }

        self.line("print(qc)");
    }

    fn emit_record(&mut self, record: &GateRecord) {
        let args = record
            .qubits()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        let line = match record.gate() {
            Gate::ISwap => format!("qc.append(iSwapGate(), [{args}])"),
            gate => format!("qc.{}({args})", gate.name()),
        };
        self.line(line);
    }

    fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}
