//! OpenQASM 3 emitter.

use blochkit_ir::{Gate, GateRecord, History, HistoryEntry};

use crate::comment_lines;

/// `iswap` is not part of `stdgates.inc`, so it gets an inline definition.
const ISWAP_DEFINITION: &str = "gate iswap a, b { s a; s b; h a; cx a, b; cx b, a; h b; }";

/// Emit a history as OpenQASM 3 source code.
///
/// Entries that are not gate records become `//` comments.
pub fn emit_qasm3(history: &History, num_qubits: usize) -> String {
    let mut emitter = Qasm3Emitter::new();
    emitter.emit_history(history, num_qubits);
    emitter.output
}

struct Qasm3Emitter {
    output: String,
}

impl Qasm3Emitter {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn emit_history(&mut self, history: &History, num_qubits: usize) {
        self.writeln("OPENQASM 3.0;");
        self.writeln("include \"stdgates.inc\";");
        if history.contains_gate(Gate::ISwap) {
            self.writeln(ISWAP_DEFINITION);
        }
        self.writeln("");

        self.writeln(&format!("qubit[{}] q;", num_qubits.max(1)));
        self.writeln("");

        if history.is_empty() {
            self.writeln("// (no gates applied yet)");
        }

        for entry in history {
            match entry {
                HistoryEntry::Gate(record) => self.emit_record(record),
                HistoryEntry::Unrecognized(text) => {
                    for raw in comment_lines(text) {
                        self.writeln(&format!("// {raw}"));
                    }
                }
            }
        }
    }

    fn emit_record(&mut self, record: &GateRecord) {
        let qubits = record
            .qubits()
            .iter()
            .map(|q| format!("q[{q}]"))
            .collect::<Vec<_>>()
            .join(", ");
        self.writeln(&format!("{} {qubits};", record.gate().name()));
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}
