//! Structured history records.
//!
//! A [`GateRecord`] is produced when a gate finishes, so nothing downstream
//! has to re-parse free text. The textual form (its `Display`) keeps the
//! classic shapes:
//!
//! | Gate | Record |
//! |------|--------|
//! | single-qubit | `x q[0]` |
//! | `cx`, `cz`, `swap`, `iswap` | `cx q[0],q[1]` |
//! | `ccx` | `ccx q[0],q[1] -> q[2]` |
//! | `cswap` | `cswap q[0] ? swap q[1],q[2]` |
//!
//! Text logs can still be read back with [`HistoryEntry::parse`]; lines
//! that do not match one of the shapes are kept verbatim as
//! [`HistoryEntry::Unrecognized`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::lexer::{Token, tokenize};

/// One applied gate and the qubits it acted on, controls first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GateRecord {
    gate: Gate,
    qubits: Vec<u32>,
}

impl GateRecord {
    /// Create a record, checking arity and that no qubit repeats.
    pub fn new(gate: Gate, qubits: Vec<u32>) -> IrResult<Self> {
        if qubits.len() != gate.num_qubits() {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().to_string(),
                expected: gate.num_qubits(),
                got: qubits.len(),
            });
        }
        for (i, q) in qubits.iter().enumerate() {
            if qubits[..i].contains(q) {
                return Err(IrError::DuplicateQubit {
                    qubit: *q,
                    gate_name: gate.name().to_string(),
                });
            }
        }
        Ok(Self { gate, qubits })
    }

    /// The applied gate.
    pub fn gate(&self) -> Gate {
        self.gate
    }

    /// Operand qubit indices, controls first.
    pub fn qubits(&self) -> &[u32] {
        &self.qubits
    }
}

impl fmt::Display for GateRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let q = &self.qubits;
        match (self.gate, q.as_slice()) {
            (Gate::CCX, [c1, c2, t]) => write!(f, "ccx q[{c1}],q[{c2}] -> q[{t}]"),
            (Gate::CSwap, [c, a, b]) => write!(f, "cswap q[{c}] ? swap q[{a}],q[{b}]"),
            (gate, [a, b]) => write!(f, "{gate} q[{a}],q[{b}]"),
            (gate, [a]) => write!(f, "{gate} q[{a}]"),
            // Unreachable through `new`, kept total for Display.
            (gate, rest) => {
                write!(f, "{gate}")?;
                for (i, q) in rest.iter().enumerate() {
                    let sep = if i == 0 { " " } else { "," };
                    write!(f, "{sep}q[{q}]")?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for GateRecord {
    type Err = IrError;

    fn from_str(s: &str) -> IrResult<Self> {
        let tokens = tokenize(s).map_err(|(position, message)| IrError::LexerError {
            position,
            message,
        })?;
        let atoms = atomize(&tokens).ok_or_else(|| IrError::UnrecognizedShape(s.to_string()))?;
        let unrecognized = || IrError::UnrecognizedShape(s.to_string());

        let (gate, qubits) = match atoms.as_slice() {
            [Atom::Word(name), Atom::Qubit(a)] => (single_qubit(name), vec![*a]),
            [
                Atom::Word(name),
                Atom::Qubit(a),
                Atom::Comma,
                Atom::Qubit(b),
            ] => (pair(name), vec![*a, *b]),
            [
                Atom::Word(name),
                Atom::Qubit(c1),
                Atom::Comma,
                Atom::Qubit(c2),
                Atom::Arrow,
                Atom::Qubit(t),
            ] if name.eq_ignore_ascii_case("ccx") => (Some(Gate::CCX), vec![*c1, *c2, *t]),
            [
                Atom::Word(name),
                Atom::Qubit(c),
                Atom::Question,
                Atom::Word(inner),
                Atom::Qubit(a),
                Atom::Comma,
                Atom::Qubit(b),
            ] if name.eq_ignore_ascii_case("cswap") && inner.eq_ignore_ascii_case("swap") => {
                (Some(Gate::CSwap), vec![*c, *a, *b])
            }
            _ => (None, vec![]),
        };

        let gate = gate.ok_or_else(unrecognized)?;
        GateRecord::new(gate, qubits)
    }
}

/// Record-level view of the token stream: `q [ n ]` collapses to a qubit.
#[derive(Debug, PartialEq)]
enum Atom<'a> {
    Word(&'a str),
    Qubit(u32),
    Comma,
    Arrow,
    Question,
}

fn atomize(tokens: &[Token]) -> Option<Vec<Atom<'_>>> {
    let mut atoms = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        match &tokens[i] {
            Token::Identifier(reg) if reg.eq_ignore_ascii_case("q") => match tokens.get(i + 1..i + 4)? {
                [Token::LBracket, Token::IntLiteral(n), Token::RBracket] => {
                    atoms.push(Atom::Qubit(*n));
                    i += 4;
                    continue;
                }
                _ => return None,
            },
            Token::Identifier(word) => atoms.push(Atom::Word(word.as_str())),
            Token::Comma => atoms.push(Atom::Comma),
            Token::Arrow => atoms.push(Atom::Arrow),
            Token::Question => atoms.push(Atom::Question),
            Token::IntLiteral(_) | Token::LBracket | Token::RBracket => return None,
        }
        i += 1;
    }
    Some(atoms)
}

fn single_qubit(name: &str) -> Option<Gate> {
    Gate::from_mnemonic(name).filter(|g| g.num_qubits() == 1)
}

fn pair(name: &str) -> Option<Gate> {
    Gate::from_mnemonic(name).filter(|g| g.num_qubits() == 2)
}

/// A line of the history log.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryEntry {
    /// A gate the engine applied.
    Gate(GateRecord),
    /// Text that is not a known record shape, kept verbatim.
    Unrecognized(String),
}

impl HistoryEntry {
    /// Parse one line. Never fails: unknown shapes are kept as text.
    pub fn parse(line: &str) -> Self {
        match line.parse::<GateRecord>() {
            Ok(record) => HistoryEntry::Gate(record),
            Err(_) => HistoryEntry::Unrecognized(line.to_string()),
        }
    }

    /// The gate record, if this entry is one.
    pub fn as_record(&self) -> Option<&GateRecord> {
        match self {
            HistoryEntry::Gate(record) => Some(record),
            HistoryEntry::Unrecognized(_) => None,
        }
    }
}

impl From<GateRecord> for HistoryEntry {
    fn from(record: GateRecord) -> Self {
        HistoryEntry::Gate(record)
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryEntry::Gate(record) => record.fmt(f),
            HistoryEntry::Unrecognized(text) => f.write_str(text),
        }
    }
}
