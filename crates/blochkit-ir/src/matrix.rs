//! Computational-basis matrices for the catalog gates.
//!
//! These are the textbook unitaries, shown next to the Bloch spheres so the
//! geometric picture can be compared with the algebra. The engine itself
//! never multiplies by them.

use num_complex::Complex64;
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};
use std::fmt;

use crate::gate::Gate;

/// A dense row-major `2^n × 2^n` gate matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct GateMatrix {
    gate: Gate,
    dim: usize,
    entries: Vec<Complex64>,
}

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

impl GateMatrix {
    /// Build the matrix for `gate`.
    pub fn of(gate: Gate) -> Self {
        let dim = 1usize << gate.num_qubits();
        let entries = match gate {
            Gate::X => vec![ZERO, ONE, ONE, ZERO],
            Gate::Y => vec![ZERO, -I, I, ZERO],
            Gate::Z => vec![ONE, ZERO, ZERO, -ONE],
            Gate::H => {
                let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
                vec![h, h, h, -h]
            }
            Gate::S => vec![ONE, ZERO, ZERO, I],
            Gate::Sdg => vec![ONE, ZERO, ZERO, -I],
            Gate::T => vec![ONE, ZERO, ZERO, Complex64::from_polar(1.0, FRAC_PI_4)],
            Gate::Tdg => vec![ONE, ZERO, ZERO, Complex64::from_polar(1.0, -FRAC_PI_4)],
            Gate::CX => permutation(dim, &[(2, 3), (3, 2)]),
            Gate::CZ => {
                let mut m = identity(dim);
                m[dim * dim - 1] = -ONE;
                m
            }
            Gate::Swap => permutation(dim, &[(1, 2), (2, 1)]),
            Gate::ISwap => {
                let mut m = identity(dim);
                m[dim + 1] = ZERO;
                m[2 * dim + 2] = ZERO;
                m[dim + 2] = I;
                m[2 * dim + 1] = I;
                m
            }
            Gate::CCX => permutation(dim, &[(6, 7), (7, 6)]),
            Gate::CSwap => permutation(dim, &[(5, 6), (6, 5)]),
        };
        Self { gate, dim, entries }
    }

    /// The gate this matrix belongs to.
    pub fn gate(&self) -> Gate {
        self.gate
    }

    /// Matrix dimension (2, 4 or 8).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Entry at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not below [`dim`](Self::dim).
    pub fn entry(&self, row: usize, col: usize) -> Complex64 {
        assert!(row < self.dim && col < self.dim, "index out of range");
        self.entries[row * self.dim + col]
    }

    /// Rows of the matrix.
    pub fn rows(&self) -> impl Iterator<Item = &[Complex64]> {
        self.entries.chunks(self.dim)
    }

    /// Check `U · U† = I` within `tol`.
    pub fn is_unitary(&self, tol: f64) -> bool {
        let n = self.dim;
        (0..n).all(|r| {
            (0..n).all(|c| {
                let dot: Complex64 = (0..n)
                    .map(|k| self.entry(r, k) * self.entry(c, k).conj())
                    .sum();
                let expected = if r == c { ONE } else { ZERO };
                (dot - expected).norm() < tol
            })
        })
    }

    /// Display name, e.g. "X Gate (NOT)".
    pub fn name(&self) -> &'static str {
        match self.gate {
            Gate::X => "X Gate (NOT)",
            Gate::Y => "Y Gate",
            Gate::Z => "Z Gate",
            Gate::H => "H Gate (Hadamard)",
            Gate::S => "S Gate",
            Gate::Sdg => "S† Gate",
            Gate::T => "T Gate",
            Gate::Tdg => "T† Gate",
            Gate::CX => "CNOT Gate",
            Gate::CZ => "CZ Gate",
            Gate::Swap => "SWAP Gate",
            Gate::ISwap => "iSWAP Gate",
            Gate::CCX => "CCX Gate (Toffoli)",
            Gate::CSwap => "CSWAP Gate (Fredkin)",
        }
    }

    /// One-line description of the gate's effect.
    pub fn description(&self) -> &'static str {
        match self.gate {
            Gate::X => "Flips the qubit state (|0⟩ ↔ |1⟩)",
            Gate::Y => "180° rotation around the Y-axis",
            Gate::Z => "180° rotation around the Z-axis",
            Gate::H => "Creates superposition state",
            Gate::S => "90° rotation around Z-axis",
            Gate::Sdg => "-90° rotation around Z-axis",
            Gate::T => "45° rotation around Z-axis",
            Gate::Tdg => "-45° rotation around Z-axis",
            Gate::CX => "Controlled NOT operation",
            Gate::CZ => "Controlled Z operation",
            Gate::Swap => "Exchanges two qubit states",
            Gate::ISwap => "i times SWAP operation",
            Gate::CCX => {
                "Controlled Controlled NOT: flips target qubit only when both control qubits are |1⟩"
            }
            Gate::CSwap => "Controlled SWAP: swaps target qubits only when control qubit is |1⟩",
        }
    }
}

impl Gate {
    /// The gate's computational-basis matrix.
    pub fn matrix(&self) -> GateMatrix {
        GateMatrix::of(*self)
    }
}

fn identity(dim: usize) -> Vec<Complex64> {
    let mut m = vec![ZERO; dim * dim];
    for i in 0..dim {
        m[i * dim + i] = ONE;
    }
    m
}

/// Identity with the listed rows remapped: `(row, col)` gets the 1.
fn permutation(dim: usize, moves: &[(usize, usize)]) -> Vec<Complex64> {
    let mut m = identity(dim);
    for &(row, _) in moves {
        m[row * dim + row] = ZERO;
    }
    for &(row, col) in moves {
        m[row * dim + col] = ONE;
    }
    m
}

/// Render a matrix entry with the symbols used in the literature.
fn symbol(z: Complex64) -> String {
    const TOL: f64 = 1e-9;
    let near = |a: Complex64, b: Complex64| (a - b).norm() < TOL;
    let named = [
        (ZERO, "0"),
        (ONE, "1"),
        (-ONE, "-1"),
        (I, "i"),
        (-I, "-i"),
        (Complex64::new(FRAC_1_SQRT_2, 0.0), "1/√2"),
        (Complex64::new(-FRAC_1_SQRT_2, 0.0), "-1/√2"),
        (Complex64::from_polar(1.0, FRAC_PI_4), "e^(iπ/4)"),
        (Complex64::from_polar(1.0, -FRAC_PI_4), "e^(-iπ/4)"),
    ];
    named
        .iter()
        .find(|(value, _)| near(z, *value))
        .map_or_else(|| format!("{:.3}{:+.3}i", z.re, z.im), |(_, s)| (*s).to_string())
}

impl fmt::Display for GateMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<String>> = self
            .rows()
            .map(|row| row.iter().copied().map(symbol).collect())
            .collect();
        let width = cells
            .iter()
            .flatten()
            .map(|c| c.chars().count())
            .max()
            .unwrap_or(1);
        for (i, row) in cells.iter().enumerate() {
            let body = row
                .iter()
                .map(|c| format!("{c:>width$}"))
                .collect::<Vec<_>>()
                .join(" ");
            if i + 1 < cells.len() {
                writeln!(f, "[ {body} ]")?;
            } else {
                write!(f, "[ {body} ]")?;
            }
        }
        Ok(())
    }
}
