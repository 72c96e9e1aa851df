//! The qubit register: 1 to 3 Bloch states plus a selection cursor.

use serde::{Deserialize, Serialize};

use crate::state::QubitState;

/// Upper bound on the number of qubits the engine will hold.
pub const MAX_QUBITS: usize = 3;

/// Ordered qubit states with a selected index.
///
/// The register is never empty and `selected` always points at an existing
/// qubit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Register {
    qubits: Vec<QubitState>,
    selected: usize,
}

impl Register {
    /// One qubit in |0⟩.
    pub fn new() -> Self {
        Self {
            qubits: vec![QubitState::ZERO],
            selected: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.qubits.len()
    }

    /// Always false; kept for the `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.qubits.is_empty()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Move the cursor. Returns false if `index` is out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.qubits.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    pub fn get(&self, index: usize) -> Option<QubitState> {
        self.qubits.get(index).copied()
    }

    pub fn selected_state(&self) -> QubitState {
        self.qubits[self.selected]
    }

    /// Overwrite one qubit. Returns false if `index` is out of range.
    pub fn set(&mut self, index: usize, state: QubitState) -> bool {
        match self.qubits.get_mut(index) {
            Some(slot) => {
                *slot = state;
                true
            }
            None => false,
        }
    }

    pub fn states(&self) -> &[QubitState] {
        &self.qubits
    }

    /// Append a |0⟩ qubit if the register has room below `limit`.
    pub fn push(&mut self, limit: usize) -> bool {
        if self.qubits.len() >= limit.min(MAX_QUBITS) {
            return false;
        }
        self.qubits.push(QubitState::ZERO);
        true
    }

    /// Remove the selected qubit, keeping the cursor in range.
    ///
    /// Refuses to remove the last remaining qubit.
    pub fn remove_selected(&mut self) -> bool {
        if self.qubits.len() <= 1 {
            return false;
        }
        self.qubits.remove(self.selected);
        self.selected = self.selected.min(self.qubits.len() - 1);
        true
    }

    /// Exchange two qubits' states verbatim.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.qubits.swap(a, b);
    }
}

impl Default for Register {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_respects_limit() {
        let mut reg = Register::new();
        assert!(reg.push(3));
        assert!(reg.push(3));
        assert!(!reg.push(3));
        assert_eq!(reg.len(), 3);

        let mut reg = Register::new();
        assert!(!reg.push(1));
        // A limit above the hard cap is capped.
        let mut reg = Register::new();
        assert!(reg.push(10) && reg.push(10));
        assert!(!reg.push(10));
    }

    #[test]
    fn test_remove_keeps_cursor_in_range() {
        let mut reg = Register::new();
        reg.push(3);
        reg.push(3);
        reg.set(1, QubitState::ONE);
        reg.select(2);
        assert!(reg.remove_selected());
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.selected(), 1);
        assert_eq!(reg.selected_state(), QubitState::ONE);
    }

    #[test]
    fn test_last_qubit_stays() {
        let mut reg = Register::new();
        assert!(!reg.remove_selected());
        assert_eq!(reg.states(), &[QubitState::ZERO]);
    }

    #[test]
    fn test_select_out_of_range() {
        let mut reg = Register::new();
        assert!(!reg.select(1));
        assert_eq!(reg.selected(), 0);
    }
}
