//! Property-based tests for history record parsing.
//!
//! The serializer relies on parsing being total: any line either becomes a
//! gate record or is kept verbatim.

use blochkit_ir::{Gate, GateRecord, History, HistoryEntry};
use proptest::prelude::*;

/// A valid record on three qubits with distinct operands.
fn arb_record() -> impl Strategy<Value = GateRecord> {
    (0..Gate::all().len(), Just(vec![0_u32, 1, 2]).prop_shuffle()).prop_map(|(i, order)| {
        let gate = Gate::all()[i];
        GateRecord::new(gate, order[..gate.num_qubits()].to_vec()).unwrap()
    })
}

proptest! {
    #[test]
    fn parsing_never_panics(line in ".{0,40}") {
        match HistoryEntry::parse(&line) {
            HistoryEntry::Gate(record) => {
                prop_assert_eq!(record.qubits().len(), record.gate().num_qubits());
            }
            HistoryEntry::Unrecognized(text) => prop_assert_eq!(text, line),
        }
    }

    #[test]
    fn rendered_records_are_recognized(record in arb_record()) {
        let entry = HistoryEntry::parse(&record.to_string());
        prop_assert_eq!(entry, HistoryEntry::Gate(record));
    }

    #[test]
    fn text_log_preserves_order(records in prop::collection::vec(arb_record(), 0..12)) {
        let history: History = records.iter().cloned().map(HistoryEntry::from).collect();
        let reread = History::from_text(&history.to_text());
        prop_assert_eq!(reread, history);
    }
}

#[test]
fn uppercase_register_is_accepted() {
    let entry = HistoryEntry::parse("CX Q[0],Q[1]");
    let record = entry.as_record().unwrap();
    assert_eq!(record.gate(), Gate::CX);
    assert_eq!(record.qubits(), &[0, 1]);
}

#[test]
fn extra_whitespace_is_tolerated() {
    let entry = HistoryEntry::parse("ccx   q[ 0 ] , q[1]->q[2]");
    assert_eq!(entry.as_record().map(GateRecord::gate), Some(Gate::CCX));
}
