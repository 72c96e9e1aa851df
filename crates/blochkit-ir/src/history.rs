//! The append-only gate history.

use serde::{Deserialize, Serialize};

use crate::gate::Gate;
use crate::record::{GateRecord, HistoryEntry};

/// Ordered log of applied gates.
///
/// Entries are only ever appended, or all cleared at once on reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a text log, one record per line. Blank lines are skipped.
    pub fn from_text(text: &str) -> Self {
        let entries = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(HistoryEntry::parse)
            .collect();
        Self { entries }
    }

    /// Render the log as text, one record per line.
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Append an entry.
    pub fn push(&mut self, entry: impl Into<HistoryEntry>) {
        self.entries.push(entry.into());
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    /// Iterate over the well-formed gate records only.
    pub fn records(&self) -> impl Iterator<Item = &GateRecord> {
        self.entries.iter().filter_map(HistoryEntry::as_record)
    }

    /// Whether any record applies `gate`.
    pub fn contains_gate(&self, gate: Gate) -> bool {
        self.records().any(|r| r.gate() == gate)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<HistoryEntry> for History {
    fn from_iter<I: IntoIterator<Item = HistoryEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<HistoryEntry> for History {
    fn extend<I: IntoIterator<Item = HistoryEntry>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}
