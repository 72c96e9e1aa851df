//! Code command implementation.

use std::fs;

use anyhow::{Context, Result};
use console::style;
use tracing::info;

use blochkit_codegen::serialize;
use blochkit_engine::MAX_QUBITS;
use blochkit_ir::{History, HistoryEntry};

use super::common::{parse_format, read_text};

/// Execute the code command.
pub fn execute(history_path: &str, qubits: usize, format: &str, output: Option<&str>) -> Result<()> {
    let format = parse_format(format)?;
    if !(1..=MAX_QUBITS).contains(&qubits) {
        anyhow::bail!("Qubit count must be between 1 and {MAX_QUBITS}, got {qubits}");
    }

    let history = History::from_text(&read_text(history_path)?);
    let unrecognized = history
        .iter()
        .filter(|entry| matches!(entry, HistoryEntry::Unrecognized(_)))
        .count();
    if unrecognized > 0 {
        eprintln!(
            "{} {} unrecognized line(s) kept as comments",
            style("Warning:").yellow().bold(),
            unrecognized
        );
    }

    let widest = history
        .records()
        .flat_map(|record| record.qubits().iter().copied())
        .max()
        .map_or(0, |q| q as usize + 1);
    if widest > qubits {
        eprintln!(
            "{} history addresses q[{}] but only {} qubit(s) are declared",
            style("Warning:").yellow().bold(),
            widest - 1,
            qubits
        );
    }

    let code = serialize(format, &history, qubits);
    info!(%format, records = history.len(), "generated code");

    match output {
        Some(path) => {
            fs::write(path, &code).with_context(|| format!("Failed to write output: {path}"))?;
            println!(
                "{} Wrote {} code to {}",
                style("✓").green().bold(),
                format,
                path
            );
        }
        None => println!("{code}"),
    }
    Ok(())
}
