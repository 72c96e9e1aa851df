//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - interactive Bloch-sphere qubit simulator",
        style("Blochkit").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  blochkit-geom     Spherical coordinates and rotations");
    println!("  blochkit-ir       Gate catalog, matrices and history records");
    println!("  blochkit-codegen  Qiskit and OpenQASM 3 emitters");
    println!("  blochkit-engine   Qubit register, gate dispatch and animation");
    println!("  blochkit-cli      Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
