//! Gates command implementation.

use console::style;

use blochkit_ir::{Gate, GateAction, Procedure};

use super::common::format_angle;

/// Execute the gates command.
pub fn execute(matrices: bool) {
    println!("{}", style("Gate catalog").bold().cyan());
    println!();
    println!(
        "  {:<7} {:<6} {:<7} {}",
        style("Label").bold(),
        style("Name").bold(),
        style("Qubits").bold(),
        style("Action").bold()
    );
    println!("  {}", "─".repeat(56));

    for &gate in Gate::all() {
        println!(
            "  {:<7} {:<6} {:<7} {}",
            style(gate.label()).green(),
            gate.name(),
            gate.num_qubits(),
            describe_action(gate)
        );
    }

    if matrices {
        for &gate in Gate::all() {
            let matrix = gate.matrix();
            println!();
            println!(
                "{} - {}",
                style(matrix.name()).bold().cyan(),
                style(matrix.description()).dim()
            );
            println!("{matrix}");
        }
    }
}

/// One-line summary of how a gate moves the Bloch vectors.
pub fn describe_action(gate: Gate) -> String {
    match gate.action() {
        GateAction::Rotation { axis, angle } => {
            format!("rotate {} about {axis}", format_angle(angle))
        }
        GateAction::Composite(procedure) => describe_procedure(procedure),
    }
}

fn describe_procedure(procedure: Procedure) -> String {
    match procedure {
        Procedure::ControlledRotation { axis, angle } => format!(
            "rotate target {} about {axis}, weighted by P(|1⟩) of controls",
            format_angle(angle)
        ),
        Procedure::Swap => "exchange the two states".to_string(),
        Procedure::PhasedSwap { axis, angle } => format!(
            "exchange, each rotated {} about {axis}",
            format_angle(angle)
        ),
        Procedure::ControlledSwap => {
            "blend targets toward each other by P(|1⟩) of control".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_rotations() {
        assert_eq!(describe_action(Gate::X), "rotate π about x");
        assert_eq!(describe_action(Gate::Sdg), "rotate -π/2 about z");
        assert_eq!(describe_action(Gate::T), "rotate π/4 about z");
    }

    #[test]
    fn test_describe_composites() {
        assert!(describe_action(Gate::CX).contains("weighted"));
        assert_eq!(describe_action(Gate::Swap), "exchange the two states");
        assert!(describe_action(Gate::ISwap).contains("π/2 about z"));
        assert!(describe_action(Gate::CSwap).starts_with("blend"));
    }
}
