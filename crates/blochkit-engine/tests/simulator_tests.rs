//! Integration tests for gate dispatch, animation and history.

use std::f64::consts::{FRAC_PI_2, PI};
use std::time::Duration;

use blochkit_codegen::CodeFormat;
use blochkit_engine::{
    Clipboard, ClipboardError, Dispatch, EngineConfig, IgnoreReason, ManualScheduler,
    MemoryClipboard, QubitState, RegisterView, Simulator, TokioScheduler,
};
use blochkit_ir::{Gate, HistoryEntry};

const TOL: f64 = 1e-9;

fn config() -> EngineConfig {
    EngineConfig {
        animation_ms: 1200,
        frame_ms: 16,
        ..EngineConfig::default()
    }
}

fn manual() -> (Simulator<ManualScheduler>, ManualScheduler) {
    let scheduler = ManualScheduler::new();
    (Simulator::new(scheduler.clone(), config()), scheduler)
}

fn with_qubits(sim: &mut Simulator<ManualScheduler>, n: usize) {
    for _ in 1..n {
        assert_eq!(sim.add_qubit().unwrap(), Dispatch::Applied);
    }
}

fn qubit(sim: &Simulator<ManualScheduler>, i: usize) -> QubitState {
    sim.snapshot().unwrap().qubits[i]
}

/// Apply a gate and let its animation finish.
fn run(sim: &mut Simulator<ManualScheduler>, sched: &ManualScheduler, gate: Gate) -> Dispatch {
    let outcome = sim.apply(gate).unwrap();
    sched.run_until_idle();
    outcome
}

// ---------------------------------------------------------------------------
// Single-qubit gates
// ---------------------------------------------------------------------------

#[test]
fn x_twice_restores_state() {
    let (mut sim, sched) = manual();
    sim.set_angles(1.1, 2.3).unwrap();
    let before = qubit(&sim, 0);

    assert_eq!(run(&mut sim, &sched, Gate::X), Dispatch::Animating);
    assert!(!qubit(&sim, 0).approx_eq(&before, 1e-3));
    assert_eq!(run(&mut sim, &sched, Gate::X), Dispatch::Animating);

    let after = qubit(&sim, 0);
    assert!((after.theta() - before.theta()).abs() < TOL);
    assert!((after.phi() - before.phi()).abs() < TOL);
    assert_eq!(sim.history().unwrap().len(), 2);
}

#[test]
fn hadamard_maps_zero_to_plus() {
    let (mut sim, sched) = manual();
    run(&mut sim, &sched, Gate::H);
    let state = qubit(&sim, 0);
    assert!((state.theta() - FRAC_PI_2).abs() < TOL);
    assert!(state.phi().abs() < TOL);
}

#[test]
fn single_qubit_gate_targets_selection() {
    let (mut sim, sched) = manual();
    with_qubits(&mut sim, 2);
    sim.select(1).unwrap();
    run(&mut sim, &sched, Gate::Y);

    assert!(qubit(&sim, 0).approx_eq(&QubitState::ZERO, TOL));
    assert!(qubit(&sim, 1).approx_eq(&QubitState::ONE, TOL));
    let history = sim.history().unwrap();
    assert_eq!(history.to_text(), "y q[1]");
}

#[test]
fn intermediate_frames_stay_normalized() {
    let (mut sim, sched) = manual();
    sim.apply(Gate::X).unwrap();

    for _ in 0..20 {
        sched.step();
        let view = sim.snapshot().unwrap();
        let state = view.qubits[0];
        assert!((state.to_cartesian().norm() - 1.0).abs() < TOL);
        if state.is_pole() {
            assert_eq!(state.phi(), 0.0);
        }
    }
    let progress = sim.snapshot().unwrap().animation.unwrap().progress;
    assert!(progress > 0.0 && progress < 1.0);
}

// ---------------------------------------------------------------------------
// Multi-qubit gates
// ---------------------------------------------------------------------------

#[test]
fn cnot_with_control_zero_leaves_target() {
    let (mut sim, sched) = manual();
    with_qubits(&mut sim, 2);
    sim.select(1).unwrap();
    sim.set_angles(1.0, 0.5).unwrap();
    let target = qubit(&sim, 1);

    run(&mut sim, &sched, Gate::CX);
    assert!(qubit(&sim, 1).approx_eq(&target, TOL));
    // A zero-angle animation is still a gate and still logged.
    assert_eq!(sim.history().unwrap().to_text(), "cx q[0],q[1]");
}

#[test]
fn cnot_with_control_one_flips_target() {
    let (mut sim, sched) = manual();
    with_qubits(&mut sim, 2);
    sim.set_angles(PI, 0.0).unwrap();

    run(&mut sim, &sched, Gate::CX);
    assert!(qubit(&sim, 0).approx_eq(&QubitState::ONE, TOL));
    assert!(qubit(&sim, 1).approx_eq(&QubitState::ONE, TOL));
}

#[test]
fn control_probability_is_captured_at_dispatch() {
    let (mut sim, sched) = manual();
    with_qubits(&mut sim, 2);
    sim.set_angles(PI, 0.0).unwrap();

    sim.apply(Gate::CX).unwrap();
    // Edits are refused mid-animation, so the control cannot move.
    assert_eq!(
        sim.set_theta(0.0).unwrap(),
        Dispatch::Ignored(IgnoreReason::Busy)
    );
    sched.run_until_idle();
    assert!(qubit(&sim, 1).approx_eq(&QubitState::ONE, TOL));
}

#[test]
fn swap_twice_restores_exactly() {
    let (mut sim, _sched) = manual();
    with_qubits(&mut sim, 2);
    sim.set_angles(0.7, 1.9).unwrap();
    let before = sim.snapshot().unwrap().qubits;

    assert_eq!(sim.apply(Gate::Swap).unwrap(), Dispatch::Applied);
    let swapped = sim.snapshot().unwrap().qubits;
    assert_eq!(swapped, vec![before[1], before[0]]);

    sim.apply(Gate::Swap).unwrap();
    assert_eq!(sim.snapshot().unwrap().qubits, before);
}

#[test]
fn instant_gates_do_not_take_the_lock() {
    let (mut sim, _sched) = manual();
    with_qubits(&mut sim, 3);
    assert_eq!(sim.apply(Gate::ISwap).unwrap(), Dispatch::Applied);
    assert_eq!(sim.apply(Gate::CSwap).unwrap(), Dispatch::Applied);
    assert!(!sim.is_busy());
    assert_eq!(
        sim.history().unwrap().to_text(),
        "iswap q[0],q[1]\ncswap q[0] ? swap q[1],q[2]"
    );
}

#[test]
fn three_qubit_gate_on_two_qubits_is_ignored() {
    let (mut sim, sched) = manual();
    with_qubits(&mut sim, 2);
    sim.set_angles(PI, 0.0).unwrap();
    let before = sim.snapshot().unwrap();

    for gate in [Gate::CCX, Gate::CSwap] {
        let outcome = sim.apply(gate).unwrap();
        assert!(matches!(
            outcome,
            Dispatch::Ignored(IgnoreReason::NotEnoughQubits { required: 3, available: 2, .. })
        ));
    }
    sched.run_until_idle();
    assert_eq!(sim.snapshot().unwrap(), before);
    assert!(sim.history().unwrap().is_empty());
    assert_eq!(sim.last_applied().unwrap(), None);
}

#[test]
fn explicit_operands_are_validated() {
    let (mut sim, _sched) = manual();
    with_qubits(&mut sim, 2);
    assert_eq!(
        sim.apply_with(Gate::Swap, &[0, 2]).unwrap(),
        Dispatch::Ignored(IgnoreReason::OutOfRange { qubit: 2, len: 2 })
    );
    assert!(matches!(
        sim.apply_with(Gate::Swap, &[1, 1]).unwrap(),
        Dispatch::Ignored(IgnoreReason::InvalidOperands(_))
    ));
    assert!(matches!(
        sim.apply_with(Gate::Swap, &[1]).unwrap(),
        Dispatch::Ignored(IgnoreReason::InvalidOperands(_))
    ));
    assert_eq!(sim.apply_with(Gate::Swap, &[1, 0]).unwrap(), Dispatch::Applied);
    assert_eq!(sim.history().unwrap().to_text(), "swap q[1],q[0]");
}

// ---------------------------------------------------------------------------
// Busy lock and ordering
// ---------------------------------------------------------------------------

#[test]
fn one_gate_at_a_time() {
    let (mut sim, sched) = manual();
    with_qubits(&mut sim, 2);
    assert_eq!(sim.apply(Gate::H).unwrap(), Dispatch::Animating);

    for gate in [Gate::X, Gate::Swap, Gate::CX] {
        assert_eq!(sim.apply(gate).unwrap(), Dispatch::Ignored(IgnoreReason::Busy));
    }
    assert_eq!(sim.add_qubit().unwrap(), Dispatch::Ignored(IgnoreReason::Busy));
    assert_eq!(sim.remove_selected().unwrap(), Dispatch::Ignored(IgnoreReason::Busy));

    sched.run_until_idle();
    assert!(!sim.is_busy());
    assert_eq!(sim.apply(Gate::Z).unwrap(), Dispatch::Animating);
    sched.run_until_idle();

    let records: Vec<Gate> = sim.history().unwrap().records().map(|r| r.gate()).collect();
    assert_eq!(records, vec![Gate::H, Gate::Z]);
}

#[test]
fn history_is_appended_on_completion() {
    let (mut sim, sched) = manual();
    sim.apply(Gate::S).unwrap();
    sched.advance(Duration::from_millis(600));
    assert!(sim.history().unwrap().is_empty());
    sched.advance(Duration::from_millis(600));
    assert_eq!(
        sim.history().unwrap().last(),
        Some(&HistoryEntry::parse("s q[0]"))
    );
    assert_eq!(sim.last_applied().unwrap(), Some(Gate::S));
}

#[test]
fn cancel_stops_in_place() {
    let (mut sim, sched) = manual();
    sim.apply(Gate::X).unwrap();
    sched.advance(Duration::from_millis(600));
    let midway = qubit(&sim, 0);
    assert!(midway.theta() > 0.1 && midway.theta() < PI - 0.1);

    assert!(sim.cancel_animation().unwrap());
    assert!(!sim.is_busy());
    sched.run_until_idle();

    assert_eq!(qubit(&sim, 0), midway);
    assert!(sim.history().unwrap().is_empty());
    assert!(!sim.cancel_animation().unwrap());
}

#[test]
fn reset_during_animation() {
    let (mut sim, sched) = manual();
    with_qubits(&mut sim, 3);
    sim.apply(Gate::Swap).unwrap();
    sim.apply(Gate::T).unwrap();
    sched.step();

    sim.reset().unwrap();
    sched.run_until_idle();

    let view = sim.snapshot().unwrap();
    assert_eq!(view.qubits, vec![QubitState::ZERO]);
    assert_eq!(view.selected, 0);
    assert!(!view.busy);
    assert!(view.animation.is_none());
    assert!(sim.history().unwrap().is_empty());
    assert_eq!(sim.last_applied().unwrap(), None);
    assert_eq!(sim.apply(Gate::X).unwrap(), Dispatch::Animating);
}

// ---------------------------------------------------------------------------
// Register editing
// ---------------------------------------------------------------------------

#[test]
fn removing_the_only_qubit_keeps_default() {
    let (mut sim, _sched) = manual();
    assert_eq!(
        sim.remove_selected().unwrap(),
        Dispatch::Ignored(IgnoreReason::LastQubit)
    );
    assert_eq!(sim.snapshot().unwrap().qubits, vec![QubitState::ZERO]);
}

#[test]
fn add_is_capped() {
    let mut config = config();
    config.max_qubits = 2;
    let mut sim = Simulator::new(ManualScheduler::new(), config);
    assert_eq!(sim.add_qubit().unwrap(), Dispatch::Applied);
    assert_eq!(sim.add_qubit().unwrap(), Dispatch::Ignored(IgnoreReason::AtCapacity(2)));
}

#[test]
fn remove_clamps_selection() {
    let (mut sim, _sched) = manual();
    with_qubits(&mut sim, 3);
    sim.select(2).unwrap();
    sim.remove_selected().unwrap();
    let view = sim.snapshot().unwrap();
    assert_eq!(view.qubits.len(), 2);
    assert_eq!(view.selected, 1);
    assert!(sim.select(5).unwrap().is_ignored());
}

#[test]
fn degree_edits_apply_pole_rule() {
    let (mut sim, _sched) = manual();
    sim.set_angles_degrees(180.0, 90.0).unwrap();
    let state = qubit(&sim, 0);
    assert!((state.theta() - PI).abs() < 1e-12);
    assert_eq!(state.phi(), 0.0);

    sim.set_angles_degrees(45.0, 370.0).unwrap();
    assert!((qubit(&sim, 0).phi_degrees() - 10.0).abs() < 1e-9);
}

// ---------------------------------------------------------------------------
// Code and collaborators
// ---------------------------------------------------------------------------

struct BrokenClipboard;

impl Clipboard for BrokenClipboard {
    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable("no display".into()))
    }
}

#[test]
fn code_reflects_history_and_width() {
    let (mut sim, sched) = manual();
    assert!(sim.code(CodeFormat::Qiskit).unwrap().contains("# (no gates applied yet)"));

    with_qubits(&mut sim, 2);
    run(&mut sim, &sched, Gate::H);
    run(&mut sim, &sched, Gate::CX);
    let code = sim.code(CodeFormat::Qiskit).unwrap();
    assert!(code.contains("qc = QuantumCircuit(2)"));
    assert!(code.contains("qc.h(0)\nqc.cx(0, 1)"));
}

#[test]
fn copy_code_swallows_clipboard_failure() {
    let (mut sim, sched) = manual();
    run(&mut sim, &sched, Gate::X);

    let mut clipboard = MemoryClipboard::new();
    sim.copy_code(CodeFormat::Qasm3, &mut clipboard).unwrap();
    assert!(clipboard.contents().unwrap().contains("x q[0];"));

    assert!(sim.copy_code(CodeFormat::Qiskit, &mut BrokenClipboard).is_ok());
}

#[test]
fn render_receives_snapshot() {
    let (mut sim, _sched) = manual();
    sim.add_qubit().unwrap();
    let mut seen: Vec<RegisterView> = Vec::new();
    sim.render(&mut |view: &RegisterView| seen.push(view.clone()))
        .unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].qubits.len(), 2);
}

// ---------------------------------------------------------------------------
// Timer-driven scheduling
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn tokio_scheduler_animates_and_logs() {
    let mut sim = Simulator::new(TokioScheduler::new(), config());
    assert_eq!(sim.apply(Gate::X).unwrap(), Dispatch::Animating);

    tokio::time::sleep(Duration::from_millis(600)).await;
    let midway = sim.snapshot().unwrap();
    assert!(midway.busy);
    assert!(midway.qubits[0].theta() > 0.0 && midway.qubits[0].theta() < PI);

    tokio::time::sleep(Duration::from_millis(700)).await;
    let done = sim.snapshot().unwrap();
    assert!(!done.busy);
    assert!(done.qubits[0].approx_eq(&QubitState::ONE, TOL));
    assert_eq!(sim.history().unwrap().to_text(), "x q[0]");
}

#[tokio::test(start_paused = true)]
async fn tokio_cancel_leaves_state_in_place() {
    let mut sim = Simulator::new(TokioScheduler::new(), config());
    sim.apply(Gate::H).unwrap();
    tokio::time::sleep(Duration::from_millis(400)).await;

    assert!(sim.cancel_animation().unwrap());
    let stopped = sim.snapshot().unwrap().qubits[0];
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert_eq!(sim.snapshot().unwrap().qubits[0], stopped);
    assert!(sim.history().unwrap().is_empty());
    assert!(!sim.is_busy());
}
