//! The simulator: shared workspace, gate dispatch and animation control.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use blochkit_codegen::{CodeFormat, serialize};
use blochkit_geom::Axis;
use blochkit_ir::{Gate, GateRecord, History};

use crate::busy::{AnimationLease, BusyLock};
use crate::config::EngineConfig;
use crate::dispatch::{Dispatch, GatePlan, IgnoreReason, check_arity, plan};
use crate::error::{EngineError, EngineResult};
use crate::register::Register;
use crate::scheduler::{AnimationHandle, FrameScheduler, ManualScheduler};
use crate::state::QubitState;
use crate::view::{AnimationProgress, Clipboard, RegisterView, Renderer};

/// Mutable state shared with running animations.
#[derive(Debug, Default)]
struct Workspace {
    register: Register,
    history: History,
    last_applied: Option<Gate>,
    lease: Option<AnimationLease>,
    animation: Option<AnimationProgress>,
}

impl Workspace {
    /// Whether the animation of `generation` still owns the register.
    fn owns(&self, generation: u64) -> bool {
        self.lease
            .as_ref()
            .is_some_and(|lease| lease.generation() == generation && lease.is_current())
    }
}

fn lock_workspace(shared: &Mutex<Workspace>) -> MutexGuard<'_, Workspace> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Interactive Bloch-sphere simulator over 1 to 3 qubits.
///
/// All gate dispatch goes through the busy lock: while one gate animates,
/// every other gate, angle edit, add and remove is ignored. Animated gates
/// append their history record when the last frame lands; instantaneous
/// gates (SWAP, iSWAP, CSWAP) append it at once.
pub struct Simulator<S: FrameScheduler = ManualScheduler> {
    shared: Arc<Mutex<Workspace>>,
    busy: BusyLock,
    scheduler: S,
    config: EngineConfig,
    active: Option<AnimationHandle>,
}

impl<S: FrameScheduler> Simulator<S> {
    /// Create a simulator with one qubit in |0⟩.
    pub fn new(scheduler: S, config: EngineConfig) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Workspace::default())),
            busy: BusyLock::new(),
            scheduler,
            config,
            active: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    fn workspace(&self) -> EngineResult<MutexGuard<'_, Workspace>> {
        self.shared
            .lock()
            .map_err(|e| EngineError::Poisoned(e.to_string()))
    }

    /// Whether a gate animation is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    // -----------------------------------------------------------------
    // Register editing
    // -----------------------------------------------------------------

    /// Select the qubit that single-qubit gates and angle edits act on.
    pub fn select(&mut self, index: usize) -> EngineResult<Dispatch> {
        let mut ws = self.workspace()?;
        if ws.register.select(index) {
            return Ok(Dispatch::Applied);
        }
        Ok(Dispatch::Ignored(IgnoreReason::OutOfRange {
            qubit: u32::try_from(index).unwrap_or(u32::MAX),
            len: ws.register.len(),
        }))
    }

    /// Set θ (radians) of the selected qubit.
    pub fn set_theta(&mut self, theta: f64) -> EngineResult<Dispatch> {
        self.edit_selected(|state| (theta, state.phi()))
    }

    /// Set φ (radians) of the selected qubit.
    pub fn set_phi(&mut self, phi: f64) -> EngineResult<Dispatch> {
        self.edit_selected(|state| (state.theta(), phi))
    }

    /// Set both angles (radians) of the selected qubit.
    pub fn set_angles(&mut self, theta: f64, phi: f64) -> EngineResult<Dispatch> {
        self.edit_selected(|_| (theta, phi))
    }

    /// Set both angles of the selected qubit, in degrees.
    pub fn set_angles_degrees(&mut self, theta: f64, phi: f64) -> EngineResult<Dispatch> {
        self.set_angles(theta.to_radians(), phi.to_radians())
    }

    fn edit_selected(
        &mut self,
        angles: impl FnOnce(QubitState) -> (f64, f64),
    ) -> EngineResult<Dispatch> {
        if self.busy.is_busy() {
            return Ok(Dispatch::Ignored(IgnoreReason::Busy));
        }
        let mut ws = self.workspace()?;
        let selected = ws.register.selected();
        let (theta, phi) = angles(ws.register.selected_state());
        let state = QubitState::with_epsilon(theta, phi, self.config.pole_epsilon);
        ws.register.set(selected, state);
        debug!(qubit = selected, %state, "angles set");
        Ok(Dispatch::Applied)
    }

    /// Append a qubit in |0⟩.
    pub fn add_qubit(&mut self) -> EngineResult<Dispatch> {
        if self.busy.is_busy() {
            return Ok(Dispatch::Ignored(IgnoreReason::Busy));
        }
        let mut ws = self.workspace()?;
        if !ws.register.push(self.config.max_qubits) {
            return Ok(Dispatch::Ignored(IgnoreReason::AtCapacity(
                ws.register.len(),
            )));
        }
        debug!(qubits = ws.register.len(), "qubit added");
        Ok(Dispatch::Applied)
    }

    /// Remove the selected qubit. The last remaining qubit stays.
    pub fn remove_selected(&mut self) -> EngineResult<Dispatch> {
        if self.busy.is_busy() {
            return Ok(Dispatch::Ignored(IgnoreReason::Busy));
        }
        let mut ws = self.workspace()?;
        if !ws.register.remove_selected() {
            return Ok(Dispatch::Ignored(IgnoreReason::LastQubit));
        }
        debug!(qubits = ws.register.len(), "qubit removed");
        Ok(Dispatch::Applied)
    }

    /// Back to one qubit in |0⟩ with an empty history.
    ///
    /// Stops any animation in flight and clears the busy lock.
    pub fn reset(&mut self) -> EngineResult<()> {
        if let Some(handle) = self.active.take() {
            handle.cancel();
        }
        let mut ws = self.workspace()?;
        ws.lease = None;
        self.busy.force_release();
        *ws = Workspace::default();
        info!("workspace reset");
        Ok(())
    }

    // -----------------------------------------------------------------
    // Gates
    // -----------------------------------------------------------------

    /// Apply `gate` to its default operands.
    ///
    /// Single-qubit gates act on the selected qubit. Multi-qubit gates use
    /// [`Gate::default_operands`].
    pub fn apply(&mut self, gate: Gate) -> EngineResult<Dispatch> {
        let operands = if gate.num_qubits() == 1 {
            let selected = self.workspace()?.register.selected();
            vec![u32::try_from(selected).unwrap_or(0)]
        } else {
            gate.default_operands().to_vec()
        };
        self.dispatch(gate, operands)
    }

    /// Apply `gate` to explicit operands, controls first.
    pub fn apply_with(&mut self, gate: Gate, operands: &[u32]) -> EngineResult<Dispatch> {
        self.dispatch(gate, operands.to_vec())
    }

    fn dispatch(&mut self, gate: Gate, operands: Vec<u32>) -> EngineResult<Dispatch> {
        if self.busy.is_busy() {
            debug!(%gate, "gate ignored: busy");
            return Ok(Dispatch::Ignored(IgnoreReason::Busy));
        }

        let mut ws = self.workspace()?;
        let len = ws.register.len();
        if let Err(reason) = check_arity(gate, len) {
            debug!(%gate, %reason, "gate ignored");
            return Ok(Dispatch::Ignored(reason));
        }
        if let Some(&qubit) = operands.iter().find(|&&q| q as usize >= len) {
            return Ok(Dispatch::Ignored(IgnoreReason::OutOfRange { qubit, len }));
        }
        let record = match GateRecord::new(gate, operands) {
            Ok(record) => record,
            Err(e) => return Ok(Dispatch::Ignored(IgnoreReason::InvalidOperands(e.to_string()))),
        };

        ws.last_applied = Some(gate);
        match plan(&record, &ws.register, self.config.pole_epsilon) {
            GatePlan::Instant(updates) => {
                let Some(_lease) = self.busy.try_acquire() else {
                    return Ok(Dispatch::Ignored(IgnoreReason::Busy));
                };
                for (index, state) in updates {
                    ws.register.set(index, state);
                }
                debug!(%record, "gate applied");
                ws.history.push(record);
                Ok(Dispatch::Applied)
            }
            GatePlan::Rotate {
                target,
                axis,
                angle,
            } => {
                drop(ws);
                self.animate(record, target, axis, angle)
            }
        }
    }

    fn animate(
        &mut self,
        record: GateRecord,
        target: usize,
        axis: Axis,
        angle: f64,
    ) -> EngineResult<Dispatch> {
        let Some(lease) = self.busy.try_acquire() else {
            return Ok(Dispatch::Ignored(IgnoreReason::Busy));
        };
        let generation = lease.generation();

        let snapshot = {
            let mut ws = self.workspace()?;
            let snapshot = ws.register.get(target).unwrap_or_default().to_cartesian();
            ws.lease = Some(lease);
            ws.animation = Some(AnimationProgress {
                gate: record.gate(),
                target: u32::try_from(target).unwrap_or(0),
                progress: 0.0,
            });
            snapshot
        };
        debug!(%record, angle, "starting animation");

        let epsilon = self.config.pole_epsilon;
        let frames = Arc::clone(&self.shared);
        let on_frame = Box::new(move |progress: f64| {
            let mut ws = lock_workspace(&frames);
            if !ws.owns(generation) {
                return;
            }
            let v = axis.rotate(snapshot, angle * progress);
            ws.register
                .set(target, QubitState::from_cartesian_with_epsilon(v, epsilon));
            if let Some(animation) = ws.animation.as_mut() {
                animation.progress = progress;
            }
        });

        let done = Arc::clone(&self.shared);
        let on_complete = Box::new(move || {
            let mut ws = lock_workspace(&done);
            if !ws.owns(generation) {
                return;
            }
            debug!(%record, "animation complete");
            // Log before releasing the lease so no later gate can log first.
            ws.history.push(record);
            ws.animation = None;
            ws.lease = None;
        });

        match self
            .scheduler
            .start(self.config.animation_spec(), on_frame, on_complete)
        {
            Ok(handle) => {
                self.active = Some(handle);
                Ok(Dispatch::Animating)
            }
            Err(e) => {
                let mut ws = self.workspace()?;
                ws.lease = None;
                ws.animation = None;
                Err(e)
            }
        }
    }

    /// Stop the animation in flight where it is. Its gate is not logged.
    ///
    /// Returns whether an animation was running.
    pub fn cancel_animation(&mut self) -> EngineResult<bool> {
        if let Some(handle) = self.active.take() {
            handle.cancel();
        }
        let mut ws = self.workspace()?;
        ws.animation = None;
        let was_running = ws.lease.take().is_some();
        if was_running {
            debug!("animation cancelled");
        }
        Ok(was_running)
    }

    // -----------------------------------------------------------------
    // Read side
    // -----------------------------------------------------------------

    /// Copy the register for rendering.
    pub fn snapshot(&self) -> EngineResult<RegisterView> {
        let ws = self.workspace()?;
        Ok(RegisterView {
            qubits: ws.register.states().to_vec(),
            selected: ws.register.selected(),
            busy: self.busy.is_busy(),
            animation: ws.animation,
        })
    }

    /// Copy of the gate history.
    pub fn history(&self) -> EngineResult<History> {
        Ok(self.workspace()?.history.clone())
    }

    /// The most recently dispatched gate, if any since the last reset.
    pub fn last_applied(&self) -> EngineResult<Option<Gate>> {
        Ok(self.workspace()?.last_applied)
    }

    /// Circuit code reproducing the history.
    pub fn code(&self, format: CodeFormat) -> EngineResult<String> {
        let ws = self.workspace()?;
        Ok(serialize(format, &ws.history, ws.register.len()))
    }

    /// Hand the circuit code to a clipboard. Clipboard failures are logged
    /// and otherwise ignored.
    pub fn copy_code(&self, format: CodeFormat, clipboard: &mut dyn Clipboard) -> EngineResult<()> {
        let code = self.code(format)?;
        if let Err(e) = clipboard.write_text(&code) {
            debug!(error = %e, "clipboard write failed");
        }
        Ok(())
    }

    /// Push a snapshot to a renderer.
    pub fn render(&self, renderer: &mut dyn Renderer) -> EngineResult<()> {
        let view = self.snapshot()?;
        renderer.render(&view);
        Ok(())
    }
}

impl Default for Simulator<ManualScheduler> {
    fn default() -> Self {
        Self::new(ManualScheduler::new(), EngineConfig::default())
    }
}

impl<S: FrameScheduler> std::fmt::Debug for Simulator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("busy", &self.busy.is_busy())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
