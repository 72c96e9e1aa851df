//! Blochkit Engine
//!
//! The stateful half of Blochkit: a register of one to three qubits, each
//! stored independently as a point on its own Bloch sphere, plus the gate
//! dispatch and animation machinery that moves those points.
//!
//! Because every qubit is stored on its own sphere, multi-qubit gates can
//! not entangle anything. CX, CZ and CCX rotate the target by an angle
//! weighted with the controls' |1⟩ probabilities; CSWAP blends the targets
//! toward each other. SWAP is exact.
//!
//! # Core Components
//!
//! - **State**: [`QubitState`] and the [`Register`] of up to [`MAX_QUBITS`]
//! - **Dispatch**: [`Simulator`] resolves gates, guards them with the
//!   [`BusyLock`] and reports a [`Dispatch`] outcome
//! - **Scheduling**: [`FrameScheduler`] with [`ManualScheduler`] (explicit
//!   ticks) and [`TokioScheduler`] (timer tasks)
//! - **Collaborators**: [`Renderer`] and [`Clipboard`]
//!
//! # Example
//!
//! ```rust
//! use blochkit_engine::{Dispatch, EngineConfig, ManualScheduler, Simulator};
//! use blochkit_ir::Gate;
//! use std::time::Duration;
//!
//! let config = EngineConfig {
//!     animation_ms: 1200,
//!     ..EngineConfig::default()
//! };
//! let scheduler = ManualScheduler::new();
//! let mut sim = Simulator::new(scheduler.clone(), config);
//!
//! assert_eq!(sim.apply(Gate::X).unwrap(), Dispatch::Animating);
//! assert!(sim.is_busy());
//!
//! scheduler.advance(Duration::from_millis(1200));
//! let state = sim.snapshot().unwrap().qubits[0];
//! assert!((state.theta() - std::f64::consts::PI).abs() < 1e-9);
//! assert_eq!(sim.history().unwrap().len(), 1);
//! ```

pub mod busy;
pub mod config;
pub mod dispatch;
pub mod easing;
pub mod error;
pub mod register;
pub mod scheduler;
pub mod simulator;
pub mod state;
pub mod view;

pub use busy::{AnimationLease, BusyLock};
pub use config::EngineConfig;
pub use dispatch::{Dispatch, IgnoreReason};
pub use easing::Easing;
pub use error::{EngineError, EngineResult};
pub use register::{MAX_QUBITS, Register};
pub use scheduler::{
    AnimationHandle, AnimationSpec, CompleteCallback, FrameCallback, FrameScheduler,
    ManualScheduler, TokioScheduler,
};
pub use simulator::Simulator;
pub use state::QubitState;
pub use view::{AnimationProgress, Clipboard, ClipboardError, MemoryClipboard, RegisterView, Renderer};
