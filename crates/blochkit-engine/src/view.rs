//! Read-only projections of the engine state, and the collaborators that
//! consume them.

use serde::Serialize;
use thiserror::Error;

use blochkit_ir::Gate;

use crate::state::QubitState;

/// A point-in-time copy of the register.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterView {
    /// Qubit states in register order.
    pub qubits: Vec<QubitState>,
    /// Index of the selected qubit.
    pub selected: usize,
    /// Whether a gate animation is in flight.
    pub busy: bool,
    /// The animation in flight, if any.
    pub animation: Option<AnimationProgress>,
}

impl RegisterView {
    pub fn selected_state(&self) -> Option<QubitState> {
        self.qubits.get(self.selected).copied()
    }
}

/// Progress of the animation in flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnimationProgress {
    /// Gate being animated.
    pub gate: Gate,
    /// Qubit whose vector is moving.
    pub target: u32,
    /// Eased progress in [0, 1].
    pub progress: f64,
}

/// Presents register snapshots. Never feeds back into the engine.
pub trait Renderer {
    fn render(&mut self, view: &RegisterView);
}

impl<F: FnMut(&RegisterView)> Renderer for F {
    fn render(&mut self, view: &RegisterView) {
        self(view)
    }
}

/// Errors a clipboard collaborator may report.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// No clipboard is reachable.
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    /// Writing the text failed.
    #[error("Clipboard IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Receives generated code.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard that keeps the last written text in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
