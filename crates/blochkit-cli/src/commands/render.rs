//! Terminal rendering of the register.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use blochkit_engine::{AnimationProgress, RegisterView, Renderer};

/// Prints one line per qubit: angles, |1⟩ probability and Bloch vector.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    json: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print snapshots as JSON instead of text.
    pub fn json() -> Self {
        Self { json: true }
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, view: &RegisterView) {
        if self.json {
            match serde_json::to_string(view) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("{} {e}", style("Warning:").yellow().bold()),
            }
            return;
        }

        for (i, state) in view.qubits.iter().enumerate() {
            let marker = if i == view.selected {
                style("▸").cyan().bold()
            } else {
                style(" ")
            };
            let v = state.to_cartesian();
            println!(
                "  {marker} q[{i}]  {}  P(|1⟩) = {:.3}  {}",
                style(state).green(),
                state.prob_one(),
                style(format!("({:+.3}, {:+.3}, {:+.3})", v.x, v.y, v.z)).dim()
            );
        }
        if let Some(animation) = view.animation {
            println!(
                "    {} {} on q[{}] at {:.0}%",
                style("animating").yellow(),
                animation.gate.label(),
                animation.target,
                animation.progress * 100.0
            );
        }
    }
}

/// Progress bar following a running gate animation.
pub struct AnimationBar {
    bar: ProgressBar,
}

impl AnimationBar {
    pub fn new(label: &str) -> Result<Self> {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{prefix:.cyan.bold} [{bar:30.cyan/blue}] {pos:>3}% {msg}")?
                .progress_chars("=> "),
        );
        bar.set_prefix(label.to_string());
        Ok(Self { bar })
    }

    pub fn update(&self, progress: &AnimationProgress) {
        self.bar.set_position((progress.progress * 100.0).round() as u64);
    }

    pub fn set_message(&self, message: String) {
        self.bar.set_message(message);
    }

    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}
