//! Run command implementation.

use std::io::Read;
use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use tracing::{debug, info};

use blochkit_codegen::CodeFormat;
use blochkit_engine::{
    Clipboard, Dispatch, EngineConfig, FrameScheduler, ManualScheduler, Simulator, TokioScheduler,
};

use super::clipboard::{FileClipboard, NoClipboard};
use super::common::{parse_format, read_text};
use super::render::{AnimationBar, TerminalRenderer};
use super::script::{Command, parse_line};

/// Options of the run command.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions<'a> {
    /// Complete animations at once.
    pub instant: bool,
    /// Let each animation finish before reading the next command.
    pub wait: bool,
    pub format: &'a str,
    pub copy_to: Option<&'a str>,
}

/// Execute the run command.
pub async fn execute(config: EngineConfig, script: Option<&str>, options: RunOptions<'_>) -> Result<()> {
    let format = parse_format(options.format)?;
    config.validate().context("Invalid engine configuration")?;

    let source = match script {
        Some(path) => {
            println!("{} Running script: {}", style("→").cyan().bold(), path);
            read_text(path)?
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read commands from stdin")?;
            buffer
        }
    };

    if options.instant {
        let scheduler = ManualScheduler::new();
        let clock = Clock::Manual(scheduler.clone());
        let session = Session::new(Simulator::new(scheduler, config), clock, format, options.copy_to);
        session.run(&source, options).await
    } else {
        let frame = Duration::from_millis(config.frame_ms);
        let session = Session::new(
            Simulator::new(TokioScheduler::new(), config),
            Clock::Timer { frame },
            format,
            options.copy_to,
        );
        session.run(&source, options).await
    }
}

/// How the session lets animations make progress.
enum Clock {
    /// Drive the manual scheduler to completion.
    Manual(ManualScheduler),
    /// Timer tasks run on their own; poll at the frame rate.
    Timer { frame: Duration },
}

struct Session<S: FrameScheduler> {
    sim: Simulator<S>,
    clock: Clock,
    format: CodeFormat,
    clipboard: Box<dyn Clipboard>,
    copy_to: Option<String>,
    ignored: usize,
}

impl<S: FrameScheduler> Session<S> {
    fn new(sim: Simulator<S>, clock: Clock, format: CodeFormat, copy_to: Option<&str>) -> Self {
        let clipboard: Box<dyn Clipboard> = match copy_to {
            Some(path) => Box::new(FileClipboard::new(path)),
            None => Box::new(NoClipboard),
        };
        Self {
            sim,
            clock,
            format,
            clipboard,
            copy_to: copy_to.map(str::to_string),
            ignored: 0,
        }
    }

    async fn run(mut self, source: &str, options: RunOptions<'_>) -> Result<()> {
        let mut errors = 0usize;
        for (number, line) in source.lines().enumerate() {
            let command = match parse_line(line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    errors += 1;
                    eprintln!(
                        "{} line {}: {:#}",
                        style("Warning:").yellow().bold(),
                        number + 1,
                        e
                    );
                    continue;
                }
            };
            debug!(line = number + 1, ?command, "executing");
            self.execute(command).await?;
            if options.wait {
                self.settle().await?;
            } else if let Clock::Manual(scheduler) = &self.clock {
                // Without waiting, instant mode still advances one frame per command.
                scheduler.step();
            }
        }

        self.settle().await?;
        let history = self.sim.history()?;
        info!(gates = history.len(), ignored = self.ignored, errors, "script finished");

        println!();
        println!(
            "{} {} gate(s) recorded, {} action(s) ignored, {} line(s) rejected",
            style("✓").green().bold(),
            history.records().count(),
            self.ignored,
            errors
        );
        println!();
        println!("{}", self.sim.code(self.format)?);
        Ok(())
    }

    async fn execute(&mut self, command: Command) -> Result<()> {
        let outcome = match command {
            Command::Gate { gate, operands } => {
                if operands.is_empty() {
                    self.sim.apply(gate)?
                } else {
                    self.sim.apply_with(gate, &operands)?
                }
            }
            Command::Theta(degrees) => self.sim.set_theta(degrees.to_radians())?,
            Command::Phi(degrees) => self.sim.set_phi(degrees.to_radians())?,
            Command::Select(index) => self.sim.select(index)?,
            Command::Add => self.sim.add_qubit()?,
            Command::Remove => self.sim.remove_selected()?,
            Command::Reset => {
                self.sim.reset()?;
                println!("{} Register reset", style("→").cyan().bold());
                return Ok(());
            }
            Command::State { json } => {
                let mut renderer = if json {
                    TerminalRenderer::json()
                } else {
                    TerminalRenderer::new()
                };
                self.sim.render(&mut renderer)?;
                return Ok(());
            }
            Command::Code(format) => {
                println!("{}", self.sim.code(format.unwrap_or(self.format))?);
                return Ok(());
            }
            Command::Copy => {
                self.sim.copy_code(self.format, self.clipboard.as_mut())?;
                match &self.copy_to {
                    Some(path) => println!("{} Copying code to {}", style("→").cyan().bold(), path),
                    None => eprintln!(
                        "{} no copy target configured (use --copy-to)",
                        style("Warning:").yellow().bold()
                    ),
                }
                return Ok(());
            }
            Command::History => {
                let history = self.sim.history()?;
                if history.is_empty() {
                    println!("  {}", style("(no gates applied yet)").dim());
                }
                for entry in &history {
                    println!("  {entry}");
                }
                return Ok(());
            }
            Command::Wait => {
                self.settle().await?;
                return Ok(());
            }
            Command::Cancel => {
                if self.sim.cancel_animation()? {
                    println!("{} Animation cancelled", style("→").cyan().bold());
                }
                return Ok(());
            }
        };
        self.report(outcome);
        Ok(())
    }

    fn report(&mut self, outcome: Dispatch) {
        if let Dispatch::Ignored(reason) = outcome {
            self.ignored += 1;
            eprintln!("{} ignored: {}", style("Warning:").yellow().bold(), reason);
        }
    }

    /// Block until no animation is in flight.
    async fn settle(&self) -> Result<()> {
        match &self.clock {
            Clock::Manual(scheduler) => {
                scheduler.run_until_idle();
            }
            Clock::Timer { frame } => {
                let Some(progress) = self.sim.snapshot()?.animation else {
                    return Ok(());
                };
                let bar = AnimationBar::new(progress.gate.label())?;
                bar.set_message(format!("q[{}]", progress.target));
                while self.sim.is_busy() {
                    if let Some(progress) = self.sim.snapshot()?.animation {
                        bar.update(&progress);
                    }
                    tokio::time::sleep(*frame).await;
                }
                bar.finish();
            }
        }
        Ok(())
    }
}
