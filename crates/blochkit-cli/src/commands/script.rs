//! The `run` command language.
//!
//! One command per line, `#` starts a comment:
//!
//! ```text
//! add                  # append a qubit
//! select 1             # move the cursor
//! theta 90             # set θ of the selected qubit, degrees
//! phi 45               # set φ, degrees
//! h                    # gate on the selected qubit
//! cx 1 0               # gate with explicit operands, controls first
//! gate ccx q[0] q[1] q[2]
//! state | state json   # print the register
//! code [qiskit|qasm3]  # print circuit code
//! copy                 # send code to the copy target
//! history | wait | cancel | remove | reset
//! ```

use anyhow::{Context, Result};

use blochkit_codegen::CodeFormat;
use blochkit_ir::Gate;

use super::common::parse_format;

/// A parsed script line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Apply a gate, optionally to explicit operands.
    Gate { gate: Gate, operands: Vec<u32> },
    /// Set θ of the selected qubit, in degrees.
    Theta(f64),
    /// Set φ of the selected qubit, in degrees.
    Phi(f64),
    Select(usize),
    Add,
    Remove,
    Reset,
    /// Print the register, as JSON if the flag is set.
    State { json: bool },
    /// Print circuit code, in the session format unless overridden.
    Code(Option<CodeFormat>),
    Copy,
    History,
    Wait,
    Cancel,
}

/// Parse one line. Blank lines and comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.split('#').next().unwrap_or_default().trim();
    if line.is_empty() {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = words.collect();

    let command = match head.as_str() {
        "gate" | "apply" => {
            let Some((name, rest)) = args.split_first() else {
                anyhow::bail!("'{head}' needs a gate name");
            };
            gate_command(name, rest)?
        }
        "theta" => Command::Theta(number(&head, &args)?),
        "phi" => Command::Phi(number(&head, &args)?),
        "select" => {
            let index = single(&head, &args)?;
            Command::Select(
                operand(index).with_context(|| format!("Invalid qubit index: '{index}'"))? as usize,
            )
        }
        "add" => Command::Add,
        "remove" => Command::Remove,
        "reset" => Command::Reset,
        "state" => match args.first() {
            None => Command::State { json: false },
            Some(&"json") => Command::State { json: true },
            Some(other) => anyhow::bail!("Unknown state output: '{other}'. Available: json"),
        },
        "code" => Command::Code(args.first().map(|f| parse_format(f)).transpose()?),
        "copy" => Command::Copy,
        "history" => Command::History,
        "wait" => Command::Wait,
        "cancel" => Command::Cancel,
        other => match other.parse::<Gate>() {
            Ok(_) => gate_command(other, &args)?,
            Err(_) => anyhow::bail!("Unknown command: '{other}'"),
        },
    };
    Ok(Some(command))
}

fn gate_command(name: &str, args: &[&str]) -> Result<Command> {
    let gate = name
        .parse::<Gate>()
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    let operands = args
        .iter()
        .flat_map(|a| a.split(','))
        .filter(|a| !a.is_empty())
        .map(|a| operand(a).with_context(|| format!("Invalid qubit operand: '{a}'")))
        .collect::<Result<Vec<_>>>()?;
    Ok(Command::Gate { gate, operands })
}

/// Accept `1`, `q1` or `q[1]`.
fn operand(text: &str) -> Result<u32> {
    let trimmed = text
        .trim()
        .trim_start_matches(['q', 'Q'])
        .trim_start_matches('[')
        .trim_end_matches(']');
    Ok(trimmed.parse::<u32>()?)
}

fn single<'a>(command: &str, args: &[&'a str]) -> Result<&'a str> {
    match args {
        [value] => Ok(value),
        _ => anyhow::bail!("'{command}' takes exactly one argument"),
    }
}

fn number(command: &str, args: &[&str]) -> Result<f64> {
    let text = single(command, args)?;
    let value: f64 = text
        .parse()
        .with_context(|| format!("Invalid angle for '{command}': '{text}'"))?;
    if !value.is_finite() {
        anyhow::bail!("Angle for '{command}' must be finite");
    }
    Ok(value)
}
