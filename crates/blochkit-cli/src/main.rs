//! Blochkit Command-Line Interface
//!
//! Drives the Bloch-sphere engine from scripts or stdin, lists the gate
//! catalog and turns gate-history logs into circuit code.
//!
//! ```text
//!               |0⟩
//!                ●
//!            .-''|''-.
//!          .'    |    '.
//!         /      |  ↗   \
//!        ;       | /     ;
//!        |-------+-------|
//!        ;       |       ;
//!         \      |      /
//!          '.    |    .'
//!            '-..|..-'
//!                ●
//!               |1⟩
//!
//!           B L O C H K I T
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{code, common, gates, run, version};

/// Blochkit - interactive Bloch-sphere qubit simulator
#[derive(Parser)]
#[command(name = "blochkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Engine configuration file (JSON); defaults to ~/.blochkit/config.json
    #[arg(long, global = true, env = "BLOCHKIT_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a command script against the simulator (stdin if no script)
    Run {
        /// Script file, one command per line
        #[arg(short, long)]
        script: Option<String>,

        /// Finish every animation immediately instead of in real time
        #[arg(long)]
        instant: bool,

        /// Do not wait for an animation to finish before the next command
        #[arg(long)]
        no_wait: bool,

        /// Code format for `code` and `copy` (qiskit, qasm3)
        #[arg(short, long, default_value = "qiskit")]
        format: String,

        /// File that receives the code on `copy`
        #[arg(long)]
        copy_to: Option<String>,
    },

    /// List the gate catalog
    Gates {
        /// Also print each gate's matrix
        #[arg(short, long)]
        matrices: bool,
    },

    /// Turn a gate-history log into circuit code
    Code {
        /// History file, one record per line (e.g. `cx q[0],q[1]`)
        #[arg(long)]
        history: String,

        /// Number of qubits to declare
        #[arg(short, long, default_value = "1")]
        qubits: usize,

        /// Output format (qiskit, qasm3)
        #[arg(short, long, default_value = "qiskit")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Run {
            script,
            instant,
            no_wait,
            format,
            copy_to,
        } => match common::load_config(cli.config.as_deref()) {
            Ok(config) => {
                let options = run::RunOptions {
                    instant,
                    wait: !no_wait,
                    format: &format,
                    copy_to: copy_to.as_deref(),
                };
                run::execute(config, script.as_deref(), options).await
            }
            Err(e) => Err(e),
        },

        Commands::Gates { matrices } => {
            gates::execute(matrices);
            Ok(())
        }

        Commands::Code {
            history,
            qubits,
            format,
            output,
        } => code::execute(&history, qubits, &format, output.as_deref()),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
