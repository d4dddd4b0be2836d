//! stepvm CLI: compile, run, and trace step programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Input/compile/configuration error
//! - 2: Step budget exhausted before the program halted

mod commands;

use std::ops::Range;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "stepvm")]
#[command(about = "Compile and step through programs for the stepvm instruction set")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a source file and report the statement count
    Check {
        /// Path to a source file
        file: PathBuf,
    },
    /// Run a program until it halts and print its output range
    Run {
        /// Path to a source file
        file: PathBuf,
        #[command(flatten)]
        machine: MachineArgs,
    },
    /// Run a program and print every recorded step
    Trace {
        /// Path to a source file
        file: PathBuf,
        #[command(flatten)]
        machine: MachineArgs,
        /// Emit the trace as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compile a source file and print it in canonical form
    Disassemble {
        /// Path to a source file
        file: PathBuf,
    },
    /// List the instruction catalog, or describe one instruction
    Catalog {
        /// Mnemonic to describe
        mnemonic: Option<String>,
    },
}

/// Options shared by the commands that execute a program.
#[derive(Args, Debug, Clone)]
pub(crate) struct MachineArgs {
    /// Text placed in the input range before the first step
    #[arg(long)]
    pub input: Option<String>,

    /// Maximum number of steps to execute
    #[arg(long, default_value = "10000")]
    pub max_steps: usize,

    /// Number of memory cells
    #[arg(long, default_value = "256")]
    pub memory_size: usize,

    /// Input range as START..END (default: third quarter of memory)
    #[arg(long, value_parser = parse_range)]
    pub input_range: Option<Range<usize>>,

    /// Output range as START..END (default: last quarter of memory)
    #[arg(long, value_parser = parse_range)]
    pub output_range: Option<Range<usize>>,
}

/// Parse `START..END` into a half-open range.
fn parse_range(text: &str) -> Result<Range<usize>, String> {
    let (start, end) = text
        .split_once("..")
        .ok_or_else(|| format!("expected START..END, got '{text}'"))?;
    let start = start
        .trim()
        .parse()
        .map_err(|e| format!("invalid range start '{start}': {e}"))?;
    let end = end
        .trim()
        .parse()
        .map_err(|e| format!("invalid range end '{end}': {e}"))?;
    Ok(start..end)
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // clap exits with 2 on usage errors, which is taken by budget exhaustion.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    let result = match cli.command {
        Command::Check { file } => commands::check(&file),
        Command::Run { file, machine } => commands::run(&file, &machine),
        Command::Trace {
            file,
            machine,
            json,
        } => commands::trace(&file, &machine, json),
        Command::Disassemble { file } => commands::disassemble(&file),
        Command::Catalog { mnemonic } => commands::catalog(mnemonic.as_deref()),
    };

    if let Err(code) = result {
        process::exit(code);
    }
}
