//! CLI command implementations.

use std::fs;
use std::path::Path;

use serde_json::json;
use stepvm_common::catalog::{instructions_in, Semantics, ALL_GROUPS};
use stepvm_common::{InstructionInfo, Opcode, Program};
use stepvm_vm::{Executor, HistoryItem, MemoryConfig, RunOutcome};
use tracing::debug;

use crate::MachineArgs;

/// Compile a source file and report how many statements it holds.
pub fn check(path: &Path) -> Result<(), i32> {
    let program = compile_file(path)?;
    println!("OK: {} ({} statements)", path.display(), program.len());
    Ok(())
}

/// Run a program until it halts and print the output range as text.
pub fn run(path: &Path, machine: &MachineArgs) -> Result<(), i32> {
    let (exec, outcome) = execute(path, machine)?;
    println!("{}", rendered_output(&exec));
    finish(&exec, outcome, machine.max_steps)
}

/// Run a program and print its recorded history.
pub fn trace(path: &Path, machine: &MachineArgs, as_json: bool) -> Result<(), i32> {
    let (exec, outcome) = execute(path, machine)?;

    if as_json {
        let report = json!({
            "steps": outcome.steps,
            "halted": outcome.halted,
            "counter": exec.counter(),
            "history": exec.history(),
            "output": rendered_output(&exec),
        });
        let text = serde_json::to_string_pretty(&report).map_err(|e| {
            eprintln!("error: cannot serialize trace: {e}");
            1
        })?;
        println!("{text}");
    } else {
        for (idx, item) in exec.history().iter().enumerate() {
            println!("{}", format_step(idx, item));
        }
        println!("output: {}", rendered_output(&exec));
    }

    finish(&exec, outcome, machine.max_steps)
}

/// Compile a source file and print its canonical text.
pub fn disassemble(path: &Path) -> Result<(), i32> {
    let program = compile_file(path)?;
    print!("{}", stepvm_compiler::disassemble(&program));
    Ok(())
}

/// List the catalog grouped by family, or describe one instruction.
pub fn catalog(mnemonic: Option<&str>) -> Result<(), i32> {
    match mnemonic {
        Some(name) => {
            let opcode = Opcode::from_mnemonic(name).ok_or_else(|| {
                eprintln!("error: unknown instruction '{name}'");
                1
            })?;
            let info = opcode.info();
            println!("{}", signature(info));
            println!("  opcode:  {}", info.opcode as u8);
            println!("  group:   {}", info.group.name());
            for (name, kind) in info.operands {
                println!("  {name}: {}", kind.name());
            }
            if let Semantics::Binary(op, _) = info.semantics {
                println!("  operator: {}", op.symbol());
            }
            println!("  {}", info.description);
        }
        None => {
            for group in ALL_GROUPS {
                println!("{}:", group.name());
                for info in instructions_in(group) {
                    println!(
                        "  {:>2}  {:<18}{}",
                        info.opcode as u8,
                        signature(info),
                        info.description
                    );
                }
            }
        }
    }
    Ok(())
}

// ---- Helpers ----

fn read_source(path: &Path) -> Result<String, i32> {
    fs::read_to_string(path).map_err(|e| {
        eprintln!("error: cannot read '{}': {e}", path.display());
        1
    })
}

fn compile_file(path: &Path) -> Result<Program, i32> {
    let text = read_source(path)?;
    stepvm_compiler::compile(&text).map_err(|e| {
        eprintln!("error: {e}");
        1
    })
}

/// Build the memory layout from the command-line options.
fn memory_config(machine: &MachineArgs) -> Result<MemoryConfig, i32> {
    let report = |e: stepvm_vm::ConfigError| {
        eprintln!("error: {e}");
        1
    };
    let base = MemoryConfig::with_size(machine.memory_size).map_err(report)?;
    let input = machine.input_range.clone().unwrap_or(base.input);
    let output = machine.output_range.clone().unwrap_or(base.output);
    MemoryConfig::new(base.size, input, output).map_err(report)
}

/// Compile, load, feed input, and run within the step budget.
fn execute(path: &Path, machine: &MachineArgs) -> Result<(Executor, RunOutcome), i32> {
    let program = compile_file(path)?;
    let config = memory_config(machine)?;
    debug!(?config, "memory layout");
    let mut exec = Executor::new(config).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;
    exec.load_program(program);
    if let Some(text) = &machine.input {
        exec.set_input_text(text);
    }
    let outcome = exec.run(machine.max_steps);
    Ok((exec, outcome))
}

fn finish(exec: &Executor, outcome: RunOutcome, max_steps: usize) -> Result<(), i32> {
    if outcome.halted {
        Ok(())
    } else {
        eprintln!(
            "error: step budget of {max_steps} exhausted at statement {}",
            exec.counter()
        );
        Err(2)
    }
}

/// Output range as text, without the unused zero cells at its end.
fn rendered_output(exec: &Executor) -> String {
    exec.output_text().trim_end_matches('\0').to_string()
}

fn signature(info: &InstructionInfo) -> String {
    let mut text = info.mnemonic.to_string();
    for (name, _) in info.operands {
        text.push(' ');
        text.push_str(name);
    }
    text
}

fn format_step(idx: usize, item: &HistoryItem) -> String {
    let arrow = if item.jumped() { "=>" } else { "->" };
    let mut line = format!(
        "{idx:>5}  {:>4} {arrow} {:<4}  {}",
        item.counter_before, item.counter_after, item.statement
    );
    for record in item.commit.iter() {
        line.push_str(&format!(
            "  [{}] {} -> {}",
            record.address, record.old_value, record.new_value
        ));
    }
    if !item.stat.out_of_bound.is_empty() {
        let addresses: Vec<String> = item
            .stat
            .out_of_bound
            .iter()
            .map(|a| a.to_string())
            .collect();
        line.push_str(&format!("  out of bounds: {}", addresses.join(" ")));
    }
    line
}
