//! stepvm compiler: source text ↔ [`Program`].
//!
//! The source format is line-oriented. Each non-blank line that does not
//! start with `#` holds one statement: a mnemonic followed by its operands,
//! all separated by whitespace. Operands are signed base-10 integers.
//!
//! # Usage
//!
//! ```
//! use stepvm_compiler::{compile, disassemble};
//!
//! let text = "# double cell 0\nadd 0 0 0\n\njmpc 0\n";
//! let program = compile(text).unwrap();
//! assert_eq!(program.len(), 2);
//! assert_eq!(disassemble(&program), "add 0 0 0\njmpc 0\n");
//! ```
//!
//! # Roundtrip Guarantee
//!
//! `compile(disassemble(program)) == program` holds for every non-empty
//! program. The disassembler drops comments and blank lines, so the
//! reverse direction only holds for canonical text.

pub mod error;

mod disassembler;
mod lexer;
mod parser;

pub use error::CompileError;

use lexer::tokenize_line;
use parser::parse_line;
use stepvm_common::Program;
use tracing::debug;

/// Compile source text into a program.
///
/// Returns the first error encountered, tagged with its 1-based line.
pub fn compile(text: &str) -> Result<Program, CompileError> {
    let mut statements = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_num = idx + 1;
        let tokens = tokenize_line(line);
        match parse_line(&tokens, line_num) {
            Ok(Some(statement)) => statements.push(statement),
            Ok(None) => {}
            Err(err) => {
                debug!(line = line_num, error = %err, "compile failed");
                return Err(err);
            }
        }
    }

    if statements.is_empty() {
        debug!("compile failed: no statements");
        return Err(CompileError::EmptyProgram);
    }

    debug!(statements = statements.len(), "compiled program");
    Ok(Program::new(statements))
}

/// Disassemble a program into canonical source text.
///
/// One statement per line, no indentation, no comments.
pub fn disassemble(program: &Program) -> String {
    disassembler::disassemble(program)
}
