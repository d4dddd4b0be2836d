//! Disassembler: statements → canonical source text.

use stepvm_common::Program;

/// Render one statement per line, single-spaced, no comments.
pub(crate) fn disassemble(program: &Program) -> String {
    program
        .iter()
        .map(|statement| format!("{statement}\n"))
        .collect()
}
