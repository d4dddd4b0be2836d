//! Error types for the stepvm compiler.

use thiserror::Error;

/// Errors produced while compiling source text.
///
/// Compilation stops at the first offending line; line numbers are 1-based
/// physical lines of the source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The first word of a line is not a catalog mnemonic.
    #[error("line {line}: unknown instruction '{token}'")]
    UnknownInstruction { line: usize, token: String },

    /// An operand is not a signed base-10 integer in `i32` range.
    #[error("line {line}: malformed operand '{token}'")]
    MalformedOperand { line: usize, token: String },

    /// The operand count differs from the instruction's arity.
    #[error("line {line}: {mnemonic} expects {expected} operand(s), found {found}")]
    ArityMismatch {
        line: usize,
        mnemonic: &'static str,
        expected: usize,
        found: usize,
    },

    /// The source contains no statements.
    #[error("empty program")]
    EmptyProgram,
}

impl CompileError {
    /// Source line of the error, if it belongs to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            CompileError::UnknownInstruction { line, .. }
            | CompileError::MalformedOperand { line, .. }
            | CompileError::ArityMismatch { line, .. } => Some(*line),
            CompileError::EmptyProgram => None,
        }
    }
}
