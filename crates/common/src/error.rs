//! Errors for statements built outside the compiler.

use thiserror::Error;

/// Errors that occur when building a statement from raw parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Opcode does not index into the catalog.
    #[error("unknown opcode: {0}")]
    UnknownOpcode(u8),

    /// Operand count differs from the instruction's arity.
    #[error("{mnemonic} expects {expected} operand(s), got {found}")]
    ArityMismatch {
        mnemonic: &'static str,
        expected: usize,
        found: usize,
    },
}
