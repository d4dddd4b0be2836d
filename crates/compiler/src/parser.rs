//! Parser for stepvm tokens → statements.
//!
//! Checks run in a fixed order: the mnemonic first, then every operand,
//! then the operand count.

use stepvm_common::{DecodeError, Opcode, Statement};

use crate::error::CompileError;
use crate::lexer::Token;

/// Parse the tokens of a single line into a statement.
///
/// Returns `Ok(None)` for blank and comment lines (empty token list). A
/// mnemonic with no operands at all, where some are expected, is a malformed
/// operand rather than an arity mismatch.
pub(crate) fn parse_line(
    tokens: &[Token<'_>],
    line: usize,
) -> Result<Option<Statement>, CompileError> {
    let Some((first, rest)) = tokens.split_first() else {
        return Ok(None);
    };

    let opcode = match first {
        Token::Word(word) => Opcode::from_mnemonic(word),
        Token::Int { .. } => None,
    }
    .ok_or_else(|| CompileError::UnknownInstruction {
        line,
        token: first.text().to_string(),
    })?;

    // A bare mnemonic has no operand that could parse.
    if rest.is_empty() && opcode.arity() > 0 {
        return Err(CompileError::MalformedOperand {
            line,
            token: String::new(),
        });
    }

    let operands = rest
        .iter()
        .map(|token| expect_operand(token, line))
        .collect::<Result<Vec<_>, _>>()?;

    Statement::new(opcode, &operands)
        .map(Some)
        .map_err(|err| match err {
            DecodeError::ArityMismatch {
                mnemonic,
                expected,
                found,
            } => CompileError::ArityMismatch {
                line,
                mnemonic,
                expected,
                found,
            },
            // Unreachable for an opcode obtained from the catalog.
            DecodeError::UnknownOpcode(code) => CompileError::UnknownInstruction {
                line,
                token: code.to_string(),
            },
        })
}

/// Extract an integer operand from a token.
fn expect_operand(token: &Token<'_>, line: usize) -> Result<i32, CompileError> {
    match *token {
        Token::Int { value, .. } => Ok(value),
        Token::Word(word) => Err(CompileError::MalformedOperand {
            line,
            token: word.to_string(),
        }),
    }
}
