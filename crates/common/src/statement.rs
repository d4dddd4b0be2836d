//! Statements and instruction semantics.
//!
//! A statement is one compiled line: an opcode plus up to three integer
//! operands. Operands live in a fixed three-slot array; slots past the
//! instruction's arity are always zero.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{Form, InstructionInfo, Opcode, Semantics};
use crate::error::DecodeError;

/// Largest arity of any catalog instruction.
pub const MAX_ARITY: usize = 3;

/// Memory access available to an executing instruction.
///
/// Implementations decide what happens with out-of-range addresses; the
/// instruction semantics never inspect bounds themselves.
pub trait MemoryHandle {
    fn read(&mut self, address: i32) -> i32;
    fn write(&mut self, address: i32, value: i32);
}

/// What the executor does after an instruction ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flow {
    /// Continue with the next statement.
    Advance,
    /// Continue at an absolute statement index.
    Jump(i32),
}

impl InstructionInfo {
    /// Run this instruction against `mem`.
    ///
    /// `operands` holds the statement's operands in declaration order.
    pub fn operate<H>(&self, operands: [i32; MAX_ARITY], mem: &mut H) -> Flow
    where
        H: MemoryHandle + ?Sized,
    {
        let [a, b, c] = operands;
        match self.semantics {
            Semantics::CopyValue => {
                let value = mem.read(b);
                mem.write(a, value);
            }
            Semantics::Assign => mem.write(a, b),
            Semantics::Binary(op, form) => {
                let (lhs, rhs) = match form {
                    Form::Addresses => (mem.read(a), mem.read(b)),
                    Form::ConstRight => (mem.read(a), b),
                    Form::ConstLeft => (a, mem.read(b)),
                };
                mem.write(c, op.apply(lhs, rhs));
            }
            Semantics::Invert => {
                let value = mem.read(a);
                mem.write(a, !value);
            }
            Semantics::Load => {
                let target = mem.read(a);
                let value = mem.read(target);
                mem.write(b, value);
            }
            Semantics::Store => {
                let target = mem.read(a);
                let value = mem.read(b);
                mem.write(target, value);
            }
            Semantics::StoreConst => {
                let target = mem.read(a);
                mem.write(target, b);
            }
            Semantics::Jump => return Flow::Jump(mem.read(a)),
            Semantics::JumpConst => return Flow::Jump(a),
            Semantics::JumpIfNonZero => {
                if mem.read(b) != 0 {
                    return Flow::Jump(a);
                }
            }
        }
        Flow::Advance
    }
}

/// A single compiled statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Statement {
    opcode: Opcode,
    args: [i32; MAX_ARITY],
}

impl Statement {
    /// Create a statement, checking the operand count against the catalog.
    pub fn new(opcode: Opcode, operands: &[i32]) -> Result<Self, DecodeError> {
        let expected = opcode.arity();
        if operands.len() != expected {
            return Err(DecodeError::ArityMismatch {
                mnemonic: opcode.mnemonic(),
                expected,
                found: operands.len(),
            });
        }
        let mut args = [0; MAX_ARITY];
        args[..expected].copy_from_slice(operands);
        Ok(Self { opcode, args })
    }

    /// Create a statement from a raw catalog index.
    pub fn from_raw(code: u8, operands: &[i32]) -> Result<Self, DecodeError> {
        Self::new(Opcode::try_from(code)?, operands)
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// The operands, exactly as many as the instruction's arity.
    pub fn operands(&self) -> &[i32] {
        &self.args[..self.opcode.arity()]
    }

    /// Execute this statement against `mem`.
    pub fn operate<H>(&self, mem: &mut H) -> Flow
    where
        H: MemoryHandle + ?Sized,
    {
        self.opcode.info().operate(self.args, mem)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.opcode.mnemonic())?;
        for operand in self.operands() {
            write!(f, " {operand}")?;
        }
        Ok(())
    }
}
