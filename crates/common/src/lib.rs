//! stepvm common types.
//!
//! This crate holds everything compiler and executor must agree on:
//!
//! - [`catalog`]: the fixed instruction table; an [`Opcode`] is an index
//!   into it
//! - [`numeric`]: float-then-truncate arithmetic, bitwise and comparison
//!   operators
//! - [`Statement`]: one compiled line, and the [`MemoryHandle`] it runs
//!   against
//! - [`Program`]: an immutable list of statements
//! - [`DecodeError`]: errors from building statements out of raw parts

pub mod catalog;
pub mod error;
pub mod numeric;
pub mod program;
pub mod statement;

// Re-export commonly used types at the crate root.
pub use catalog::{Group, InstructionInfo, Opcode, OperandKind, CATALOG};
pub use error::DecodeError;
pub use program::Program;
pub use statement::{Flow, MemoryHandle, Statement, MAX_ARITY};
