//! Configuration errors for the stepvm executor.
//!
//! Execution itself has no error kind: out-of-bounds access, division by zero
//! and runaway jumps are all defined outcomes.

use std::ops::Range;

use thiserror::Error;

/// Errors from validating a [`MemoryConfig`](crate::MemoryConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Memory must hold at least one cell.
    #[error("memory size must be at least 1")]
    EmptyMemory,

    /// A range does not fit inside memory.
    #[error("{name} range {}..{} exceeds memory size {size}", .range.start, .range.end)]
    RangeOutOfBounds {
        name: &'static str,
        range: Range<usize>,
        size: usize,
    },

    /// A range ends before it starts.
    #[error("{name} range {}..{} is inverted", .range.start, .range.end)]
    InvertedRange {
        name: &'static str,
        range: Range<usize>,
    },
}
