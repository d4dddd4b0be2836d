//! Memory layout configuration.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default number of memory cells.
pub const DEFAULT_MEMORY_SIZE: usize = 256;

/// Capacity of the memory and where external input and output live in it.
///
/// The input range is preloaded with host-supplied codes before the first
/// step; the output range is rendered by the host as characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    pub size: usize,
    pub input: Range<usize>,
    pub output: Range<usize>,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self::layout(DEFAULT_MEMORY_SIZE)
    }
}

impl MemoryConfig {
    /// Build a validated configuration.
    pub fn new(
        size: usize,
        input: Range<usize>,
        output: Range<usize>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            size,
            input,
            output,
        };
        config.validate()?;
        Ok(config)
    }

    /// The default layout scaled to `size` cells: the first half is free,
    /// the third quarter is input, the last quarter is output.
    pub fn with_size(size: usize) -> Result<Self, ConfigError> {
        let config = Self::layout(size);
        config.validate()?;
        Ok(config)
    }

    fn layout(size: usize) -> Self {
        let half = size / 2;
        let three_quarters = size - size / 4;
        Self {
            size,
            input: half..three_quarters,
            output: three_quarters..size,
        }
    }

    /// Check that memory is non-empty and both ranges fit inside it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::EmptyMemory);
        }
        for (name, range) in [("input", &self.input), ("output", &self.output)] {
            if range.start > range.end {
                return Err(ConfigError::InvertedRange {
                    name,
                    range: range.clone(),
                });
            }
            if range.end > self.size {
                return Err(ConfigError::RangeOutOfBounds {
                    name,
                    range: range.clone(),
                    size: self.size,
                });
            }
        }
        Ok(())
    }
}
