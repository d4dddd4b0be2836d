//! Execution history.

use serde::{Deserialize, Serialize};
use stepvm_common::Statement;

use crate::memory::{AccessStatistic, Commit};

/// One executed step, recorded the first time it ran at the frontier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub statement: Statement,
    pub counter_before: i32,
    pub counter_after: i32,
    pub commit: Commit,
    pub stat: AccessStatistic,
}

impl HistoryItem {
    /// Whether the step left the sequential path.
    pub fn jumped(&self) -> bool {
        self.counter_after != self.counter_before.saturating_add(1)
    }
}
