//! Compiled programs.

use serde::{Deserialize, Serialize};

use crate::statement::Statement;

/// An immutable sequence of statements.
///
/// The compiler never produces an empty program; the empty default only
/// stands for "nothing loaded yet" and is permanently halted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Statement at a counter value. Negative or past-the-end counters have
    /// no statement.
    pub fn get(&self, counter: i32) -> Option<&Statement> {
        usize::try_from(counter)
            .ok()
            .and_then(|index| self.statements.get(index))
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
