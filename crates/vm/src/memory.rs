//! Bounds-checked integer memory with transactional writes.
//!
//! All instruction effects go through [`Memory::mutate`], which records every
//! write in a [`Commit`] so the step can later be undone or redone without
//! running the instruction again.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use stepvm_common::MemoryHandle;

/// One write performed inside a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteRecord {
    pub address: usize,
    pub new_value: i32,
    pub old_value: i32,
}

/// Ordered log of the writes of one step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    records: Vec<WriteRecord>,
}

impl Commit {
    pub fn records(&self) -> &[WriteRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WriteRecord> {
        self.records.iter()
    }
}

/// Addresses a step touched. Purely observational.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessStatistic {
    pub read: BTreeSet<usize>,
    pub write: BTreeSet<usize>,
    /// Raw operand values that fell outside memory.
    pub out_of_bound: BTreeSet<i32>,
}

/// Fixed-size array of `i32` cells, zero-initialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    data: Vec<i32>,
}

impl Memory {
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[i32] {
        &self.data
    }

    pub fn get(&self, address: usize) -> Option<i32> {
        self.data.get(address).copied()
    }

    /// Run `action` inside a transaction and return what it did.
    ///
    /// Out-of-range addresses never fail: reads yield `0`, writes are
    /// dropped, and the address lands in [`AccessStatistic::out_of_bound`].
    pub fn mutate<F>(&mut self, action: F) -> (Commit, AccessStatistic)
    where
        F: FnOnce(&mut Transaction<'_>),
    {
        let mut tx = Transaction {
            data: &mut self.data,
            commit: Commit::default(),
            stat: AccessStatistic::default(),
        };
        action(&mut tx);
        (tx.commit, tx.stat)
    }

    /// Restore the old value of every record, in stored order.
    pub fn undo(&mut self, commit: &Commit) {
        for record in commit.iter() {
            if let Some(cell) = self.data.get_mut(record.address) {
                *cell = record.old_value;
            }
        }
    }

    /// Reapply the new value of every record, in stored order.
    pub fn redo(&mut self, commit: &Commit) {
        for record in commit.iter() {
            if let Some(cell) = self.data.get_mut(record.address) {
                *cell = record.new_value;
            }
        }
    }

    /// Zero every cell.
    pub fn reset(&mut self) {
        self.data.fill(0);
    }

    /// Copy `values` into memory starting at `start`, outside of any
    /// transaction. Values that would land past the end are dropped.
    pub fn load(&mut self, start: usize, values: &[i32]) {
        if let Some(tail) = self.data.get_mut(start..) {
            let n = tail.len().min(values.len());
            tail[..n].copy_from_slice(&values[..n]);
        }
    }
}

/// Handle given to instructions while a transaction is open.
pub struct Transaction<'m> {
    data: &'m mut [i32],
    commit: Commit,
    stat: AccessStatistic,
}

impl Transaction<'_> {
    fn slot(&mut self, address: i32) -> Option<usize> {
        match usize::try_from(address) {
            Ok(index) if index < self.data.len() => Some(index),
            _ => {
                self.stat.out_of_bound.insert(address);
                None
            }
        }
    }
}

impl MemoryHandle for Transaction<'_> {
    fn read(&mut self, address: i32) -> i32 {
        match self.slot(address) {
            Some(index) => {
                self.stat.read.insert(index);
                self.data[index]
            }
            None => 0,
        }
    }

    fn write(&mut self, address: i32, value: i32) {
        if let Some(index) = self.slot(address) {
            self.stat.write.insert(index);
            self.commit.records.push(WriteRecord {
                address: index,
                new_value: value,
                old_value: self.data[index],
            });
            self.data[index] = value;
        }
    }
}
