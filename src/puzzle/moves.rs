//! Move records and the undo stack

use serde::{Deserialize, Serialize};

/// The pair of tile ids exchanged by one swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    /// First tile of the swap
    pub a: usize,
    /// Second tile of the swap
    pub b: usize,
}

impl MoveRecord {
    /// Record a swap of tiles `a` and `b`
    pub const fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }
}

/// Ordered log of completed swaps, most recent last
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLog {
    records: Vec<MoveRecord>,
}

impl MoveLog {
    /// Create an empty log
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a completed swap
    pub fn push(&mut self, record: MoveRecord) {
        self.records.push(record);
    }

    /// Remove and return the most recent swap
    pub fn pop(&mut self) -> Option<MoveRecord> {
        self.records.pop()
    }

    /// Most recent swap without removing it
    pub fn last(&self) -> Option<MoveRecord> {
        self.records.last().copied()
    }

    /// Number of recorded swaps
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no swaps are recorded
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Forget every recorded swap
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Recorded swaps, oldest first
    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }
}
