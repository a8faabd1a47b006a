use crate::model::WorkflowSnapshot;
use std::collections::VecDeque;

/// Default number of snapshots kept for undo/redo.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// A bounded, linear undo/redo log of full snapshots.
///
/// The cursor always points at a retained entry. Recording after an undo
/// drops everything past the cursor; once the log exceeds its capacity the
/// oldest entry is evicted and the cursor slides down with it.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<WorkflowSnapshot>,
    cursor: usize,
    capacity: usize,
}

impl History {
    /// Starts a history whose only entry is `initial`. A capacity of zero is
    /// treated as one.
    pub fn new(initial: WorkflowSnapshot, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut entries = VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY) + 1);
        entries.push_back(initial);
        Self {
            entries,
            cursor: 0,
            capacity,
        }
    }

    /// Appends `snapshot` as the newest entry and moves the cursor onto it.
    pub fn record(&mut self, snapshot: WorkflowSnapshot) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(snapshot);
        self.cursor = self.entries.len() - 1;

        if self.entries.len() > self.capacity {
            self.entries.pop_front();
            self.cursor -= 1;
            tracing::debug!(capacity = self.capacity, "evicted oldest history entry");
        }
    }

    /// Steps back one entry. Returns `None` when already at the oldest one.
    pub fn undo(&mut self) -> Option<&WorkflowSnapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Steps forward one entry. Returns `None` when already at the newest one.
    pub fn redo(&mut self) -> Option<&WorkflowSnapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// The entry under the cursor.
    pub fn current(&self) -> Option<&WorkflowSnapshot> {
        self.entries.get(self.cursor)
    }

    /// Discards every entry and starts over from `snapshot`.
    pub fn reset(&mut self, snapshot: WorkflowSnapshot) {
        self.entries.clear();
        self.entries.push_back(snapshot);
        self.cursor = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
