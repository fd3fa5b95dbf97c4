//! Undo history
//! Append-only snapshot list with an undo/redo pointer
//!
//! The snapshot at the current index is the committed state; the
//! dispatcher records a new state only after a widget changed the
//! buffer, so in-progress mutations are never committed.

use crate::buffer::Snapshot;

/// Linear undo history over buffer snapshots.
#[derive(Debug, Default)]
pub struct UndoTree {
    states: Vec<Snapshot>,
    current: usize,
}

impl UndoTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new committed state, discarding any redo tail.
    pub fn new_state(&mut self, state: Snapshot) {
        if !self.states.is_empty() {
            self.states.truncate(self.current + 1);
        }
        self.states.push(state);
        self.current = self.states.len() - 1;
    }

    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current + 1 < self.states.len()
    }

    /// Step back one state and return it for the caller to apply.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.current -= 1;
        self.states.get(self.current)
    }

    /// Step forward one state and return it for the caller to apply.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.current += 1;
        self.states.get(self.current)
    }

    /// Drop all recorded states.
    pub fn clear(&mut self) {
        self.states.clear();
        self.current = 0;
    }
}
