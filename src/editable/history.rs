//! Edit history (undo/redo) for the document surface.
//!
//! Entries hold whole-document snapshots. `RichDocument` clones share rope
//! nodes, so a snapshot costs little more than its mark and block tables.

use super::document::RichDocument;
use super::selection::Selection;

/// Document and selection at one point in time.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub document: RichDocument,
    pub selection: Selection,
}

/// A single edit that can be undone/redone.
#[derive(Debug, Clone)]
pub struct EditOperation {
    pub before: Snapshot,
    pub after: Snapshot,
}

impl EditOperation {
    pub fn new(before: Snapshot, after: Snapshot) -> Self {
        Self { before, after }
    }

    /// Get the inverse operation for undo
    pub fn inverse(&self) -> Self {
        Self {
            before: self.after.clone(),
            after: self.before.clone(),
        }
    }
}

/// Edit history with undo/redo stacks.
///
/// Both [`EditHistory::pop_undo`] and [`EditHistory::pop_redo`] return an
/// operation whose `before` snapshot is the state to restore.
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo_stack: Vec<EditOperation>,
    redo_stack: Vec<EditOperation>,
    max_size: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl EditHistory {
    pub fn new() -> Self {
        Self::with_max_size(100)
    }

    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size: max_size.max(1),
        }
    }

    /// Push an operation onto the undo stack (clears redo stack)
    pub fn push(&mut self, op: EditOperation) {
        self.redo_stack.clear();
        self.undo_stack.push(op);

        if self.undo_stack.len() > self.max_size {
            let excess = self.undo_stack.len() - self.max_size;
            self.undo_stack.drain(..excess);
        }
    }

    /// Pop an operation from the undo stack (moves its inverse to redo stack)
    pub fn pop_undo(&mut self) -> Option<EditOperation> {
        let op = self.undo_stack.pop()?;
        self.redo_stack.push(op.inverse());
        Some(op)
    }

    /// Pop an operation from the redo stack (moves its inverse to undo stack)
    pub fn pop_redo(&mut self) -> Option<EditOperation> {
        let op = self.redo_stack.pop()?;
        self.undo_stack.push(op.inverse());
        Some(op)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}
