#![forbid(unsafe_code)]

//! Undo/redo ledger of cell color transitions.
//!
//! Every committed paint pushes one [`HistoryEntry`] onto the undo stack.
//! Bulk operations open a group with [`Ledger::begin_group`] and tag each of
//! their entries with the returned [`GroupId`]; undo and redo then move the
//! whole contiguous run carrying that id in one step. Because ids are unique
//! per operation, two back-to-back fills stay two separate steps.
//!
//! The ledger stores [`CellId`]s, not cells. The [`Grid`](crate::Grid) owns
//! the ledger, resolves ids when replaying a step, and resets the ledger
//! whenever it is rebuilt.

use crate::cell::{CellId, ColorChange};
use crate::color::Rgb;

/// Identifier of one bulk operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(u64);

impl GroupId {
    /// Raw sequence number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// One recorded color transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    pub cell: CellId,
    pub previous: Rgb,
    pub next: Rgb,
    /// Set for entries written by a bulk operation.
    pub group: Option<GroupId>,
}

impl HistoryEntry {
    /// Whether this entry belongs to a bulk operation.
    #[must_use]
    pub fn is_grouped(&self) -> bool {
        self.group.is_some()
    }
}

/// Result of an undo or redo request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum StepOutcome {
    /// Nothing to undo (or redo).
    Empty,
    /// One logical step was replayed.
    Applied { cells: usize, grouped: bool },
}

impl StepOutcome {
    /// Whether the request was a no-op.
    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Number of cells the step touched.
    pub fn cells(self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Applied { cells, .. } => cells,
        }
    }
}

/// Undo and redo stacks (most recent last).
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    next_group: u64,
}

impl Ledger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transition.
    ///
    /// Ungrouped no-op writes are dropped and leave the redo stack alone.
    /// Grouped writes are always kept so a group's size is exactly the
    /// number of cells the operation visited. Returns `true` if an entry was
    /// pushed.
    pub fn record(&mut self, cell: CellId, change: ColorChange, group: Option<GroupId>) -> bool {
        if group.is_none() {
            if change.is_noop() {
                return false;
            }
            self.redo_stack.clear();
        }
        self.undo_stack.push(HistoryEntry {
            cell,
            previous: change.previous,
            next: change.next,
            group,
        });
        true
    }

    /// Open a new bulk operation. Clears the redo stack once for the whole
    /// operation.
    pub fn begin_group(&mut self) -> GroupId {
        self.redo_stack.clear();
        let id = GroupId(self.next_group);
        self.next_group += 1;
        id
    }

    /// Whether undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of entries on the undo stack.
    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of entries on the redo stack.
    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Undo stack, oldest first.
    #[must_use]
    pub fn undo_entries(&self) -> &[HistoryEntry] {
        &self.undo_stack
    }

    /// Redo stack, oldest first.
    #[must_use]
    pub fn redo_entries(&self) -> &[HistoryEntry] {
        &self.redo_stack
    }

    /// Entries the next undo would revert (stack order).
    #[must_use]
    pub fn peek_undo(&self) -> &[HistoryEntry] {
        let len = self.undo_stack.len();
        &self.undo_stack[len - step_len(&self.undo_stack)..]
    }

    /// Entries the next redo would reapply (stack order).
    #[must_use]
    pub fn peek_redo(&self) -> &[HistoryEntry] {
        let len = self.redo_stack.len();
        &self.redo_stack[len - step_len(&self.redo_stack)..]
    }

    /// Move the top undo step onto the redo stack, one entry at a time.
    /// Returns the moved entries in pop order.
    pub(crate) fn pop_undo(&mut self) -> Vec<HistoryEntry> {
        transfer(&mut self.undo_stack, &mut self.redo_stack)
    }

    /// Move the top redo step back onto the undo stack.
    pub(crate) fn pop_redo(&mut self) -> Vec<HistoryEntry> {
        transfer(&mut self.redo_stack, &mut self.undo_stack)
    }

    /// Drop all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

/// Size of the logical step on top of `stack`.
fn step_len(stack: &[HistoryEntry]) -> usize {
    let Some(top) = stack.last() else {
        return 0;
    };
    match top.group {
        None => 1,
        Some(group) => stack
            .iter()
            .rev()
            .take_while(|entry| entry.group == Some(group))
            .count(),
    }
}

fn transfer(from: &mut Vec<HistoryEntry>, to: &mut Vec<HistoryEntry>) -> Vec<HistoryEntry> {
    let count = step_len(from);
    let mut moved = Vec::with_capacity(count);
    for _ in 0..count {
        if let Some(entry) = from.pop() {
            to.push(entry);
            moved.push(entry);
        }
    }
    moved
}
