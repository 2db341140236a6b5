//! Board errors.
//!
//! Empty undo/redo stacks are not errors; they are reported as
//! [`StepOutcome::Empty`](crate::StepOutcome::Empty).

use std::fmt;

use crate::cell::CellId;

/// Errors raised by paint and history operations. Either kind leaves the
/// grid and the ledger untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// The target cell is not part of the live grid.
    CellOutOfBounds { cell: CellId, len: usize },
    /// A history entry references a cell outside the live grid.
    StaleHistory { cell: CellId, len: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CellOutOfBounds { cell, len } => {
                write!(f, "{cell} is outside the grid ({len} cells)")
            }
            Self::StaleHistory { cell, len } => {
                write!(f, "history references {cell} outside the grid ({len} cells)")
            }
        }
    }
}

impl std::error::Error for BoardError {}
