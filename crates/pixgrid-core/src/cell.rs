//! Paintable cell: the fundamental unit of the grid.
//!
//! A cell only knows its current and default colors. Recording history and
//! notifying the renderer are the grid's job; see [`Grid`](crate::Grid).

use std::fmt;

use crate::color::Rgb;

/// Identifier of a cell within the live grid (row-major index).
///
/// Ids are only meaningful for the grid that issued them. Rebuilding the
/// grid invalidates every id along with the history that stored them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(usize);

impl CellId {
    /// Wrap a row-major index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Id of `(row, col)` in a grid with `side` cells per row.
    #[must_use]
    pub const fn from_row_col(row: u16, col: u16, side: u16) -> Self {
        Self(row as usize * side as usize + col as usize)
    }

    /// Row-major index into the grid's cell storage.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell#{}", self.0)
    }
}

/// Color transition produced by a single cell write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorChange {
    pub previous: Rgb,
    pub next: Rgb,
}

impl ColorChange {
    /// Whether the write left the color unchanged.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.previous == self.next
    }
}

/// A single paintable cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    color: Rgb,
    default_color: Rgb,
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(Rgb::WHITE)
    }
}

impl Cell {
    /// Create a blank cell showing `default_color`.
    #[must_use]
    pub const fn new(default_color: Rgb) -> Self {
        Self {
            color: default_color,
            default_color,
        }
    }

    /// Currently displayed color.
    #[must_use]
    pub const fn color(&self) -> Rgb {
        self.color
    }

    /// Background color fixed at creation.
    #[must_use]
    pub const fn default_color(&self) -> Rgb {
        self.default_color
    }

    /// Whether the cell shows its default color.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.color == self.default_color
    }

    pub(crate) fn apply_color(&mut self, color: Rgb) -> ColorChange {
        let previous = std::mem::replace(&mut self.color, color);
        ColorChange {
            previous,
            next: color,
        }
    }

    pub(crate) fn remove_color(&mut self) -> ColorChange {
        self.apply_color(self.default_color)
    }

    /// Write without producing a transition (history replay).
    pub(crate) fn revert_color(&mut self, color: Rgb) {
        self.color = color;
    }
}
