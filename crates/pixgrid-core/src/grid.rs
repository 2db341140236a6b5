//! Paint grid: a square matrix of cells plus its undo/redo ledger.
//!
//! The grid owns a flat row-major `Vec<Cell>` and the [`Ledger`] that records
//! writes to it. Every color mutation goes through the grid so that the cell,
//! the ledger, and the renderer stay in step. Rebuilding replaces the cells
//! and the ledger in one assignment, so no history can outlive the cells it
//! refers to.

use crate::cell::{Cell, CellId, ColorChange};
use crate::color::Rgb;
use crate::config::BoardConfig;
use crate::error::BoardError;
use crate::history::{GroupId, HistoryEntry, Ledger, StepOutcome};
use crate::render::Renderer;

/// Square cell grid with its history.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    side: u16,
    config: BoardConfig,
    ledger: Ledger,
}

impl Grid {
    /// Build a grid at the configured initial size.
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self::build(config, usize::from(config.initial_side))
    }

    /// Build a grid with `side` cells per row, clamped to `[1, max_side]`.
    /// Every cell starts at the configured default color and the ledger is
    /// empty.
    #[must_use]
    pub fn build(config: BoardConfig, side: usize) -> Self {
        let side = config.clamp_side(side);
        let len = usize::from(side) * usize::from(side);
        Self {
            cells: vec![Cell::new(config.default_color); len],
            side,
            config,
            ledger: Ledger::new(),
        }
    }

    /// Replace every cell and all history with a fresh grid. Returns the
    /// side length actually used after clamping.
    pub fn rebuild(&mut self, side: usize) -> u16 {
        *self = Self::build(self.config, side);
        if usize::from(self.side) != side {
            crate::warn!(requested = side, side = self.side, "grid size clamped");
        }
        crate::info!(side = self.side, cells = self.cells.len(), "grid rebuilt");
        self.side
    }

    /// Cells per row (and per column).
    #[must_use]
    pub fn side(&self) -> u16 {
        self.side
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a grid has at least one cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Configuration the grid was built with.
    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Read-only view of the history.
    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Look up a cell by id.
    #[must_use]
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.index())
    }

    /// Id of the cell at `(row, col)`, or `None` if out of bounds.
    #[must_use]
    pub fn cell_id(&self, row: u16, col: u16) -> Option<CellId> {
        (row < self.side && col < self.side).then(|| CellId::from_row_col(row, col, self.side))
    }

    /// Ids of every cell in row-major order.
    pub fn ids(&self) -> impl Iterator<Item = CellId> + use<> {
        (0..self.cells.len()).map(CellId::new)
    }

    /// Current colors in row-major order.
    #[must_use]
    pub fn colors(&self) -> Vec<Rgb> {
        self.cells.iter().map(Cell::color).collect()
    }

    /// One string per row, colors separated by spaces.
    #[must_use]
    pub fn to_hex_rows(&self) -> Vec<String> {
        self.cells
            .chunks(usize::from(self.side))
            .map(|row| {
                row.iter()
                    .map(|cell| cell.color().to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    // ── Writes ──────────────────────────────────────────────────────

    /// Paint one cell and record the transition.
    ///
    /// # Errors
    ///
    /// [`BoardError::CellOutOfBounds`] if `id` is not in the grid; nothing is
    /// written or recorded in that case.
    pub fn apply_color<R: Renderer + ?Sized>(
        &mut self,
        id: CellId,
        color: Rgb,
        renderer: &mut R,
    ) -> Result<ColorChange, BoardError> {
        self.commit(id, renderer, None, |cell| cell.apply_color(color))
    }

    /// Reset one cell to its default color and record the transition.
    ///
    /// # Errors
    ///
    /// [`BoardError::CellOutOfBounds`] if `id` is not in the grid.
    pub fn remove_color<R: Renderer + ?Sized>(
        &mut self,
        id: CellId,
        renderer: &mut R,
    ) -> Result<ColorChange, BoardError> {
        self.commit(id, renderer, None, Cell::remove_color)
    }

    /// Paint every cell as one grouped operation. Each cell is recorded,
    /// even when its color does not change, so a single undo reverts exactly
    /// this fill.
    pub fn fill_all<R: Renderer + ?Sized>(&mut self, color: Rgb, renderer: &mut R) -> GroupId {
        let group = self.ledger.begin_group();
        let span = crate::debug_span!("fill_all", cells = self.cells.len());
        let _guard = span.enter();

        for (index, cell) in self.cells.iter_mut().enumerate() {
            let id = CellId::new(index);
            let change = cell.apply_color(color);
            self.ledger.record(id, change, Some(group));
            renderer.color_changed(id, change.next);
        }
        crate::debug!(group = group.get(), %color, "grid filled");
        group
    }

    fn commit<R, F>(
        &mut self,
        id: CellId,
        renderer: &mut R,
        group: Option<GroupId>,
        write: F,
    ) -> Result<ColorChange, BoardError>
    where
        R: Renderer + ?Sized,
        F: FnOnce(&mut Cell) -> ColorChange,
    {
        let len = self.cells.len();
        let cell = self
            .cells
            .get_mut(id.index())
            .ok_or(BoardError::CellOutOfBounds { cell: id, len })?;
        let change = write(cell);
        if !self.ledger.record(id, change, group) {
            crate::trace!(cell = %id, "unchanged color not recorded");
        }
        renderer.color_changed(id, change.next);
        crate::trace!(cell = %id, color = %change.next, "cell painted");
        Ok(change)
    }

    // ── History ─────────────────────────────────────────────────────

    /// Revert the most recent logical step.
    ///
    /// # Errors
    ///
    /// [`BoardError::StaleHistory`] if the step references a cell outside
    /// the grid. This cannot happen through the public API and panics in
    /// debug builds.
    pub fn undo<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> Result<StepOutcome, BoardError> {
        let step = self.ledger.peek_undo();
        if step.is_empty() {
            crate::debug!("nothing to undo");
            return Ok(StepOutcome::Empty);
        }
        self.check_live(step)?;
        let grouped = step.iter().any(HistoryEntry::is_grouped);

        let entries = self.ledger.pop_undo();
        for entry in &entries {
            self.revert(entry.cell, entry.previous, renderer);
        }
        crate::debug!(cells = entries.len(), grouped, "undo");
        Ok(StepOutcome::Applied {
            cells: entries.len(),
            grouped,
        })
    }

    /// Reapply the most recently undone logical step.
    ///
    /// # Errors
    ///
    /// Same as [`Grid::undo`].
    pub fn redo<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> Result<StepOutcome, BoardError> {
        let step = self.ledger.peek_redo();
        if step.is_empty() {
            crate::debug!("nothing to redo");
            return Ok(StepOutcome::Empty);
        }
        self.check_live(step)?;
        let grouped = step.iter().any(HistoryEntry::is_grouped);

        let entries = self.ledger.pop_redo();
        for entry in &entries {
            self.revert(entry.cell, entry.next, renderer);
        }
        crate::debug!(cells = entries.len(), grouped, "redo");
        Ok(StepOutcome::Applied {
            cells: entries.len(),
            grouped,
        })
    }

    fn check_live(&self, step: &[HistoryEntry]) -> Result<(), BoardError> {
        let len = self.cells.len();
        match step.iter().find(|entry| entry.cell.index() >= len) {
            None => Ok(()),
            Some(stale) => {
                crate::error!(cell = %stale.cell, len, "history references a dead cell");
                if cfg!(debug_assertions) {
                    panic!("history references {} outside a grid of {len} cells", stale.cell);
                }
                Err(BoardError::StaleHistory {
                    cell: stale.cell,
                    len,
                })
            }
        }
    }

    fn revert<R: Renderer + ?Sized>(&mut self, id: CellId, color: Rgb, renderer: &mut R) {
        if let Some(cell) = self.cells.get_mut(id.index()) {
            cell.revert_color(color);
            renderer.color_changed(id, color);
        }
    }
}
