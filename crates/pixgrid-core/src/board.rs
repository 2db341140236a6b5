//! Board facade: one grid, one engine, one pointer, one renderer.
//!
//! [`Board`] is what a UI or a headless harness talks to. It wires input
//! dispatch, mode controls, and resize requests to the core and forwards
//! every visible change to its [`Renderer`]. [`SharedBoard`] puts a board
//! behind a single mutex for callers that drive it from several threads.

use std::sync::{Arc, Mutex, PoisonError};

use crate::cell::{CellId, ColorChange};
use crate::color::Rgb;
use crate::config::BoardConfig;
use crate::error::BoardError;
use crate::grid::Grid;
use crate::history::StepOutcome;
use crate::input::PointerDispatch;
use crate::paint::{PaintEngine, PaintMode, PaintOutcome};
use crate::render::{NullRenderer, Renderer};

/// A paintable board and the renderer it reports to.
#[derive(Debug)]
pub struct Board<R: Renderer = NullRenderer> {
    grid: Grid,
    engine: PaintEngine,
    pointer: PointerDispatch,
    renderer: R,
}

impl Board<NullRenderer> {
    /// Headless board at the configured initial size.
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self::with_renderer(config, NullRenderer)
    }
}

impl Default for Board<NullRenderer> {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl<R: Renderer> Board<R> {
    #[must_use]
    pub fn with_renderer(config: BoardConfig, renderer: R) -> Self {
        Self::with_engine(config, PaintEngine::new(), renderer)
    }

    /// Board with a caller-supplied engine, e.g. one seeded for replay.
    #[must_use]
    pub fn with_engine(config: BoardConfig, engine: PaintEngine, renderer: R) -> Self {
        Self {
            grid: Grid::new(config),
            engine,
            pointer: PointerDispatch::new(),
            renderer,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn engine(&self) -> &PaintEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut PaintEngine {
        &mut self.engine
    }

    #[must_use]
    pub fn pointer(&self) -> PointerDispatch {
        self.pointer
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        self.grid.config()
    }

    #[must_use]
    pub fn cell_color(&self, cell: CellId) -> Option<Rgb> {
        self.grid.cell(cell).map(|c| c.color())
    }

    /// Row-major copy of every cell color, for export.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Rgb> {
        self.grid.colors()
    }

    /// Rebuild the grid at `side` (clamped). Cells, history, and pointer
    /// state are all discarded. Returns the side actually used.
    pub fn request_resize(&mut self, side: usize) -> u16 {
        let side = self.grid.rebuild(side);
        self.pointer.reset();
        self.renderer.grid_rebuilt(side);
        side
    }

    pub fn set_mode(&mut self, mode: PaintMode) {
        self.engine.set_mode(mode);
    }

    pub fn toggle_mode(&mut self, mode: PaintMode) -> PaintMode {
        self.engine.toggle_mode(mode)
    }

    pub fn set_picked_color(&mut self, color: Rgb) {
        self.engine.set_picked_color(color);
    }

    pub fn set_click_mode(&mut self, enabled: bool) {
        self.engine.set_click_mode(enabled);
    }

    /// # Errors
    ///
    /// [`BoardError::CellOutOfBounds`] for a cell outside the grid.
    pub fn on_pointer_enter(&mut self, cell: CellId) -> Result<Option<PaintOutcome>, BoardError> {
        self.pointer
            .on_pointer_enter(&mut self.engine, &mut self.grid, cell, &mut self.renderer)
    }

    /// # Errors
    ///
    /// [`BoardError::CellOutOfBounds`] for a cell outside the grid.
    pub fn on_pointer_down(&mut self, cell: CellId) -> Result<Option<PaintOutcome>, BoardError> {
        self.pointer
            .on_pointer_down(&mut self.engine, &mut self.grid, cell, &mut self.renderer)
    }

    pub fn on_pointer_up(&mut self) {
        self.pointer.on_pointer_up();
    }

    /// Paint `cell` with the active mode, ignoring pointer gating.
    ///
    /// # Errors
    ///
    /// [`BoardError::CellOutOfBounds`] for a cell outside the grid.
    pub fn paint(&mut self, cell: CellId) -> Result<PaintOutcome, BoardError> {
        self.engine.paint(&mut self.grid, cell, &mut self.renderer)
    }

    /// Write `color` to one cell regardless of the active mode.
    ///
    /// # Errors
    ///
    /// [`BoardError::CellOutOfBounds`] for a cell outside the grid.
    pub fn apply_color(&mut self, cell: CellId, color: Rgb) -> Result<ColorChange, BoardError> {
        self.grid.apply_color(cell, color, &mut self.renderer)
    }

    pub fn fill_all(&mut self, color: Rgb) -> PaintOutcome {
        self.engine.fill_all(&mut self.grid, color, &mut self.renderer)
    }

    /// # Errors
    ///
    /// [`BoardError::StaleHistory`] if the ledger refers to a missing cell.
    pub fn undo(&mut self) -> Result<StepOutcome, BoardError> {
        self.grid.undo(&mut self.renderer)
    }

    /// # Errors
    ///
    /// [`BoardError::StaleHistory`] if the ledger refers to a missing cell.
    pub fn redo(&mut self) -> Result<StepOutcome, BoardError> {
        self.grid.redo(&mut self.renderer)
    }
}

/// A [`Board`] behind one mutex. Clones share the same board.
#[derive(Debug)]
pub struct SharedBoard<R: Renderer = NullRenderer> {
    inner: Arc<Mutex<Board<R>>>,
}

impl<R: Renderer> Clone for SharedBoard<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Renderer> From<Board<R>> for SharedBoard<R> {
    fn from(board: Board<R>) -> Self {
        Self::new(board)
    }
}

impl<R: Renderer> SharedBoard<R> {
    #[must_use]
    pub fn new(board: Board<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(board)),
        }
    }

    /// Run `f` with exclusive access to the board.
    ///
    /// Board operations never leave partial state, so a lock poisoned by a
    /// panicking holder is taken over rather than propagated.
    pub fn with<T>(&self, f: impl FnOnce(&mut Board<R>) -> T) -> T {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// # Errors
    ///
    /// See [`Board::paint`].
    pub fn paint(&self, cell: CellId) -> Result<PaintOutcome, BoardError> {
        self.with(|board| board.paint(cell))
    }

    pub fn fill_all(&self, color: Rgb) -> PaintOutcome {
        self.with(|board| board.fill_all(color))
    }

    /// # Errors
    ///
    /// See [`Board::undo`].
    pub fn undo(&self) -> Result<StepOutcome, BoardError> {
        self.with(Board::undo)
    }

    /// # Errors
    ///
    /// See [`Board::redo`].
    pub fn redo(&self) -> Result<StepOutcome, BoardError> {
        self.with(Board::redo)
    }

    pub fn request_resize(&self, side: usize) -> u16 {
        self.with(|board| board.request_resize(side))
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<Rgb> {
        self.with(|board| board.snapshot())
    }
}
