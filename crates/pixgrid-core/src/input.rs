//! Pointer dispatch for painting.
//!
//! Tracks whether the pointer button is held and decides if a pointer event
//! over a cell should paint. In hover mode every enter paints; in click mode
//! an enter paints only while the button is held. A press always paints the
//! cell under the pointer. Fill mode acts on presses only, so dragging across
//! the grid fills it once.

use crate::cell::CellId;
use crate::error::BoardError;
use crate::grid::Grid;
use crate::paint::{PaintEngine, PaintMode, PaintOutcome};
use crate::render::Renderer;

/// Held-button state for drag painting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerDispatch {
    held: bool,
}

impl PointerDispatch {
    #[must_use]
    pub const fn new() -> Self {
        Self { held: false }
    }

    #[must_use]
    pub const fn is_held(&self) -> bool {
        self.held
    }

    /// Whether an enter event should paint under the given click mode.
    #[must_use]
    pub const fn should_paint(&self, click_mode: bool) -> bool {
        !click_mode || self.held
    }

    /// Button pressed over `cell`: start a drag and paint it.
    ///
    /// # Errors
    ///
    /// Propagates [`BoardError::CellOutOfBounds`] from the engine. The button
    /// is still considered held.
    pub fn on_pointer_down<R: Renderer + ?Sized>(
        &mut self,
        engine: &mut PaintEngine,
        grid: &mut Grid,
        cell: CellId,
        renderer: &mut R,
    ) -> Result<Option<PaintOutcome>, BoardError> {
        self.held = true;
        engine.paint(grid, cell, renderer).map(Some)
    }

    /// Pointer moved onto `cell`. Paints unless click mode is on and the
    /// button is up, or the engine is in [`PaintMode::Fill`]; returns
    /// `Ok(None)` when gated.
    ///
    /// # Errors
    ///
    /// Propagates [`BoardError::CellOutOfBounds`] from the engine.
    pub fn on_pointer_enter<R: Renderer + ?Sized>(
        &mut self,
        engine: &mut PaintEngine,
        grid: &mut Grid,
        cell: CellId,
        renderer: &mut R,
    ) -> Result<Option<PaintOutcome>, BoardError> {
        if engine.mode() == PaintMode::Fill || !self.should_paint(engine.click_mode()) {
            return Ok(None);
        }
        engine.paint(grid, cell, renderer).map(Some)
    }

    /// Button released anywhere.
    pub fn on_pointer_up(&mut self) {
        self.held = false;
    }

    /// Forget any held button, e.g. after the grid is rebuilt.
    pub fn reset(&mut self) {
        self.held = false;
    }
}
