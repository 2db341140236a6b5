//! Renderer boundary.
//!
//! The core never draws. It tells a [`Renderer`] which cell changed and to
//! what color; how that becomes pixels, DOM nodes, or terminal cells is up to
//! the host.

use crate::cell::CellId;
use crate::color::Rgb;

/// Receiver of visual updates.
pub trait Renderer {
    /// Called after every successful cell write, including history replay
    /// and writes that did not change the color.
    fn color_changed(&mut self, cell: CellId, color: Rgb);

    /// Called after the grid has been rebuilt with `side` cells per row.
    fn grid_rebuilt(&mut self, side: u16) {
        let _ = side;
    }
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn color_changed(&mut self, cell: CellId, color: Rgb) {
        (**self).color_changed(cell, color);
    }

    fn grid_rebuilt(&mut self, side: u16) {
        (**self).grid_rebuilt(side);
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn color_changed(&mut self, cell: CellId, color: Rgb) {
        (**self).color_changed(cell, color);
    }

    fn grid_rebuilt(&mut self, side: u16) {
        (**self).grid_rebuilt(side);
    }
}

/// Renderer that ignores every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn color_changed(&mut self, _cell: CellId, _color: Rgb) {}
}

/// A notification captured by [`RecordingRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderEvent {
    ColorChanged { cell: CellId, color: Rgb },
    GridRebuilt { side: u16 },
}

/// Renderer that keeps every notification, for headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    events: Vec<RenderEvent>,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    /// Cell updates only, oldest first.
    pub fn color_changes(&self) -> impl Iterator<Item = (CellId, Rgb)> + '_ {
        self.events.iter().filter_map(|event| match *event {
            RenderEvent::ColorChanged { cell, color } => Some((cell, color)),
            RenderEvent::GridRebuilt { .. } => None,
        })
    }

    /// Drain the recorded notifications.
    pub fn take_events(&mut self) -> Vec<RenderEvent> {
        std::mem::take(&mut self.events)
    }

    /// Forget recorded notifications.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn color_changed(&mut self, cell: CellId, color: Rgb) {
        self.events.push(RenderEvent::ColorChanged { cell, color });
    }

    fn grid_rebuilt(&mut self, side: u16) {
        self.events.push(RenderEvent::GridRebuilt { side });
    }
}
