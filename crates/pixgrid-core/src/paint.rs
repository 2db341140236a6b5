#![forbid(unsafe_code)]

//! Paint engine: turns the active mode into a color and commits it.
//!
//! The engine holds the tool state a paint UI exposes: the exclusive
//! [`PaintMode`], the picked color, and the click/drag toggle. It never
//! tracks pointer state; the input layer decides *when* to paint and the
//! engine decides *what* to paint.
//!
//! # Example
//! ```
//! use pixgrid_core::{BoardConfig, CellId, Grid, NullRenderer, PaintEngine, PaintMode, Rgb};
//!
//! let mut grid = Grid::build(BoardConfig::default(), 2);
//! let mut engine = PaintEngine::with_seed(1);
//! engine.set_picked_color(Rgb::new(255, 0, 0));
//! engine.paint(&mut grid, CellId::new(0), &mut NullRenderer).unwrap();
//! assert_eq!(grid.cell(CellId::new(0)).unwrap().color(), Rgb::new(255, 0, 0));
//!
//! engine.set_mode(PaintMode::Eraser);
//! engine.paint(&mut grid, CellId::new(0), &mut NullRenderer).unwrap();
//! assert!(grid.cell(CellId::new(0)).unwrap().is_blank());
//! ```

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cell::{CellId, ColorChange};
use crate::color::{Rgb, random_color_with};
use crate::error::BoardError;
use crate::grid::Grid;
use crate::history::GroupId;
use crate::render::Renderer;

/// Fraction of the current lightness added or removed per shading stroke.
const SHADE_STEP: f64 = 0.1;

/// Active paint mode. Exactly one is active; [`PaintMode::Normal`] is the
/// default when no special tool is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaintMode {
    /// Apply the picked color.
    #[default]
    Normal,
    /// Apply a fresh random color on every stroke.
    Rainbow,
    /// Raise lightness by 10% of its current value.
    Lighten,
    /// Lower lightness by 10% of its current value.
    Darken,
    /// Reset to the cell's default color.
    Eraser,
    /// Paint the whole grid with the picked color.
    Fill,
}

impl PaintMode {
    /// Every mode, in toolbar order.
    pub const ALL: [Self; 6] = [
        Self::Normal,
        Self::Rainbow,
        Self::Lighten,
        Self::Darken,
        Self::Eraser,
        Self::Fill,
    ];

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "normal" | "color" => Some(Self::Normal),
            "rainbow" | "random" => Some(Self::Rainbow),
            "lighten" => Some(Self::Lighten),
            "darken" => Some(Self::Darken),
            "eraser" | "erase" => Some(Self::Eraser),
            "fill" => Some(Self::Fill),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Rainbow => "rainbow",
            Self::Lighten => "lighten",
            Self::Darken => "darken",
            Self::Eraser => "eraser",
            Self::Fill => "fill",
        }
    }

    /// Shading direction, for the lighten/darken modes.
    #[must_use]
    pub const fn shade(self) -> Option<Shade> {
        match self {
            Self::Lighten => Some(Shade::Lighten),
            Self::Darken => Some(Shade::Darken),
            _ => None,
        }
    }
}

/// Direction of a shading stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shade {
    Lighten,
    Darken,
}

impl Shade {
    /// New lightness for `lightness` (percent), clamped to `[0, 100]`.
    ///
    /// The step is multiplicative, so black cannot be lightened and dark
    /// colors move by ever smaller amounts.
    #[must_use]
    pub fn apply_to(self, lightness: f64) -> f64 {
        match self {
            Self::Lighten => (lightness + lightness * SHADE_STEP).min(100.0),
            Self::Darken => (lightness - lightness * SHADE_STEP).max(0.0),
        }
    }
}

/// Lighten or darken `color` in HSL space.
#[must_use]
pub fn shade_color(color: Rgb, shade: Shade) -> Rgb {
    let hsl = color.to_hsl();
    hsl.with_lightness(shade.apply_to(hsl.l)).to_rgb()
}

/// What a paint stroke did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintOutcome {
    /// One cell was written.
    Painted { cell: CellId, change: ColorChange },
    /// Every cell was written as one grouped operation.
    Filled { group: GroupId, cells: usize },
}

/// Tool state and color computation.
#[derive(Debug, Clone)]
pub struct PaintEngine {
    mode: PaintMode,
    picked: Rgb,
    click_mode: bool,
    rng: StdRng,
}

impl Default for PaintEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PaintEngine {
    /// Engine in [`PaintMode::Normal`] with black picked and an OS-seeded RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Engine whose rainbow colors are reproducible from `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            mode: PaintMode::Normal,
            picked: Rgb::BLACK,
            click_mode: false,
            rng,
        }
    }

    #[must_use]
    pub fn mode(&self) -> PaintMode {
        self.mode
    }

    /// Activate `mode`, deactivating whichever mode was active.
    pub fn set_mode(&mut self, mode: PaintMode) {
        if self.mode != mode {
            crate::debug!(from = self.mode.as_str(), to = mode.as_str(), "paint mode changed");
        }
        self.mode = mode;
    }

    /// Activate `mode`, or fall back to [`PaintMode::Normal`] if it is
    /// already active. Returns the resulting mode.
    pub fn toggle_mode(&mut self, mode: PaintMode) -> PaintMode {
        let next = if self.mode == mode {
            PaintMode::Normal
        } else {
            mode
        };
        self.set_mode(next);
        next
    }

    #[must_use]
    pub fn picked_color(&self) -> Rgb {
        self.picked
    }

    pub fn set_picked_color(&mut self, color: Rgb) {
        self.picked = color;
    }

    /// Whether strokes need the pointer button held (click mode) rather than
    /// plain hovering.
    #[must_use]
    pub fn click_mode(&self) -> bool {
        self.click_mode
    }

    pub fn set_click_mode(&mut self, enabled: bool) {
        self.click_mode = enabled;
    }

    /// Flip click mode; returns the new value.
    pub fn toggle_click_mode(&mut self) -> bool {
        self.click_mode = !self.click_mode;
        self.click_mode
    }

    /// Apply the active mode to `cell`.
    ///
    /// # Errors
    ///
    /// [`BoardError::CellOutOfBounds`] if `cell` is not in `grid`; nothing is
    /// painted or recorded.
    pub fn paint<R: Renderer + ?Sized>(
        &mut self,
        grid: &mut Grid,
        cell: CellId,
        renderer: &mut R,
    ) -> Result<PaintOutcome, BoardError> {
        let current = grid
            .cell(cell)
            .ok_or(BoardError::CellOutOfBounds {
                cell,
                len: grid.len(),
            })?
            .color();

        let change = match self.mode {
            PaintMode::Normal => grid.apply_color(cell, self.picked, renderer)?,
            PaintMode::Rainbow => {
                let color = random_color_with(&mut self.rng);
                grid.apply_color(cell, color, renderer)?
            }
            mode @ (PaintMode::Lighten | PaintMode::Darken) => {
                let shaded = mode
                    .shade()
                    .map_or(current, |shade| shade_color(current, shade));
                grid.apply_color(cell, shaded, renderer)?
            }
            PaintMode::Eraser => grid.remove_color(cell, renderer)?,
            PaintMode::Fill => return Ok(self.fill_all(grid, self.picked, renderer)),
        };
        Ok(PaintOutcome::Painted { cell, change })
    }

    /// Paint every cell with `color` as a single undo step.
    pub fn fill_all<R: Renderer + ?Sized>(
        &mut self,
        grid: &mut Grid,
        color: Rgb,
        renderer: &mut R,
    ) -> PaintOutcome {
        let group = grid.fill_all(color, renderer);
        PaintOutcome::Filled {
            group,
            cells: grid.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;
    use crate::render::NullRenderer;

    const RED: Rgb = Rgb::new(255, 0, 0);

    fn grid(side: usize) -> Grid {
        Grid::build(BoardConfig::default(), side)
    }

    fn color_at(grid: &Grid, index: usize) -> Rgb {
        grid.cell(CellId::new(index)).unwrap().color()
    }

    #[test]
    fn default_engine_state() {
        let engine = PaintEngine::with_seed(0);
        assert_eq!(engine.mode(), PaintMode::Normal);
        assert_eq!(engine.picked_color(), Rgb::BLACK);
        assert!(!engine.click_mode());
    }

    #[test]
    fn modes_are_exclusive() {
        let mut engine = PaintEngine::with_seed(0);
        engine.set_mode(PaintMode::Lighten);
        engine.set_mode(PaintMode::Rainbow);
        assert_eq!(engine.mode(), PaintMode::Rainbow);
        assert_eq!(engine.mode().shade(), None);
    }

    #[test]
    fn toggle_returns_to_normal() {
        let mut engine = PaintEngine::with_seed(0);
        assert_eq!(engine.toggle_mode(PaintMode::Eraser), PaintMode::Eraser);
        assert_eq!(engine.toggle_mode(PaintMode::Darken), PaintMode::Darken);
        assert_eq!(engine.toggle_mode(PaintMode::Darken), PaintMode::Normal);
    }

    #[test]
    fn click_mode_is_independent_of_mode() {
        let mut engine = PaintEngine::with_seed(0);
        engine.set_mode(PaintMode::Rainbow);
        assert!(engine.toggle_click_mode());
        assert_eq!(engine.mode(), PaintMode::Rainbow);
        engine.set_mode(PaintMode::Normal);
        assert!(engine.click_mode());
        engine.set_click_mode(false);
        assert!(!engine.click_mode());
    }

    #[test]
    fn mode_names_round_trip() {
        for mode in PaintMode::ALL {
            assert_eq!(PaintMode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(PaintMode::parse(" ERASE "), Some(PaintMode::Eraser));
        assert_eq!(PaintMode::parse("spray"), None);
    }

    #[test]
    fn normal_paints_picked_color() {
        let mut g = grid(2);
        let mut engine = PaintEngine::with_seed(0);
        engine.set_picked_color(RED);
        let outcome = engine.paint(&mut g, CellId::new(3), &mut NullRenderer).unwrap();
        assert_eq!(
            outcome,
            PaintOutcome::Painted {
                cell: CellId::new(3),
                change: ColorChange {
                    previous: Rgb::WHITE,
                    next: RED
                }
            }
        );
        assert_eq!(color_at(&g, 3), RED);
    }

    #[test]
    fn rainbow_is_reproducible_with_seed() {
        let mut a = grid(2);
        let mut b = grid(2);
        let mut first = PaintEngine::with_seed(9);
        let mut second = PaintEngine::with_seed(9);
        first.set_mode(PaintMode::Rainbow);
        second.set_mode(PaintMode::Rainbow);
        for i in 0..4 {
            first.paint(&mut a, CellId::new(i), &mut NullRenderer).unwrap();
            second.paint(&mut b, CellId::new(i), &mut NullRenderer).unwrap();
        }
        assert_eq!(a.colors(), b.colors());
    }

    #[test]
    fn shade_step_is_multiplicative() {
        assert_eq!(Shade::Lighten.apply_to(50.0), 55.0);
        assert_eq!(Shade::Darken.apply_to(50.0), 45.0);
        assert_eq!(Shade::Lighten.apply_to(95.0), 100.0);
        assert_eq!(Shade::Lighten.apply_to(0.0), 0.0);
        assert_eq!(Shade::Darken.apply_to(0.0), 0.0);
    }

    #[test]
    fn shade_color_moves_lightness() {
        // #ff0000 has lightness 50; the result is quantized back to RGB.
        let lighter = shade_color(RED, Shade::Lighten).lightness();
        let darker = shade_color(RED, Shade::Darken).lightness();
        assert!((lighter - 55.0).abs() <= 0.3, "lighter = {lighter}");
        assert!((darker - 45.0).abs() <= 0.3, "darker = {darker}");
        assert_eq!(shade_color(Rgb::BLACK, Shade::Lighten), Rgb::BLACK);
        assert_eq!(shade_color(Rgb::WHITE, Shade::Lighten), Rgb::WHITE);
    }

    #[test]
    fn shading_mode_uses_current_cell_color() {
        let mut g = grid(1);
        let mut engine = PaintEngine::with_seed(0);
        engine.set_picked_color(RED);
        engine.paint(&mut g, CellId::new(0), &mut NullRenderer).unwrap();
        engine.set_mode(PaintMode::Darken);
        engine.paint(&mut g, CellId::new(0), &mut NullRenderer).unwrap();
        let darker = color_at(&g, 0);
        assert_eq!(darker, shade_color(RED, Shade::Darken));
        assert!(darker.lightness() < 50.0);

        engine.set_mode(PaintMode::Lighten);
        engine.paint(&mut g, CellId::new(0), &mut NullRenderer).unwrap();
        assert_eq!(color_at(&g, 0), shade_color(darker, Shade::Lighten));
        assert!(color_at(&g, 0).lightness() > darker.lightness());
        assert_eq!(g.ledger().undo_len(), 3);
    }

    #[test]
    fn eraser_restores_default() {
        let mut g = grid(1);
        let mut engine = PaintEngine::with_seed(0);
        engine.set_picked_color(RED);
        engine.paint(&mut g, CellId::new(0), &mut NullRenderer).unwrap();
        engine.set_mode(PaintMode::Eraser);
        engine.paint(&mut g, CellId::new(0), &mut NullRenderer).unwrap();
        assert_eq!(color_at(&g, 0), Rgb::WHITE);
    }

    #[test]
    fn fill_mode_paints_everything_as_one_step() {
        let mut g = grid(3);
        let mut engine = PaintEngine::with_seed(0);
        engine.set_picked_color(RED);
        engine.set_mode(PaintMode::Fill);
        let outcome = engine.paint(&mut g, CellId::new(4), &mut NullRenderer).unwrap();
        assert!(matches!(outcome, PaintOutcome::Filled { cells: 9, .. }));
        assert!(g.colors().iter().all(|&c| c == RED));
        assert_eq!(g.undo(&mut NullRenderer).unwrap().cells(), 9);
    }

    #[test]
    fn out_of_bounds_paint_records_nothing() {
        let mut g = grid(2);
        for mode in PaintMode::ALL {
            let mut engine = PaintEngine::with_seed(0);
            engine.set_mode(mode);
            assert!(engine.paint(&mut g, CellId::new(4), &mut NullRenderer).is_err());
        }
        assert!(!g.ledger().can_undo());
        assert!(g.cells().iter().all(crate::Cell::is_blank));
    }
}
