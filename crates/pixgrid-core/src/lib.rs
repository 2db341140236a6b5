#![forbid(unsafe_code)]

//! Render-agnostic pixel-grid paint engine.
//!
//! `pixgrid-core` is the model behind an interactive drawing grid: a square
//! array of colorable cells, the paint modes that compute new colors, and an
//! undo/redo ledger that treats bulk fills as one step. It emits color values
//! through the [`Renderer`] trait and never draws anything itself.
//!
//! # Primary responsibilities
//!
//! - **Color**: `#rgb`/`#rrggbb` parsing, HSL conversion, random colors.
//! - **Cell**: current and default color of one grid square.
//! - **History**: undo/redo stacks with explicit group boundaries.
//! - **Paint**: exclusive paint modes, lighten/darken shading, fill.
//! - **Grid**: `side × side` cells plus the ledger that refers to them.
//! - **Input**: click/drag gating for pointer events.
//! - **Board**: the facade a UI or test harness drives.
//!
//! # Example
//! ```
//! use pixgrid_core::{Board, BoardConfig, CellId, Rgb, StepOutcome};
//!
//! let mut board = Board::new(BoardConfig::default().with_initial_side(2));
//! board.set_picked_color("#ff0000".parse().unwrap());
//! board.paint(CellId::new(0)).unwrap();
//! assert_eq!(board.cell_color(CellId::new(0)), Some(Rgb::new(255, 0, 0)));
//!
//! assert!(matches!(board.undo().unwrap(), StepOutcome::Applied { cells: 1, .. }));
//! assert_eq!(board.undo().unwrap(), StepOutcome::Empty);
//! ```

pub mod board;
pub mod cell;
pub mod color;
pub mod config;
pub mod error;
pub mod grid;
pub mod history;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod replay;

pub use board::{Board, SharedBoard};
pub use cell::{Cell, CellId, ColorChange};
pub use color::{
    ColorParseError, Hsl, Rgb, hex_to_hsl, hsl_to_hex, random_color, random_color_with, rgb_to_hex,
};
pub use config::BoardConfig;
pub use error::BoardError;
pub use grid::Grid;
pub use history::{GroupId, HistoryEntry, Ledger, StepOutcome};
pub use input::PointerDispatch;
pub use paint::{PaintEngine, PaintMode, PaintOutcome, Shade, shade_color};
pub use render::{NullRenderer, RecordingRenderer, RenderEvent, Renderer};
pub use replay::{Command, ReplayError, ReplaySummary, replay_script};

#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, trace, warn};
