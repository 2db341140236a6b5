//! Line-oriented session scripts for driving a headless [`Board`].
//!
//! One command per line; blank lines and `#` comments are skipped:
//!
//! ```text
//! resize 2
//! color #ff0000
//! paint 0
//! mode rainbow
//! click on
//! down 1
//! enter 2
//! up
//! fill #00ff00
//! undo
//! redo
//! ```
//!
//! A line that starts with `#` followed by hex digits is still a comment;
//! colors only appear as arguments.

use std::fmt;

use crate::board::Board;
use crate::cell::CellId;
use crate::color::Rgb;
use crate::error::BoardError;
use crate::history::StepOutcome;
use crate::paint::{PaintMode, PaintOutcome};
use crate::render::Renderer;

/// One parsed script line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Resize(usize),
    Color(Rgb),
    Mode(PaintMode),
    Toggle(PaintMode),
    Click(bool),
    Down(CellId),
    Enter(CellId),
    Up,
    Paint(CellId),
    Fill(Rgb),
    Undo,
    Redo,
}

impl Command {
    /// Parse one line. `Ok(None)` for blank and comment lines.
    ///
    /// # Errors
    ///
    /// A human-readable message for an unknown verb or a bad argument.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or_default();
        let arg = words.next();
        if let Some(extra) = words.next() {
            return Err(format!("unexpected argument {extra:?}"));
        }

        let command = match (verb, arg) {
            ("resize", Some(n)) => Self::Resize(parse_number(n)?),
            ("color", Some(hex)) => Self::Color(parse_color(hex)?),
            ("mode", Some(name)) => Self::Mode(parse_mode(name)?),
            ("toggle", Some(name)) => Self::Toggle(parse_mode(name)?),
            ("click", Some("on")) => Self::Click(true),
            ("click", Some("off")) => Self::Click(false),
            ("click", Some(other)) => return Err(format!("click expects on|off, got {other:?}")),
            ("down", Some(i)) => Self::Down(CellId::new(parse_number(i)?)),
            ("enter", Some(i)) => Self::Enter(CellId::new(parse_number(i)?)),
            ("paint", Some(i)) => Self::Paint(CellId::new(parse_number(i)?)),
            ("fill", Some(hex)) => Self::Fill(parse_color(hex)?),
            ("up", None) => Self::Up,
            ("undo", None) => Self::Undo,
            ("redo", None) => Self::Redo,
            ("up" | "undo" | "redo", Some(extra)) => {
                return Err(format!("{verb} takes no argument, got {extra:?}"));
            }
            (
                "resize" | "color" | "mode" | "toggle" | "click" | "down" | "enter" | "paint"
                | "fill",
                None,
            ) => return Err(format!("{verb} requires an argument")),
            _ => return Err(format!("unknown command {verb:?}")),
        };
        Ok(Some(command))
    }
}

fn parse_number(value: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| format!("invalid number {value:?}"))
}

fn parse_color(value: &str) -> Result<Rgb, String> {
    value
        .parse::<Rgb>()
        .map_err(|err| format!("invalid color {value:?}: {err}"))
}

fn parse_mode(value: &str) -> Result<PaintMode, String> {
    PaintMode::parse(value).ok_or_else(|| format!("unknown mode {value:?}"))
}

/// A script line that could not be parsed or executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayError {
    /// 1-based line number.
    pub line: usize,
    pub message: String,
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ReplayError {}

/// Counters gathered while replaying a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Commands executed (comments and blanks excluded).
    pub commands: usize,
    /// Cell writes, including undo/redo reverts.
    pub cells_written: usize,
    /// Pointer enters suppressed by click mode or fill mode.
    pub gated: usize,
    /// Undo/redo requests that found an empty stack.
    pub empty_steps: usize,
}

impl ReplaySummary {
    fn paint(&mut self, outcome: Option<PaintOutcome>) {
        match outcome {
            Some(PaintOutcome::Painted { change, .. }) => {
                if !change.is_noop() {
                    self.cells_written += 1;
                }
            }
            Some(PaintOutcome::Filled { cells, .. }) => self.cells_written += cells,
            None => self.gated += 1,
        }
    }

    fn step(&mut self, outcome: StepOutcome) {
        match outcome {
            StepOutcome::Empty => self.empty_steps += 1,
            StepOutcome::Applied { cells, .. } => self.cells_written += cells,
        }
    }
}

/// Run `script` against `board`, stopping at the first bad line.
///
/// # Errors
///
/// [`ReplayError`] naming the failing line, for parse errors and for
/// [`BoardError`]s such as painting outside the grid. Commands before the
/// failing line stay applied.
pub fn replay_script<R: Renderer>(
    board: &mut Board<R>,
    script: &str,
) -> Result<ReplaySummary, ReplayError> {
    let mut summary = ReplaySummary::default();
    for (index, text) in script.lines().enumerate() {
        let line = index + 1;
        let Some(command) = Command::parse(text).map_err(|message| ReplayError { line, message })?
        else {
            continue;
        };
        execute(board, command, &mut summary).map_err(|err| ReplayError {
            line,
            message: err.to_string(),
        })?;
        summary.commands += 1;
    }
    crate::debug!(
        commands = summary.commands,
        cells_written = summary.cells_written,
        "script replayed"
    );
    Ok(summary)
}

fn execute<R: Renderer>(
    board: &mut Board<R>,
    command: Command,
    summary: &mut ReplaySummary,
) -> Result<(), BoardError> {
    match command {
        Command::Resize(side) => {
            board.request_resize(side);
        }
        Command::Color(color) => board.set_picked_color(color),
        Command::Mode(mode) => board.set_mode(mode),
        Command::Toggle(mode) => {
            board.toggle_mode(mode);
        }
        Command::Click(enabled) => board.set_click_mode(enabled),
        Command::Down(cell) => summary.paint(board.on_pointer_down(cell)?),
        Command::Enter(cell) => summary.paint(board.on_pointer_enter(cell)?),
        Command::Up => board.on_pointer_up(),
        Command::Paint(cell) => summary.paint(Some(board.paint(cell)?)),
        Command::Fill(color) => summary.paint(Some(board.fill_all(color))),
        Command::Undo => summary.step(board.undo()?),
        Command::Redo => summary.step(board.redo()?),
    }
    Ok(())
}
