#![forbid(unsafe_code)]

//! Board configuration.
//!
//! Defaults can be overridden through environment variables. Values that do
//! not parse fall back to the defaults; sizes are clamped, never rejected.

use crate::color::Rgb;

/// Environment variable overriding the largest allowed side length.
const ENV_MAX_SIDE: &str = "PIXGRID_MAX_SIDE";
/// Environment variable overriding the side length of the first grid.
const ENV_INITIAL_SIDE: &str = "PIXGRID_INITIAL_SIDE";
/// Environment variable overriding the blank cell color (`#rgb` / `#rrggbb`).
const ENV_DEFAULT_COLOR: &str = "PIXGRID_DEFAULT_COLOR";

/// Default upper bound on cells per side.
pub const DEFAULT_MAX_SIDE: u16 = 100;
/// Default side length of the first grid.
pub const DEFAULT_INITIAL_SIDE: u16 = 16;
/// Hard ceiling for `max_side`.
pub const SIDE_LIMIT: u16 = 256;

/// Grid sizing and blank color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    /// Largest accepted side length; resize requests are clamped to it.
    pub max_side: u16,
    /// Side length of the grid built at startup.
    pub initial_side: u16,
    /// Color of a blank cell.
    pub default_color: Rgb,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            max_side: DEFAULT_MAX_SIDE,
            initial_side: DEFAULT_INITIAL_SIDE,
            default_color: Rgb::WHITE,
        }
    }
}

impl BoardConfig {
    /// Read overrides from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Read overrides using a custom environment lookup (for tests).
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = env_u16(&get_env, ENV_MAX_SIDE) {
            config = config.with_max_side(value);
        }
        if let Some(value) = env_u16(&get_env, ENV_INITIAL_SIDE) {
            config = config.with_initial_side(value);
        }
        if let Some(value) = get_env(ENV_DEFAULT_COLOR)
            && let Ok(color) = value.trim().parse::<Rgb>()
        {
            config.default_color = color;
        }
        config.normalized()
    }

    /// Set the largest side length, clamped to `[1, SIDE_LIMIT]`.
    #[must_use]
    pub fn with_max_side(mut self, max_side: u16) -> Self {
        self.max_side = max_side.clamp(1, SIDE_LIMIT);
        self.normalized()
    }

    /// Set the startup side length, clamped to `[1, max_side]`.
    #[must_use]
    pub fn with_initial_side(mut self, side: u16) -> Self {
        self.initial_side = side;
        self.normalized()
    }

    /// Set the blank cell color.
    #[must_use]
    pub fn with_default_color(mut self, color: Rgb) -> Self {
        self.default_color = color;
        self
    }

    /// Clamp a requested side length into `[1, max_side]`.
    #[must_use]
    pub fn clamp_side(&self, requested: usize) -> u16 {
        requested.clamp(1, usize::from(self.max_side)) as u16
    }

    fn normalized(mut self) -> Self {
        self.max_side = self.max_side.clamp(1, SIDE_LIMIT);
        self.initial_side = self.clamp_side(usize::from(self.initial_side));
        self
    }
}

fn env_u16<F>(get_env: &F, key: &str) -> Option<u16>
where
    F: Fn(&str) -> Option<String>,
{
    get_env(key)?.trim().parse().ok()
}
