#![forbid(unsafe_code)]

//! Color codec: RGB triples, `#rrggbb` hex strings, and HSL.
//!
//! [`Rgb`] is the canonical color value stored in cells. Its text form is
//! always lowercase `#rrggbb`, so two colors compare equal exactly when their
//! hex strings do. [`Hsl`] is only used transiently by the shading modes.
//!
//! # Example
//! ```
//! use pixgrid_core::color::{Rgb, hex_to_hsl, hsl_to_hex, rgb_to_hex};
//!
//! assert_eq!(rgb_to_hex(255, 136, 0), "#ff8800");
//!
//! let hsl = hex_to_hsl("#f80").unwrap();
//! assert_eq!(hsl.hue_degrees(), 32);
//! assert_eq!(hsl_to_hex(hsl.h, hsl.s, hsl.l), "#ff8800");
//!
//! let red: Rgb = "#FF0000".parse().unwrap();
//! assert_eq!(red.to_string(), "#ff0000");
//! ```

use std::fmt;
use std::str::FromStr;

use rand::Rng;

/// RGB color (opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel (0–255).
    pub r: u8,
    /// Green channel (0–255).
    pub g: u8,
    /// Blue channel (0–255).
    pub b: u8,
}

impl Rgb {
    /// `#000000`.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// `#ffffff`.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a new RGB color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` form.
    #[must_use]
    pub fn to_hex(self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }

    /// Convert to HSL.
    ///
    /// Saturation and lightness are percentages rounded to one decimal. Hue is
    /// kept to a tenth of a degree so that [`Hsl::to_rgb`] lands back on the
    /// same channels; see [`Hsl::hue_degrees`] for the whole-degree value.
    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let cmax = r.max(g).max(b);
        let cmin = r.min(g).min(b);
        let delta = cmax - cmin;

        let sextant = if delta == 0.0 {
            0.0
        } else if cmax == r {
            ((g - b) / delta) % 6.0
        } else if cmax == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        let mut h = round_tenth(sextant * 60.0);
        if h < 0.0 {
            h += 360.0;
        }
        if h >= 360.0 {
            h -= 360.0;
        }

        let l = (cmax + cmin) / 2.0;
        let s = if delta == 0.0 {
            0.0
        } else {
            delta / (1.0 - (2.0 * l - 1.0).abs())
        };

        Hsl {
            h,
            s: round_tenth(s * 100.0),
            l: round_tenth(l * 100.0),
        }
    }

    /// HSL lightness of this color, in percent.
    #[must_use]
    pub fn lightness(self) -> f64 {
        self.to_hsl().l
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    /// Parse `#rgb` or `#rrggbb` (either case). Shorthand digits are doubled.
    fn from_str(hex: &str) -> Result<Self, Self::Err> {
        let digits = hex.strip_prefix('#').ok_or(ColorParseError::MissingHash)?;
        if digits.len() != 3 && digits.len() != 6 {
            return Err(ColorParseError::InvalidLength(hex.chars().count()));
        }

        let nibbles = digits
            .chars()
            .map(|ch| {
                ch.to_digit(16)
                    .map(|d| d as u8)
                    .ok_or(ColorParseError::InvalidDigit(ch))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        match *nibbles.as_slice() {
            [r, g, b] => Ok(Self::new(r * 17, g * 17, b * 17)),
            [r1, r2, g1, g2, b1, b2] => Ok(Self::new(
                (r1 << 4) | r2,
                (g1 << 4) | g2,
                (b1 << 4) | b2,
            )),
            _ => Err(ColorParseError::InvalidLength(hex.chars().count())),
        }
    }
}

/// HSL color: hue in degrees `[0, 360)`, saturation and lightness in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in degrees.
    pub h: f64,
    /// Saturation in percent.
    pub s: f64,
    /// Lightness in percent.
    pub l: f64,
}

impl Hsl {
    /// Create an HSL color. Hue wraps into `[0, 360)`; saturation and
    /// lightness are clamped to `[0, 100]`.
    #[must_use]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: h.rem_euclid(360.0),
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
        }
    }

    /// Hue rounded to whole degrees, in `[0, 360)`.
    #[must_use]
    pub fn hue_degrees(self) -> u16 {
        (self.h.round() as u16) % 360
    }

    /// Same hue and saturation with a different lightness (clamped).
    #[must_use]
    pub fn with_lightness(self, l: f64) -> Self {
        Self::new(self.h, self.s, l)
    }

    /// Piecewise-linear HSL to RGB conversion by 60° hue sextant.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let Self { h, s, l } = Self::new(self.h, self.s, self.l);
        let s = s / 100.0;
        let l = l / 100.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match (h / 60.0) as u8 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Rgb::new(channel(r + m), channel(g + m), channel(b + m))
    }

    /// Lowercase `#rrggbb` form.
    #[must_use]
    pub fn to_hex(self) -> String {
        self.to_rgb().to_hex()
    }
}

/// Color parse errors. Malformed input is rejected, never coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    MissingHash,
    InvalidLength(usize),
    InvalidDigit(char),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHash => write!(f, "color must start with '#'"),
            Self::InvalidLength(len) => {
                write!(f, "expected #rgb or #rrggbb, got {len} characters")
            }
            Self::InvalidDigit(ch) => write!(f, "invalid hex digit {ch:?}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

/// Encode channels as a zero-padded lowercase `#rrggbb` string.
#[must_use]
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    Rgb::new(r, g, b).to_string()
}

/// Parse a `#rgb` / `#rrggbb` string and convert it to HSL.
///
/// # Errors
///
/// Returns [`ColorParseError`] for a missing `#`, a wrong length, or a
/// non-hex digit.
pub fn hex_to_hsl(hex: &str) -> Result<Hsl, ColorParseError> {
    hex.parse::<Rgb>().map(Rgb::to_hsl)
}

/// Convert HSL (degrees, percent, percent) to a `#rrggbb` string.
#[must_use]
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    Hsl::new(h, s, l).to_hex()
}

/// Three independent uniform channels from the thread-local RNG.
#[must_use]
pub fn random_color() -> Rgb {
    random_color_with(&mut rand::rng())
}

/// Three independent uniform channels from `rng`.
pub fn random_color_with<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    Rgb::new(rng.random(), rng.random(), rng.random())
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
