//! RGB colors, WCAG contrast, and palette selection.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use std::fmt;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB color. Serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const BLACK: Color = Color::rgb(0, 0, 0);
pub const WHITE: Color = Color::rgb(255, 255, 255);

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb` (leading `#` optional, case-insensitive).
    #[must_use]
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
                Self::from_hex(&expanded)
            }
            6 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
                match (channel(0), channel(2), channel(4)) {
                    (Ok(r), Ok(g), Ok(b)) => Some(Self::rgb(r, g, b)),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Lowercase `#rrggbb`, usable as a CSS color and an SVG paint.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// WCAG 2.x relative luminance in `[0, 1]`.
    #[must_use]
    pub fn relative_luminance(self) -> f64 {
        fn linear(channel: u8) -> f64 {
            let c = f64::from(channel) / 255.0;
            if c <= 0.039_28 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
        }
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or_else(|| format!("invalid color {value:?}"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// WCAG contrast ratio between two colors, in `[1, 21]`.
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = a.relative_luminance();
    let lb = b.relative_luminance();
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}

/// Pick a text color from `palette` that reads against `background`.
///
/// Chooses uniformly among palette entries whose contrast ratio is at least
/// `min_ratio`. If none qualifies, returns black or white, whichever
/// contrasts more.
pub fn pick_text_color<R: Rng + ?Sized>(palette: &[Color], background: Color, min_ratio: f64, rng: &mut R) -> Color {
    let readable: Vec<Color> = palette
        .iter()
        .copied()
        .filter(|c| contrast_ratio(*c, background) >= min_ratio)
        .collect();
    match readable.choose(rng) {
        Some(color) => *color,
        None => black_or_white(background),
    }
}

/// Whichever of black and white contrasts more with `background`.
#[must_use]
pub fn black_or_white(background: Color) -> Color {
    if contrast_ratio(BLACK, background) >= contrast_ratio(WHITE, background) { BLACK } else { WHITE }
}

/// The palette entry after `current`, wrapping around.
///
/// A color not in the palette cycles to the first entry; an empty palette
/// leaves the color unchanged.
#[must_use]
pub fn next_in_palette(palette: &[Color], current: Color) -> Color {
    let Some(first) = palette.first() else {
        return current;
    };
    match palette.iter().position(|c| *c == current) {
        Some(i) => palette[(i + 1) % palette.len()],
        None => *first,
    }
}

/// Like [`next_in_palette`], but skips entries that do not reach
/// `min_ratio` against `background`.
///
/// Falls back to black or white when no palette entry is readable.
#[must_use]
pub fn next_readable_in_palette(palette: &[Color], current: Color, background: Color, min_ratio: f64) -> Color {
    let start = palette.iter().position(|c| *c == current).map_or(0, |i| i + 1);
    (0..palette.len())
        .map(|step| palette[(start + step) % palette.len()])
        .find(|c| contrast_ratio(*c, background) >= min_ratio)
        .unwrap_or_else(|| black_or_white(background))
}
