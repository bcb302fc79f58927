//! Geometry generators: regular-polygon vertices and text extents.
//!
//! Everything here is in an item's local frame: centered at the origin,
//! unrotated, unscaled, y pointing down. Hit-testing and every drawing
//! surface consume the same vertex lists, so what is drawn is what is picked.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::f64::consts::{FRAC_PI_2, PI, SQRT_2, TAU};

use serde::{Deserialize, Serialize};

use crate::consts::{TEXT_HEIGHT_FACTOR, TEXT_WIDTH_FACTOR, TRIANGLE_RADIUS_FACTOR};
use crate::transform::Point;

/// Geometric shape variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
    Pentagon,
    Hexagon,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Triangle,
        ShapeKind::Pentagon,
        ShapeKind::Hexagon,
    ];

    /// Number of straight edges, or `None` for the circle.
    #[must_use]
    pub fn sides(self) -> Option<u32> {
        match self {
            Self::Circle => None,
            Self::Square => Some(4),
            Self::Triangle => Some(3),
            Self::Pentagon => Some(5),
            Self::Hexagon => Some(6),
        }
    }

    /// Circumradius in local units for a given base size.
    ///
    /// The square's half-side equals the base size, so its corners sit on a
    /// circle of `size·√2`. Triangles are enlarged slightly so their visual
    /// weight matches the other shapes.
    #[must_use]
    pub fn radius(self, base_size: f64) -> f64 {
        match self {
            Self::Circle | Self::Pentagon | Self::Hexagon => base_size,
            Self::Square => base_size * SQRT_2,
            Self::Triangle => base_size * TRIANGLE_RADIUS_FACTOR,
        }
    }

    /// Local-space vertices, or `None` for the circle.
    #[must_use]
    pub fn vertices(self, base_size: f64) -> Option<Vec<Point>> {
        self.sides().map(|sides| regular_polygon(sides, self.radius(base_size)))
    }
}

/// Sample `sides` points evenly around a circle of `radius`.
///
/// Odd-sided polygons put the first vertex straight up (negative y);
/// even-sided polygons are rotated half a step so they sit on a flat edge.
/// Fewer than three sides yields an empty list.
#[must_use]
pub fn regular_polygon(sides: u32, radius: f64) -> Vec<Point> {
    if sides < 3 {
        return Vec::new();
    }
    let n = f64::from(sides);
    let start = if sides % 2 == 1 { -FRAC_PI_2 } else { -FRAC_PI_2 + PI / n };
    (0..sides)
        .map(|i| {
            let angle = (TAU / n).mul_add(f64::from(i), start);
            let (sin, cos) = angle.sin_cos();
            Point::new(radius * cos, radius * sin)
        })
        .collect()
}

/// Rendered size of a line of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

impl TextExtent {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_usable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height > 0.0
    }
}

/// Text measurement capability supplied by the drawing backend.
///
/// Returning `None` means the backend could not measure; callers fall back
/// to [`heuristic_extent`].
pub trait TextMeasure {
    fn measure(&self, text: &str, font_px: f64) -> Option<TextExtent>;
}

/// Measurer that always answers with the character-count estimate.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicMeasure;

impl TextMeasure for HeuristicMeasure {
    fn measure(&self, text: &str, font_px: f64) -> Option<TextExtent> {
        Some(heuristic_extent(text, font_px))
    }
}

/// `chars × size × 0.6` wide, `size × 1.2` tall.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn heuristic_extent(text: &str, font_px: f64) -> TextExtent {
    let chars = text.chars().count() as f64;
    TextExtent::new(chars * font_px * TEXT_WIDTH_FACTOR, font_px * TEXT_HEIGHT_FACTOR)
}

/// Measure `text` at `font_px`, falling back to the heuristic on failure or
/// on a nonsensical answer.
#[must_use]
pub fn text_extent(measure: &dyn TextMeasure, text: &str, font_px: f64) -> TextExtent {
    match measure.measure(text, font_px) {
        Some(extent) if extent.is_usable() => extent,
        _ => heuristic_extent(text, font_px),
    }
}

/// Font string for a text label at `font_px`.
#[must_use]
pub fn font_css(font_px: f64) -> String {
    format!("{font_px}px {}", crate::consts::FONT_FAMILY)
}
