//! The drawing-surface abstraction shared by the screen, raster export and
//! vector export.
//!
//! A surface keeps a transform stack (`save`/`restore` plus
//! `translate`/`rotate`/`scale`, composed in the local frame as on a 2D
//! canvas) and draws a small set of primitives in the current frame.

use crate::color::Color;
use crate::transform::Point;

/// Outline style. Width is in the current local units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

/// How to paint a closed primitive. Neither part set draws nothing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Paint {
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl Paint {
    #[must_use]
    pub const fn fill(color: Color) -> Self {
        Self { fill: Some(color), stroke: None }
    }

    #[must_use]
    pub const fn outline(stroke: Stroke) -> Self {
        Self { fill: None, stroke: Some(stroke) }
    }

    #[must_use]
    pub const fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }
}

pub trait Surface {
    type Error;

    fn save(&mut self) -> Result<(), Self::Error>;
    fn restore(&mut self) -> Result<(), Self::Error>;
    fn translate(&mut self, x: f64, y: f64) -> Result<(), Self::Error>;
    fn rotate(&mut self, radians: f64) -> Result<(), Self::Error>;
    fn scale(&mut self, sx: f64, sy: f64) -> Result<(), Self::Error>;

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: Paint) -> Result<(), Self::Error>;
    /// Closed polygon through `points`.
    fn polygon(&mut self, points: &[Point], paint: Paint) -> Result<(), Self::Error>;
    fn ellipse(&mut self, center: Point, rx: f64, ry: f64, paint: Paint) -> Result<(), Self::Error>;
    /// One line of text centered on the local origin.
    fn text(&mut self, text: &str, font_px: f64, fill: Color) -> Result<(), Self::Error>;
}
