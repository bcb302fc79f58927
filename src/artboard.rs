//! The viewport and the fixed-aspect artboard fitted inside it.

#[cfg(test)]
#[path = "artboard_test.rs"]
mod artboard_test;

use crate::transform::{Point, ViewTransform};

/// Visible region in CSS pixels, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }

    /// Whether `p` is within `margin` of the viewport on every side.
    #[must_use]
    pub fn contains_with_margin(&self, p: Point, margin: f64) -> bool {
        p.x >= -margin && p.x <= self.width + margin && p.y >= -margin && p.y <= self.height + margin
    }
}

/// The exportable region: a rectangle of fixed aspect ratio, centered in the
/// viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Artboard {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Artboard {
    /// Largest `aspect` (width / height) rectangle that fits inside the
    /// viewport less `margin` on every side. Degenerate inputs give a
    /// zero-size artboard at the viewport center.
    #[must_use]
    pub fn fit(viewport: Viewport, aspect: f64, margin: f64) -> Self {
        let avail_w = viewport.width - 2.0 * margin;
        let avail_h = viewport.height - 2.0 * margin;
        let valid = aspect.is_finite() && aspect > 0.0 && avail_w.is_finite() && avail_h.is_finite();
        if !valid || avail_w <= 0.0 || avail_h <= 0.0 {
            let c = viewport.center();
            return Self { x: c.x, y: c.y, width: 0.0, height: 0.0 };
        }
        let width = avail_w.min(avail_h * aspect);
        let height = width / aspect;
        Self {
            x: (viewport.width - width) * 0.5,
            y: (viewport.height - height) * 0.5,
            width,
            height,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Inclusive containment. An empty artboard contains nothing.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        !self.is_empty() && p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// World-to-export mapping: artboard top-left at the origin, scaled.
    #[must_use]
    pub fn export_view(&self, scale: f64) -> ViewTransform {
        ViewTransform::new(Point::new(self.x, self.y), scale)
    }

    /// Pixel size of an export at `scale`, rounded up, at least 1×1.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn export_size(&self, scale: f64) -> (u32, u32) {
        let px = |v: f64| {
            let n = (v * scale).ceil();
            if n.is_finite() { n.clamp(1.0, f64::from(u32::MAX)) as u32 } else { 1 }
        };
        (px(self.width), px(self.height))
    }
}
