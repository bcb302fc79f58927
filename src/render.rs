//! Rendering: draws the scene through any [`Surface`].
//!
//! The screen, the high-resolution PNG export and the SVG export all go
//! through these functions, so on-screen and exported geometry come from
//! one code path. Callers first install a [`ViewTransform`] with
//! [`begin_view`]; everything after that is in world units.
//!
//! Layers, bottom first:
//!
//! 1. committed artwork: background, artboard, placed items (cached on screen)
//! 2. floating items
//! 3. the held item, with an outline

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::artboard::{Artboard, Viewport};
use crate::color::{BLACK, Color, WHITE, contrast_ratio};
use crate::consts::OUTLINE_WIDTH;
use crate::geometry::{ShapeKind, TextMeasure, text_extent};
use crate::item::{Item, ItemKind, Settle};
use crate::scene::Scene;
use crate::surface::{Paint, Stroke, Surface};
use crate::transform::{Point, ViewTransform};

/// Per-frame inputs shared by every layer.
#[derive(Clone, Copy)]
pub struct Frame<'a> {
    pub measure: &'a dyn TextMeasure,
    pub tick: u64,
    pub settle: Settle,
}

/// Map world units onto the surface.
///
/// # Errors
///
/// Returns the surface's error if a transform call fails.
pub fn begin_view<S: Surface>(surface: &mut S, view: ViewTransform) -> Result<(), S::Error> {
    surface.scale(view.scale, view.scale)?;
    surface.translate(-view.origin.x, -view.origin.y)
}

/// Layer 1: viewport background, artboard, and placed items at their
/// current settle pulse.
///
/// # Errors
///
/// Returns the surface's error if any draw call fails.
pub fn draw_committed<S: Surface>(
    surface: &mut S,
    scene: &Scene,
    viewport: Viewport,
    artboard: &Artboard,
    background: Color,
    artboard_color: Color,
    frame: Frame<'_>,
) -> Result<(), S::Error> {
    surface.rect(0.0, 0.0, viewport.width, viewport.height, Paint::fill(background))?;
    draw_artboard(surface, artboard, artboard_color)?;
    for item in scene.placed() {
        draw_item(surface, item, item.effective_scale(frame.tick, frame.settle), frame.measure, None)?;
    }
    Ok(())
}

/// The exportable artwork only: artboard and placed items at rest scale.
///
/// # Errors
///
/// Returns the surface's error if any draw call fails.
pub fn draw_artwork<S: Surface>(
    surface: &mut S,
    scene: &Scene,
    artboard: &Artboard,
    artboard_color: Color,
    measure: &dyn TextMeasure,
) -> Result<(), S::Error> {
    draw_artboard(surface, artboard, artboard_color)?;
    for item in scene.placed() {
        draw_item(surface, item, item.scale(), measure, None)?;
    }
    Ok(())
}

/// Layer 2.
///
/// # Errors
///
/// Returns the surface's error if any draw call fails.
pub fn draw_floating<S: Surface>(surface: &mut S, scene: &Scene, frame: Frame<'_>) -> Result<(), S::Error> {
    for item in scene.floating() {
        draw_item(surface, item, item.scale(), frame.measure, None)?;
    }
    Ok(())
}

/// Layer 3.
///
/// # Errors
///
/// Returns the surface's error if any draw call fails.
pub fn draw_held<S: Surface>(surface: &mut S, scene: &Scene, frame: Frame<'_>) -> Result<(), S::Error> {
    let Some(item) = scene.held() else {
        return Ok(());
    };
    let highlight = Stroke { color: outline_color(item.color), width: OUTLINE_WIDTH / item.scale() };
    draw_item(surface, item, item.scale(), frame.measure, Some(highlight))
}

fn draw_artboard<S: Surface>(surface: &mut S, artboard: &Artboard, color: Color) -> Result<(), S::Error> {
    if artboard.is_empty() {
        return Ok(());
    }
    surface.rect(artboard.x, artboard.y, artboard.width, artboard.height, Paint::fill(color))
}

/// Draw one item at `scale`, optionally outlined.
///
/// # Errors
///
/// Returns the surface's error if any draw call fails.
pub fn draw_item<S: Surface>(
    surface: &mut S,
    item: &Item,
    scale: f64,
    measure: &dyn TextMeasure,
    outline: Option<Stroke>,
) -> Result<(), S::Error> {
    surface.save()?;
    surface.translate(item.position.x, item.position.y)?;
    surface.rotate(item.rotation())?;
    surface.scale(scale, scale)?;

    let size = item.base_size();
    match item.kind() {
        ItemKind::Shape(ShapeKind::Circle) => {
            let r = ShapeKind::Circle.radius(size);
            surface.ellipse(Point::default(), r, r, paint(item.color, outline))?;
        }
        ItemKind::Shape(kind) => {
            if let Some(vertices) = kind.vertices(size) {
                surface.polygon(&vertices, paint(item.color, outline))?;
            }
        }
        ItemKind::Text(text) => {
            surface.text(text, size, item.color)?;
            if let Some(stroke) = outline {
                let extent = text_extent(measure, text, size);
                let (hw, hh) = (extent.width * 0.5, extent.height * 0.5);
                let corners = [Point::new(-hw, -hh), Point::new(hw, -hh), Point::new(hw, hh), Point::new(-hw, hh)];
                surface.polygon(&corners, Paint::outline(stroke))?;
            }
        }
    }

    surface.restore()
}

fn paint(fill: Color, outline: Option<Stroke>) -> Paint {
    match outline {
        Some(stroke) => Paint::fill(fill).with_stroke(stroke),
        None => Paint::fill(fill),
    }
}

/// Black or white, whichever stands out more against `fill`.
#[must_use]
pub fn outline_color(fill: Color) -> Color {
    if contrast_ratio(BLACK, fill) >= contrast_ratio(WHITE, fill) { BLACK } else { WHITE }
}
