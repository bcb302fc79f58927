//! Hit-testing: is a world-space point on an item?
//!
//! The point is moved into the item's local frame (see
//! [`crate::transform::to_local`]) and tested there against the same
//! vertex lists and text extents the renderer draws. A screen-space click
//! tolerance is converted to local units so small or shrunk items stay
//! selectable.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{CROSS_EPSILON, MIN_LOCAL_TOLERANCE};
use crate::geometry::{ShapeKind, TextMeasure, text_extent};
use crate::item::{Item, ItemKind, Settle};
use crate::transform::{Point, to_local};

/// Everything outside the item that a hit-test depends on.
#[derive(Clone, Copy)]
pub struct HitContext<'a> {
    /// Click tolerance in CSS pixels.
    pub tolerance_px: f64,
    pub measure: &'a dyn TextMeasure,
    /// Current tick, for the settle pulse.
    pub tick: u64,
    pub settle: Settle,
}

/// Tolerance in local units for an item drawn at `effective_scale`.
#[must_use]
pub fn local_tolerance(tolerance_px: f64, effective_scale: f64) -> f64 {
    (tolerance_px / effective_scale).max(MIN_LOCAL_TOLERANCE)
}

/// Whether `world` lands on `item`, within the click tolerance.
///
/// Degenerate items (non-finite fields, non-positive scale or size) and
/// non-finite points never hit.
#[must_use]
pub fn is_point_on_item(world: Point, item: &Item, ctx: &HitContext<'_>) -> bool {
    if !world.is_finite() || !item.position.is_finite() || !item.rotation().is_finite() {
        return false;
    }
    let scale = item.effective_scale(ctx.tick, ctx.settle);
    let size = item.base_size();
    if !scale.is_finite() || !size.is_finite() || scale <= 0.0 || size <= 0.0 {
        return false;
    }

    let local = to_local(world, item.position, item.rotation(), scale);
    let tolerance = local_tolerance(ctx.tolerance_px, scale);

    match item.kind() {
        ItemKind::Text(text) => {
            if text.trim().is_empty() {
                return false;
            }
            let extent = text_extent(ctx.measure, text, size);
            local.x.abs() <= extent.width * 0.5 + tolerance && local.y.abs() <= extent.height * 0.5 + tolerance
        }
        ItemKind::Shape(ShapeKind::Circle) => local.length() <= ShapeKind::Circle.radius(size) + tolerance,
        ItemKind::Shape(kind) => match kind.vertices(size) {
            Some(vertices) => {
                point_in_convex_polygon(local, &vertices) || distance_to_polygon(local, &vertices) <= tolerance
            }
            None => false,
        },
    }
}

/// Sign-consistency test: `p` is inside when the cross products of every
/// directed edge against it agree in sign, within [`CROSS_EPSILON`].
#[must_use]
pub fn point_in_convex_polygon(p: Point, vertices: &[Point]) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut any_positive = false;
    let mut any_negative = false;
    for (i, a) in vertices.iter().enumerate() {
        let b = vertices[(i + 1) % vertices.len()];
        let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
        if cross > CROSS_EPSILON {
            any_positive = true;
        } else if cross < -CROSS_EPSILON {
            any_negative = true;
        }
        if any_positive && any_negative {
            return false;
        }
    }
    true
}

/// Distance from `p` to the segment `a`–`b`.
#[must_use]
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}

/// Distance from `p` to the nearest edge of a closed polygon.
#[must_use]
pub fn distance_to_polygon(p: Point, vertices: &[Point]) -> f64 {
    vertices
        .iter()
        .enumerate()
        .map(|(i, a)| distance_to_segment(p, *a, vertices[(i + 1) % vertices.len()]))
        .fold(f64::INFINITY, f64::min)
}
