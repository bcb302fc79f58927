//! Coordinate transforms between world space and an item's local frame.
//!
//! World space is CSS pixels with y pointing down. An item's local frame is
//! centered on the item, unrotated and unscaled, which is where the geometry
//! generators produce vertices and where hit-testing happens.
//!
//! [`ViewTransform`] maps world space onto a drawing target (device pixels on
//! screen, or the artboard-relative raster/vector export); [`Affine`] is the
//! full 2×3 matrix the SVG recorder uses to mirror a canvas transform stack.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

/// A point in world, local, or view space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Linear interpolation toward `target`; `t = 0` stays, `t = 1` arrives.
    #[must_use]
    pub fn lerp(self, target: Point, t: f64) -> Point {
        Point::new(
            (target.x - self.x).mul_add(t, self.x),
            (target.y - self.y).mul_add(t, self.y),
        )
    }
}

/// Convert a world-space point into an object's local frame.
///
/// Applies the inverse rotation, then the inverse uniform scale, about
/// `center`. A zero scale yields the origin instead of dividing by zero.
#[must_use]
pub fn to_local(world: Point, center: Point, rotation: f64, scale: f64) -> Point {
    if scale == 0.0 {
        return Point::new(0.0, 0.0);
    }
    let dx = world.x - center.x;
    let dy = world.y - center.y;
    let (sin, cos) = rotation.sin_cos();
    let rx = dx.mul_add(cos, dy * sin);
    let ry = dy.mul_add(cos, -(dx * sin));
    Point::new(rx / scale, ry / scale)
}

/// Forward transform: scale, rotate, then translate to `center`.
#[must_use]
pub fn to_world(local: Point, center: Point, rotation: f64, scale: f64) -> Point {
    let sx = local.x * scale;
    let sy = local.y * scale;
    let (sin, cos) = rotation.sin_cos();
    Point::new(
        sx.mul_add(cos, -(sy * sin)) + center.x,
        sx.mul_add(sin, sy * cos) + center.y,
    )
}

/// Wrap an angle in radians into `[0, 2π)`. Non-finite input maps to zero.
#[must_use]
pub fn normalize_angle(radians: f64) -> f64 {
    if !radians.is_finite() {
        return 0.0;
    }
    let wrapped = radians.rem_euclid(TAU);
    // rem_euclid can round tiny negatives up to exactly TAU.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Round an angle to the nearest multiple of `increment`, then normalize.
///
/// A non-positive or non-finite increment leaves the angle merely normalized.
#[must_use]
pub fn snap_angle(radians: f64, increment: f64) -> f64 {
    let normalized = normalize_angle(radians);
    if !increment.is_finite() || increment <= 0.0 {
        return normalized;
    }
    normalize_angle((normalized / increment).round() * increment)
}

/// Affine 2D matrix in canvas order: `[a c e; b d f; 0 0 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    /// `self` followed by `next` in the local frame, i.e. `self × next`.
    #[must_use]
    pub fn then(self, next: Affine) -> Affine {
        Affine {
            a: self.a.mul_add(next.a, self.c * next.b),
            b: self.b.mul_add(next.a, self.d * next.b),
            c: self.a.mul_add(next.c, self.c * next.d),
            d: self.b.mul_add(next.c, self.d * next.d),
            e: self.a.mul_add(next.e, self.c.mul_add(next.f, self.e)),
            f: self.b.mul_add(next.e, self.d.mul_add(next.f, self.f)),
        }
    }

    #[must_use]
    pub fn translate(self, x: f64, y: f64) -> Affine {
        self.then(Affine { e: x, f: y, ..Affine::IDENTITY })
    }

    #[must_use]
    pub fn rotate(self, radians: f64) -> Affine {
        let (sin, cos) = radians.sin_cos();
        self.then(Affine { a: cos, b: sin, c: -sin, d: cos, e: 0.0, f: 0.0 })
    }

    #[must_use]
    pub fn scale(self, sx: f64, sy: f64) -> Affine {
        self.then(Affine { a: sx, d: sy, ..Affine::IDENTITY })
    }

    #[must_use]
    pub fn apply(self, p: Point) -> Point {
        Point::new(
            self.a.mul_add(p.x, self.c.mul_add(p.y, self.e)),
            self.b.mul_add(p.x, self.d.mul_add(p.y, self.f)),
        )
    }
}

/// Uniform scale about a world-space origin: `(p - origin) * scale`.
///
/// Used for the device-pixel mapping on screen (`origin = 0`, `scale = dpr`)
/// and for exports (`origin` = artboard corner, `scale` = export factor).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub origin: Point,
    pub scale: f64,
}

impl ViewTransform {
    #[must_use]
    pub const fn new(origin: Point, scale: f64) -> Self {
        Self { origin, scale }
    }

    /// Identity view scaled by the device pixel ratio.
    #[must_use]
    pub const fn device(dpr: f64) -> Self {
        Self { origin: Point::new(0.0, 0.0), scale: dpr }
    }

    /// Map a world point into view space.
    ///
    /// Expressed through [`to_local`] with no rotation so on-screen picking
    /// and exported geometry share the same math.
    #[must_use]
    pub fn to_view(&self, world: Point) -> Point {
        if self.scale == 0.0 {
            return Point::new(0.0, 0.0);
        }
        to_local(world, self.origin, 0.0, 1.0 / self.scale)
    }

    /// Map a view point back into world space.
    #[must_use]
    pub fn to_world(&self, view: Point) -> Point {
        if self.scale == 0.0 {
            return self.origin;
        }
        to_world(view, self.origin, 0.0, 1.0 / self.scale)
    }

    /// Matrix form, for surfaces that flatten transforms.
    #[must_use]
    pub fn affine(&self) -> Affine {
        Affine::IDENTITY
            .scale(self.scale, self.scale)
            .translate(-self.origin.x, -self.origin.y)
    }
}
