//! The item model: shapes and text labels that float, get held, and settle
//! onto the artboard.
//!
//! An item's lifecycle is carried by [`Phase`]. Transitions are methods on
//! [`Item`] so the invariants travel with the data: rotation is always
//! normalized, scale always positive, and holding an item always freezes its
//! drift and cancels any settle pulse.

#[cfg(test)]
#[path = "item_test.rs"]
mod item_test;

use std::f64::consts::PI;

use uuid::Uuid;

use crate::color::Color;
use crate::geometry::{ShapeKind, TextMeasure, text_extent};
use crate::transform::{Point, normalize_angle, snap_angle};

/// Identifier for an item for the lifetime of the session.
pub type ItemId = Uuid;

/// What an item draws as.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Shape(ShapeKind),
    Text(String),
}

/// Lifecycle phase. Deletion is removal from the scene, not a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Drifting across the viewport.
    Floating,
    /// Under pointer control.
    Held,
    /// Just placed; pulsing for a fixed number of ticks.
    Settling { started_at: u64 },
    /// Committed to the artboard and static.
    Placed,
}

/// Settle pulse parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settle {
    pub duration: u64,
    pub amplitude: f64,
}

/// Scale multiplier `elapsed` ticks into a settle of `duration` ticks.
///
/// Follows `1 + sin(π · elapsed / duration) · amplitude`, and is exactly 1
/// once the pulse has finished or when `duration` is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn settle_pulse(elapsed: u64, duration: u64, amplitude: f64) -> f64 {
    if duration == 0 || elapsed >= duration {
        return 1.0;
    }
    let progress = elapsed as f64 / duration as f64;
    (PI * progress).sin().mul_add(amplitude, 1.0)
}

#[derive(Debug, Clone)]
pub struct Item {
    id: ItemId,
    kind: ItemKind,
    pub position: Point,
    rotation: f64,
    base_size: f64,
    scale: f64,
    pub color: Color,
    /// World units per tick while floating.
    pub velocity: Point,
    /// Radians per tick while floating.
    pub spin: f64,
    phase: Phase,
}

impl Item {
    /// A new floating item at rest. Non-positive or non-finite sizes are
    /// replaced with 1 so the size invariant holds from construction.
    #[must_use]
    pub fn new(kind: ItemKind, position: Point, base_size: f64, color: Color) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            position,
            rotation: 0.0,
            base_size: if base_size.is_finite() && base_size > 0.0 { base_size } else { 1.0 },
            scale: 1.0,
            color,
            velocity: Point::default(),
            spin: 0.0,
            phase: Phase::Floating,
        }
    }

    #[must_use]
    pub fn shape(kind: ShapeKind, position: Point, base_size: f64, color: Color) -> Self {
        Self::new(ItemKind::Shape(kind), position, base_size, color)
    }

    #[must_use]
    pub fn text(text: impl Into<String>, position: Point, font_px: f64, color: Color) -> Self {
        Self::new(ItemKind::Text(text.into()), position, font_px, color)
    }

    #[must_use]
    pub fn with_rotation(mut self, radians: f64) -> Self {
        self.set_rotation(radians);
        self
    }

    #[must_use]
    pub fn with_drift(mut self, velocity: Point, spin: f64) -> Self {
        self.velocity = velocity;
        self.spin = spin;
        self
    }

    // --- Accessors ---

    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    #[must_use]
    pub fn base_size(&self) -> f64 {
        self.base_size
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_held(&self) -> bool {
        self.phase == Phase::Held
    }

    #[must_use]
    pub fn is_settling(&self) -> bool {
        matches!(self.phase, Phase::Settling { .. })
    }

    #[must_use]
    pub fn settle_start(&self) -> Option<u64> {
        match self.phase {
            Phase::Settling { started_at } => Some(started_at),
            _ => None,
        }
    }

    /// The text payload, if this is a text label.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Text(text) => Some(text),
            ItemKind::Shape(_) => None,
        }
    }

    /// True for a text label with nothing but whitespace.
    #[must_use]
    pub fn is_empty_text(&self) -> bool {
        self.label().is_some_and(|t| t.trim().is_empty())
    }

    // --- Mutators ---

    pub fn set_rotation(&mut self, radians: f64) {
        self.rotation = normalize_angle(radians);
    }

    pub fn rotate_by(&mut self, radians: f64) {
        self.set_rotation(self.rotation + radians);
    }

    /// Set the scale factor, clamped into `[min, max]`. Non-finite requests
    /// and empty or non-positive ranges are ignored.
    pub fn set_scale(&mut self, scale: f64, min: f64, max: f64) {
        if scale.is_finite() && min > 0.0 && min <= max {
            self.scale = scale.clamp(min, max);
        }
    }

    /// Mutable access to the text payload, if this is a text label.
    pub fn label_mut(&mut self) -> Option<&mut String> {
        match &mut self.kind {
            ItemKind::Text(text) => Some(text),
            ItemKind::Shape(_) => None,
        }
    }

    // --- Lifecycle ---

    /// Enter `Held`: drift and spin stop and any settle pulse is cancelled.
    pub fn hold(&mut self) {
        self.velocity = Point::default();
        self.spin = 0.0;
        self.phase = Phase::Held;
    }

    /// Commit onto the artboard at `tick`: snap rotation once, then settle.
    pub fn place(&mut self, tick: u64, snap_increment: f64) {
        self.rotation = snap_angle(self.rotation, snap_increment);
        self.velocity = Point::default();
        self.spin = 0.0;
        self.phase = Phase::Settling { started_at: tick };
    }

    /// Return to floating with the given drift.
    pub fn release(&mut self, velocity: Point, spin: f64) {
        self.velocity = velocity;
        self.spin = spin;
        self.phase = Phase::Floating;
    }

    /// Advance settling at `tick`. Returns true when the pulse just ended.
    pub fn update_settle(&mut self, tick: u64, duration: u64) -> bool {
        match self.phase {
            Phase::Settling { started_at } if tick.saturating_sub(started_at) >= duration => {
                self.phase = Phase::Placed;
                true
            }
            _ => false,
        }
    }

    /// One tick of autonomous drift.
    pub fn drift(&mut self) {
        self.position.x += self.velocity.x;
        self.position.y += self.velocity.y;
        if self.spin != 0.0 {
            self.rotate_by(self.spin);
        }
    }

    // --- Derived geometry ---

    /// Current pulse multiplier; 1 unless settling.
    #[must_use]
    pub fn pulse(&self, tick: u64, settle: Settle) -> f64 {
        match self.phase {
            Phase::Settling { started_at } => settle_pulse(tick.saturating_sub(started_at), settle.duration, settle.amplitude),
            _ => 1.0,
        }
    }

    /// Scale used for drawing and hit-testing.
    #[must_use]
    pub fn effective_scale(&self, tick: u64, settle: Settle) -> f64 {
        self.scale * self.pulse(tick, settle)
    }

    /// Unscaled radius of the circle enclosing the item.
    #[must_use]
    pub fn local_radius(&self, measure: &dyn TextMeasure) -> f64 {
        match &self.kind {
            ItemKind::Shape(kind) => kind.radius(self.base_size),
            ItemKind::Text(text) => {
                let extent = text_extent(measure, text, self.base_size);
                0.5 * extent.width.hypot(extent.height)
            }
        }
    }

    /// World-space enclosing radius at the item's scale factor.
    #[must_use]
    pub fn bounding_radius(&self, measure: &dyn TextMeasure) -> f64 {
        self.local_radius(measure) * self.scale
    }
}
