//! Shared numeric constants for the artboard crate.
//!
//! Values marked `DEFAULT_` seed [`crate::config::ComposerConfig`]; the rest
//! are fixed properties of the geometry and hit-testing rules.

// ── Hit-testing ─────────────────────────────────────────────────

/// Floor for the local-space hit tolerance, in local units.
pub const MIN_LOCAL_TOLERANCE: f64 = 2.0;

/// Slack for the cross-product sign test in the convex-polygon check.
pub const CROSS_EPSILON: f64 = 1e-6;

/// Screen-space click tolerance in CSS pixels.
pub const DEFAULT_CLICK_TOLERANCE_PX: f64 = 8.0;

// ── Text ────────────────────────────────────────────────────────

/// Heuristic glyph advance as a fraction of the font size.
pub const TEXT_WIDTH_FACTOR: f64 = 0.6;

/// Heuristic line height as a fraction of the font size.
pub const TEXT_HEIGHT_FACTOR: f64 = 1.2;

/// CSS font family for text labels.
pub const FONT_FAMILY: &str = "sans-serif";

// ── Shapes ──────────────────────────────────────────────────────

/// Circumradius multiplier for triangles relative to the base size.
pub const TRIANGLE_RADIUS_FACTOR: f64 = 1.15;

/// Outline width for shapes and text boxes, in local units.
pub const OUTLINE_WIDTH: f64 = 2.0;

// ── Lifecycle ───────────────────────────────────────────────────

/// Blend factor per tick when a held item follows the pointer.
pub const DEFAULT_HOLD_SMOOTHING: f64 = 0.4;

/// Length of the post-placement pulse, in ticks.
pub const DEFAULT_SETTLE_DURATION_TICKS: u64 = 45;

/// Peak scale gain of the post-placement pulse.
pub const DEFAULT_SETTLE_AMPLITUDE: f64 = 0.05;

/// Rotation snapping increment applied on placement, in degrees.
pub const DEFAULT_SNAP_INCREMENT_DEG: f64 = 15.0;

/// Half-angle of the random cone around the viewport center that spawned
/// items drift toward, in radians (30°).
pub const SPAWN_AIM_JITTER: f64 = std::f64::consts::PI / 6.0;

// ── Input ───────────────────────────────────────────────────────

/// Pixel delta reported by a single mouse-wheel notch in most browsers.
pub const WHEEL_NOTCH_PX: f64 = 100.0;

/// Lines reported per wheel notch when `deltaMode` is line-based.
pub const WHEEL_LINES_PER_NOTCH: f64 = 3.0;
