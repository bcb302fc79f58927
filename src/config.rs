//! Composer configuration: every tunable of the artboard, with defaults.
//!
//! DESIGN
//! ======
//! The host may embed a JSON object in the page; any field left out keeps
//! its default. Parsing and validation are separate steps so a config built
//! in code goes through the same checks as one read from the page.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::consts::{
    DEFAULT_CLICK_TOLERANCE_PX, DEFAULT_HOLD_SMOOTHING, DEFAULT_SETTLE_AMPLITUDE, DEFAULT_SETTLE_DURATION_TICKS,
    DEFAULT_SNAP_INCREMENT_DEG,
};
use crate::item::Settle;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {field} {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    // Artboard
    /// Width / height of the artboard.
    pub artboard_aspect: f64,
    /// Minimum gap between the artboard and the viewport edge, CSS pixels.
    pub artboard_margin_px: f64,

    // Colors
    pub background: Color,
    pub artboard_color: Color,
    pub palette: Vec<Color>,
    /// Minimum WCAG contrast between text and the artboard color.
    pub text_contrast_min: f64,

    // Hit-testing and placement
    pub click_tolerance_px: f64,
    pub snap_increment_deg: f64,

    // Lifecycle
    pub hold_smoothing: f64,
    pub settle_duration_ticks: u64,
    pub settle_amplitude: f64,

    // Scaling and wheel
    pub scale_min: f64,
    pub scale_max: f64,
    /// Scale multiplier per wheel notch with Shift held.
    pub wheel_scale_step: f64,
    pub wheel_rotate_step_deg: f64,

    // Spawning and culling
    /// Ticks between automatic spawns; 0 disables them.
    pub spawn_interval_ticks: u64,
    pub max_floating: usize,
    pub size_min: f64,
    pub size_max: f64,
    pub drift_speed_min: f64,
    pub drift_speed_max: f64,
    /// Radians per tick.
    pub spin_max: f64,
    /// Culling buffer as a fraction of the larger viewport dimension.
    pub offscreen_buffer_ratio: f64,

    // Text and export
    pub text_size: f64,
    pub export_scale: f64,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            artboard_aspect: 0.8,
            artboard_margin_px: 40.0,
            background: Color::rgb(0x1e, 0x1f, 0x24),
            artboard_color: Color::rgb(0xff, 0xff, 0xff),
            palette: vec![
                Color::rgb(0xe6, 0x39, 0x46),
                Color::rgb(0xf4, 0xa2, 0x61),
                Color::rgb(0xe9, 0xc4, 0x6a),
                Color::rgb(0x2a, 0x9d, 0x8f),
                Color::rgb(0x26, 0x46, 0x53),
                Color::rgb(0x8e, 0xca, 0xe6),
                Color::rgb(0x6a, 0x4c, 0x93),
            ],
            text_contrast_min: 3.0,
            click_tolerance_px: DEFAULT_CLICK_TOLERANCE_PX,
            snap_increment_deg: DEFAULT_SNAP_INCREMENT_DEG,
            hold_smoothing: DEFAULT_HOLD_SMOOTHING,
            settle_duration_ticks: DEFAULT_SETTLE_DURATION_TICKS,
            settle_amplitude: DEFAULT_SETTLE_AMPLITUDE,
            scale_min: 0.25,
            scale_max: 4.0,
            wheel_scale_step: 1.1,
            wheel_rotate_step_deg: 5.0,
            spawn_interval_ticks: 90,
            max_floating: 10,
            size_min: 24.0,
            size_max: 72.0,
            drift_speed_min: 0.3,
            drift_speed_max: 1.2,
            spin_max: 0.01,
            offscreen_buffer_ratio: 0.25,
            text_size: 48.0,
            export_scale: 4.0,
        }
    }
}

// =============================================================================
// PARSING AND VALIDATION
// =============================================================================

impl ComposerConfig {
    /// Parse a JSON object, filling missing fields with defaults, then
    /// validate.
    ///
    /// # Errors
    ///
    /// Returns `Parse` for malformed JSON or wrongly-typed fields and
    /// `Invalid` for values outside their allowed range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field's range.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("artboard_aspect", self.artboard_aspect)?;
        non_negative("artboard_margin_px", self.artboard_margin_px)?;
        if self.palette.is_empty() {
            return Err(invalid("palette", "must not be empty"));
        }
        if !(1.0..=21.0).contains(&self.text_contrast_min) {
            return Err(invalid("text_contrast_min", "must be within [1, 21]"));
        }
        non_negative("click_tolerance_px", self.click_tolerance_px)?;
        non_negative("snap_increment_deg", self.snap_increment_deg)?;
        if !(self.hold_smoothing > 0.0 && self.hold_smoothing <= 1.0) {
            return Err(invalid("hold_smoothing", "must be within (0, 1]"));
        }
        non_negative("settle_amplitude", self.settle_amplitude)?;
        positive("scale_min", self.scale_min)?;
        ordered("scale_max", self.scale_min, self.scale_max)?;
        positive("wheel_scale_step", self.wheel_scale_step)?;
        if !self.wheel_rotate_step_deg.is_finite() {
            return Err(invalid("wheel_rotate_step_deg", "must be finite"));
        }
        positive("size_min", self.size_min)?;
        ordered("size_max", self.size_min, self.size_max)?;
        positive("drift_speed_min", self.drift_speed_min)?;
        ordered("drift_speed_max", self.drift_speed_min, self.drift_speed_max)?;
        non_negative("spin_max", self.spin_max)?;
        non_negative("offscreen_buffer_ratio", self.offscreen_buffer_ratio)?;
        positive("text_size", self.text_size)?;
        positive("export_scale", self.export_scale)?;
        Ok(())
    }

    // --- Derived values ---

    #[must_use]
    pub fn snap_increment(&self) -> f64 {
        self.snap_increment_deg.to_radians()
    }

    #[must_use]
    pub fn wheel_rotate_step(&self) -> f64 {
        self.wheel_rotate_step_deg.to_radians()
    }

    #[must_use]
    pub fn settle(&self) -> Settle {
        Settle { duration: self.settle_duration_ticks, amplitude: self.settle_amplitude }
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 { Ok(()) } else { Err(invalid(field, "must be finite and > 0")) }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 { Ok(()) } else { Err(invalid(field, "must be finite and >= 0")) }
}

fn ordered(field: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    if max.is_finite() && max >= min { Ok(()) } else { Err(invalid(field, "must be finite and >= its minimum")) }
}
