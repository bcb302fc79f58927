//! Export: timestamped file names, SVG documents and high-resolution PNGs.
//!
//! DESIGN
//! ======
//! Both exports draw the committed artwork only (artboard plus placed items
//! at rest scale) through [`crate::render::draw_artwork`], positioned with
//! [`Artboard::export_view`]. The PNG path renders into a temporary canvas
//! that a drop guard zero-sizes and detaches on every exit path. Exports
//! never touch scene state, so a failure leaves the session unchanged.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use time::PrimitiveDateTime;
use time::macros::format_description;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::artboard::Artboard;
use crate::canvas2d::Canvas2d;
use crate::config::ComposerConfig;
use crate::geometry::TextMeasure;
use crate::render::{begin_view, draw_artwork};
use crate::scene::Scene;
use crate::svg::SvgRecorder;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Svg,
}

impl ExportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("canvas error: {0}")]
    Canvas(String),
    #[error("2d context unavailable")]
    NoContext,
    #[error("encode failed: {0}")]
    Encode(String),
    #[error("timestamp format error: {0}")]
    Format(#[from] time::error::Format),
    #[error("invalid timestamp: {0}")]
    Range(#[from] time::error::ComponentRange),
}

impl From<JsValue> for ExportError {
    fn from(value: JsValue) -> Self {
        Self::Canvas(format!("{value:?}"))
    }
}

// =============================================================================
// NAMING
// =============================================================================

/// Build a timestamp from calendar parts (month is 1-based).
///
/// # Errors
///
/// Returns `Range` if any component is out of range.
pub fn stamp_from_parts(
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
) -> Result<PrimitiveDateTime, ExportError> {
    let date = time::Date::from_calendar_date(year, time::Month::try_from(month)?, day)?;
    let clock = time::Time::from_hms(hour, minute, second)?;
    Ok(PrimitiveDateTime::new(date, clock))
}

/// `YYYYMMDD_HHMMSS.<ext>`.
///
/// # Errors
///
/// Returns `Format` if the timestamp cannot be formatted.
pub fn file_name(stamp: PrimitiveDateTime, format: ExportFormat) -> Result<String, ExportError> {
    let base = stamp.format(format_description!("[year][month][day]_[hour][minute][second]"))?;
    Ok(format!("{base}.{}", format.extension()))
}

// =============================================================================
// SVG
// =============================================================================

/// Record the committed artwork as an SVG document in CSS pixels.
#[must_use]
pub fn export_svg(scene: &Scene, artboard: &Artboard, config: &ComposerConfig, measure: &dyn TextMeasure) -> String {
    let (width, height) = artboard.export_size(1.0);
    let mut recorder = SvgRecorder::begin(width, height, None);
    let Ok(()) = begin_view(&mut recorder, artboard.export_view(1.0));
    let Ok(()) = draw_artwork(&mut recorder, scene, artboard, config.artboard_color, measure);
    recorder.finish()
}

// =============================================================================
// PNG
// =============================================================================

/// A temporary canvas released on drop, success or failure.
struct ScratchCanvas(HtmlCanvasElement);

impl Drop for ScratchCanvas {
    fn drop(&mut self) {
        self.0.set_width(0);
        self.0.set_height(0);
        self.0.remove();
    }
}

/// Render the committed artwork at `config.export_scale` × the artboard size
/// and encode it as a PNG data URL.
///
/// # Errors
///
/// Returns `Canvas`/`NoContext` if the scratch canvas cannot be set up or
/// drawn to, and `Encode` if the browser fails to encode it.
pub fn export_png(
    document: &Document,
    scene: &Scene,
    artboard: &Artboard,
    config: &ComposerConfig,
    measure: &dyn TextMeasure,
) -> Result<String, ExportError> {
    let scale = config.export_scale;
    let (width, height) = artboard.export_size(scale);
    let element = document.create_element("canvas")?;
    let canvas = ScratchCanvas(
        element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| ExportError::Canvas("created element is not a canvas".into()))?,
    );
    canvas.0.set_width(width);
    canvas.0.set_height(height);

    let ctx = canvas
        .0
        .get_context("2d")?
        .ok_or(ExportError::NoContext)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| ExportError::NoContext)?;
    let mut surface = Canvas2d::new(&ctx);
    begin_view(&mut surface, artboard.export_view(scale))?;
    draw_artwork(&mut surface, scene, artboard, config.artboard_color, measure)?;

    let url = canvas
        .0
        .to_data_url_with_type(ExportFormat::Png.mime())
        .map_err(|err| ExportError::Encode(format!("{err:?}")))?;
    log::info!("exported {width}x{height} png");
    Ok(url)
}
