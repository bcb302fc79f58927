//! [`Surface`] and [`TextMeasure`] over a browser `CanvasRenderingContext2d`.
//!
//! This module is the only place that touches the 2D context API. All
//! fallible calls propagate errors via `Result<(), JsValue>`.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::color::Color;
use crate::geometry::{TextExtent, TextMeasure, font_css};
use crate::surface::{Paint, Surface};
use crate::transform::Point;

pub struct Canvas2d<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> Canvas2d<'a> {
    #[must_use]
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Reset to the identity transform and clear `width × height` device
    /// pixels.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the context rejects the transform.
    pub fn reset(&self, width: f64, height: f64) -> Result<(), JsValue> {
        self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        self.ctx.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn apply(&self, paint: Paint) {
        if let Some(fill) = paint.fill {
            self.ctx.set_fill_style_str(&fill.to_hex());
            self.ctx.fill();
        }
        if let Some(stroke) = paint.stroke {
            self.ctx.set_stroke_style_str(&stroke.color.to_hex());
            self.ctx.set_line_width(stroke.width);
            self.ctx.stroke();
        }
    }
}

impl Surface for Canvas2d<'_> {
    type Error = JsValue;

    fn save(&mut self) -> Result<(), JsValue> {
        self.ctx.save();
        Ok(())
    }

    fn restore(&mut self) -> Result<(), JsValue> {
        self.ctx.restore();
        Ok(())
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.ctx.translate(x, y)
    }

    fn rotate(&mut self, radians: f64) -> Result<(), JsValue> {
        self.ctx.rotate(radians)
    }

    fn scale(&mut self, sx: f64, sy: f64) -> Result<(), JsValue> {
        self.ctx.scale(sx, sy)
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: Paint) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.rect(x, y, width, height);
        self.apply(paint);
        Ok(())
    }

    fn polygon(&mut self, points: &[Point], paint: Paint) -> Result<(), JsValue> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(());
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        self.ctx.close_path();
        self.apply(paint);
        Ok(())
    }

    fn ellipse(&mut self, center: Point, rx: f64, ry: f64, paint: Paint) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.ellipse(center.x, center.y, rx, ry, 0.0, 0.0, std::f64::consts::TAU)?;
        self.apply(paint);
        Ok(())
    }

    fn text(&mut self, text: &str, font_px: f64, fill: Color) -> Result<(), JsValue> {
        self.ctx.set_font(&font_css(font_px));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(&fill.to_hex());
        self.ctx.fill_text(text, 0.0, 0.0)
    }
}

impl TextMeasure for Canvas2d<'_> {
    fn measure(&self, text: &str, font_px: f64) -> Option<TextExtent> {
        self.ctx.set_font(&font_css(font_px));
        match self.ctx.measure_text(text) {
            Ok(metrics) => Some(TextExtent::new(
                metrics.width(),
                metrics.font_bounding_box_ascent() + metrics.font_bounding_box_descent(),
            )),
            Err(err) => {
                log::debug!("measure_text failed: {err:?}");
                None
            }
        }
    }
}

/// Text measurer that owns its context, for the engine to keep between
/// frames.
pub struct ContextMeasure(pub CanvasRenderingContext2d);

impl TextMeasure for ContextMeasure {
    fn measure(&self, text: &str, font_px: f64) -> Option<TextExtent> {
        Canvas2d::new(&self.0).measure(text, font_px)
    }
}
