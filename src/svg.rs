//! Vector export: a [`Surface`] that records drawing calls as SVG.
//!
//! Recording is bracketed by [`SvgRecorder::begin`] and
//! [`SvgRecorder::finish`]. The recorder mirrors the canvas transform stack
//! as an [`Affine`] and flattens it into a `matrix(...)` attribute on each
//! element, so no `<g>` nesting is needed.

#[cfg(test)]
#[path = "svg_test.rs"]
mod svg_test;

use std::convert::Infallible;

use crate::color::Color;
use crate::consts::FONT_FAMILY;
use crate::surface::{Paint, Surface};
use crate::transform::{Affine, Point};

pub struct SvgRecorder {
    width: u32,
    height: u32,
    body: String,
    current: Affine,
    stack: Vec<Affine>,
}

impl SvgRecorder {
    /// Start a `width × height` document, optionally filled with `background`.
    #[must_use]
    pub fn begin(width: u32, height: u32, background: Option<Color>) -> Self {
        let mut recorder = Self { width, height, body: String::new(), current: Affine::IDENTITY, stack: Vec::new() };
        if let Some(color) = background {
            recorder.body.push_str(&format!(
                "  <rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"{color}\"/>\n"
            ));
        }
        recorder
    }

    /// Close the document and return it.
    #[must_use]
    pub fn finish(self) -> String {
        let (w, h) = (self.width, self.height);
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n\
             {}</svg>\n",
            self.body
        )
    }

    fn transform_attr(&self) -> String {
        let m = self.current;
        format!(
            "matrix({} {} {} {} {} {})",
            num(m.a),
            num(m.b),
            num(m.c),
            num(m.d),
            num(m.e),
            num(m.f)
        )
    }

    fn push_element(&mut self, tag: &str, attrs: &str, paint: Paint) {
        if paint.fill.is_none() && paint.stroke.is_none() {
            return;
        }
        let transform = self.transform_attr();
        let fill = paint.fill.map_or_else(|| "none".to_string(), |c| c.to_hex());
        let mut line = format!("  <{tag} {attrs} fill=\"{fill}\"");
        if let Some(stroke) = paint.stroke {
            line.push_str(&format!(" stroke=\"{}\" stroke-width=\"{}\"", stroke.color, num(stroke.width)));
        }
        line.push_str(&format!(" transform=\"{transform}\"/>\n"));
        self.body.push_str(&line);
    }
}

impl Surface for SvgRecorder {
    type Error = Infallible;

    fn save(&mut self) -> Result<(), Infallible> {
        self.stack.push(self.current);
        Ok(())
    }

    fn restore(&mut self) -> Result<(), Infallible> {
        if let Some(previous) = self.stack.pop() {
            self.current = previous;
        }
        Ok(())
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), Infallible> {
        self.current = self.current.translate(x, y);
        Ok(())
    }

    fn rotate(&mut self, radians: f64) -> Result<(), Infallible> {
        self.current = self.current.rotate(radians);
        Ok(())
    }

    fn scale(&mut self, sx: f64, sy: f64) -> Result<(), Infallible> {
        self.current = self.current.scale(sx, sy);
        Ok(())
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: Paint) -> Result<(), Infallible> {
        let attrs = format!("x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"", num(x), num(y), num(width), num(height));
        self.push_element("rect", &attrs, paint);
        Ok(())
    }

    fn polygon(&mut self, points: &[Point], paint: Paint) -> Result<(), Infallible> {
        if points.len() < 3 {
            return Ok(());
        }
        let mut list = String::new();
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                list.push(' ');
            }
            list.push_str(&num(p.x));
            list.push(',');
            list.push_str(&num(p.y));
        }
        self.push_element("polygon", &format!("points=\"{list}\""), paint);
        Ok(())
    }

    fn ellipse(&mut self, center: Point, rx: f64, ry: f64, paint: Paint) -> Result<(), Infallible> {
        let attrs = format!("cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\"", num(center.x), num(center.y), num(rx), num(ry));
        self.push_element("ellipse", &attrs, paint);
        Ok(())
    }

    fn text(&mut self, text: &str, font_px: f64, fill: Color) -> Result<(), Infallible> {
        let transform = self.transform_attr();
        self.body.push_str(&format!(
            "  <text x=\"0\" y=\"0\" font-family=\"{FONT_FAMILY}\" font-size=\"{}\" fill=\"{fill}\" \
             text-anchor=\"middle\" dominant-baseline=\"central\" transform=\"{transform}\">{}</text>\n",
            num(font_px),
            escape_xml(text)
        ));
        Ok(())
    }
}

/// Compact decimal: at most four fractional digits, trailing zeros
/// trimmed, no negative zero. Non-finite values print as `0`.
#[must_use]
pub fn num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let s = format!("{value:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() { "0".to_string() } else { s.to_string() }
}

/// Escape the five XML special characters.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
