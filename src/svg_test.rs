use std::f64::consts::FRAC_PI_2;

use super::*;
use crate::surface::Stroke;

fn record(f: impl FnOnce(&mut SvgRecorder)) -> String {
    let mut rec = SvgRecorder::begin(100, 50, None);
    f(&mut rec);
    rec.finish()
}

// =============================================================
// Document
// =============================================================

#[test]
fn empty_document_has_header_and_viewbox() {
    let doc = SvgRecorder::begin(320, 400, None).finish();
    assert!(doc.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg "));
    assert!(doc.contains("width=\"320\" height=\"400\" viewBox=\"0 0 320 400\""));
    assert!(doc.ends_with("</svg>\n"));
}

#[test]
fn background_becomes_first_rect() {
    let doc = SvgRecorder::begin(10, 20, Some(Color::rgb(255, 0, 0))).finish();
    assert!(doc.contains("<rect x=\"0\" y=\"0\" width=\"10\" height=\"20\" fill=\"#ff0000\"/>"));
}

// =============================================================
// Primitives
// =============================================================

#[test]
fn rect_uses_identity_matrix_by_default() {
    let doc = record(|r| {
        let Ok(()) = r.rect(1.0, 2.0, 3.0, 4.0, Paint::fill(Color::rgb(0, 0, 255)));
    });
    assert!(doc.contains(
        "<rect x=\"1\" y=\"2\" width=\"3\" height=\"4\" fill=\"#0000ff\" transform=\"matrix(1 0 0 1 0 0)\"/>"
    ));
}

#[test]
fn polygon_lists_points_and_stroke() {
    let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(0.5, -7.25)];
    let stroke = Stroke { color: Color::rgb(0, 0, 0), width: 2.0 };
    let doc = record(|r| {
        let Ok(()) = r.polygon(&pts, Paint::fill(Color::rgb(1, 1, 1)).with_stroke(stroke));
    });
    assert!(doc.contains("points=\"0,0 10,0 0.5,-7.25\""));
    assert!(doc.contains("fill=\"#010101\" stroke=\"#000000\" stroke-width=\"2\""));
}

#[test]
fn outline_only_polygon_has_no_fill() {
    let pts = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
    let doc = record(|r| {
        let Ok(()) = r.polygon(&pts, Paint::outline(Stroke { color: Color::rgb(9, 9, 9), width: 1.0 }));
    });
    assert!(doc.contains("fill=\"none\" stroke=\"#090909\""));
}

#[test]
fn empty_paint_and_degenerate_polygon_emit_nothing() {
    let doc = record(|r| {
        let Ok(()) = r.rect(0.0, 0.0, 1.0, 1.0, Paint::default());
        let Ok(()) = r.polygon(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)], Paint::fill(Color::rgb(1, 2, 3)));
    });
    assert!(!doc.contains("<rect"));
    assert!(!doc.contains("<polygon"));
}

#[test]
fn ellipse_attributes() {
    let doc = record(|r| {
        let Ok(()) = r.ellipse(Point::new(5.0, 6.0), 7.0, 8.0, Paint::fill(Color::rgb(0, 0, 0)));
    });
    assert!(doc.contains("<ellipse cx=\"5\" cy=\"6\" rx=\"7\" ry=\"8\" fill=\"#000000\""));
}

#[test]
fn text_is_escaped_and_centered() {
    let doc = record(|r| {
        let Ok(()) = r.text("a<b & \"c\"", 48.0, Color::rgb(0, 0, 0));
    });
    assert!(doc.contains(">a&lt;b &amp; &quot;c&quot;</text>"));
    assert!(doc.contains("font-size=\"48\""));
    assert!(doc.contains("text-anchor=\"middle\""));
}

// =============================================================
// Transform stack
// =============================================================

#[test]
fn transforms_compose_and_restore() {
    let doc = record(|r| {
        let Ok(()) = r.save();
        let Ok(()) = r.translate(10.0, 20.0);
        let Ok(()) = r.rotate(FRAC_PI_2);
        let Ok(()) = r.scale(2.0, 2.0);
        let Ok(()) = r.rect(0.0, 0.0, 1.0, 1.0, Paint::fill(Color::rgb(0, 0, 0)));
        let Ok(()) = r.restore();
        let Ok(()) = r.rect(0.0, 0.0, 1.0, 1.0, Paint::fill(Color::rgb(255, 255, 255)));
    });
    assert!(doc.contains("fill=\"#000000\" transform=\"matrix(0 2 -2 0 10 20)\""));
    assert!(doc.contains("fill=\"#ffffff\" transform=\"matrix(1 0 0 1 0 0)\""));
}

#[test]
fn unbalanced_restore_is_ignored() {
    let doc = record(|r| {
        let Ok(()) = r.restore();
        let Ok(()) = r.rect(0.0, 0.0, 1.0, 1.0, Paint::fill(Color::rgb(0, 0, 0)));
    });
    assert!(doc.contains("matrix(1 0 0 1 0 0)"));
}

// =============================================================
// Helpers
// =============================================================

#[test]
fn num_formatting() {
    assert_eq!(num(1.0), "1");
    assert_eq!(num(1.5), "1.5");
    assert_eq!(num(-0.00001), "0");
    assert_eq!(num(2.123_456), "2.1235");
    assert_eq!(num(100.0), "100");
    assert_eq!(num(f64::NAN), "0");
}

#[test]
fn escape_covers_all_specials() {
    assert_eq!(escape_xml("<>&\"'x"), "&lt;&gt;&amp;&quot;&apos;x");
}
