#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// fit
// =============================================================

#[test]
fn fit_limited_by_height() {
    let board = Artboard::fit(Viewport::new(1000.0, 600.0), 0.8, 50.0);
    assert_eq!(board.height, 500.0);
    assert_eq!(board.width, 400.0);
    assert_eq!(board.x, 300.0);
    assert_eq!(board.y, 50.0);
}

#[test]
fn fit_limited_by_width() {
    let board = Artboard::fit(Viewport::new(500.0, 1000.0), 2.0, 0.0);
    assert_eq!(board.width, 500.0);
    assert_eq!(board.height, 250.0);
    assert_eq!(board.y, 375.0);
}

#[test]
fn fit_is_centered() {
    let viewport = Viewport::new(1234.0, 777.0);
    let board = Artboard::fit(viewport, 0.8, 40.0);
    assert!((board.center().x - viewport.center().x).abs() < 1e-9);
    assert!((board.center().y - viewport.center().y).abs() < 1e-9);
    assert!((board.width / board.height - 0.8).abs() < 1e-9);
}

#[test]
fn degenerate_viewport_gives_empty_board() {
    let board = Artboard::fit(Viewport::new(60.0, 60.0), 0.8, 40.0);
    assert!(board.is_empty());
    assert!(!board.contains(board.center()));

    let board = Artboard::fit(Viewport::new(600.0, 600.0), 0.0, 0.0);
    assert!(board.is_empty());
}

// =============================================================
// contains
// =============================================================

#[test]
fn contains_is_inclusive() {
    let board = Artboard { x: 10.0, y: 20.0, width: 100.0, height: 50.0 };
    assert!(board.contains(Point::new(10.0, 20.0)));
    assert!(board.contains(Point::new(110.0, 70.0)));
    assert!(board.contains(Point::new(60.0, 45.0)));
    assert!(!board.contains(Point::new(9.999, 45.0)));
    assert!(!board.contains(Point::new(60.0, 70.001)));
}

#[test]
fn viewport_margin_containment() {
    let viewport = Viewport::new(100.0, 100.0);
    assert!(viewport.contains_with_margin(Point::new(-10.0, 50.0), 10.0));
    assert!(!viewport.contains_with_margin(Point::new(-10.1, 50.0), 10.0));
    assert!(viewport.contains_with_margin(Point::new(110.0, 110.0), 10.0));
}

// =============================================================
// Export mapping
// =============================================================

#[test]
fn export_view_maps_corners() {
    let board = Artboard { x: 10.0, y: 20.0, width: 100.0, height: 50.0 };
    let view = board.export_view(4.0);
    assert_eq!(view.to_view(Point::new(10.0, 20.0)), Point::new(0.0, 0.0));
    assert_eq!(view.to_view(Point::new(110.0, 70.0)), Point::new(400.0, 200.0));
}

#[test]
fn export_size_rounds_up_and_is_at_least_one() {
    let board = Artboard { x: 0.0, y: 0.0, width: 100.25, height: 50.0 };
    assert_eq!(board.export_size(2.0), (201, 100));
    assert_eq!(Artboard::default().export_size(4.0), (1, 1));
    assert_eq!(board.export_size(f64::NAN), (1, 1));
}
