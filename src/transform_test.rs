#![allow(clippy::float_cmp)]

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Point ---

#[test]
fn point_distance_and_length() {
    assert_eq!(Point::new(3.0, 4.0).length(), 5.0);
    assert_eq!(Point::new(1.0, 1.0).distance(Point::new(4.0, 5.0)), 5.0);
}

#[test]
fn point_lerp_endpoints_and_midpoint() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, -20.0);
    assert!(point_approx_eq(a.lerp(b, 0.0), a));
    assert!(point_approx_eq(a.lerp(b, 1.0), b));
    assert!(point_approx_eq(a.lerp(b, 0.4), Point::new(4.0, -8.0)));
}

#[test]
fn point_is_finite_rejects_nan_and_infinity() {
    assert!(Point::new(1.0, 2.0).is_finite());
    assert!(!Point::new(f64::NAN, 2.0).is_finite());
    assert!(!Point::new(1.0, f64::INFINITY).is_finite());
}

// --- to_local ---

#[test]
fn to_local_identity_translates_only() {
    let local = to_local(Point::new(110.0, 95.0), Point::new(100.0, 100.0), 0.0, 1.0);
    assert!(point_approx_eq(local, Point::new(10.0, -5.0)));
}

#[test]
fn to_local_undoes_rotation() {
    // A point 10 units right of an item rotated a quarter turn sits on the
    // item's local -y axis.
    let local = to_local(Point::new(10.0, 0.0), Point::new(0.0, 0.0), FRAC_PI_2, 1.0);
    assert!(point_approx_eq(local, Point::new(0.0, -10.0)));
}

#[test]
fn to_local_undoes_scale() {
    let local = to_local(Point::new(40.0, 20.0), Point::new(0.0, 0.0), 0.0, 2.0);
    assert!(point_approx_eq(local, Point::new(20.0, 10.0)));
}

#[test]
fn to_local_zero_scale_returns_origin() {
    let local = to_local(Point::new(40.0, 20.0), Point::new(5.0, 5.0), 1.0, 0.0);
    assert_eq!(local, Point::new(0.0, 0.0));
}

#[test]
fn to_world_round_trip_over_angle_and_scale_grid() {
    let center = Point::new(-37.5, 412.25);
    let world = Point::new(13.0, -7.0);
    for step in 0..24 {
        let rotation = f64::from(step) * TAU / 24.0;
        for scale in [0.1, 0.5, 1.0, 2.5, 10.0] {
            let local = to_local(world, center, rotation, scale);
            let back = to_world(local, center, rotation, scale);
            assert!(
                point_approx_eq(back, world),
                "rotation {rotation} scale {scale}: {back:?} != {world:?}"
            );
        }
    }
}

// --- normalize_angle ---

#[test]
fn normalize_wraps_negative_and_large_angles() {
    assert!(approx_eq(normalize_angle(-FRAC_PI_2), 3.0 * FRAC_PI_2));
    assert!(approx_eq(normalize_angle(5.0 * PI), PI));
    assert_eq!(normalize_angle(TAU), 0.0);
}

#[test]
fn normalize_tiny_negative_stays_below_tau() {
    let wrapped = normalize_angle(-1e-18);
    assert!((0.0..TAU).contains(&wrapped));
}

#[test]
fn normalize_non_finite_is_zero() {
    assert_eq!(normalize_angle(f64::NAN), 0.0);
    assert_eq!(normalize_angle(f64::INFINITY), 0.0);
}

// --- snap_angle ---

#[test]
fn snap_37_degrees_to_30_with_15_degree_increment() {
    let snapped = snap_angle(37f64.to_radians(), 15f64.to_radians());
    assert!(approx_eq(snapped, 30.0 * (PI / 180.0)));
}

#[test]
fn snap_near_full_turn_wraps_to_zero() {
    let snapped = snap_angle(359f64.to_radians(), 15f64.to_radians());
    assert!(snapped < 1e-9 || (TAU - snapped) < 1e-9);
    assert!((0.0..TAU).contains(&snapped));
}

#[test]
fn snap_is_idempotent_over_grid() {
    let inc = 15f64.to_radians();
    for step in -50..50 {
        let theta = f64::from(step) * 0.173;
        let once = snap_angle(theta, inc);
        assert_eq!(snap_angle(once, inc), once, "theta {theta}");
    }
}

#[test]
fn snap_with_invalid_increment_only_normalizes() {
    assert!(approx_eq(snap_angle(-FRAC_PI_2, 0.0), 3.0 * FRAC_PI_2));
    assert!(approx_eq(snap_angle(1.0, f64::NAN), 1.0));
}

// --- Affine ---

#[test]
fn affine_translate_then_rotate_matches_canvas_order() {
    let m = Affine::IDENTITY.translate(100.0, 50.0).rotate(FRAC_PI_2);
    // Local +x becomes world +y after a quarter turn, then offset.
    assert!(point_approx_eq(m.apply(Point::new(10.0, 0.0)), Point::new(100.0, 60.0)));
}

#[test]
fn affine_matches_to_world() {
    let center = Point::new(12.0, -8.0);
    let rotation = 0.7;
    let scale = 1.8;
    let m = Affine::IDENTITY
        .translate(center.x, center.y)
        .rotate(rotation)
        .scale(scale, scale);
    let local = Point::new(-3.0, 9.0);
    assert!(point_approx_eq(m.apply(local), to_world(local, center, rotation, scale)));
}

// --- ViewTransform ---

#[test]
fn view_transform_maps_origin_to_zero_and_scales() {
    let view = ViewTransform::new(Point::new(100.0, 40.0), 3.0);
    assert!(point_approx_eq(view.to_view(Point::new(100.0, 40.0)), Point::new(0.0, 0.0)));
    assert!(point_approx_eq(view.to_view(Point::new(110.0, 45.0)), Point::new(30.0, 15.0)));
}

#[test]
fn view_transform_round_trip_and_affine_agree() {
    let view = ViewTransform::new(Point::new(-20.0, 7.5), 2.25);
    let world = Point::new(33.0, 91.0);
    let projected = view.to_view(world);
    assert!(point_approx_eq(view.to_world(projected), world));
    assert!(point_approx_eq(view.affine().apply(world), projected));
}

#[test]
fn device_view_scales_by_dpr() {
    let view = ViewTransform::device(2.0);
    assert!(point_approx_eq(view.to_view(Point::new(5.0, 6.0)), Point::new(10.0, 12.0)));
}
