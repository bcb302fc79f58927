#![allow(clippy::float_cmp)]

use super::*;
use crate::color::Color;
use crate::geometry::{HeuristicMeasure, ShapeKind};
use crate::item::Phase;

const SETTLE: Settle = Settle { duration: 45, amplitude: 0.05 };

fn ctx() -> HitContext<'static> {
    HitContext { tolerance_px: 0.0, measure: &HeuristicMeasure, tick: 0, settle: SETTLE }
}

fn circle_at(x: f64, y: f64) -> Item {
    Item::shape(ShapeKind::Circle, Point::new(x, y), 10.0, Color::default())
}

/// A clean scene with one placed, settled item.
fn scene_with_placed(x: f64, y: f64) -> (Scene, ItemId) {
    let mut scene = Scene::new();
    let id = scene.spawn_floating(circle_at(x, y));
    scene.grab(id);
    scene.place_held(0, 0.0);
    scene.advance_settling(SETTLE.duration, SETTLE);
    scene.finish_committed_redraw();
    (scene, id)
}

// =============================================================
// Membership
// =============================================================

#[test]
fn new_scene_is_empty_and_dirty() {
    let scene = Scene::new();
    assert!(scene.is_empty());
    assert!(scene.is_dirty());
    assert!(scene.needs_committed_redraw());
}

#[test]
fn grab_moves_floating_item_to_held() {
    let mut scene = Scene::new();
    let id = scene.spawn_floating(circle_at(0.0, 0.0));
    scene.finish_committed_redraw();
    assert_eq!(scene.grab(id), Some(Origin::Floating));
    assert!(scene.floating().is_empty());
    assert_eq!(scene.held().map(Item::id), Some(id));
    assert!(scene.held().is_some_and(Item::is_held));
    assert!(!scene.is_dirty());
    assert_eq!(scene.len(), 1);
}

#[test]
fn grab_fails_while_holding_or_for_unknown_id() {
    let mut scene = Scene::new();
    let a = scene.spawn_floating(circle_at(0.0, 0.0));
    let b = scene.spawn_floating(circle_at(50.0, 0.0));
    assert!(scene.grab(a).is_some());
    assert_eq!(scene.grab(b), None);
    assert_eq!(scene.floating().len(), 1);
    assert_eq!(scene.grab(uuid::Uuid::new_v4()), None);
}

#[test]
fn item_lives_in_exactly_one_slot() {
    let mut scene = Scene::new();
    let id = scene.spawn_floating(circle_at(0.0, 0.0));
    let count = |s: &Scene| {
        s.floating().iter().filter(|i| i.id() == id).count()
            + s.placed().iter().filter(|i| i.id() == id).count()
            + usize::from(s.held().is_some_and(|i| i.id() == id))
    };
    assert_eq!(count(&scene), 1);
    scene.grab(id);
    assert_eq!(count(&scene), 1);
    scene.place_held(3, 0.0);
    assert_eq!(count(&scene), 1);
    scene.grab(id);
    assert_eq!(count(&scene), 1);
    scene.release_held(Point::new(1.0, 0.0), 0.0);
    assert_eq!(count(&scene), 1);
}

#[test]
fn place_held_snaps_and_settles() {
    let mut scene = Scene::new();
    let id = scene.spawn_floating(circle_at(0.0, 0.0).with_rotation(37f64.to_radians()));
    scene.grab(id);
    assert_eq!(scene.place_held(7, 15f64.to_radians()), Some(id));
    let item = scene.get(id);
    assert!(item.is_some_and(|i| (i.rotation() - 30f64.to_radians()).abs() < 1e-9));
    assert_eq!(item.map(Item::phase), Some(Phase::Settling { started_at: 7 }));
    assert_eq!(scene.origin_of(id), Some(Origin::Placed));
}

#[test]
fn release_held_returns_to_floating() {
    let (mut scene, id) = scene_with_placed(0.0, 0.0);
    assert_eq!(scene.grab(id), Some(Origin::Placed));
    assert_eq!(scene.release_held(Point::new(0.5, 0.5), 0.01), Some(id));
    let item = scene.get(id);
    assert_eq!(item.map(Item::phase), Some(Phase::Floating));
    assert_eq!(item.map(|i| i.velocity), Some(Point::new(0.5, 0.5)));
}

#[test]
fn discard_and_remove() {
    let mut scene = Scene::new();
    let a = scene.spawn_floating(circle_at(0.0, 0.0));
    let b = scene.spawn_floating(circle_at(10.0, 0.0));
    scene.grab(a);
    assert_eq!(scene.discard_held().map(|i| i.id()), Some(a));
    assert_eq!(scene.remove(b).map(|i| i.id()), Some(b));
    assert!(scene.is_empty());
    assert!(scene.remove(b).is_none());
}

#[test]
fn spawn_floating_resets_held_phase() {
    let mut scene = Scene::new();
    let mut item = circle_at(0.0, 0.0);
    item.hold();
    let id = scene.spawn_floating(item);
    assert_eq!(scene.get(id).map(Item::phase), Some(Phase::Floating));
}

// =============================================================
// Dirty flag
// =============================================================

#[test]
fn placement_dirties() {
    let mut scene = Scene::new();
    let id = scene.spawn_floating(circle_at(0.0, 0.0));
    scene.finish_committed_redraw();
    scene.grab(id);
    scene.place_held(0, 0.0);
    assert!(scene.is_dirty());
}

#[test]
fn grab_from_placed_dirties() {
    let (mut scene, id) = scene_with_placed(0.0, 0.0);
    assert!(!scene.needs_committed_redraw());
    scene.grab(id);
    assert!(scene.is_dirty());
}

#[test]
fn remove_placed_dirties_but_floating_does_not() {
    let (mut scene, placed) = scene_with_placed(0.0, 0.0);
    let floating = scene.spawn_floating(circle_at(99.0, 0.0));
    scene.remove(floating);
    assert!(!scene.is_dirty());
    scene.remove(placed);
    assert!(scene.is_dirty());
}

#[test]
fn update_placed_dirties_until_redraw() {
    let (mut scene, id) = scene_with_placed(0.0, 0.0);
    assert!(scene.update_placed(id, |item| item.color = Color::rgb(1, 2, 3)));
    assert!(scene.needs_committed_redraw());
    scene.finish_committed_redraw();
    assert!(!scene.needs_committed_redraw());
}

#[test]
fn update_placed_unknown_id_is_noop() {
    let (mut scene, _) = scene_with_placed(0.0, 0.0);
    assert!(!scene.update_placed(uuid::Uuid::new_v4(), |_| {}));
    assert!(!scene.is_dirty());
}

#[test]
fn settling_keeps_redraw_needed_after_clear() {
    let mut scene = Scene::new();
    let id = scene.spawn_floating(circle_at(0.0, 0.0));
    scene.grab(id);
    scene.place_held(0, 0.0);
    scene.finish_committed_redraw();
    assert!(!scene.is_dirty());
    assert!(scene.needs_committed_redraw());

    assert_eq!(scene.advance_settling(44, SETTLE), 0);
    assert!(!scene.is_dirty());
    assert_eq!(scene.advance_settling(45, SETTLE), 1);
    assert!(scene.is_dirty());
    scene.finish_committed_redraw();
    assert!(!scene.needs_committed_redraw());
}

#[test]
fn held_and_floating_changes_do_not_dirty() {
    let (mut scene, _) = scene_with_placed(0.0, 0.0);
    let id = scene.spawn_floating(circle_at(100.0, 100.0));
    scene.grab(id);
    if let Some(held) = scene.held_mut() {
        held.rotate_by(1.0);
    }
    scene.release_held(Point::new(1.0, 0.0), 0.0);
    scene.advance_floating(Viewport::new(1000.0, 1000.0), 0.25, &HeuristicMeasure);
    assert!(!scene.is_dirty());
}

#[test]
fn mark_dirty_forces_redraw() {
    let (mut scene, _) = scene_with_placed(0.0, 0.0);
    scene.mark_dirty();
    assert!(scene.needs_committed_redraw());
}

// =============================================================
// Floating updates
// =============================================================

#[test]
fn advance_floating_drifts_items() {
    let mut scene = Scene::new();
    let id = scene.spawn_floating(circle_at(100.0, 100.0).with_drift(Point::new(2.0, -3.0), 0.0));
    let culled = scene.advance_floating(Viewport::new(800.0, 600.0), 0.25, &HeuristicMeasure);
    assert!(culled.is_empty());
    assert_eq!(scene.get(id).map(|i| i.position), Some(Point::new(102.0, 97.0)));
}

#[test]
fn advance_floating_culls_far_items_only() {
    let mut scene = Scene::new();
    // Buffer is 800 · 0.25 = 200, plus radius 10.
    let near = scene.spawn_floating(circle_at(-205.0, 300.0));
    let far = scene.spawn_floating(circle_at(-215.0, 300.0));
    let culled = scene.advance_floating(Viewport::new(800.0, 600.0), 0.25, &HeuristicMeasure);
    assert_eq!(culled, vec![far]);
    assert!(scene.get(near).is_some());
    assert!(scene.get(far).is_none());
}

#[test]
fn held_item_is_never_culled() {
    let mut scene = Scene::new();
    let id = scene.spawn_floating(circle_at(0.0, 0.0));
    scene.grab(id);
    if let Some(held) = scene.held_mut() {
        held.position = Point::new(-5000.0, -5000.0);
    }
    scene.advance_floating(Viewport::new(800.0, 600.0), 0.25, &HeuristicMeasure);
    assert!(scene.held().is_some());
}

// =============================================================
// Picking
// =============================================================

#[test]
fn item_at_prefers_floating_then_topmost() {
    let (mut scene, placed) = scene_with_placed(0.0, 0.0);
    assert_eq!(scene.item_at(Point::new(0.0, 0.0), &ctx()), Some((placed, Origin::Placed)));

    let lower = scene.spawn_floating(circle_at(0.0, 0.0));
    let upper = scene.spawn_floating(circle_at(5.0, 0.0));
    assert_eq!(scene.item_at(Point::new(0.0, 0.0), &ctx()), Some((upper, Origin::Floating)));
    assert_eq!(scene.item_at(Point::new(-9.0, 0.0), &ctx()), Some((lower, Origin::Floating)));
    assert_eq!(scene.item_at(Point::new(500.0, 0.0), &ctx()), None);
}

#[test]
fn item_at_skips_held() {
    let mut scene = Scene::new();
    let id = scene.spawn_floating(circle_at(0.0, 0.0));
    scene.grab(id);
    assert_eq!(scene.item_at(Point::new(0.0, 0.0), &ctx()), None);
}
