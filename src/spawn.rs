//! Spawning: new items enter just outside a random viewport edge and drift
//! across it.
//!
//! All randomness flows through one seeded [`SmallRng`], so a given seed
//! replays the same sequence of spawns in tests.

#[cfg(test)]
#[path = "spawn_test.rs"]
mod spawn_test;

use std::f64::consts::TAU;

use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::artboard::Viewport;
use crate::color::pick_text_color;
use crate::config::ComposerConfig;
use crate::consts::SPAWN_AIM_JITTER;
use crate::geometry::{ShapeKind, TextMeasure};
use crate::item::Item;
use crate::transform::Point;

/// Uniform sample from `[lo, hi)`, or `lo` when the range is empty.
fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if lo < hi { rng.random_range(lo..hi) } else { lo }
}

pub struct Spawner {
    rng: SmallRng,
    countdown: u64,
}

impl Spawner {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(seed), countdown: 0 }
    }

    /// Advance the spawn timer one tick. Returns a new shape when the timer
    /// fires and fewer than `max_floating` items are floating.
    pub fn tick(&mut self, floating: usize, viewport: Viewport, config: &ComposerConfig) -> Option<Item> {
        if config.spawn_interval_ticks == 0 {
            return None;
        }
        if self.countdown > 0 {
            self.countdown -= 1;
            return None;
        }
        if floating >= config.max_floating {
            return None;
        }
        self.countdown = config.spawn_interval_ticks - 1;
        Some(self.spawn_shape(viewport, config))
    }

    /// A random shape entering from a random edge.
    pub fn spawn_shape(&mut self, viewport: Viewport, config: &ComposerConfig) -> Item {
        let kind = ShapeKind::ALL.choose(&mut self.rng).copied().unwrap_or(ShapeKind::Circle);
        let size = uniform(&mut self.rng, config.size_min, config.size_max);
        let color = config.palette.choose(&mut self.rng).copied().unwrap_or_default();
        let rotation = uniform(&mut self.rng, 0.0, TAU);
        let item = Item::shape(kind, Point::default(), size, color).with_rotation(rotation);
        let radius = kind.radius(size);
        self.launch(item, radius, viewport, config)
    }

    /// A text label entering from a random edge, colored to read against the
    /// artboard. Whitespace-only text spawns nothing.
    pub fn spawn_text(
        &mut self,
        text: &str,
        viewport: Viewport,
        config: &ComposerConfig,
        measure: &dyn TextMeasure,
    ) -> Option<Item> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let color = pick_text_color(&config.palette, config.artboard_color, config.text_contrast_min, &mut self.rng);
        let item = Item::text(text, Point::default(), config.text_size, color);
        let radius = item.local_radius(measure);
        Some(self.launch(item, radius, viewport, config))
    }

    /// Position `item` just outside a random edge and aim it at the
    /// viewport center.
    fn launch(&mut self, item: Item, radius: f64, viewport: Viewport, config: &ComposerConfig) -> Item {
        let position = match self.rng.random_range(0..4u8) {
            0 => Point::new(uniform(&mut self.rng, 0.0, viewport.width), -radius),
            1 => Point::new(viewport.width + radius, uniform(&mut self.rng, 0.0, viewport.height)),
            2 => Point::new(uniform(&mut self.rng, 0.0, viewport.width), viewport.height + radius),
            _ => Point::new(-radius, uniform(&mut self.rng, 0.0, viewport.height)),
        };
        let center = viewport.center();
        let aim = (center.y - position.y).atan2(center.x - position.x)
            + uniform(&mut self.rng, -SPAWN_AIM_JITTER, SPAWN_AIM_JITTER);
        let speed = uniform(&mut self.rng, config.drift_speed_min, config.drift_speed_max);
        let spin = uniform(&mut self.rng, -config.spin_max, config.spin_max);

        let mut item = item.with_drift(Point::new(aim.cos() * speed, aim.sin() * speed), spin);
        item.position = position;
        log::debug!("spawned {:?} at ({:.0}, {:.0})", item.kind(), position.x, position.y);
        item
    }

    /// Fresh drift for an item dropped outside the artboard. The velocity is
    /// never zero.
    pub fn random_drift(&mut self, config: &ComposerConfig) -> (Point, f64) {
        let angle = uniform(&mut self.rng, 0.0, TAU);
        let speed = uniform(&mut self.rng, config.drift_speed_min, config.drift_speed_max).max(f64::EPSILON);
        let spin = uniform(&mut self.rng, -config.spin_max, config.spin_max);
        (Point::new(angle.cos() * speed, angle.sin() * speed), spin)
    }
}
