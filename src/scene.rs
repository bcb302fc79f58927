//! Scene containers: floating items, placed items, and the held item.
//!
//! Every item lives in exactly one of the three slots. Moving between slots
//! happens inside a single method call, so callers never observe an item in
//! two places. The scene also owns the committed-artwork dirty flag: any
//! change to the placed collection or to a placed item sets it, and the
//! renderer clears it after repainting.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use crate::artboard::Viewport;
use crate::geometry::TextMeasure;
use crate::hit::{HitContext, is_point_on_item};
use crate::item::{Item, ItemId, Settle};
use crate::transform::Point;

/// Which collection a grabbed item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Floating,
    Placed,
}

#[derive(Debug, Clone)]
pub struct Scene {
    floating: Vec<Item>,
    placed: Vec<Item>,
    held: Option<Item>,
    dirty: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self { floating: Vec::new(), placed: Vec::new(), held: None, dirty: true }
    }
}

impl Scene {
    /// An empty scene. Starts dirty so the first frame paints the artboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Queries ---

    /// Floating items in draw order (bottom first).
    #[must_use]
    pub fn floating(&self) -> &[Item] {
        &self.floating
    }

    /// Placed items in draw order (bottom first).
    #[must_use]
    pub fn placed(&self) -> &[Item] {
        &self.placed
    }

    #[must_use]
    pub fn held(&self) -> Option<&Item> {
        self.held.as_ref()
    }

    /// Mutable access to the held item. Not a committed-artwork change.
    pub fn held_mut(&mut self) -> Option<&mut Item> {
        self.held.as_mut()
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.held
            .iter()
            .chain(&self.floating)
            .chain(&self.placed)
            .find(|item| item.id() == id)
    }

    /// Which collection holds `id`, if it is floating or placed.
    #[must_use]
    pub fn origin_of(&self, id: ItemId) -> Option<Origin> {
        if self.floating.iter().any(|i| i.id() == id) {
            Some(Origin::Floating)
        } else if self.placed.iter().any(|i| i.id() == id) {
            Some(Origin::Placed)
        } else {
            None
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.floating.len() + self.placed.len() + usize::from(self.held.is_some())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Topmost item under `point`. Floating items draw above placed ones, so
    /// they are searched first; each list is searched last-drawn-first. The
    /// held item is never returned.
    #[must_use]
    pub fn item_at(&self, point: Point, ctx: &HitContext<'_>) -> Option<(ItemId, Origin)> {
        let floating = self
            .floating
            .iter()
            .rev()
            .find(|item| is_point_on_item(point, item, ctx))
            .map(|item| (item.id(), Origin::Floating));
        floating.or_else(|| {
            self.placed
                .iter()
                .rev()
                .find(|item| is_point_on_item(point, item, ctx))
                .map(|item| (item.id(), Origin::Placed))
        })
    }

    // --- Membership ---

    /// Add a floating item on top of the floating stack.
    pub fn spawn_floating(&mut self, mut item: Item) -> ItemId {
        if item.is_held() || item.is_settling() {
            item.release(item.velocity, item.spin);
        }
        let id = item.id();
        self.floating.push(item);
        id
    }

    /// Take `id` under pointer control. Fails if something is already held
    /// or `id` is not floating or placed.
    pub fn grab(&mut self, id: ItemId) -> Option<Origin> {
        if self.held.is_some() {
            return None;
        }
        let (mut item, origin) = if let Some(i) = self.floating.iter().position(|i| i.id() == id) {
            (self.floating.remove(i), Origin::Floating)
        } else if let Some(i) = self.placed.iter().position(|i| i.id() == id) {
            self.dirty = true;
            (self.placed.remove(i), Origin::Placed)
        } else {
            return None;
        };
        item.hold();
        self.held = Some(item);
        Some(origin)
    }

    /// Commit the held item onto the placed stack at `tick`.
    pub fn place_held(&mut self, tick: u64, snap_increment: f64) -> Option<ItemId> {
        let mut item = self.held.take()?;
        item.place(tick, snap_increment);
        let id = item.id();
        self.placed.push(item);
        self.dirty = true;
        Some(id)
    }

    /// Return the held item to the floating stack with the given drift.
    pub fn release_held(&mut self, velocity: Point, spin: f64) -> Option<ItemId> {
        let mut item = self.held.take()?;
        item.release(velocity, spin);
        let id = item.id();
        self.floating.push(item);
        Some(id)
    }

    /// Drop the held item entirely.
    pub fn discard_held(&mut self) -> Option<Item> {
        self.held.take()
    }

    /// Delete `id` from whichever slot holds it.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        if self.held.as_ref().is_some_and(|i| i.id() == id) {
            return self.held.take();
        }
        if let Some(i) = self.floating.iter().position(|i| i.id() == id) {
            return Some(self.floating.remove(i));
        }
        let i = self.placed.iter().position(|i| i.id() == id)?;
        self.dirty = true;
        Some(self.placed.remove(i))
    }

    /// Mutate a placed item in place. Returns false if `id` is not placed.
    pub fn update_placed(&mut self, id: ItemId, f: impl FnOnce(&mut Item)) -> bool {
        match self.placed.iter_mut().find(|i| i.id() == id) {
            Some(item) => {
                f(item);
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    // --- Per-tick updates ---

    /// Drift every floating item one tick, then cull those that have left
    /// the viewport by more than `max(w, h) · buffer_ratio` plus their own
    /// radius. Returns the culled ids.
    pub fn advance_floating(&mut self, viewport: Viewport, buffer_ratio: f64, measure: &dyn TextMeasure) -> Vec<ItemId> {
        let buffer = viewport.width.max(viewport.height) * buffer_ratio;
        let mut culled = Vec::new();
        self.floating.retain_mut(|item| {
            item.drift();
            let margin = buffer + item.bounding_radius(measure);
            let keep = viewport.contains_with_margin(item.position, margin);
            if !keep {
                culled.push(item.id());
            }
            keep
        });
        culled
    }

    /// Finish settle pulses that have run `settle.duration` ticks. Returns
    /// how many finished; any completion dirties the committed artwork.
    pub fn advance_settling(&mut self, tick: u64, settle: Settle) -> usize {
        let finished = self
            .placed
            .iter_mut()
            .map(|i| i.update_settle(tick, settle.duration))
            .filter(|done| *done)
            .count();
        if finished > 0 {
            self.dirty = true;
        }
        finished
    }

    // --- Redraw policy ---

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force a committed-artwork repaint (e.g. after a resize).
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether the committed layer must be repainted this frame: something
    /// changed, or a placed item is still pulsing.
    #[must_use]
    pub fn needs_committed_redraw(&self) -> bool {
        self.dirty || self.placed.iter().any(Item::is_settling)
    }

    /// Called by the renderer after repainting the committed layer.
    pub fn finish_committed_redraw(&mut self) {
        self.dirty = false;
    }
}
