//! The composer engine: tick loop, pointer/wheel/key handling, and frame
//! rendering.
//!
//! [`EngineCore`] holds every piece of state and all the rules, and never
//! touches the DOM, so it is tested natively. [`Engine`] wraps it with the
//! on-screen canvas and the off-screen committed-artwork buffer.
//!
//! Per tick the order is fixed: spawn, drift floating items, move the held
//! item toward the pointer, advance settle pulses. Rendering then repaints
//! the committed buffer only if needed, composites it, and draws the
//! floating and held layers on top.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::artboard::{Artboard, Viewport};
use crate::canvas2d::{Canvas2d, ContextMeasure};
use crate::color::{next_in_palette, next_readable_in_palette};
use crate::config::ComposerConfig;
use crate::export::{self, ExportError, ExportFormat};
use crate::geometry::{HeuristicMeasure, TextMeasure};
use crate::hit::HitContext;
use crate::input::{Button, InputState, Key, Modifiers, WheelDelta};
use crate::item::{ItemId, ItemKind};
use crate::render::{Frame, begin_view, draw_committed, draw_floating, draw_held};
use crate::scene::{Origin, Scene};
use crate::spawn::Spawner;
use crate::transform::{Point, ViewTransform};

pub const CURSOR_DEFAULT: &str = "default";
pub const CURSOR_GRAB: &str = "grab";
pub const CURSOR_GRABBING: &str = "grabbing";

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    RenderNeeded,
    ItemPlaced { id: ItemId },
    ItemReleased { id: ItemId },
    ItemDeleted { id: ItemId },
    /// The host should ask the user for a line of text and pass it to
    /// [`EngineCore::submit_text`].
    TextEntryRequested,
    ExportRequested(ExportFormat),
    SetCursor(&'static str),
}

/// Core engine state: every rule that does not need the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub scene: Scene,
    pub spawner: Spawner,
    pub config: ComposerConfig,
    pub input: InputState,
    viewport: Viewport,
    artboard: Artboard,
    tick: u64,
    pointer: Option<Point>,
    cursor: &'static str,
    measure: Box<dyn TextMeasure>,
}

impl EngineCore {
    #[must_use]
    pub fn new(config: ComposerConfig, seed: u64) -> Self {
        Self {
            scene: Scene::new(),
            spawner: Spawner::new(seed),
            config,
            input: InputState::Idle,
            viewport: Viewport::default(),
            artboard: Artboard::default(),
            tick: 0,
            pointer: None,
            cursor: CURSOR_DEFAULT,
            measure: Box::new(HeuristicMeasure),
        }
    }

    /// Replace the text measurer (the browser supplies a canvas-backed one).
    #[must_use]
    pub fn with_measure(mut self, measure: Box<dyn TextMeasure>) -> Self {
        self.measure = measure;
        self
    }

    // --- Queries ---

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn artboard(&self) -> Artboard {
        self.artboard
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    #[must_use]
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    #[must_use]
    pub fn measure(&self) -> &dyn TextMeasure {
        self.measure.as_ref()
    }

    #[must_use]
    pub fn hit_context(&self) -> HitContext<'_> {
        HitContext {
            tolerance_px: self.config.click_tolerance_px,
            measure: self.measure.as_ref(),
            tick: self.tick,
            settle: self.config.settle(),
        }
    }

    #[must_use]
    pub fn frame(&self) -> Frame<'_> {
        Frame { measure: self.measure.as_ref(), tick: self.tick, settle: self.config.settle() }
    }

    /// Topmost item under `point`, excluding the held one.
    #[must_use]
    pub fn item_under(&self, point: Point) -> Option<(ItemId, Origin)> {
        self.scene.item_at(point, &self.hit_context())
    }

    // --- Viewport ---

    /// Resize to `width × height` CSS pixels and refit the artboard.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.viewport = Viewport::new(width, height);
        self.artboard = Artboard::fit(self.viewport, self.config.artboard_aspect, self.config.artboard_margin_px);
        self.scene.mark_dirty();
        vec![Action::RenderNeeded]
    }

    // --- Tick ---

    /// Advance one animation frame.
    pub fn tick(&mut self) -> Vec<Action> {
        self.tick += 1;
        let mut actions = Vec::new();

        if self.viewport.width > 0.0 && self.viewport.height > 0.0 {
            if let Some(item) = self.spawner.tick(self.scene.floating().len(), self.viewport, &self.config) {
                self.scene.spawn_floating(item);
            }
        }

        let culled =
            self.scene.advance_floating(self.viewport, self.config.offscreen_buffer_ratio, self.measure.as_ref());
        for id in culled {
            log::debug!("culled {id}");
            actions.push(Action::ItemDeleted { id });
        }

        if let (InputState::Holding { offset, .. }, Some(pointer)) = (self.input, self.pointer) {
            let target = Point::new(pointer.x - offset.x, pointer.y - offset.y);
            if let Some(held) = self.scene.held_mut() {
                held.position = held.position.lerp(target, self.config.hold_smoothing);
            }
        }

        self.scene.advance_settling(self.tick, self.config.settle());

        let animating = !self.scene.floating().is_empty() || self.scene.held().is_some();
        if animating || !actions.is_empty() || self.scene.needs_committed_redraw() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    // --- Pointer ---

    /// Primary press grabs the topmost item; secondary press on a placed
    /// item cycles its color.
    pub fn on_pointer_down(&mut self, point: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        self.pointer = Some(point);
        if self.scene.held().is_some() {
            return Vec::new();
        }
        let Some((id, origin)) = self.item_under(point) else {
            return Vec::new();
        };

        match button {
            Button::Primary => {
                let center = self.scene.get(id).map_or(point, |item| item.position);
                let Some(from) = self.scene.grab(id) else {
                    return Vec::new();
                };
                let offset = Point::new(point.x - center.x, point.y - center.y);
                self.input = InputState::Holding { id, from, offset };
                log::debug!("grabbed {id} from {from:?}");
                let mut actions = vec![Action::RenderNeeded];
                self.set_cursor(CURSOR_GRABBING, &mut actions);
                actions
            }
            Button::Secondary if origin == Origin::Placed => {
                let config = &self.config;
                self.scene.update_placed(id, |item| {
                    let next = match item.kind() {
                        ItemKind::Text(_) => next_readable_in_palette(
                            &config.palette,
                            item.color,
                            config.artboard_color,
                            config.text_contrast_min,
                        ),
                        ItemKind::Shape(_) => next_in_palette(&config.palette, item.color),
                    };
                    item.color = next;
                });
                vec![Action::RenderNeeded]
            }
            Button::Secondary | Button::Middle => Vec::new(),
        }
    }

    pub fn on_pointer_move(&mut self, point: Point, _modifiers: Modifiers) -> Vec<Action> {
        self.pointer = Some(point);
        let mut actions = Vec::new();
        if self.input == InputState::Idle {
            let cursor = if self.item_under(point).is_some() { CURSOR_GRAB } else { CURSOR_DEFAULT };
            self.set_cursor(cursor, &mut actions);
        }
        actions
    }

    /// Primary release drops the held item where the pointer is.
    ///
    /// Inside the artboard it is placed (rotation snapped, settle started);
    /// outside it goes back to floating with fresh drift. Empty text is
    /// deleted either way.
    pub fn on_pointer_up(&mut self, point: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        self.pointer = Some(point);
        if button != Button::Primary {
            return Vec::new();
        }
        let InputState::Holding { id, offset, .. } = self.input else {
            return Vec::new();
        };
        self.input = InputState::Idle;

        let mut actions = Vec::new();
        self.set_cursor(CURSOR_GRAB, &mut actions);

        let Some(held) = self.scene.held_mut() else {
            return actions;
        };
        held.position = Point::new(point.x - offset.x, point.y - offset.y);
        let inside = self.artboard.contains(held.position);

        if held.is_empty_text() {
            self.scene.discard_held();
            log::info!("deleted empty text {id}");
            actions.push(Action::ItemDeleted { id });
        } else if inside {
            self.scene.place_held(self.tick, self.config.snap_increment());
            log::info!("placed {id}");
            actions.push(Action::ItemPlaced { id });
        } else {
            let (velocity, spin) = self.spawner.random_drift(&self.config);
            self.scene.release_held(velocity, spin);
            log::debug!("released {id} outside the artboard");
            actions.push(Action::ItemReleased { id });
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// A cancelled gesture (touch interrupted, capture lost) drops the held
    /// item at the last known pointer position, as a primary release would.
    pub fn on_pointer_cancel(&mut self, modifiers: Modifiers) -> Vec<Action> {
        match (self.input, self.pointer) {
            (InputState::Holding { .. }, Some(point)) => self.on_pointer_up(point, Button::Primary, modifiers),
            _ => Vec::new(),
        }
    }

    /// While holding: the wheel rotates, Shift+wheel scales.
    pub fn on_wheel(&mut self, _point: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        let notches = delta.notches();
        let (min, max) = (self.config.scale_min, self.config.scale_max);
        let step = self.config.wheel_scale_step;
        let rotate_step = self.config.wheel_rotate_step();
        let Some(held) = self.scene.held_mut() else {
            return Vec::new();
        };
        if notches == 0.0 {
            return Vec::new();
        }
        if modifiers.shift {
            // Scrolling up (negative dy) grows the item.
            held.set_scale(held.scale() * step.powf(-notches), min, max);
        } else {
            held.rotate_by(notches * rotate_step);
        }
        vec![Action::RenderNeeded]
    }

    // --- Keyboard ---

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.has_command() {
            return Vec::new();
        }
        if let Some(id) = self.scene.held().map(|item| item.id()) {
            return self.held_key(id, &key);
        }

        if key.is("Delete") {
            let target = self.pointer.and_then(|p| self.item_under(p));
            return match target {
                Some((id, _)) => self.delete(id),
                None => Vec::new(),
            };
        }
        match key.printable().map(|c| c.to_ascii_lowercase()) {
            Some('t') => vec![Action::TextEntryRequested],
            Some('n') => self.spawn_now(),
            Some('p') => vec![Action::ExportRequested(ExportFormat::Png)],
            Some('s') => vec![Action::ExportRequested(ExportFormat::Svg)],
            _ => Vec::new(),
        }
    }

    fn held_key(&mut self, id: ItemId, key: &Key) -> Vec<Action> {
        let is_text = self.scene.held().is_some_and(|item| matches!(item.kind(), ItemKind::Text(_)));
        if key.is("Delete") || (key.is("Backspace") && !is_text) {
            return self.delete(id);
        }
        let Some(label) = self.scene.held_mut().and_then(|item| item.label_mut()) else {
            return Vec::new();
        };
        if key.is("Backspace") {
            label.pop();
        } else if let Some(c) = key.printable() {
            label.push(c);
        } else {
            return Vec::new();
        }
        vec![Action::RenderNeeded]
    }

    // --- Commands ---

    /// Delete `id` wherever it lives.
    pub fn delete(&mut self, id: ItemId) -> Vec<Action> {
        if self.scene.remove(id).is_none() {
            return Vec::new();
        }
        if self.input.held_id() == Some(id) {
            self.input = InputState::Idle;
        }
        log::info!("deleted {id}");
        vec![Action::ItemDeleted { id }, Action::RenderNeeded]
    }

    /// Spawn a text label from user input. Blank input spawns nothing.
    pub fn submit_text(&mut self, text: &str) -> Vec<Action> {
        match self.spawner.spawn_text(text, self.viewport, &self.config, self.measure.as_ref()) {
            Some(item) => {
                self.scene.spawn_floating(item);
                vec![Action::RenderNeeded]
            }
            None => Vec::new(),
        }
    }

    /// Spawn a random shape immediately, ignoring the floating cap.
    pub fn spawn_now(&mut self) -> Vec<Action> {
        let item = self.spawner.spawn_shape(self.viewport, &self.config);
        self.scene.spawn_floating(item);
        vec![Action::RenderNeeded]
    }

    /// The committed artwork as an SVG document.
    #[must_use]
    pub fn export_svg(&self) -> String {
        export::export_svg(&self.scene, &self.artboard, &self.config, self.measure.as_ref())
    }

    fn set_cursor(&mut self, cursor: &'static str, actions: &mut Vec<Action>) {
        if self.cursor != cursor {
            self.cursor = cursor;
            actions.push(Action::SetCursor(cursor));
        }
    }
}

/// Device pixels for a CSS length at `dpr`, at least 1.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn device_pixels(css: f64, dpr: f64) -> u32 {
    let px = (css * dpr).round();
    if px.is_finite() { px.clamp(1.0, f64::from(u32::MAX)) as u32 } else { 1 }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("2d context has an unexpected type"))
}

/// The full engine. Wraps `EngineCore` and owns the browser canvases.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    committed: HtmlCanvasElement,
    committed_ctx: CanvasRenderingContext2d,
    dpr: f64,
    pub core: EngineCore,
}

impl Engine {
    /// Bind to `canvas`, creating the off-screen committed-artwork buffer.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement, document: &Document, config: ComposerConfig, seed: u64) -> Result<Self, JsValue> {
        let ctx = context_2d(&canvas)?;
        let committed = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str("created element is not a canvas"))?;
        let committed_ctx = context_2d(&committed)?;
        let core = EngineCore::new(config, seed).with_measure(Box::new(ContextMeasure(ctx.clone())));
        Ok(Self { canvas, ctx, committed, committed_ctx, dpr: 1.0, core })
    }

    // --- Viewport ---

    /// Update viewport dimensions and device pixel ratio; resizes both
    /// backing stores.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        let (w, h) = (device_pixels(width_css, self.dpr), device_pixels(height_css, self.dpr));
        for canvas in [&self.canvas, &self.committed] {
            canvas.set_width(w);
            canvas.set_height(h);
        }
        self.core.set_viewport(width_css, height_css)
    }

    // --- Delegated input ---

    pub fn tick(&mut self) -> Vec<Action> {
        self.core.tick()
    }

    pub fn on_pointer_down(&mut self, point: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(point, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, point: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(point, modifiers)
    }

    pub fn on_pointer_up(&mut self, point: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(point, button, modifiers)
    }

    pub fn on_pointer_cancel(&mut self, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_cancel(modifiers)
    }

    pub fn on_wheel(&mut self, point: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(point, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    pub fn submit_text(&mut self, text: &str) -> Vec<Action> {
        self.core.submit_text(text)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any `Canvas2D` call fails.
    pub fn render(&mut self) -> Result<(), JsValue> {
        if self.core.scene.needs_committed_redraw() {
            self.draw_committed_buffer()?;
            self.core.scene.finish_committed_redraw();
        }

        let mut surface = Canvas2d::new(&self.ctx);
        surface.reset(f64::from(self.canvas.width()), f64::from(self.canvas.height()))?;
        self.ctx.draw_image_with_html_canvas_element(&self.committed, 0.0, 0.0)?;
        begin_view(&mut surface, ViewTransform::device(self.dpr))?;
        let frame = self.core.frame();
        draw_floating(&mut surface, &self.core.scene, frame)?;
        draw_held(&mut surface, &self.core.scene, frame)
    }

    fn draw_committed_buffer(&self) -> Result<(), JsValue> {
        let mut surface = Canvas2d::new(&self.committed_ctx);
        surface.reset(f64::from(self.committed.width()), f64::from(self.committed.height()))?;
        begin_view(&mut surface, ViewTransform::device(self.dpr))?;
        let config = &self.core.config;
        draw_committed(
            &mut surface,
            &self.core.scene,
            self.core.viewport(),
            &self.core.artboard(),
            config.background,
            config.artboard_color,
            self.core.frame(),
        )
    }

    // --- Export ---

    /// The committed artwork as a PNG data URL at `export_scale`.
    ///
    /// # Errors
    ///
    /// See [`export::export_png`].
    pub fn export_png(&self, document: &Document) -> Result<String, ExportError> {
        export::export_png(
            document,
            &self.core.scene,
            &self.core.artboard(),
            &self.core.config,
            self.core.measure(),
        )
    }

    #[must_use]
    pub fn export_svg(&self) -> String {
        self.core.export_svg()
    }
}
