//! Browser entry point: DOM wiring, the animation loop and action handling.
//!
//! Expects a `<canvas id="artboard">` sized by CSS and, optionally, a
//! `<script id="artboard-config" type="application/json">` holding a
//! configuration object. Every event handler borrows the shared [`App`],
//! forwards to the engine and processes the returned actions; the frame
//! callback ticks and renders when something asked for it.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use time::PrimitiveDateTime;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Blob, BlobPropertyBag, Document, Event, EventTarget, HtmlAnchorElement,
    HtmlCanvasElement, KeyboardEvent, PointerEvent, Url, WheelEvent, Window,
};

use crate::config::ComposerConfig;
use crate::engine::{Action, Engine};
use crate::export::{ExportError, ExportFormat, file_name, stamp_from_parts};
use crate::input::{Button, Key, Modifiers, WheelDelta};
use crate::transform::Point;

const CANVAS_ID: &str = "artboard";
const CONFIG_ID: &str = "artboard-config";

type Shared = Rc<RefCell<App>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| JsValue::from_str("artboard canvas not found"))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("#artboard is not a canvas"))?;

    let engine = Engine::new(canvas.clone(), &document, load_config(&document), seed())?;
    let app = Rc::new(RefCell::new(App { engine, window: window.clone(), document, canvas, render_pending: true }));
    app.borrow_mut().resize();

    wire_events(&app, &window)?;
    start_loop(&app)?;
    log::info!("artboard started");
    Ok(())
}

fn load_config(document: &Document) -> ComposerConfig {
    let Some(json) = document.get_element_by_id(CONFIG_ID).and_then(|el| el.text_content()) else {
        return ComposerConfig::default();
    };
    match ComposerConfig::from_json(&json) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("ignoring config: {err}");
            ComposerConfig::default()
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn seed() -> u64 {
    let random = (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64;
    random ^ (js_sys::Date::now() as u64)
}

// =============================================================================
// APP
// =============================================================================

struct App {
    engine: Engine,
    window: Window,
    document: Document,
    canvas: HtmlCanvasElement,
    render_pending: bool,
}

impl App {
    fn resize(&mut self) {
        let rect = self.canvas.get_bounding_client_rect();
        let dpr = self.window.device_pixel_ratio();
        let actions = self.engine.set_viewport(rect.width(), rect.height(), dpr);
        self.dispatch(actions);
    }

    fn frame(&mut self) {
        let actions = self.engine.tick();
        self.dispatch(actions);
        if self.render_pending {
            self.render_pending = false;
            if let Err(err) = self.engine.render() {
                log::error!("render failed: {err:?}");
            }
        }
    }

    fn dispatch(&mut self, actions: Vec<Action>) {
        let mut queue = VecDeque::from(actions);
        while let Some(action) = queue.pop_front() {
            match action {
                Action::RenderNeeded => self.render_pending = true,
                Action::ItemPlaced { id } => log::debug!("placed {id}"),
                Action::ItemReleased { id } => log::debug!("released {id}"),
                Action::ItemDeleted { id } => log::debug!("deleted {id}"),
                Action::TextEntryRequested => match self.window.prompt_with_message("Text") {
                    Ok(Some(text)) => queue.extend(self.engine.submit_text(&text)),
                    Ok(None) => {}
                    Err(err) => log::warn!("text prompt failed: {err:?}"),
                },
                Action::ExportRequested(format) => self.export(format),
                Action::SetCursor(cursor) => {
                    if let Err(err) = self.canvas.style().set_property("cursor", cursor) {
                        log::warn!("cursor update failed: {err:?}");
                    }
                }
            }
        }
    }

    // --- Export ---

    fn export(&self, format: ExportFormat) {
        if let Err(err) = self.try_export(format) {
            log::error!("export failed: {err}");
            if let Err(alert) = self.window.alert_with_message(&format!("Export failed: {err}")) {
                log::warn!("alert failed: {alert:?}");
            }
        }
    }

    fn try_export(&self, format: ExportFormat) -> Result<(), ExportError> {
        let name = file_name(now_stamp()?, format)?;
        match format {
            ExportFormat::Png => {
                let url = self.engine.export_png(&self.document)?;
                self.download(&url, &name)?;
            }
            ExportFormat::Svg => {
                let blob = svg_blob(&self.engine.export_svg())?;
                let url = Url::create_object_url_with_blob(&blob)?;
                let clicked = self.download(&url, &name);
                Url::revoke_object_url(&url)?;
                clicked?;
            }
        }
        log::info!("exported {name}");
        Ok(())
    }

    fn download(&self, url: &str, name: &str) -> Result<(), JsValue> {
        let anchor = self
            .document
            .create_element("a")?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| JsValue::from_str("created element is not an anchor"))?;
        anchor.set_href(url);
        anchor.set_download(name);
        anchor.click();
        Ok(())
    }
}

fn svg_blob(svg: &str) -> Result<Blob, JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(svg));
    let options = BlobPropertyBag::new();
    options.set_type(ExportFormat::Svg.mime());
    Blob::new_with_str_sequence_and_options(&parts, &options)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn now_stamp() -> Result<PrimitiveDateTime, ExportError> {
    let now = js_sys::Date::new_0();
    stamp_from_parts(
        now.get_full_year() as i32,
        (now.get_month() + 1) as u8,
        now.get_date() as u8,
        now.get_hours() as u8,
        now.get_minutes() as u8,
        now.get_seconds() as u8,
    )
}

// =============================================================================
// EVENTS
// =============================================================================

fn map_modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Modifiers {
    Modifiers { shift, ctrl, alt, meta }
}

fn pointer_point(ev: &PointerEvent) -> Point {
    Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

/// Register `handler` for `kind` events on `target` for the page lifetime.
fn listen<E, F>(target: &EventTarget, kind: &str, mut handler: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    });
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    closure.forget();
    Ok(())
}

fn wire_events(app: &Shared, window: &Window) -> Result<(), JsValue> {
    let canvas: EventTarget = app.borrow().canvas.clone().into();

    let shared = Rc::clone(app);
    listen(&canvas, "pointerdown", move |ev: PointerEvent| {
        ev.prevent_default();
        let Some(button) = Button::from_dom(ev.button()) else {
            return;
        };
        let mut app = shared.borrow_mut();
        if let Err(err) = app.canvas.set_pointer_capture(ev.pointer_id()) {
            log::debug!("pointer capture failed: {err:?}");
        }
        let modifiers = map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key());
        let actions = app.engine.on_pointer_down(pointer_point(&ev), button, modifiers);
        app.dispatch(actions);
    })?;

    let shared = Rc::clone(app);
    listen(&canvas, "pointermove", move |ev: PointerEvent| {
        let mut app = shared.borrow_mut();
        let modifiers = map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key());
        let actions = app.engine.on_pointer_move(pointer_point(&ev), modifiers);
        app.dispatch(actions);
    })?;

    let shared = Rc::clone(app);
    listen(&canvas, "pointerup", move |ev: PointerEvent| {
        let Some(button) = Button::from_dom(ev.button()) else {
            return;
        };
        let mut app = shared.borrow_mut();
        let modifiers = map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key());
        let actions = app.engine.on_pointer_up(pointer_point(&ev), button, modifiers);
        app.dispatch(actions);
    })?;

    for kind in ["pointercancel", "lostpointercapture"] {
        let shared = Rc::clone(app);
        listen(&canvas, kind, move |ev: PointerEvent| {
            let mut app = shared.borrow_mut();
            let modifiers = map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key());
            let actions = app.engine.on_pointer_cancel(modifiers);
            app.dispatch(actions);
        })?;
    }

    listen(&canvas, "contextmenu", |ev: Event| ev.prevent_default())?;

    let shared = Rc::clone(app);
    listen(&canvas, "wheel", move |ev: WheelEvent| {
        ev.prevent_default();
        let mut app = shared.borrow_mut();
        let point = Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()));
        let delta = WheelDelta::from_dom(ev.delta_x(), ev.delta_y(), ev.delta_mode());
        let modifiers = map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key());
        let actions = app.engine.on_wheel(point, delta, modifiers);
        app.dispatch(actions);
    })?;

    let shared = Rc::clone(app);
    listen(window, "keydown", move |ev: KeyboardEvent| {
        let mut app = shared.borrow_mut();
        let modifiers = map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key());
        let actions = app.engine.on_key_down(Key::new(ev.key()), modifiers);
        if !actions.is_empty() {
            ev.prevent_default();
        }
        app.dispatch(actions);
    })?;

    let shared = Rc::clone(app);
    listen(window, "resize", move |_: Event| shared.borrow_mut().resize())
}

fn start_loop(app: &Shared) -> Result<(), JsValue> {
    let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let next = Rc::clone(&holder);
    let shared = Rc::clone(app);
    *holder.borrow_mut() = Some(Closure::new(move |_ts: f64| {
        let mut app = shared.borrow_mut();
        app.frame();
        if let Some(cb) = next.borrow().as_ref() {
            if let Err(err) = app.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                log::error!("animation loop stopped: {err:?}");
            }
        }
    }));

    let first = holder.borrow();
    if let Some(cb) = first.as_ref() {
        app.borrow().window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    Ok(())
}
