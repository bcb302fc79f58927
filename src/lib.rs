//! Drag-and-compose art board.
//!
//! This crate is compiled to WebAssembly and runs in the browser. Shapes and
//! text labels drift across the viewport; the user grabs them, rotates and
//! scales them, and drops them onto a fixed-aspect artboard where they settle
//! into place. The composition exports as a high-resolution PNG or an SVG
//! document.
//!
//! Everything except [`canvas2d`], the [`engine::Engine`] wrapper and the
//! PNG path in [`export`] is plain Rust and tested natively.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`scene`] | Floating, placed and held items; redraw policy |
//! | [`item`] | Item model and lifecycle phases |
//! | [`spawn`] | Seeded spawner for shapes, text and drift |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing in item-local space |
//! | [`geometry`] | Shape outlines and text extents |
//! | [`transform`] | Points, local/world transforms, view transforms |
//! | [`artboard`] | Viewport and the fitted artboard |
//! | [`color`] | Colors, palettes and text contrast |
//! | [`config`] | JSON configuration with defaults and validation |
//! | [`surface`] | Drawing trait shared by screen and export |
//! | [`render`] | Layer drawing over any [`surface::Surface`] |
//! | [`canvas2d`] | `Canvas2D` surface and text measurement |
//! | [`svg`] | SVG-recording surface |
//! | [`export`] | PNG and SVG export, timestamped file names |
//! | [`consts`] | Shared numeric constants |

pub mod artboard;
pub mod canvas2d;
pub mod color;
pub mod config;
pub mod consts;
pub mod engine;
pub mod export;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod item;
pub mod render;
pub mod scene;
pub mod spawn;
pub mod surface;
pub mod svg;
pub mod transform;

#[cfg(target_arch = "wasm32")]
mod host;
