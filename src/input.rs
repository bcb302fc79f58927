//! Input model: modifier keys, mouse buttons, keys, wheel deltas, and the
//! gesture state machine.
//!
//! `InputState` tracks the single gesture this app has: holding an item
//! between pointer-down and pointer-up. The rest are plain value types the
//! host builds from DOM events.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::{WHEEL_LINES_PER_NOTCH, WHEEL_NOTCH_PX};
use crate::item::ItemId;
use crate::scene::Origin;
use crate::transform::Point;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl, Alt or Meta: chords that belong to the browser, not the canvas.
    #[must_use]
    pub fn has_command(self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map `MouseEvent.button` to a button. Back/forward buttons map to `None`.
    #[must_use]
    pub fn from_dom(button: i16) -> Option<Self> {
        match button {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g.
/// `"Delete"`, `"Backspace"`, `"a"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The character this key types, if it is a single printable one.
    ///
    /// Named keys like `"Enter"` or `"ArrowLeft"` are longer than one
    /// character and yield `None`.
    #[must_use]
    pub fn printable(&self) -> Option<char> {
        let mut chars = self.0.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_control() => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.0 == name
    }
}

/// Wheel / trackpad scroll delta, normalized to pixels.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

impl WheelDelta {
    /// Build from `WheelEvent` fields. `delta_mode` 1 is lines and 2 is
    /// pages; both are converted to pixels.
    #[must_use]
    pub fn from_dom(dx: f64, dy: f64, delta_mode: u32) -> Self {
        let factor = match delta_mode {
            1 => WHEEL_NOTCH_PX / WHEEL_LINES_PER_NOTCH,
            2 => WHEEL_NOTCH_PX,
            _ => 1.0,
        };
        Self { dx: dx * factor, dy: dy * factor }
    }

    /// Scroll in wheel notches; fractional for trackpads.
    ///
    /// Reads the vertical axis, or the horizontal one when there is no
    /// vertical movement: several browsers report Shift+wheel as `deltaX`.
    #[must_use]
    pub fn notches(self) -> f64 {
        let delta = if self.dy == 0.0 { self.dx } else { self.dy };
        delta / WHEEL_NOTCH_PX
    }
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// An item is under pointer control.
    Holding {
        /// Id of the held item.
        id: ItemId,
        /// Where the item was grabbed from.
        from: Origin,
        /// Pointer position minus item center at grab time.
        offset: Point,
    },
}

impl InputState {
    #[must_use]
    pub fn held_id(&self) -> Option<ItemId> {
        match self {
            Self::Holding { id, .. } => Some(*id),
            Self::Idle => None,
        }
    }
}
