//! Input events the grid reacts to.
//!
//! The host translates its windowing system's events into these and feeds
//! them to the [`Grid`](crate::Grid) handlers.

use trellis_render::Point;

/// Keyboard modifiers held during an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift only.
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Control only.
    pub const CTRL: Self = Self {
        control: true,
        ..Self::NONE
    };

    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Keys the grid handles. Everything else arrives as [`Key::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Tab,
    Enter,
    Escape,
    F2,
    /// A key with no grid binding, by host key code.
    Other(u32),
}

/// A mouse button press, release or double click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// Position in client coordinates.
    pub pos: Point,
    pub button: MouseButton,
    pub modifiers: KeyboardModifiers,
}

impl MouseEvent {
    pub fn new(pos: Point, button: MouseButton) -> Self {
        Self {
            pos,
            button,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// A left-button event at `(x, y)`.
    pub fn left(x: i32, y: i32) -> Self {
        Self::new(Point::new(x, y), MouseButton::Left)
    }

    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: KeyboardModifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A mouse wheel movement. Positive `delta` scrolls up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelEvent {
    pub pos: Point,
    pub delta: i32,
}

impl WheelEvent {
    pub fn new(pos: Point, delta: i32) -> Self {
        Self { pos, delta }
    }
}
