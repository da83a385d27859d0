use std::fmt;

use crate::coords::Vec2;

/// Keyboard key identifier.
///
/// Only the keys the deck reacts to are named; everything else arrives as
/// `Key::Unknown(code)` with a stable platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Backspace,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    /// Platform-dependent key not yet represented here.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Pointer button identifier. Touch contacts report as `Primary`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PointerState {
    Pressed,
    Released,
}

/// Pointer move event in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub pos: Vec2,
}

/// Pointer button (or touch contact) transition.
///
/// Coordinates are included so event processing does not depend on an
/// external "current pointer position".
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: PointerButton,
    pub state: PointerState,
    pub pos: Vec2,
}

/// Platform-agnostic input events emitted by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// True when event is a key-repeat.
        repeat: bool,
    },

    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),

    /// Pointer left the surface (or the touch was cancelled by the system).
    PointerLeft,

    /// Surface focus change.
    Focused(bool),
}

impl InputEvent {
    /// Primary press at `pos`.
    pub fn press(pos: Vec2) -> Self {
        InputEvent::PointerButton(PointerButtonEvent {
            button: PointerButton::Primary,
            state: PointerState::Pressed,
            pos,
        })
    }

    /// Primary release at `pos`.
    pub fn release(pos: Vec2) -> Self {
        InputEvent::PointerButton(PointerButtonEvent {
            button: PointerButton::Primary,
            state: PointerState::Released,
            pos,
        })
    }

    pub fn move_to(pos: Vec2) -> Self {
        InputEvent::PointerMoved(PointerMoveEvent { pos })
    }

    pub fn key_press(key: Key) -> Self {
        InputEvent::Key { key, state: KeyState::Pressed, repeat: false }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
