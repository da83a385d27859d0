//! Input subsystem.
//!
//! Public API is platform-agnostic. Hosts (a window runtime, a touch bridge,
//! a scripted replay) translate their native events into `InputEvent`s.
//!
//! `InputState`/`InputFrame` track held state and per-frame transitions;
//! [`GestureRecognizer`] turns the primary pointer stream into taps and pans.

mod frame;
mod gesture;
mod state;
mod types;

pub use frame::InputFrame;
pub use gesture::{Gesture, GestureConfig, GestureRecognizer};
pub use state::InputState;
pub use types::{
    InputEvent,
    Key,
    KeyState,
    PointerButton,
    PointerButtonEvent,
    PointerMoveEvent,
    PointerState,
};
