use std::collections::HashSet;

use super::types::{InputEvent, Key, PointerButton};

/// Per-frame input deltas.
///
/// `InputState` provides the current state (held keys/buttons, pointer position).
/// `InputFrame` provides events and transition sets for the current frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Keys pressed this frame (key-repeats included).
    pub keys_pressed: Vec<Key>,

    /// Pointer buttons pressed this frame.
    pub buttons_pressed: HashSet<PointerButton>,

    /// Pointer buttons released this frame.
    pub buttons_released: HashSet<PointerButton>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }
}
