use bop_engine::coords::Vec2;
use bop_engine::input::{Gesture, Key};

/// Input events routed through the widget tree.
///
/// Pointer events are recognised gestures, not raw moves: a contact produces
/// `PointerDown`, then either a `Tap` or a `DragStart`/`Drag*`/`DragEnd` run,
/// then `PointerUp`. A contact taken away mid-drag ends with `DragCancel`
/// and still gets its `PointerUp`, so press state never outlives a contact.
/// Drag events fire even when the pointer has left the widget; use
/// `rect.contains(start)` to check ownership of the drag.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    PointerDown { pos: Vec2 },
    /// Press and release without travelling.
    Tap { pos: Vec2 },
    DragStart { start: Vec2 },
    /// `translation` is the total travel since `start`.
    Drag { start: Vec2, translation: Vec2 },
    DragEnd { start: Vec2, translation: Vec2 },
    /// The contact was taken away (pointer left the surface, focus lost).
    DragCancel { start: Vec2 },
    PointerUp { pos: Vec2 },
    /// Named key pressed (arrows, Backspace, …). Repeats are not delivered.
    KeyPress { key: Key },
}

impl UiEvent {
    /// Where the contact began, for pointer events.
    pub fn origin(&self) -> Option<Vec2> {
        match *self {
            UiEvent::PointerDown { pos } | UiEvent::Tap { pos } | UiEvent::PointerUp { pos } => {
                Some(pos)
            }
            UiEvent::DragStart { start }
            | UiEvent::Drag { start, .. }
            | UiEvent::DragEnd { start, .. }
            | UiEvent::DragCancel { start } => Some(start),
            UiEvent::KeyPress { .. } => None,
        }
    }
}

impl From<Gesture> for UiEvent {
    fn from(g: Gesture) -> Self {
        match g {
            Gesture::Down { pos } => UiEvent::PointerDown { pos },
            Gesture::Tap { pos } => UiEvent::Tap { pos },
            Gesture::PanStart { start } => UiEvent::DragStart { start },
            Gesture::PanUpdate { start, translation } => UiEvent::Drag { start, translation },
            Gesture::PanEnd { start, translation } => UiEvent::DragEnd { start, translation },
            Gesture::PanCancel { start } => UiEvent::DragCancel { start },
            Gesture::Up { pos } => UiEvent::PointerUp { pos },
        }
    }
}

/// Result returned by [`Widget::on_event`](crate::widget::Widget::on_event).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled — stop routing to siblings / parents.
    Consumed,
    /// Event was not handled — keep routing.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}
