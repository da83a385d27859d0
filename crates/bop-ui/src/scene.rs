use bop_engine::coords::{Rect, Vec2};
use bop_engine::input::{
    Gesture, GestureConfig, GestureRecognizer, InputEvent, InputFrame, InputState, KeyState,
    PointerButton,
};
use bop_engine::scene::DrawList;
use bop_engine::time::FrameTime;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::UiEvent;
use crate::painter::Painter;
use crate::widget::Widget;

// ── UiInput ───────────────────────────────────────────────────────────────

/// Raw input that arrived since the previous frame, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct UiInput {
    pub events: Vec<InputEvent>,
}

impl UiInput {
    pub fn new(events: Vec<InputEvent>) -> Self {
        Self { events }
    }
}

// ── UiScene ───────────────────────────────────────────────────────────────

/// Top-level coordinator that owns per-surface state across frames.
///
/// Owns the gesture recogniser, the held-input state and the `DrawList`
/// populated each frame by [`frame_ref`](Self::frame_ref).
pub struct UiScene {
    /// Draw list populated by the most recent frame.
    pub draw_list: DrawList,
    input_state: InputState,
    input_frame: InputFrame,
    gestures: GestureRecognizer,
    scratch: Vec<Gesture>,
}

impl UiScene {
    pub fn new() -> Self {
        Self::with_gestures(GestureConfig::default())
    }

    pub fn with_gestures(config: GestureConfig) -> Self {
        Self {
            draw_list: DrawList::new(),
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            gestures: GestureRecognizer::new(config),
            scratch: Vec::new(),
        }
    }

    #[inline]
    pub fn input_state(&self) -> &InputState {
        &self.input_state
    }

    /// Runs one frame against a retained root widget.
    ///
    /// Order: measure, `tick` (timers and animations up to `time.elapsed`),
    /// input events, paint. The returned `&mut DrawList` is owned by the
    /// scene and valid until the next frame.
    pub fn frame_ref(
        &mut self,
        root: &mut dyn Widget,
        viewport: Vec2,
        time: FrameTime,
        input: &UiInput,
    ) -> &mut DrawList {
        self.draw_list.clear();
        self.input_frame.clear();

        let ctx = LayoutCtx::new(time.elapsed, viewport);
        let rect = Rect::new(0.0, 0.0, viewport.x, viewport.y);

        // ── measure ───────────────────────────────────────────────────────
        // The root always occupies the full viewport; the pass only lets
        // children cache natural sizes.
        let _ = root.measure(Constraints::loose(viewport), &ctx);

        // ── tick ──────────────────────────────────────────────────────────
        root.tick(&time, rect);

        // ── events ────────────────────────────────────────────────────────
        for ev in &input.events {
            self.input_state.apply_event(&mut self.input_frame, ev.clone());

            self.gestures.feed(ev, &mut self.scratch);
            for g in self.scratch.drain(..) {
                root.on_event(&UiEvent::from(g), rect, &ctx);
            }

            if let InputEvent::Key { key, state: KeyState::Pressed, repeat: false } = ev {
                root.on_event(&UiEvent::KeyPress { key: *key }, rect, &ctx);
            }
        }

        // ── paint ─────────────────────────────────────────────────────────
        {
            let mut painter = Painter::new(
                &mut self.draw_list,
                self.input_state.pointer_pos,
                self.input_state.button_down(PointerButton::Primary),
            );
            root.paint(&mut painter, rect);
        }

        &mut self.draw_list
    }
}

impl Default for UiScene {
    fn default() -> Self {
        Self::new()
    }
}
