use serde::Deserialize;

use crate::coords::Vec2;

use super::types::{InputEvent, PointerButton, PointerButtonEvent, PointerMoveEvent, PointerState};

/// Thresholds for tap / horizontal-pan recognition.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GestureConfig {
    /// Horizontal travel (px) before a press becomes a pan.
    pub activate_x: f32,
    /// Vertical travel (px) that rules a pan out (the contact is a scroll).
    pub fail_y: f32,
    /// Maximum travel (px) between press and release for a tap.
    pub tap_slop: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self { activate_x: 10.0, fail_y: 20.0, tap_slop: 10.0 }
    }
}

/// Recognized gestures for the primary contact.
///
/// For one contact the stream is always `Down`, then either a `Tap`, a
/// `PanStart`/`PanUpdate*`/`PanEnd` run, or nothing, then `Up`. A cancelled
/// contact ends with `PanCancel` (if it was panning), then `Up` at the last
/// known position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Gesture {
    Down { pos: Vec2 },
    Tap { pos: Vec2 },
    PanStart { start: Vec2 },
    PanUpdate { start: Vec2, translation: Vec2 },
    PanEnd { start: Vec2, translation: Vec2 },
    PanCancel { start: Vec2 },
    Up { pos: Vec2 },
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Track {
    Idle,
    Pressed { start: Vec2 },
    Panning { start: Vec2 },
    /// Moved vertically first; neither tap nor pan for the rest of the contact.
    Failed,
}

/// Tap and pan recognition over the primary pointer.
///
/// Both recognizers watch the same contact independently: a tap is reported
/// only if the pan never activated, and the pan only activates after
/// `activate_x` of horizontal travel, so a short tap is never absorbed as a
/// micro-drag.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    config: GestureConfig,
    track: Track,
    /// Last position seen for the tracked contact.
    last: Vec2,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self { config, track: Track::Idle, last: Vec2::zero() }
    }

    #[inline]
    pub fn config(&self) -> GestureConfig {
        self.config
    }

    /// True between `Down` and `Up` of the primary contact.
    #[inline]
    pub fn is_tracking(&self) -> bool {
        self.track != Track::Idle
    }

    /// Feeds one raw event; recognized gestures are appended to `out`.
    pub fn feed(&mut self, ev: &InputEvent, out: &mut Vec<Gesture>) {
        match ev {
            InputEvent::PointerButton(PointerButtonEvent {
                button: PointerButton::Primary,
                state: PointerState::Pressed,
                pos,
            }) => {
                if self.track == Track::Idle {
                    self.track = Track::Pressed { start: *pos };
                    self.last = *pos;
                    out.push(Gesture::Down { pos: *pos });
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { pos }) => self.on_move(*pos, out),

            InputEvent::PointerButton(PointerButtonEvent {
                button: PointerButton::Primary,
                state: PointerState::Released,
                pos,
            }) => self.on_release(*pos, out),

            InputEvent::PointerLeft | InputEvent::Focused(false) => self.cancel(out),

            _ => {}
        }
    }

    /// Abandons the current contact, if any. A tracked contact always gets
    /// its closing `Up`.
    pub fn cancel(&mut self, out: &mut Vec<Gesture>) {
        match self.track {
            Track::Idle => return,
            Track::Panning { start } => out.push(Gesture::PanCancel { start }),
            Track::Pressed { .. } | Track::Failed => {}
        }
        self.track = Track::Idle;
        out.push(Gesture::Up { pos: self.last });
    }

    fn on_move(&mut self, pos: Vec2, out: &mut Vec<Gesture>) {
        if self.track != Track::Idle {
            self.last = pos;
        }
        match self.track {
            Track::Pressed { start } => {
                let d = pos - start;
                if d.x.abs() > self.config.activate_x {
                    self.track = Track::Panning { start };
                    out.push(Gesture::PanStart { start });
                    out.push(Gesture::PanUpdate { start, translation: d });
                } else if d.y.abs() > self.config.fail_y {
                    self.track = Track::Failed;
                }
            }
            Track::Panning { start } => {
                out.push(Gesture::PanUpdate { start, translation: pos - start });
            }
            Track::Idle | Track::Failed => {}
        }
    }

    fn on_release(&mut self, pos: Vec2, out: &mut Vec<Gesture>) {
        match self.track {
            Track::Idle => return,
            Track::Pressed { start } => {
                if (pos - start).length() <= self.config.tap_slop {
                    out.push(Gesture::Tap { pos });
                }
            }
            Track::Panning { start } => {
                out.push(Gesture::PanEnd { start, translation: pos - start });
            }
            Track::Failed => {}
        }
        self.track = Track::Idle;
        out.push(Gesture::Up { pos });
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
