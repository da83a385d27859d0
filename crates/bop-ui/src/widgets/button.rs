use bop_engine::coords::{Rect, Vec2};
use bop_engine::paint::{Color, Paint};
use bop_engine::scene::Border;

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// A tappable widget that wraps any child content.
///
/// Pressed visuals are read from `Painter` during `paint`. A disabled button
/// draws faded and swallows taps without calling back.
///
/// # Example
/// ```rust,ignore
/// Button::new(Text::new("♥", 28.0, Color::WHITE))
///     .background(like_green)
///     .corner_radius(32.0)
///     .on_click(|| println!("liked"))
/// ```
pub struct Button {
    child: Element,
    on_click: Option<Box<dyn FnMut()>>,

    background: Color,
    press_background: Color,
    border: Option<Border>,
    corner_radius: f32,
    padding: Edges,
    min_width: f32,
    min_height: f32,
    enabled: bool,
}

impl Button {
    pub fn new(child: impl Into<Element>) -> Self {
        Self {
            child: child.into(),
            on_click: None,
            background: Color::transparent(),
            press_background: Color::transparent(),
            border: None,
            corner_radius: 0.0,
            padding: Edges::default(),
            min_width: 0.0,
            min_height: 0.0,
            enabled: true,
        }
    }

    /// Callback invoked when the button is tapped.
    pub fn on_click(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Background color while the primary button is held over it.
    pub fn press_background(mut self, color: Color) -> Self {
        self.press_background = color;
        self
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    pub fn corner_radius(mut self, r: f32) -> Self {
        self.corner_radius = r;
        self
    }

    pub fn padding_all(mut self, v: f32) -> Self {
        self.padding = Edges::all(v);
        self
    }

    pub fn min_size(mut self, width: f32, height: f32) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Widget for Button {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let inner = constraints.shrink(self.padding);
        let child_size = self.child.measure(inner, ctx);
        let w = (child_size.x + self.padding.h()).max(self.min_width);
        let h = (child_size.y + self.padding.v()).max(self.min_height);
        constraints.constrain(Vec2::new(w, h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let bg = if self.enabled && painter.is_pressed(rect) {
            self.press_background
        } else {
            self.background
        };
        let opacity = if self.enabled { 1.0 } else { 0.4 };

        painter.fill_rounded_rect(
            rect,
            self.corner_radius,
            Paint::Solid(bg.with_opacity(opacity)),
            self.border.clone(),
        );
        self.child.paint(painter, inset_rect(rect, self.padding));
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx) -> EventResult {
        if let UiEvent::Tap { pos } = event {
            if rect.contains(*pos) {
                if self.enabled {
                    if let Some(f) = &mut self.on_click {
                        f();
                    }
                }
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::text::Text;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    fn ctx() -> LayoutCtx {
        LayoutCtx::new(Duration::ZERO, Vec2::new(400.0, 800.0))
    }

    #[test]
    fn tap_inside_calls_back() {
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let mut b =
            Button::new(Text::new("x", 12.0, Color::WHITE)).on_click(move || h.set(h.get() + 1));
        let rect = Rect::new(0.0, 0.0, 50.0, 50.0);

        let inside = UiEvent::Tap { pos: Vec2::new(10.0, 10.0) };
        let outside = UiEvent::Tap { pos: Vec2::new(60.0, 10.0) };
        assert!(b.on_event(&inside, rect, &ctx()).is_consumed());
        assert!(!b.on_event(&outside, rect, &ctx()).is_consumed());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn disabled_swallows_taps() {
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let mut b =
            Button::new(Text::new("x", 12.0, Color::WHITE)).on_click(move || h.set(h.get() + 1));
        b.set_enabled(false);
        assert!(!b.is_enabled());

        let tap = UiEvent::Tap { pos: Vec2::new(1.0, 1.0) };
        let r = b.on_event(&tap, Rect::new(0.0, 0.0, 5.0, 5.0), &ctx());
        assert!(r.is_consumed());
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn measure_respects_min_size() {
        let b = Button::new(Text::new("", 12.0, Color::WHITE)).min_size(64.0, 64.0);
        let size = b.measure(Constraints::loose(Vec2::new(400.0, 400.0)), &ctx());
        assert_eq!(size, Vec2::new(64.0, 64.0));
    }
}
