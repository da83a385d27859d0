use bop_engine::coords::{Rect, Vec2};
use bop_engine::paint::Color;

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::widget::Widget;

/// Average glyph advance as a fraction of the font size.
///
/// There is no font system in the headless engine; layout uses this estimate
/// and the renderer wraps at the given width.
const ADVANCE: f32 = 0.55;
const LINE_HEIGHT: f32 = 1.25;

/// A single-run text widget.
///
/// # Example
/// ```rust,ignore
/// Text::new("Slip dress", 20.0, Color::WHITE)
/// ```
pub struct Text {
    pub text: String,
    pub size: f32,
    pub color: Color,
}

impl Text {
    pub fn new(text: impl Into<String>, size: f32, color: Color) -> Self {
        Self { text: text.into(), size, color }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Estimated size of `text` at `size`, wrapped at `max_width`.
    pub fn estimate(text: &str, size: f32, max_width: Option<f32>) -> Vec2 {
        let line_w = text.chars().count() as f32 * size * ADVANCE;
        let line_h = size * LINE_HEIGHT;
        match max_width {
            Some(w) if w > 0.0 && line_w > w => Vec2::new(w, (line_w / w).ceil() * line_h),
            _ => Vec2::new(line_w, line_h),
        }
    }
}

impl Widget for Text {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        let max_w = if constraints.max.x.is_finite() { Some(constraints.max.x) } else { None };
        constraints.constrain(Self::estimate(&self.text, self.size, max_w))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let max_w = if rect.size.x > 0.0 { Some(rect.size.x) } else { None };
        painter.text(self.text.as_str(), self.size, self.color, rect.origin, max_w);
    }
}
