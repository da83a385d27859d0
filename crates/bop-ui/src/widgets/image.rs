use bop_engine::coords::{Rect, Vec2};

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::widget::Widget;

/// A remote or bundled image, cover-fitted into whatever rect it is given.
pub struct ImageView {
    pub source: String,
    pub corner_radius: f32,
}

impl ImageView {
    pub fn new(source: impl Into<String>) -> Self {
        Self { source: source.into(), corner_radius: 0.0 }
    }

    pub fn corner_radius(mut self, r: f32) -> Self {
        self.corner_radius = r;
        self
    }
}

impl Widget for ImageView {
    /// Images take all the space offered.
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        constraints.max
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        painter.image(rect, &self.source, self.corner_radius);
    }
}
