use bop_engine::coords::{Rect, Vec2};
use bop_engine::paint::Color;

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::widget::Widget;

/// Page indicator: one dot per real image, the current one highlighted.
///
/// Fewer than two dots draw nothing.
#[derive(Debug, Clone)]
pub struct DotRow {
    pub count: usize,
    pub active: usize,
    pub radius: f32,
    pub spacing: f32,
    pub color: Color,
    pub active_color: Color,
}

impl DotRow {
    pub fn new(count: usize, active: usize) -> Self {
        Self {
            count,
            active,
            radius: 4.0,
            spacing: 10.0,
            color: Color::from_straight(1.0, 1.0, 1.0, 0.45),
            active_color: Color::WHITE,
        }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.count > 1
    }

    /// Dot centres, horizontally centred in `rect`.
    pub fn centers(&self, rect: Rect) -> Vec<Vec2> {
        if !self.is_visible() {
            return Vec::new();
        }
        let pitch = self.radius * 2.0 + self.spacing;
        let total = pitch * self.count as f32 - self.spacing;
        let x0 = rect.center().x - total * 0.5 + self.radius;
        let y = rect.center().y;
        (0..self.count).map(|i| Vec2::new(x0 + pitch * i as f32, y)).collect()
    }

    /// Which dot `pos` hits. The hit area is the full pitch, not just the dot.
    pub fn dot_at(&self, rect: Rect, pos: Vec2) -> Option<usize> {
        if !rect.contains(pos) {
            return None;
        }
        let half = (self.radius * 2.0 + self.spacing) * 0.5;
        self.centers(rect).iter().position(|c| (pos.x - c.x).abs() <= half)
    }
}

impl Widget for DotRow {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        if !self.is_visible() {
            return constraints.constrain(Vec2::zero());
        }
        let pitch = self.radius * 2.0 + self.spacing;
        constraints.constrain(Vec2::new(pitch * self.count as f32, pitch))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        for (i, c) in self.centers(rect).into_iter().enumerate() {
            let color = if i == self.active { self.active_color } else { self.color };
            painter.fill_circle(c, self.radius, color, None);
        }
    }
}
