use std::time::Duration;

use bop_engine::coords::{Rect, Vec2};

// ── Edges ─────────────────────────────────────────────────────────────────

/// Insets on all four sides (padding, margin).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    #[inline]
    pub fn all(v: f32) -> Self {
        Self { top: v, right: v, bottom: v, left: v }
    }

    /// Total inset on the horizontal axis.
    #[inline]
    pub fn h(self) -> f32 {
        self.left + self.right
    }

    /// Total inset on the vertical axis.
    #[inline]
    pub fn v(self) -> f32 {
        self.top + self.bottom
    }
}

// ── Constraints ───────────────────────────────────────────────────────────

/// Layout constraints passed down from parent to child during measure.
///
/// A child may return any size in `[min, max]`. Parents enforce their own
/// policy by calling [`Constraints::constrain`] on the returned size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min: Vec2,
    pub max: Vec2,
}

impl Constraints {
    /// Loose: child can be anywhere from zero up to `max`.
    #[inline]
    pub fn loose(max: Vec2) -> Self {
        Self { min: Vec2::zero(), max }
    }

    /// Clamp a size into `[min, max]`.
    #[inline]
    #[must_use]
    pub fn constrain(self, size: Vec2) -> Vec2 {
        Vec2::new(
            size.x.max(self.min.x).min(self.max.x),
            size.y.max(self.min.y).min(self.max.y),
        )
    }

    /// Shrink max inward by `edges` (for padding). Min becomes zero.
    #[inline]
    #[must_use]
    pub fn shrink(self, edges: Edges) -> Self {
        Self {
            min: Vec2::zero(),
            max: Vec2::new(
                (self.max.x - edges.h()).max(0.0),
                (self.max.y - edges.v()).max(0.0),
            ),
        }
    }
}

// ── LayoutCtx ────────────────────────────────────────────────────────────

/// Frame context made available to [`Widget::measure`] and [`Widget::on_event`].
///
/// `now` is the frame clock's elapsed time; widgets arm their timers against
/// it rather than reading a wall clock.
///
/// [`Widget::measure`]: crate::widget::Widget::measure
/// [`Widget::on_event`]: crate::widget::Widget::on_event
#[derive(Debug, Clone, Copy)]
pub struct LayoutCtx {
    pub now: Duration,
    /// Size of the whole surface; the swipe threshold is relative to its width.
    pub viewport: Vec2,
}

impl LayoutCtx {
    pub fn new(now: Duration, viewport: Vec2) -> Self {
        Self { now, viewport }
    }
}

// ── rect helper ──────────────────────────────────────────────────────────

/// Shrink a rect by `edges` (padding/inset).
#[inline]
pub fn inset_rect(rect: Rect, edges: Edges) -> Rect {
    Rect::new(
        rect.origin.x + edges.left,
        rect.origin.y + edges.top,
        (rect.size.x - edges.h()).max(0.0),
        (rect.size.y - edges.v()).max(0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constrain_clamps_both_ways() {
        let c = Constraints { min: Vec2::new(10.0, 10.0), max: Vec2::new(100.0, 100.0) };
        assert_eq!(c.constrain(Vec2::new(5.0, 300.0)), Vec2::new(10.0, 100.0));
    }

    #[test]
    fn shrink_clamps_to_zero() {
        let s = Constraints::loose(Vec2::new(5.0, 50.0)).shrink(Edges::all(10.0));
        assert_eq!(s.max, Vec2::new(0.0, 30.0));
    }

    #[test]
    fn inset_rect_asymmetric_padding() {
        let rect = Rect::new(5.0, 5.0, 100.0, 60.0);
        let edges = Edges { top: 4.0, bottom: 8.0, left: 6.0, right: 10.0 };
        assert_eq!(inset_rect(rect, edges), Rect::new(11.0, 9.0, 84.0, 48.0));
    }
}
