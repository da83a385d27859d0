use bop_engine::coords::{Rect, Vec2};
use bop_engine::time::FrameTime;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::looping::{CarouselConfig, CarouselState};
use crate::painter::Painter;
use crate::widget::Widget;
use crate::widgets::dots::DotRow;

const DOTS_HEIGHT: f32 = 24.0;
const DOTS_BOTTOM_MARGIN: f32 = 12.0;

/// Auto-advancing, tap-navigable image pager with a dot indicator.
///
/// Autoplay starts on the first `tick` after construction (mount) and all
/// timers die with the widget.
pub struct LoopingCarousel {
    state: CarouselState,
    corner_radius: f32,
    mounted: bool,
}

impl LoopingCarousel {
    pub fn new(images: Vec<String>, cfg: CarouselConfig) -> Self {
        Self { state: CarouselState::new(images, cfg), corner_radius: 0.0, mounted: false }
    }

    pub fn corner_radius(mut self, r: f32) -> Self {
        self.corner_radius = r;
        self
    }

    #[inline]
    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    /// Swaps the image list; paging restarts from the first image.
    pub fn set_images(&mut self, images: Vec<String>, now: std::time::Duration) {
        self.state.set_images(images, now);
        self.mounted = true;
    }

    /// Cancels every timer; the widget stays paintable.
    pub fn unmount(&mut self) {
        self.state.stop();
        self.mounted = false;
    }

    fn dots(&self) -> DotRow {
        DotRow::new(self.state.len(), self.state.logical_index())
    }

    fn dots_rect(rect: Rect) -> Rect {
        Rect::new(
            rect.origin.x,
            rect.max().y - DOTS_BOTTOM_MARGIN - DOTS_HEIGHT,
            rect.size.x,
            DOTS_HEIGHT,
        )
    }
}

impl Widget for LoopingCarousel {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        constraints.max
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let page = self.state.page_position();
        let w = rect.size.x;

        painter.push_clip(rect);
        for (i, source) in self.state.padded().iter().enumerate() {
            let rel = i as f32 - page;
            if rel.abs() >= 1.0 {
                continue;
            }
            let slot = Rect::new(rect.origin.x + rel * w, rect.origin.y, w, rect.size.y);
            painter.image(slot, source, self.corner_radius);
        }
        painter.pop_clip();

        let dots = self.dots();
        if dots.is_visible() {
            dots.paint(painter, Self::dots_rect(rect));
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        match *event {
            UiEvent::PointerDown { pos } if rect.contains(pos) => {
                self.state.press();
                EventResult::Ignored
            }
            UiEvent::PointerUp { .. } | UiEvent::DragCancel { .. } => {
                self.state.release(ctx.now);
                EventResult::Ignored
            }
            UiEvent::Tap { pos } if rect.contains(pos) => {
                let dots = self.dots();
                match dots.dot_at(Self::dots_rect(rect), pos) {
                    Some(i) if dots.is_visible() => self.state.jump_to(i, ctx.now),
                    _ => self.state.tap(rect.fraction_x(pos), ctx.now),
                }
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn tick(&mut self, time: &FrameTime, _rect: Rect) {
        if !self.mounted {
            self.state.start(time.elapsed);
            self.mounted = true;
        }
        self.state.tick(time.elapsed, time.dt);
    }

    fn is_animating(&self) -> bool {
        self.state.is_animating()
    }
}
