use bop_engine::coords::{Rect, Vec2};
use bop_engine::paint::{Color, Paint};
use bop_engine::time::FrameTime;
use bop_feed::CardRecord;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::looping::CarouselConfig;
use crate::painter::Painter;
use crate::widget::Widget;
use crate::widgets::carousel::LoopingCarousel;
use crate::widgets::text::Text;

const CORNER_RADIUS: f32 = 18.0;
const CAPTION_PAD: f32 = 16.0;
/// Caption sits above the dot strip.
const CAPTION_BOTTOM: f32 = 48.0;
const SCRIM_FRACTION: f32 = 0.4;

const NAME_SIZE: f32 = 22.0;
const DETAIL_SIZE: f32 = 15.0;

/// One product card: image carousel plus a caption over a bottom scrim.
pub struct CardView {
    record: CardRecord,
    carousel: LoopingCarousel,
}

impl CardView {
    pub fn new(record: CardRecord, cfg: CarouselConfig) -> Self {
        let carousel =
            LoopingCarousel::new(record.images().to_vec(), cfg).corner_radius(CORNER_RADIUS);
        Self { record, carousel }
    }

    /// The card under the top card: same visuals, no autoplay.
    pub fn preview(record: CardRecord, cfg: CarouselConfig) -> Self {
        Self::new(record, CarouselConfig { autoplay: false, ..cfg })
    }

    #[inline]
    pub fn record(&self) -> &CardRecord {
        &self.record
    }

    #[inline]
    pub fn carousel(&self) -> &LoopingCarousel {
        &self.carousel
    }

    /// Caption lines top to bottom: brand, name, price.
    fn caption(&self) -> Vec<(String, f32, Color)> {
        let muted = Color::from_straight(1.0, 1.0, 1.0, 0.8);
        let mut lines = Vec::with_capacity(3);
        if let Some(brand) = &self.record.brand {
            lines.push((brand.to_uppercase(), DETAIL_SIZE, muted));
        }
        if !self.record.name.is_empty() {
            lines.push((self.record.name.clone(), NAME_SIZE, Color::WHITE));
        }
        if let Some(price) = &self.record.price {
            lines.push((price.clone(), DETAIL_SIZE, muted));
        }
        lines
    }
}

impl Widget for CardView {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        constraints.max
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let backdrop = Color::from_srgb_u8(0x22, 0x22, 0x22, 0xFF);
        painter.fill_rounded_rect(rect, CORNER_RADIUS, backdrop, None);
        self.carousel.paint(painter, rect);

        let (_, scrim) = rect.split_bottom(rect.size.y * SCRIM_FRACTION);
        painter.fill_rounded_rect(
            scrim,
            CORNER_RADIUS,
            Paint::VerticalGradient {
                top: Color::transparent(),
                bottom: Color::from_straight(0.0, 0.0, 0.0, 0.7),
            },
            None,
        );

        // Caption grows upward from above the dot strip.
        let max_w = (rect.size.x - CAPTION_PAD * 2.0).max(0.0);
        let lines = self.caption();
        let heights: Vec<f32> =
            lines.iter().map(|(t, size, _)| Text::estimate(t, *size, Some(max_w)).y).collect();
        let mut y = rect.max().y - CAPTION_BOTTOM - heights.iter().sum::<f32>();
        for ((text, size, color), h) in lines.into_iter().zip(heights) {
            painter.text(text, size, color, Vec2::new(rect.origin.x + CAPTION_PAD, y), Some(max_w));
            y += h;
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        self.carousel.on_event(event, rect, ctx)
    }

    fn tick(&mut self, time: &FrameTime, rect: Rect) {
        self.carousel.tick(time, rect);
    }

    fn is_animating(&self) -> bool {
        self.carousel.is_animating()
    }
}
