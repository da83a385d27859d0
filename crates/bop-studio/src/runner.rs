use std::time::Duration;

use bop_feed::{FeedError, FeedSource};
use bop_ui::prelude::*;
use bop_ui::widgets::swipe_deck::DeckLayout;
use log::{debug, info, trace, warn};

use crate::screen::{FeedScreen, SessionSummary};
use crate::script::Step;

/// Frames a scripted drag is spread over.
const DRAG_FRAMES: u32 = 6;
/// `swipe` drags this many screen widths before releasing.
const SWIPE_DISTANCE: f32 = 0.6;
const SETTLE_CAP: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy)]
struct Held {
    start: Vec2,
    pos: Vec2,
}

///
/// Runner
///
/// Drives a [`FeedScreen`] headlessly at a fixed frame rate, turning script
/// steps into synthetic input and pulling pages from the source whenever
/// the deck runs low.
///

pub struct Runner<S> {
    source: S,
    scene: UiScene,
    clock: FrameClock,
    screen: FeedScreen,
    viewport: Vec2,
    frame_dt: Duration,

    page_size: usize,
    /// Records handed out by the source so far; the next page's offset.
    fetched: usize,
    exhausted: bool,

    pointer: Option<Held>,
    frames: u64,
}

impl<S: FeedSource> Runner<S> {
    pub fn new(source: S, screen: FeedScreen, viewport: Vec2, fps: u32, page_size: usize) -> Self {
        Self {
            source,
            scene: UiScene::new(),
            clock: FrameClock::new(),
            screen,
            viewport,
            frame_dt: Duration::from_secs(1) / fps.max(1),
            page_size: page_size.max(1),
            fetched: 0,
            exhausted: false,
            pointer: None,
            frames: 0,
        }
    }

    #[inline]
    pub fn screen(&self) -> &FeedScreen {
        &self.screen
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    pub fn fetched(&self) -> usize {
        self.fetched
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Loads the first page. Unlike later pages, a failure here is fatal.
    pub async fn prime(&mut self) -> Result<(), FeedError> {
        self.fetch().await
    }

    pub async fn run(&mut self, steps: &[Step]) -> SessionSummary {
        for (i, step) in steps.iter().enumerate() {
            trace!("step {}: {step:?}", i + 1);
            self.step(*step).await;
        }
        if self.pointer.is_some() {
            debug!("script ended mid-drag; releasing");
            self.release().await;
        }

        self.screen.summary()
    }

    async fn step(&mut self, step: Step) {
        match step {
            Step::Drag { dx, dy } => self.drag_to(dx, dy).await,
            Step::Release => self.release().await,
            Step::Swipe(direction) => {
                self.drag_to(direction.sign() * SWIPE_DISTANCE, 0.0).await;
                self.release().await;
                self.settle().await;
            }
            Step::Like => self.frame(vec![InputEvent::key_press(Key::ArrowRight)]).await,
            Step::Dislike => self.frame(vec![InputEvent::key_press(Key::ArrowLeft)]).await,
            Step::Rewind => self.frame(vec![InputEvent::key_press(Key::Backspace)]).await,
            Step::Tap { fx, fy } => {
                let pos = Vec2::new(fx * self.viewport.x, fy * self.viewport.y);
                self.frame(vec![InputEvent::press(pos), InputEvent::release(pos)]).await;
            }
            Step::Wait(duration) => {
                for _ in 0..self.frames_for(duration) {
                    self.frame(Vec::new()).await;
                }
            }
            Step::Settle => self.settle().await,
        }
    }

    // ── input synthesis ───────────────────────────────────────────────────

    async fn drag_to(&mut self, dx: f32, dy: f32) {
        let (start, from, mut events) = match self.pointer {
            Some(held) => (held.start, held.pos, Vec::new()),
            None => {
                let bounds = Rect::new(0.0, 0.0, self.viewport.x, self.viewport.y);
                let start = DeckLayout::new(bounds).card.center();
                (start, start, vec![InputEvent::press(start)])
            }
        };
        let target = start + Vec2::new(dx, dy) * self.viewport.x;

        for i in 1..=DRAG_FRAMES {
            let pos = from.lerp(target, i as f32 / DRAG_FRAMES as f32);
            events.push(InputEvent::move_to(pos));
            self.frame(std::mem::take(&mut events)).await;
            self.pointer = Some(Held { start, pos });
        }
    }

    async fn release(&mut self) {
        if let Some(held) = self.pointer.take() {
            self.frame(vec![InputEvent::release(held.pos)]).await;
        }
    }

    /// Runs frames until nothing animates. Carousel autoplay does not count.
    async fn settle(&mut self) {
        for _ in 0..self.frames_for(SETTLE_CAP) {
            self.frame(Vec::new()).await;
            if !self.screen.is_animating() {
                return;
            }
        }
        warn!("settle gave up after {SETTLE_CAP:?}");
    }

    // ── frames & paging ───────────────────────────────────────────────────

    async fn frame(&mut self, events: Vec<InputEvent>) {
        let time = self.clock.advance(self.frame_dt);
        let input = UiInput::new(events);
        let draw_list = self.scene.frame_ref(&mut self.screen, self.viewport, time, &input);
        trace!("frame {}: {} draw items", time.frame_index, draw_list.len());
        self.frames += 1;

        self.refill().await;
    }

    async fn refill(&mut self) {
        if self.exhausted || !self.screen.needs_more() {
            return;
        }
        if let Err(e) = self.fetch().await {
            warn!("fetching page at offset {} failed, not retrying: {e}", self.fetched);
            self.exhausted = true;
        }
    }

    async fn fetch(&mut self) -> Result<(), FeedError> {
        let page = self.source.fetch_page(self.fetched, self.page_size).await?;
        if page.is_empty() {
            info!("feed exhausted after {} cards", self.fetched);
            self.exhausted = true;
            return Ok(());
        }

        self.fetched += page.len();
        let added = self.screen.append_page(page);
        debug!("page: {added} new cards, {} fetched", self.fetched);
        Ok(())
    }

    /// Whole frames covering `duration`, at least one. Saturates at `u64::MAX`.
    fn frames_for(&self, duration: Duration) -> u64 {
        let frame = self.frame_dt.as_nanos().max(1);
        u64::try_from(duration.as_nanos().div_ceil(frame)).unwrap_or(u64::MAX).max(1)
    }
}
