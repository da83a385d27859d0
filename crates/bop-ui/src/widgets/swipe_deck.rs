use std::cell::Cell;
use std::rc::Rc;

use bop_engine::coords::{Rect, Vec2};
use bop_engine::input::Key;
use bop_engine::paint::Color;
use bop_engine::scene::{Border, Layer};
use bop_engine::time::FrameTime;
use bop_feed::CardRecord;
use log::debug;

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::looping::CarouselConfig;
use crate::painter::Painter;
use crate::swipe::{Direction, SwipeConfig, SwipeMachine, SwipePhase};
use crate::widget::Widget;
use crate::widgets::button::Button;
use crate::widgets::card::CardView;
use crate::widgets::text::Text;

const CONTROLS_HEIGHT: f32 = 96.0;
const CARD_MARGIN: f32 = 16.0;
const BIG_BUTTON: f32 = 64.0;
const SMALL_BUTTON: f32 = 52.0;
const BUTTON_GAP: f32 = 24.0;
const CARD_RADIUS: f32 = 18.0;
const STAMP_SIZE: f32 = 34.0;

fn like_green() -> Color {
    Color::from_srgb_u8(0x4C, 0xAF, 0x50, 0xFF)
}

fn nope_red() -> Color {
    Color::from_srgb_u8(0xF4, 0x43, 0x36, 0xFF)
}

fn rewind_amber() -> Color {
    Color::from_srgb_u8(0xFF, 0xB3, 0x00, 0xFF)
}

/// What the deck's controls ask for. Buttons and keys both end up here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckCommand {
    Like,
    Dislike,
    Rewind,
}

/// Where everything sits inside the deck's rect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeckLayout {
    pub card: Rect,
    pub dislike: Rect,
    pub rewind: Rect,
    pub like: Rect,
}

impl DeckLayout {
    pub fn new(rect: Rect) -> Self {
        let (top, strip) = rect.split_bottom(CONTROLS_HEIGHT);
        let card = inset_rect(top, Edges::all(CARD_MARGIN));

        let cy = strip.center().y;
        let total = BIG_BUTTON * 2.0 + SMALL_BUTTON + BUTTON_GAP * 2.0;
        let x0 = strip.center().x - total * 0.5;
        let square = |left: f32, side: f32| {
            Rect::from_center(Vec2::new(left + side * 0.5, cy), Vec2::new(side, side))
        };

        Self {
            card,
            dislike: square(x0, BIG_BUTTON),
            rewind: square(x0 + BIG_BUTTON + BUTTON_GAP, SMALL_BUTTON),
            like: square(x0 + BIG_BUTTON + BUTTON_GAP * 2.0 + SMALL_BUTTON, BIG_BUTTON),
        }
    }
}

type ResolveFn = Box<dyn FnMut(&CardRecord)>;

/// Two-card stack with drag-to-decide, like/dislike/rewind controls.
///
/// The deck never changes its own cards: it reports a resolution once the
/// exit animation finishes and waits for the owner to call
/// [`show`](Self::show) with the new pair.
pub struct SwipeDeck {
    machine: SwipeMachine,
    carousel_cfg: CarouselConfig,

    current: Option<CardView>,
    next: Option<CardView>,
    can_rewind: bool,

    on_resolve_left: Option<ResolveFn>,
    on_resolve_right: Option<ResolveFn>,
    on_rewind: Option<Box<dyn FnMut()>>,

    dislike_button: Button,
    rewind_button: Button,
    like_button: Button,
    command: Rc<Cell<Option<DeckCommand>>>,
}

impl SwipeDeck {
    pub fn new(swipe_cfg: SwipeConfig, carousel_cfg: CarouselConfig) -> Self {
        let command = Rc::new(Cell::new(None));
        let control = |glyph: &str, size: f32, color: Color, cmd: DeckCommand| {
            let slot = Rc::clone(&command);
            Button::new(Text::new(glyph, size * 0.45, color))
                .background(Color::WHITE)
                .press_background(Color::from_straight(0.92, 0.92, 0.92, 1.0))
                .border(Border::new(2.0, color))
                .corner_radius(size * 0.5)
                .padding_all(size * 0.25)
                .min_size(size, size)
                .on_click(move || slot.set(Some(cmd)))
        };

        let dislike_button = control("✕", BIG_BUTTON, nope_red(), DeckCommand::Dislike);
        let rewind_button = control("↺", SMALL_BUTTON, rewind_amber(), DeckCommand::Rewind);
        let like_button = control("♥", BIG_BUTTON, like_green(), DeckCommand::Like);

        let mut deck = Self {
            machine: SwipeMachine::new(swipe_cfg, 0.0),
            carousel_cfg,
            current: None,
            next: None,
            can_rewind: false,
            on_resolve_left: None,
            on_resolve_right: None,
            on_rewind: None,
            dislike_button,
            rewind_button,
            like_button,
            command,
        };
        deck.sync_controls();
        deck
    }

    /// Called with the current card after it leaves to the left (dislike).
    pub fn on_resolve_left(mut self, f: impl FnMut(&CardRecord) + 'static) -> Self {
        self.on_resolve_left = Some(Box::new(f));
        self
    }

    /// Called with the current card after it leaves to the right (like).
    pub fn on_resolve_right(mut self, f: impl FnMut(&CardRecord) + 'static) -> Self {
        self.on_resolve_right = Some(Box::new(f));
        self
    }

    pub fn on_rewind(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_rewind = Some(Box::new(f));
        self
    }

    // ── owner API ─────────────────────────────────────────────────────────

    /// Shows a new card pair.
    ///
    /// A current card that is unchanged (same id, not yet resolved) keeps its
    /// carousel position and gesture; anything else starts from rest.
    pub fn show(
        &mut self,
        current: Option<&CardRecord>,
        next: Option<&CardRecord>,
        can_rewind: bool,
    ) {
        let keep = match (&self.current, current) {
            (Some(view), Some(record)) => {
                view.record().id == record.id
                    && !matches!(self.machine.phase(), SwipePhase::Resolved(_))
            }
            _ => false,
        };

        if !keep {
            self.current = current.map(|r| CardView::new(r.clone(), self.carousel_cfg.clone()));
            self.machine.reset();
        }
        self.next = next.map(|r| CardView::preview(r.clone(), self.carousel_cfg.clone()));
        self.can_rewind = can_rewind;
        self.sync_controls();
    }

    pub fn set_can_rewind(&mut self, can_rewind: bool) {
        self.can_rewind = can_rewind;
        self.sync_controls();
    }

    /// Like / dislike / rewind, as if the matching button had been tapped.
    pub fn apply(&mut self, command: DeckCommand) -> bool {
        match command {
            DeckCommand::Like => self.commit(Direction::Right),
            DeckCommand::Dislike => self.commit(Direction::Left),
            DeckCommand::Rewind => {
                if !self.can_rewind || matches!(self.machine.phase(), SwipePhase::Committing(_)) {
                    return false;
                }
                debug!("deck: rewind requested");
                if let Some(f) = &mut self.on_rewind {
                    f();
                }
                true
            }
        }
    }

    // ── queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn machine(&self) -> &SwipeMachine {
        &self.machine
    }

    #[inline]
    pub fn current(&self) -> Option<&CardView> {
        self.current.as_ref()
    }

    #[inline]
    pub fn next(&self) -> Option<&CardView> {
        self.next.as_ref()
    }

    #[inline]
    pub fn can_rewind(&self) -> bool {
        self.can_rewind
    }

    // ── internal ──────────────────────────────────────────────────────────

    fn commit(&mut self, direction: Direction) -> bool {
        if self.current.is_none() {
            return false;
        }
        self.machine.commit(direction)
    }

    fn resolve(&mut self, direction: Direction) {
        let Some(card) = &self.current else {
            return;
        };
        debug!("deck: '{}' resolved {:?}", card.record().id, direction);
        let callback = match direction {
            Direction::Left => &mut self.on_resolve_left,
            Direction::Right => &mut self.on_resolve_right,
        };
        if let Some(f) = callback {
            f(card.record());
        }
    }

    fn sync_controls(&mut self) {
        let has_card = self.current.is_some();
        self.like_button.set_enabled(has_card);
        self.dislike_button.set_enabled(has_card);
        self.rewind_button.set_enabled(self.can_rewind);
    }

    fn route_controls(&mut self, event: &UiEvent, layout: &DeckLayout, ctx: &LayoutCtx) -> bool {
        let consumed = self.dislike_button.on_event(event, layout.dislike, ctx).is_consumed()
            || self.rewind_button.on_event(event, layout.rewind, ctx).is_consumed()
            || self.like_button.on_event(event, layout.like, ctx).is_consumed();

        if let Some(cmd) = self.command.take() {
            self.apply(cmd);
        }
        consumed
    }

    fn route_card(&mut self, event: &UiEvent, card_rect: Rect, ctx: &LayoutCtx) -> EventResult {
        let Some(card) = self.current.as_mut() else {
            return EventResult::Ignored;
        };

        match *event {
            UiEvent::DragStart { start } if card_rect.contains(start) => {
                if self.machine.begin_drag() {
                    EventResult::Consumed
                } else {
                    EventResult::Ignored
                }
            }
            UiEvent::Drag { translation, .. } if self.machine.phase() == SwipePhase::Dragging => {
                self.machine.drag(translation);
                EventResult::Consumed
            }
            UiEvent::DragEnd { translation, .. }
                if self.machine.phase() == SwipePhase::Dragging =>
            {
                self.machine.release(translation);
                EventResult::Consumed
            }
            UiEvent::DragCancel { .. } => {
                self.machine.cancel();
                card.on_event(event, card_rect, ctx);
                EventResult::Consumed
            }
            UiEvent::PointerDown { pos }
                if card_rect.contains(pos) && self.machine.accepts_input() =>
            {
                card.on_event(event, card_rect, ctx);
                EventResult::Consumed
            }
            UiEvent::PointerUp { .. } => card.on_event(event, card_rect, ctx),
            UiEvent::Tap { pos }
                if card_rect.contains(pos) && self.machine.phase() == SwipePhase::Idle =>
            {
                card.on_event(event, card_rect, ctx)
            }
            _ => EventResult::Ignored,
        }
    }

    fn paint_overlay(&self, painter: &mut Painter, card_rect: Rect) {
        let overlay = self.machine.overlay();
        let max = self.machine.config().overlay_max_opacity.max(f32::EPSILON);

        for (opacity, color, label, left) in [
            (overlay.like, like_green(), "LIKE", true),
            (overlay.nope, nope_red(), "NOPE", false),
        ] {
            if opacity <= 0.0 {
                continue;
            }
            painter.fill_rounded_rect(card_rect, CARD_RADIUS, color.with_opacity(opacity), None);

            let stamp = Text::estimate(label, STAMP_SIZE, None);
            let x = if left {
                card_rect.origin.x + CARD_MARGIN * 2.0
            } else {
                card_rect.max().x - CARD_MARGIN * 2.0 - stamp.x
            };
            let origin = Vec2::new(x, card_rect.origin.y + CARD_MARGIN * 2.0);
            let ink = color.with_opacity((opacity / max).min(1.0));
            painter.text(label, STAMP_SIZE, ink, origin, None);
        }
    }
}

impl Widget for SwipeDeck {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        constraints.max
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let layout = DeckLayout::new(rect);
        let card_rect = layout.card;
        let cfg = self.machine.config();

        if let Some(next) = &self.next {
            let layer = Layer::about(
                card_rect.center(),
                Vec2::zero(),
                0.0,
                cfg.next_scale,
                cfg.next_opacity,
            );
            painter.with_layer(layer, |p| next.paint(p, card_rect));
        }

        match &self.current {
            Some(current) => {
                let s = self.machine.state();
                let layer =
                    Layer::about(card_rect.center(), s.offset, s.rotation_deg, 1.0, s.opacity);
                painter.with_layer(layer, |p| {
                    current.paint(p, card_rect);
                    self.paint_overlay(p, card_rect);
                });
            }
            None if self.next.is_none() => {
                let msg = "You're all caught up";
                let size = Text::estimate(msg, 18.0, Some(card_rect.size.x));
                let origin = card_rect.center() - size * 0.5;
                let grey = Color::from_straight(0.4, 0.4, 0.4, 1.0);
                painter.text(msg, 18.0, grey, origin, Some(card_rect.size.x));
            }
            None => {}
        }

        self.dislike_button.paint(painter, layout.dislike);
        self.rewind_button.paint(painter, layout.rewind);
        self.like_button.paint(painter, layout.like);
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        self.machine.set_screen_width(rect.size.x);
        let layout = DeckLayout::new(rect);

        if let UiEvent::KeyPress { key } = event {
            let cmd = match key {
                Key::ArrowRight => DeckCommand::Like,
                Key::ArrowLeft => DeckCommand::Dislike,
                Key::Backspace => DeckCommand::Rewind,
                _ => return EventResult::Ignored,
            };
            self.apply(cmd);
            return EventResult::Consumed;
        }

        if self.route_controls(event, &layout, ctx) {
            return EventResult::Consumed;
        }
        self.route_card(event, layout.card, ctx)
    }

    fn tick(&mut self, time: &FrameTime, rect: Rect) {
        self.machine.set_screen_width(rect.size.x);
        let layout = DeckLayout::new(rect);

        if let Some(card) = &mut self.current {
            card.tick(time, layout.card);
        }
        if let Some(direction) = self.machine.step(time.dt) {
            self.resolve(direction);
        }
    }

    fn is_animating(&self) -> bool {
        self.machine.is_animating() || self.current.as_ref().is_some_and(|c| c.is_animating())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::time::Duration;

    use bop_engine::input::InputEvent;
    use bop_engine::time::FrameClock;

    use crate::scene::{UiInput, UiScene};

    const VIEW: Vec2 = Vec2::new(400.0, 800.0);

    type Log = Rc<RefCell<Vec<(Direction, String)>>>;

    struct Harness {
        scene: UiScene,
        clock: FrameClock,
        deck: SwipeDeck,
        log: Log,
        rewinds: Rc<Cell<u32>>,
    }

    impl Harness {
        fn new(cards: &[&str], can_rewind: bool) -> Self {
            let log: Log = Rc::default();
            let rewinds = Rc::new(Cell::new(0));
            let (l, r, rw) = (Rc::clone(&log), Rc::clone(&log), Rc::clone(&rewinds));
            let mut deck = SwipeDeck::new(SwipeConfig::default(), CarouselConfig::default())
                .on_resolve_left(move |c| l.borrow_mut().push((Direction::Left, c.id.clone())))
                .on_resolve_right(move |c| r.borrow_mut().push((Direction::Right, c.id.clone())))
                .on_rewind(move || rw.set(rw.get() + 1));

            let records: Vec<CardRecord> = cards
                .iter()
                .map(|id| {
                    CardRecord::new(*id, *id, format!("{id}.jpg"))
                        .with_gallery([format!("{id}-1.jpg"), format!("{id}-2.jpg")])
                })
                .collect();
            deck.show(records.first(), records.get(1), can_rewind);

            Self { scene: UiScene::new(), clock: FrameClock::new(), deck, log, rewinds }
        }

        fn frame(&mut self, events: Vec<InputEvent>) {
            let time = self.clock.advance(Duration::from_micros(16_667));
            let _ = self.scene.frame_ref(&mut self.deck, VIEW, time, &UiInput::new(events));
        }

        fn settle(&mut self) {
            for _ in 0..300 {
                self.frame(Vec::new());
                if !self.deck.is_animating() {
                    break;
                }
            }
            for _ in 0..10 {
                self.frame(Vec::new());
            }
        }

        fn layout(&self) -> DeckLayout {
            DeckLayout::new(Rect::new(0.0, 0.0, VIEW.x, VIEW.y))
        }

        fn swipe(&mut self, dx: f32) {
            let start = self.layout().card.center();
            let end = start + Vec2::new(dx, 6.0);
            self.frame(vec![
                InputEvent::press(start),
                InputEvent::move_to(end),
                InputEvent::release(end),
            ]);
        }

        fn tap(&mut self, pos: Vec2) {
            self.frame(vec![InputEvent::press(pos), InputEvent::release(pos)]);
        }

        fn resolved(&self) -> Vec<(Direction, String)> {
            self.log.borrow().clone()
        }
    }

    // ── gestures ──────────────────────────────────────────────────────────

    #[test]
    fn drag_past_threshold_resolves_right_once() {
        let mut h = Harness::new(&["a", "b", "c"], false);
        h.swipe(0.4 * VIEW.x);
        assert_eq!(h.deck.machine().phase(), SwipePhase::Committing(Direction::Right));
        assert!(h.resolved().is_empty(), "nothing fires before the exit finishes");
        h.settle();
        assert_eq!(h.resolved(), vec![(Direction::Right, "a".to_string())]);
    }

    #[test]
    fn short_drag_reverts_without_resolution() {
        let mut h = Harness::new(&["a", "b"], false);
        h.swipe(-0.2 * VIEW.x);
        assert_eq!(h.deck.machine().phase(), SwipePhase::Reverting);
        h.settle();
        assert!(h.resolved().is_empty());
        assert!(h.deck.machine().state().is_rest());
    }

    #[test]
    fn drag_outside_card_is_ignored() {
        let mut h = Harness::new(&["a"], false);
        let start = Vec2::new(10.0, VIEW.y - 10.0);
        let end = start + Vec2::new(300.0, 0.0);
        h.frame(vec![InputEvent::press(start), InputEvent::move_to(end), InputEvent::release(end)]);
        assert_eq!(h.deck.machine().phase(), SwipePhase::Idle);
    }

    // ── controls ──────────────────────────────────────────────────────────

    #[test]
    fn buttons_commit_like_a_swipe() {
        let mut h = Harness::new(&["a", "b"], false);
        let like = h.layout().like.center();
        h.tap(like);
        h.settle();

        let mut g = Harness::new(&["a", "b"], false);
        let dislike = g.layout().dislike.center();
        g.tap(dislike);
        g.settle();

        assert_eq!(h.resolved(), vec![(Direction::Right, "a".to_string())]);
        assert_eq!(g.resolved(), vec![(Direction::Left, "a".to_string())]);
    }

    #[test]
    fn button_during_drag_commits() {
        let mut h = Harness::new(&["a", "b"], false);
        let start = h.layout().card.center();
        h.frame(vec![InputEvent::press(start), InputEvent::move_to(start + Vec2::new(-60.0, 0.0))]);
        assert_eq!(h.deck.machine().phase(), SwipePhase::Dragging);

        assert!(h.deck.apply(DeckCommand::Like));
        h.settle();
        assert_eq!(h.resolved(), vec![(Direction::Right, "a".to_string())]);
    }

    #[test]
    fn keys_map_to_commands() {
        let mut h = Harness::new(&["a", "b"], true);
        h.frame(vec![InputEvent::key_press(Key::ArrowLeft)]);
        h.settle();
        assert_eq!(h.resolved(), vec![(Direction::Left, "a".to_string())]);

        h.deck.show(None, None, true);
        h.frame(vec![InputEvent::key_press(Key::Backspace)]);
        assert_eq!(h.rewinds.get(), 1);
    }

    #[test]
    fn rewind_only_when_allowed() {
        let mut h = Harness::new(&["a", "b"], false);
        let rewind = h.layout().rewind.center();
        h.tap(rewind);
        assert_eq!(h.rewinds.get(), 0);

        h.deck.set_can_rewind(true);
        h.tap(rewind);
        assert_eq!(h.rewinds.get(), 1);
        assert_eq!(h.deck.machine().phase(), SwipePhase::Idle);
    }

    #[test]
    fn no_current_card_means_no_commit() {
        let mut h = Harness::new(&[], false);
        assert!(!h.deck.apply(DeckCommand::Like));
        h.settle();
        assert!(h.resolved().is_empty());
    }

    // ── owner swap ────────────────────────────────────────────────────────

    #[test]
    fn show_after_resolution_resets_to_idle() {
        let mut h = Harness::new(&["a", "b", "c"], false);
        h.swipe(0.4 * VIEW.x);
        h.settle();
        assert!(matches!(h.deck.machine().phase(), SwipePhase::Resolved(_)));

        let b = CardRecord::new("b", "b", "b.jpg");
        let c = CardRecord::new("c", "c", "c.jpg");
        h.deck.show(Some(&b), Some(&c), true);
        assert_eq!(h.deck.machine().phase(), SwipePhase::Idle);
        assert_eq!(h.deck.current().map(|v| v.record().id.as_str()), Some("b"));
        assert_eq!(h.deck.next().map(|v| v.record().id.as_str()), Some("c"));
    }

    #[test]
    fn tap_on_card_pages_carousel() {
        let mut h = Harness::new(&["a", "b"], false);
        let card = h.layout().card;
        h.tap(Vec2::new(card.max().x - 20.0, card.center().y));
        let logical = h.deck.current().map(|c| c.carousel().state().logical_index());
        assert_eq!(logical, Some(1));
    }

    #[test]
    fn pointer_leaving_mid_press_resumes_autoplay() {
        let mut h = Harness::new(&["a", "b"], false);
        h.frame(Vec::new());
        let carousel = |h: &Harness| h.deck.current().map(|c| c.carousel().state().clone());

        h.frame(vec![InputEvent::press(h.layout().card.center())]);
        assert_eq!(carousel(&h).map(|s| s.is_autoplaying()), Some(false));

        h.frame(vec![InputEvent::PointerLeft]);
        assert_eq!(carousel(&h).map(|s| s.is_autoplaying()), Some(true));

        for _ in 0..300 {
            h.frame(Vec::new());
        }
        assert_eq!(carousel(&h).map(|s| s.logical_index()), Some(1));
        assert!(h.resolved().is_empty());
    }

    // ── paint ─────────────────────────────────────────────────────────────

    #[test]
    fn next_card_drawn_scaled_and_faded_under_current() {
        let mut h = Harness::new(&["a", "b"], false);
        h.frame(Vec::new());
        let layers: Vec<Layer> = h
            .scene
            .draw_list
            .iter_in_paint_order()
            .filter_map(|i| match &i.cmd {
                bop_engine::scene::DrawCmd::Image(img) if img.source.starts_with('b') => {
                    Some(i.layer)
                }
                _ => None,
            })
            .collect();
        assert!(!layers.is_empty());
        assert!(layers.iter().all(|l| l.scale == 0.95 && l.opacity == 0.8));
    }
}
