use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use bop_feed::{CardRecord, Decision, DeckState, Interaction, InteractionKind, InteractionSink};
use bop_ui::prelude::*;
use log::info;

/// What the deck reported during a frame, applied once the deck is done.
#[derive(Debug, Clone, PartialEq)]
enum Pending {
    Decided { decision: Decision, id: String },
    Rewind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub liked: usize,
    pub disliked: usize,
    pub unliked: usize,
    pub rewinds: usize,
    /// Distinct cards that reached the top of the deck.
    pub seen: usize,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seen {}, liked {}, disliked {}, rewinds {} ({} unliked)",
            self.seen, self.liked, self.disliked, self.rewinds, self.unliked
        )
    }
}

///
/// FeedScreen
///
/// Root widget of the studio: owns the card list and cursor, feeds the
/// current/next pair to the deck, and turns resolved swipes into
/// interactions.
///

pub struct FeedScreen {
    state: DeckState,
    deck: SwipeDeck,
    sink: Box<dyn InteractionSink>,
    user_id: u64,
    pending: Rc<RefCell<Vec<Pending>>>,
    summary: SessionSummary,
    seen: HashSet<String>,
}

impl FeedScreen {
    pub fn new(
        state: DeckState,
        swipe: SwipeConfig,
        carousel: CarouselConfig,
        sink: Box<dyn InteractionSink>,
        user_id: u64,
    ) -> Self {
        let pending: Rc<RefCell<Vec<Pending>>> = Rc::default();

        let (left, right, rewind) = (Rc::clone(&pending), Rc::clone(&pending), Rc::clone(&pending));
        let deck = SwipeDeck::new(swipe, carousel)
            .on_resolve_left(move |card| {
                let id = card.id.clone();
                left.borrow_mut().push(Pending::Decided { decision: Decision::Dislike, id });
            })
            .on_resolve_right(move |card| {
                let id = card.id.clone();
                right.borrow_mut().push(Pending::Decided { decision: Decision::Like, id });
            })
            .on_rewind(move || rewind.borrow_mut().push(Pending::Rewind));

        let mut screen = Self {
            state,
            deck,
            sink,
            user_id,
            pending,
            summary: SessionSummary::default(),
            seen: HashSet::new(),
        };
        screen.sync_deck();
        screen
    }

    #[inline]
    pub fn state(&self) -> &DeckState {
        &self.state
    }

    #[inline]
    pub fn deck(&self) -> &SwipeDeck {
        &self.deck
    }

    #[inline]
    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    /// True when the owner should fetch the next page.
    #[inline]
    pub fn needs_more(&self) -> bool {
        self.state.needs_more()
    }

    /// Adds a fetched page; returns how many new cards were kept.
    pub fn append_page(&mut self, page: Vec<CardRecord>) -> usize {
        let added = self.state.append_page(page);
        if added > 0 {
            self.sync_deck();
        }
        added
    }

    fn apply_pending(&mut self) {
        let pending = std::mem::take(&mut *self.pending.borrow_mut());
        if pending.is_empty() {
            return;
        }

        for p in pending {
            match p {
                Pending::Decided { decision, id } => self.decide(decision, id),
                Pending::Rewind => self.rewind(),
            }
        }
        self.sync_deck();
    }

    fn decide(&mut self, decision: Decision, id: String) {
        if self.state.current().map(|c| c.id.as_str()) != Some(id.as_str()) {
            return;
        }
        self.state.advance(decision);
        match decision {
            Decision::Like => self.summary.liked += 1,
            Decision::Dislike => self.summary.disliked += 1,
        }
        info!("{decision} '{id}'");
        self.sink.record(Interaction::new(self.user_id, id, decision.into()));
    }

    fn rewind(&mut self) {
        let Some((card, undone)) = self.state.retreat() else {
            return;
        };
        let id = card.id.clone();
        self.summary.rewinds += 1;
        info!("rewind to '{id}' (undoing {undone})");

        if undone == Decision::Like {
            self.summary.unliked += 1;
            self.sink.record(Interaction::new(self.user_id, id, InteractionKind::Unlike));
        }
    }

    fn sync_deck(&mut self) {
        if let Some(card) = self.state.current() {
            if self.seen.insert(card.id.clone()) {
                self.summary.seen += 1;
            }
        }
        self.deck.show(self.state.current(), self.state.next(), self.state.can_rewind());
    }
}

impl Widget for FeedScreen {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        self.deck.measure(constraints, ctx)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        self.deck.paint(painter, rect);
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        let result = self.deck.on_event(event, rect, ctx);
        self.apply_pending();
        result
    }

    fn tick(&mut self, time: &FrameTime, rect: Rect) {
        self.deck.tick(time, rect);
        self.apply_pending();
    }

    fn is_animating(&self) -> bool {
        self.deck.is_animating()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use bop_feed::MemorySink;
    use bop_ui::widgets::swipe_deck::DeckLayout;

    const VIEW: Vec2 = Vec2::new(400.0, 800.0);

    struct Harness {
        scene: UiScene,
        clock: FrameClock,
        screen: FeedScreen,
        sink: Rc<MemorySink>,
    }

    impl Harness {
        fn new(ids: &[&str]) -> Self {
            let cards =
                ids.iter().map(|id| CardRecord::new(*id, *id, format!("{id}.jpg"))).collect();
            let sink = Rc::new(MemorySink::new());
            let screen = FeedScreen::new(
                DeckState::new(cards),
                SwipeConfig::default(),
                CarouselConfig::default(),
                Box::new(Rc::clone(&sink)),
                7,
            );
            Self { scene: UiScene::new(), clock: FrameClock::new(), screen, sink }
        }

        fn frame(&mut self, events: Vec<InputEvent>) {
            let time = self.clock.advance(Duration::from_micros(16_667));
            let _ = self.scene.frame_ref(&mut self.screen, VIEW, time, &UiInput::new(events));
        }

        fn settle(&mut self) {
            for _ in 0..300 {
                self.frame(Vec::new());
                if !self.screen.is_animating() {
                    break;
                }
            }
        }

        fn drag_release(&mut self, dx: f32) {
            let start = DeckLayout::new(Rect::new(0.0, 0.0, VIEW.x, VIEW.y)).card.center();
            let end = start + Vec2::new(dx, 0.0);
            self.frame(vec![
                InputEvent::press(start),
                InputEvent::move_to(end),
                InputEvent::release(end),
            ]);
            self.settle();
        }

        fn shown(&self) -> (Option<String>, Option<String>) {
            let deck = self.screen.deck();
            (
                deck.current().map(|c| c.record().id.clone()),
                deck.next().map(|c| c.record().id.clone()),
            )
        }

        fn kinds(&self) -> Vec<(InteractionKind, String)> {
            self.sink.snapshot().into_iter().map(|i| (i.kind, i.item_id)).collect()
        }
    }

    fn some(a: &str, b: &str) -> (Option<String>, Option<String>) {
        (Some(a.to_string()), Some(b.to_string()))
    }

    #[test]
    fn drag_right_advances_and_records_a_like() {
        let mut h = Harness::new(&["a", "b", "c"]);
        assert_eq!(h.shown(), some("a", "b"));

        h.drag_release(0.4 * VIEW.x);

        assert_eq!(h.screen.state().cursor(), 1);
        assert_eq!(h.shown(), some("b", "c"));
        assert_eq!(h.kinds(), vec![(InteractionKind::Like, "a".to_string())]);
        assert_eq!(h.sink.snapshot()[0].user_id, 7);
        assert_eq!(h.screen.deck().machine().phase(), SwipePhase::Idle);
    }

    #[test]
    fn resolution_is_applied_once() {
        let mut h = Harness::new(&["a", "b", "c"]);
        h.drag_release(-0.5 * VIEW.x);
        for _ in 0..30 {
            h.frame(Vec::new());
        }
        assert_eq!(h.screen.state().cursor(), 1);
        assert_eq!(h.kinds(), vec![(InteractionKind::Dislike, "a".to_string())]);
    }

    #[test]
    fn rewinding_a_like_unlikes() {
        let mut h = Harness::new(&["a", "b", "c"]);
        h.frame(vec![InputEvent::key_press(Key::ArrowRight)]);
        h.settle();
        h.frame(vec![InputEvent::key_press(Key::Backspace)]);

        assert_eq!(h.screen.state().cursor(), 0);
        assert_eq!(h.shown(), some("a", "b"));
        assert_eq!(
            h.kinds(),
            vec![
                (InteractionKind::Like, "a".to_string()),
                (InteractionKind::Unlike, "a".to_string()),
            ]
        );

        let s = h.screen.summary();
        assert_eq!((s.liked, s.rewinds, s.unliked, s.seen), (1, 1, 1, 2));
    }

    #[test]
    fn rewinding_a_dislike_records_nothing() {
        let mut h = Harness::new(&["a", "b"]);
        h.frame(vec![InputEvent::key_press(Key::ArrowLeft)]);
        h.settle();
        h.frame(vec![InputEvent::key_press(Key::Backspace)]);

        assert_eq!(h.screen.state().cursor(), 0);
        assert_eq!(h.kinds(), vec![(InteractionKind::Dislike, "a".to_string())]);
    }

    #[test]
    fn append_keeps_current_and_fills_next() {
        let mut h = Harness::new(&["a"]);
        assert_eq!(h.shown(), (Some("a".to_string()), None));

        let page = vec![CardRecord::new("a", "dup", "x.jpg"), CardRecord::new("b", "b", "b.jpg")];
        let added = h.screen.append_page(page);
        assert_eq!(added, 1);
        assert_eq!(h.shown(), some("a", "b"));
    }

    #[test]
    fn exhausted_deck_shows_nothing_and_wants_more() {
        let mut h = Harness::new(&["a"]);
        h.frame(vec![InputEvent::key_press(Key::ArrowRight)]);
        h.settle();
        assert_eq!(h.shown(), (None, None));
        assert!(h.screen.needs_more());
        assert!(h.screen.state().is_exhausted());
    }
}
