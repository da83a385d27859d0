use std::collections::HashSet;
use std::fmt;

use log::{debug, trace};

use crate::record::CardRecord;

/// What the user decided about a card.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Decision {
    Like,
    Dislike,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Like => f.write_str("like"),
            Decision::Dislike => f.write_str("dislike"),
        }
    }
}

pub const DEFAULT_PREFETCH_RATIO: f32 = 0.75;
pub const DEFAULT_HISTORY_LIMIT: usize = 1;

///
/// DeckState
///
/// Ordered card list plus a cursor, owned by the screen hosting the deck.
///
/// - `cursor` is always in `[0, len]`; `cursor == len` means exhausted
/// - `decisions[i]` is the decision taken on `cards[i]`, so `decisions.len() == cursor`
///

#[derive(Debug, Clone)]
pub struct DeckState {
    cards: Vec<CardRecord>,
    decisions: Vec<Decision>,
    cursor: usize,
    prefetch_ratio: f32,
    history_limit: usize,
}

impl Default for DeckState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl DeckState {
    pub fn new(cards: Vec<CardRecord>) -> Self {
        Self {
            cards,
            decisions: Vec::new(),
            cursor: 0,
            prefetch_ratio: DEFAULT_PREFETCH_RATIO,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn with_prefetch_ratio(mut self, ratio: f32) -> Self {
        self.prefetch_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    // ── queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn cards(&self) -> &[CardRecord] {
        &self.cards
    }

    pub fn current(&self) -> Option<&CardRecord> {
        self.cards.get(self.cursor)
    }

    /// The card under the current one.
    pub fn next(&self) -> Option<&CardRecord> {
        self.cards.get(self.cursor + 1)
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.cards.len()
    }

    #[inline]
    pub fn can_rewind(&self) -> bool {
        self.cursor > 0
    }

    /// Cards not yet decided, the current one included.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.cursor
    }

    /// True once the cursor reaches the prefetch mark of a non-empty list.
    pub fn needs_more(&self) -> bool {
        if self.cards.is_empty() {
            return false;
        }
        let mark = (self.cards.len() as f32 * self.prefetch_ratio).floor() as usize;
        self.cursor >= mark
    }

    // ── mutation ──────────────────────────────────────────────────────────

    /// Records `decision` for the current card and moves past it.
    ///
    /// Returns the decided card; `None` (and no change) when exhausted.
    pub fn advance(&mut self, decision: Decision) -> Option<&CardRecord> {
        if self.is_exhausted() {
            return None;
        }
        let decided = self.cursor;
        self.decisions.push(decision);
        self.cursor += 1;
        debug!(
            "deck: {decision} on '{}' ({}/{})",
            self.cards[decided].id,
            self.cursor,
            self.cards.len()
        );
        self.cards.get(decided)
    }

    /// Steps back one card, undoing its decision.
    ///
    /// Returns the restored card and the decision that was undone.
    pub fn retreat(&mut self) -> Option<(&CardRecord, Decision)> {
        if !self.can_rewind() {
            return None;
        }
        let decision = self.decisions.pop()?;
        self.cursor -= 1;
        debug!("deck: rewound '{}' (was {decision})", self.cards[self.cursor].id);
        self.cards.get(self.cursor).map(|c| (c, decision))
    }

    /// Starts over from the first card still held.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.decisions.clear();
    }

    /// Replaces every card (e.g. after a category change).
    pub fn replace(&mut self, cards: Vec<CardRecord>) {
        self.cards = cards;
        self.reset();
    }

    /// Appends a freshly fetched page.
    ///
    /// Decided cards beyond the rewind history are dropped first; records
    /// whose id is already held are skipped. The current card stays current.
    /// Returns how many records were added.
    pub fn append_page(&mut self, page: Vec<CardRecord>) -> usize {
        let drop = self.cursor.saturating_sub(self.history_limit);
        if drop > 0 {
            self.cards.drain(..drop);
            self.decisions.drain(..drop);
            self.cursor -= drop;
            trace!("deck: trimmed {drop} decided cards");
        }

        let mut held: HashSet<String> = self.cards.iter().map(|c| c.id.clone()).collect();
        let before = self.cards.len();
        for record in page {
            if held.insert(record.id.clone()) {
                self.cards.push(record);
            }
        }

        let added = self.cards.len() - before;
        debug!("deck: appended {added} cards, {} remaining", self.remaining());
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(ids: &[&str]) -> Vec<CardRecord> {
        ids.iter()
            .map(|id| CardRecord::new(*id, format!("item {id}"), format!("{id}.jpg")))
            .collect()
    }

    fn ids(deck: &DeckState) -> Vec<&str> {
        deck.cards().iter().map(|c| c.id.as_str()).collect()
    }

    // ── cursor ────────────────────────────────────────────────────────────

    #[test]
    fn advance_moves_current_and_next() {
        let mut deck = DeckState::new(cards(&["a", "b", "c"]));
        assert_eq!(deck.current().map(|c| c.id.as_str()), Some("a"));
        assert_eq!(deck.next().map(|c| c.id.as_str()), Some("b"));

        let decided = deck.advance(Decision::Like).map(|c| c.id.clone());
        assert_eq!(decided.as_deref(), Some("a"));
        assert_eq!(deck.current().map(|c| c.id.as_str()), Some("b"));
        assert_eq!(deck.next().map(|c| c.id.as_str()), Some("c"));
    }

    #[test]
    fn cursor_never_leaves_bounds() {
        let mut deck = DeckState::new(cards(&["a", "b"]));
        for _ in 0..5 {
            deck.advance(Decision::Dislike);
            assert!(deck.cursor() <= deck.len());
        }
        assert!(deck.is_exhausted());
        assert!(deck.current().is_none());

        for _ in 0..5 {
            deck.retreat();
        }
        assert_eq!(deck.cursor(), 0);
        assert!(!deck.can_rewind());
    }

    #[test]
    fn retreat_reports_undone_decision() {
        let mut deck = DeckState::new(cards(&["a", "b"]));
        deck.advance(Decision::Like);
        let (card, decision) = deck.retreat().unwrap();
        assert_eq!(card.id, "a");
        assert_eq!(decision, Decision::Like);
        assert_eq!(deck.current().map(|c| c.id.as_str()), Some("a"));
    }

    #[test]
    fn empty_deck_is_exhausted_and_wants_nothing() {
        let mut deck = DeckState::default();
        assert!(deck.is_exhausted());
        assert!(!deck.needs_more());
        assert!(deck.advance(Decision::Like).is_none());
        assert!(deck.retreat().is_none());
    }

    #[test]
    fn replace_starts_over_without_history() {
        let mut deck = DeckState::new(cards(&["a", "b"]));
        deck.advance(Decision::Like);
        assert!(deck.can_rewind());

        deck.replace(cards(&["x", "y", "z"]));
        assert_eq!(ids(&deck), vec!["x", "y", "z"]);
        assert_eq!(deck.cursor(), 0);
        assert_eq!(deck.current().map(|c| c.id.as_str()), Some("x"));
        assert!(!deck.can_rewind());
        assert!(deck.retreat().is_none());
    }

    // ── paging ────────────────────────────────────────────────────────────

    #[test]
    fn needs_more_at_three_quarters() {
        let mut deck = DeckState::new(cards(&["a", "b", "c", "d"]));
        deck.advance(Decision::Like);
        deck.advance(Decision::Like);
        assert!(!deck.needs_more());
        deck.advance(Decision::Like);
        assert!(deck.needs_more());
    }

    #[test]
    fn append_keeps_current_and_one_card_of_history() {
        let mut deck = DeckState::new(cards(&["a", "b", "c", "d"]));
        deck.advance(Decision::Like);
        deck.advance(Decision::Dislike);
        deck.advance(Decision::Like);
        assert_eq!(deck.current().map(|c| c.id.as_str()), Some("d"));

        let added = deck.append_page(cards(&["d", "e", "f"]));
        assert_eq!(added, 2);
        assert_eq!(ids(&deck), vec!["c", "d", "e", "f"]);
        assert_eq!(deck.current().map(|c| c.id.as_str()), Some("d"));

        let (card, decision) = deck.retreat().unwrap();
        assert_eq!((card.id.as_str(), decision), ("c", Decision::Like));
        assert!(!deck.can_rewind());
    }

    #[test]
    fn append_to_exhausted_deck_resumes() {
        let mut deck = DeckState::new(cards(&["a"]));
        deck.advance(Decision::Like);
        assert!(deck.is_exhausted());

        deck.append_page(cards(&["b", "c"]));
        assert_eq!(deck.current().map(|c| c.id.as_str()), Some("b"));
        assert!(deck.cursor() <= deck.len());
    }
}
