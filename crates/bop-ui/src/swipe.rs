//! Swipe-to-decide state machine.
//!
//! `Idle → Dragging → (Committing | Reverting) → Idle`, with `Resolved`
//! holding a committed card off-screen until the owner swaps cards in.
//! Rendering is not involved: widgets read [`SwipeMachine::state`] and
//! [`SwipeMachine::overlay`] and paint accordingly.

use std::time::Duration;

use bop_engine::anim::{Easing, Spring, SpringParams, Tween};
use bop_engine::coords::Vec2;
use bop_feed::Decision;
use log::debug;
use serde::Deserialize;

// ── config ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwipeConfig {
    /// Commit distance as a fraction of the screen width.
    pub threshold_ratio: f32,
    /// Rotation in degrees is `offset.x / rotation_divisor`.
    pub rotation_divisor: f32,
    /// Where a committed card flies to, as a fraction of the screen width.
    pub exit_ratio: f32,
    pub exit_duration_ms: u64,
    /// Opacity reaches zero before the card finishes leaving.
    pub fade_duration_ms: u64,
    pub exit_easing: Easing,
    /// Spring pulling a released card back to rest.
    pub spring: SpringParams,
    /// Overlay tint stays off until the card has travelled this far (px).
    pub overlay_dead_zone: f32,
    /// Overlay opacity reached at the commit threshold.
    pub overlay_max_opacity: f32,
    pub next_scale: f32,
    pub next_opacity: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            threshold_ratio: 0.3,
            rotation_divisor: 20.0,
            exit_ratio: 1.5,
            exit_duration_ms: 450,
            fade_duration_ms: 300,
            exit_easing: Easing::EaseOut,
            spring: SpringParams::default(),
            overlay_dead_zone: 0.0,
            overlay_max_opacity: 0.35,
            next_scale: 0.95,
            next_opacity: 0.8,
        }
    }
}

impl SwipeConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(self.threshold_ratio > 0.0 && self.threshold_ratio < 1.0) {
            return Err("threshold_ratio must be in (0, 1)");
        }
        if self.rotation_divisor <= 0.0 {
            return Err("rotation_divisor must be positive");
        }
        if self.exit_ratio <= self.threshold_ratio {
            return Err("exit_ratio must exceed threshold_ratio");
        }
        if self.exit_duration_ms == 0 || self.fade_duration_ms == 0 {
            return Err("exit and fade durations must be non-zero");
        }
        if self.fade_duration_ms > self.exit_duration_ms {
            return Err("fade_duration_ms must not exceed exit_duration_ms");
        }
        if self.spring.stiffness <= 0.0 || self.spring.mass <= 0.0 || self.spring.damping < 0.0 {
            return Err("spring needs positive stiffness and mass, non-negative damping");
        }
        if self.overlay_dead_zone < 0.0 {
            return Err("overlay_dead_zone must not be negative");
        }
        if !(0.0..=1.0).contains(&self.overlay_max_opacity)
            || !(0.0..=1.0).contains(&self.next_opacity)
        {
            return Err("opacities must be in [0, 1]");
        }
        if self.next_scale <= 0.0 {
            return Err("next_scale must be positive");
        }
        Ok(())
    }

    #[inline]
    pub fn exit_duration(&self) -> Duration {
        Duration::from_millis(self.exit_duration_ms)
    }

    #[inline]
    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_duration_ms)
    }
}

// ── pure derivations ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// `Right` for positive x, `Left` otherwise.
    #[inline]
    pub fn from_offset(x: f32) -> Self {
        if x > 0.0 { Direction::Right } else { Direction::Left }
    }

    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

impl From<Decision> for Direction {
    fn from(d: Decision) -> Self {
        match d {
            Decision::Like => Direction::Right,
            Decision::Dislike => Direction::Left,
        }
    }
}

/// Visual state of the top card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureState {
    pub offset: Vec2,
    pub rotation_deg: f32,
    pub opacity: f32,
}

impl GestureState {
    pub const REST: GestureState =
        GestureState { offset: Vec2::zero(), rotation_deg: 0.0, opacity: 1.0 };

    #[inline]
    pub fn is_rest(&self) -> bool {
        *self == Self::REST
    }
}

/// Rotation and opacity follow the horizontal offset.
pub fn derive(offset: Vec2, screen_width: f32, cfg: &SwipeConfig) -> GestureState {
    let rotation_deg = offset.x / cfg.rotation_divisor;
    let opacity = if screen_width > 0.0 {
        (1.0 - offset.x.abs() / screen_width).clamp(0.0, 1.0)
    } else {
        1.0
    };
    GestureState { offset, rotation_deg, opacity }
}

/// LIKE / NOPE tint opacities. At most one is non-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overlay {
    pub like: f32,
    pub nope: f32,
}

/// Ramps from 0 at the dead zone to `overlay_max_opacity` at the threshold.
pub fn overlay_opacity(offset_x: f32, screen_width: f32, cfg: &SwipeConfig) -> Overlay {
    let threshold = cfg.threshold_ratio * screen_width;
    let span = threshold - cfg.overlay_dead_zone;
    let travelled = offset_x.abs() - cfg.overlay_dead_zone;
    if travelled <= 0.0 {
        return Overlay::default();
    }
    let t = if span > 0.0 { (travelled / span).min(1.0) } else { 1.0 };
    let o = t * cfg.overlay_max_opacity;
    if offset_x > 0.0 {
        Overlay { like: o, nope: 0.0 }
    } else {
        Overlay { like: 0.0, nope: o }
    }
}

// ── machine ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipePhase {
    Idle,
    Dragging,
    Committing(Direction),
    Reverting,
    /// The exit finished and the resolution was reported; waiting for new cards.
    Resolved(Direction),
}

#[derive(Debug, Clone, Copy)]
enum Motion {
    Still,
    Revert { x: Spring, y: Spring },
    Exit { x: Tween, fade: Tween },
}

/// Gesture and animation state of the top card.
#[derive(Debug, Clone)]
pub struct SwipeMachine {
    cfg: SwipeConfig,
    screen_width: f32,
    phase: SwipePhase,
    offset: Vec2,
    /// Offset at drag start; non-zero when a drag takes over a revert.
    drag_base: Vec2,
    motion: Motion,
}

impl SwipeMachine {
    pub fn new(cfg: SwipeConfig, screen_width: f32) -> Self {
        Self {
            cfg,
            screen_width,
            phase: SwipePhase::Idle,
            offset: Vec2::zero(),
            drag_base: Vec2::zero(),
            motion: Motion::Still,
        }
    }

    #[inline]
    pub fn config(&self) -> &SwipeConfig {
        &self.cfg
    }

    #[inline]
    pub fn phase(&self) -> SwipePhase {
        self.phase
    }

    #[inline]
    pub fn screen_width(&self) -> f32 {
        self.screen_width
    }

    pub fn set_screen_width(&mut self, width: f32) {
        self.screen_width = width.max(0.0);
    }

    /// Horizontal distance a release must exceed to commit.
    #[inline]
    pub fn threshold(&self) -> f32 {
        self.cfg.threshold_ratio * self.screen_width
    }

    pub fn state(&self) -> GestureState {
        let mut s = derive(self.offset, self.screen_width, &self.cfg);
        if let Motion::Exit { fade, .. } = &self.motion {
            s.opacity = fade.value();
        }
        if let SwipePhase::Resolved(_) = self.phase {
            s.opacity = 0.0;
        }
        s
    }

    pub fn overlay(&self) -> Overlay {
        overlay_opacity(self.offset.x, self.screen_width, &self.cfg)
    }

    /// Committing or reverting.
    #[inline]
    pub fn is_animating(&self) -> bool {
        matches!(self.phase, SwipePhase::Committing(_) | SwipePhase::Reverting)
    }

    /// True when the top card can take a new gesture or command.
    #[inline]
    pub fn accepts_input(&self) -> bool {
        !matches!(self.phase, SwipePhase::Committing(_) | SwipePhase::Resolved(_))
    }

    // ── transitions ───────────────────────────────────────────────────────

    /// Drag activation. Takes over a revert from where the spring is.
    ///
    /// Ignored (returns `false`) while committing or resolved.
    pub fn begin_drag(&mut self) -> bool {
        match self.phase {
            SwipePhase::Idle | SwipePhase::Reverting => {
                self.drag_base = self.offset;
                self.motion = Motion::Still;
                self.set_phase(SwipePhase::Dragging);
                true
            }
            SwipePhase::Dragging => true,
            SwipePhase::Committing(_) | SwipePhase::Resolved(_) => false,
        }
    }

    /// `translation` is the total pointer travel since the drag began.
    pub fn drag(&mut self, translation: Vec2) {
        if self.phase == SwipePhase::Dragging {
            self.offset = self.drag_base + translation;
        }
    }

    /// Ends the drag: commits past the threshold, reverts otherwise.
    pub fn release(&mut self, translation: Vec2) {
        if self.phase != SwipePhase::Dragging {
            return;
        }
        self.offset = self.drag_base + translation;
        if self.offset.x.abs() > self.threshold() {
            self.start_exit(Direction::from_offset(self.offset.x));
        } else {
            self.start_revert();
        }
    }

    /// The contact was lost mid-drag; return to rest.
    pub fn cancel(&mut self) {
        if self.phase == SwipePhase::Dragging {
            self.start_revert();
        }
    }

    /// Button / keyboard decision. Same outcome as a drag past the threshold.
    ///
    /// Returns `false` when a commit is already in flight or resolved.
    pub fn commit(&mut self, direction: Direction) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.start_exit(direction);
        true
    }

    /// Back to rest with no animation (new cards shown).
    pub fn reset(&mut self) {
        self.offset = Vec2::zero();
        self.drag_base = Vec2::zero();
        self.motion = Motion::Still;
        self.set_phase(SwipePhase::Idle);
    }

    /// Advances animations by `dt` seconds.
    ///
    /// Returns the direction exactly once, on the step where the exit completes.
    pub fn step(&mut self, dt: f32) -> Option<Direction> {
        match (&mut self.motion, self.phase) {
            (Motion::Revert { x, y }, SwipePhase::Reverting) => {
                let done_x = x.step(dt);
                let done_y = y.step(dt);
                self.offset = Vec2::new(x.value(), y.value());
                if done_x && done_y {
                    self.offset = Vec2::zero();
                    self.motion = Motion::Still;
                    self.set_phase(SwipePhase::Idle);
                }
                None
            }
            (Motion::Exit { x, fade }, SwipePhase::Committing(direction)) => {
                fade.step(dt);
                let done = x.step(dt);
                self.offset.x = x.value();
                if done {
                    self.motion = Motion::Still;
                    self.set_phase(SwipePhase::Resolved(direction));
                    Some(direction)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn start_exit(&mut self, direction: Direction) {
        let target = direction.sign() * self.cfg.exit_ratio * self.screen_width;
        let opacity = derive(self.offset, self.screen_width, &self.cfg).opacity;
        self.motion = Motion::Exit {
            x: Tween::new(self.offset.x, target, self.cfg.exit_duration(), self.cfg.exit_easing),
            fade: Tween::new(opacity, 0.0, self.cfg.fade_duration(), Easing::Linear),
        };
        self.set_phase(SwipePhase::Committing(direction));
    }

    fn start_revert(&mut self) {
        self.motion = Motion::Revert {
            x: Spring::new(self.offset.x, 0.0, self.cfg.spring),
            y: Spring::new(self.offset.y, 0.0, self.cfg.spring),
        };
        self.set_phase(SwipePhase::Reverting);
    }

    fn set_phase(&mut self, phase: SwipePhase) {
        if self.phase != phase {
            debug!(
                "swipe: {:?} -> {:?} (offset {:.1}, {:.1})",
                self.phase, phase, self.offset.x, self.offset.y
            );
            self.phase = phase;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f32 = 400.0;
    const DT: f32 = 1.0 / 60.0;

    fn machine() -> SwipeMachine {
        SwipeMachine::new(SwipeConfig::default(), W)
    }

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    /// Steps until nothing animates (capped); returns every resolution reported.
    fn settle(m: &mut SwipeMachine) -> Vec<Direction> {
        let mut out = Vec::new();
        for _ in 0..600 {
            if let Some(d) = m.step(DT) {
                out.push(d);
            }
            if !m.is_animating() {
                break;
            }
        }
        // A few extra steps must not report again.
        for _ in 0..30 {
            if let Some(d) = m.step(DT) {
                out.push(d);
            }
        }
        out
    }

    fn drag_and_release(m: &mut SwipeMachine, dx: f32, dy: f32) {
        assert!(m.begin_drag());
        m.drag(v(dx * 0.5, dy * 0.5));
        m.drag(v(dx, dy));
        m.release(v(dx, dy));
    }

    // ── derivations ───────────────────────────────────────────────────────

    #[test]
    fn derive_rotation_and_opacity() {
        let s = derive(v(100.0, 7.0), W, &SwipeConfig::default());
        assert_eq!(s.rotation_deg, 5.0);
        assert_eq!(s.opacity, 0.75);

        let far = derive(v(-900.0, 0.0), W, &SwipeConfig::default());
        assert_eq!(far.opacity, 0.0);
        assert_eq!(far.rotation_deg, -45.0);
    }

    #[test]
    fn overlay_only_matches_drag_side() {
        let cfg = SwipeConfig::default();
        let right = overlay_opacity(60.0, W, &cfg);
        assert_eq!(right.nope, 0.0);
        assert!((right.like - 0.175).abs() < 1e-4);

        let left = overlay_opacity(-500.0, W, &cfg);
        assert_eq!(left.like, 0.0);
        assert_eq!(left.nope, 0.35);

        assert_eq!(overlay_opacity(0.0, W, &cfg), Overlay::default());
    }

    #[test]
    fn overlay_respects_dead_zone() {
        let cfg = SwipeConfig { overlay_dead_zone: 20.0, ..SwipeConfig::default() };
        assert_eq!(overlay_opacity(15.0, W, &cfg), Overlay::default());
        assert!(overlay_opacity(21.0, W, &cfg).like > 0.0);
    }

    // ── drag past threshold ───────────────────────────────────────────────

    #[test]
    fn release_past_threshold_resolves_once_in_drag_direction() {
        for (dx, expected) in [(0.4 * W, Direction::Right), (-0.4 * W, Direction::Left)] {
            let mut m = machine();
            drag_and_release(&mut m, dx, 12.0);
            assert_eq!(m.phase(), SwipePhase::Committing(expected));
            assert_eq!(settle(&mut m), vec![expected]);
            assert_eq!(m.phase(), SwipePhase::Resolved(expected));
            assert_eq!(m.state().opacity, 0.0);
            assert!((m.state().offset.x - expected.sign() * 1.5 * W).abs() < 1e-3);
        }
    }

    #[test]
    fn resolution_waits_for_exit_duration() {
        let mut m = machine();
        drag_and_release(&mut m, 0.5 * W, 0.0);
        // 400 ms in: still leaving.
        for _ in 0..24 {
            assert_eq!(m.step(DT), None);
        }
        assert!(m.state().opacity < 0.05);
        assert_eq!(settle(&mut m), vec![Direction::Right]);
    }

    // ── revert ────────────────────────────────────────────────────────────

    #[test]
    fn release_at_threshold_reverts_to_exact_rest() {
        let mut m = machine();
        let t = m.threshold();
        drag_and_release(&mut m, t, -30.0);
        assert_eq!(m.phase(), SwipePhase::Reverting);
        assert!(settle(&mut m).is_empty());
        assert_eq!(m.phase(), SwipePhase::Idle);
        assert!(m.state().is_rest());
    }

    #[test]
    fn cancel_mid_drag_reverts() {
        let mut m = machine();
        m.begin_drag();
        m.drag(v(300.0, 0.0));
        m.cancel();
        assert!(settle(&mut m).is_empty());
        assert!(m.state().is_rest());
    }

    #[test]
    fn drag_takes_over_revert_from_spring_position() {
        let mut m = machine();
        drag_and_release(&mut m, 100.0, 0.0);
        for _ in 0..5 {
            m.step(DT);
        }
        let mid = m.state().offset.x;
        assert!(mid > 0.0 && mid < 100.0);

        assert!(m.begin_drag());
        m.drag(v(0.0, 0.0));
        assert_eq!(m.state().offset.x, mid);
        m.release(v(0.4 * W, 0.0));
        assert_eq!(settle(&mut m), vec![Direction::Right]);
    }

    // ── commands ──────────────────────────────────────────────────────────

    #[test]
    fn commit_matches_drag_from_any_state() {
        for dir in [Direction::Left, Direction::Right] {
            // idle
            let mut m = machine();
            assert!(m.commit(dir));
            assert_eq!(settle(&mut m), vec![dir]);

            // mid-drag the opposite way
            let mut m = machine();
            m.begin_drag();
            m.drag(v(-dir.sign() * 0.2 * W, 0.0));
            assert!(m.commit(dir));
            assert_eq!(settle(&mut m), vec![dir]);

            // reverting
            let mut m = machine();
            drag_and_release(&mut m, 50.0, 0.0);
            m.step(DT);
            assert!(m.commit(dir));
            assert_eq!(settle(&mut m), vec![dir]);
        }
    }

    #[test]
    fn input_during_commit_is_ignored() {
        let mut m = machine();
        m.commit(Direction::Left);
        m.step(DT);
        assert!(!m.begin_drag());
        assert!(!m.commit(Direction::Right));
        m.drag(v(500.0, 0.0));
        m.release(v(500.0, 0.0));
        assert_eq!(settle(&mut m), vec![Direction::Left]);

        // Still resolved until the owner shows new cards.
        assert!(!m.commit(Direction::Right));
        m.reset();
        assert_eq!(m.phase(), SwipePhase::Idle);
        assert!(m.state().is_rest());
    }

    #[test]
    fn default_config_validates() {
        assert!(SwipeConfig::default().validate().is_ok());
        let bad = SwipeConfig { fade_duration_ms: 900, ..SwipeConfig::default() };
        assert!(bad.validate().is_err());
    }
}
