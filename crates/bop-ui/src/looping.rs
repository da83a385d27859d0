//! Seamlessly wrapping pager.
//!
//! The real list `[i0 .. iN-1]` is padded to `[iN-1, i0 .. iN-1, i0]`.
//! Paging onto a clone at either end animates normally; once the page has
//! landed, a snap jumps to the real entry without animation, so the strip
//! looks endless.

use std::time::Duration;

use bop_engine::anim::{Easing, Tween};
use bop_engine::time::{Interval, Timeout};
use log::trace;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    pub autoplay: bool,
    pub autoplay_interval_ms: u64,
    /// Delay between landing on a clone and snapping to the real entry.
    pub snap_delay_ms: u64,
    /// Page slide duration; shorter than the snap delay.
    pub page_duration_ms: u64,
    pub page_easing: Easing,
    /// Autoplay stays paused this long after a dot tap.
    pub pause_after_tap_ms: u64,
    /// Taps in this leading fraction of the width go back.
    pub prev_zone_ratio: f32,
    /// Shown when a card has no images at all.
    pub default_image: String,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            autoplay_interval_ms: 4000,
            snap_delay_ms: 350,
            page_duration_ms: 300,
            page_easing: Easing::EaseInOut,
            pause_after_tap_ms: 4000,
            prev_zone_ratio: 1.0 / 3.0,
            default_image: "bundled://placeholder.png".to_string(),
        }
    }
}

impl CarouselConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.autoplay_interval_ms == 0 {
            return Err("autoplay_interval_ms must be non-zero");
        }
        if self.page_duration_ms > self.snap_delay_ms {
            return Err("page_duration_ms must not exceed snap_delay_ms");
        }
        if !(self.prev_zone_ratio > 0.0 && self.prev_zone_ratio < 1.0) {
            return Err("prev_zone_ratio must be in (0, 1)");
        }
        if self.default_image.trim().is_empty() {
            return Err("default_image must not be empty");
        }
        Ok(())
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }
}

/// Paging state for one image list.
///
/// Timers are owned by the value: dropping it (or calling [`stop`](Self::stop))
/// cancels everything. All time arguments are frame-clock elapsed time.
#[derive(Debug, Clone)]
pub struct CarouselState {
    cfg: CarouselConfig,
    images: Vec<String>,
    padded: Vec<String>,
    virtual_index: usize,
    logical_index: usize,
    /// Page position in virtual units.
    page: Tween,
    snap: Timeout,
    snap_to: Option<usize>,
    autoplay: Interval,
    resume: Timeout,
    held: bool,
}

impl CarouselState {
    /// Builds the padded list. An empty list shows `cfg.default_image`.
    /// Autoplay does not run until [`start`](Self::start).
    pub fn new(images: Vec<String>, cfg: CarouselConfig) -> Self {
        let images = if images.is_empty() { vec![cfg.default_image.clone()] } else { images };
        let padded = pad(&images);
        let autoplay = Interval::new(CarouselConfig::ms(cfg.autoplay_interval_ms));

        Self {
            cfg,
            images,
            padded,
            virtual_index: 1,
            logical_index: 0,
            page: Tween::settled(1.0),
            snap: Timeout::idle(),
            snap_to: None,
            autoplay,
            resume: Timeout::idle(),
            held: false,
        }
    }

    // ── queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[inline]
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// `[last, i0 .. iN-1, first]`
    #[inline]
    pub fn padded(&self) -> &[String] {
        &self.padded
    }

    #[inline]
    pub fn virtual_index(&self) -> usize {
        self.virtual_index
    }

    /// Index into the real list; what the dot row highlights.
    #[inline]
    pub fn logical_index(&self) -> usize {
        self.logical_index
    }

    /// Animated page position in virtual units (1.0 = first real image).
    #[inline]
    pub fn page_position(&self) -> f32 {
        self.page.value()
    }

    /// A single image has no dots, no paging and no timers.
    #[inline]
    pub fn is_static(&self) -> bool {
        self.images.len() <= 1
    }

    #[inline]
    pub fn has_pending_snap(&self) -> bool {
        self.snap_to.is_some()
    }

    #[inline]
    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_running()
    }

    /// Page in motion or a snap outstanding.
    #[inline]
    pub fn is_animating(&self) -> bool {
        !self.page.is_finished() || self.snap_to.is_some()
    }

    /// True while any timer is armed (autoplay included).
    pub fn has_timers(&self) -> bool {
        self.snap.is_armed() || self.autoplay.is_running() || self.resume.is_armed()
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    /// Mount: starts autoplay when enabled and there is something to page.
    pub fn start(&mut self, now: Duration) {
        if self.cfg.autoplay && !self.is_static() {
            self.autoplay.start(now);
        }
    }

    /// Unmount: lands any pending snap on its real entry, then cancels
    /// every timer.
    pub fn stop(&mut self) {
        self.apply_pending_snap();
        self.autoplay.stop();
        self.resume.cancel();
        self.held = false;
    }

    /// List change: cancels timers, resets to the first image, restarts.
    pub fn set_images(&mut self, images: Vec<String>, now: Duration) {
        self.stop();
        *self = Self::new(images, self.cfg.clone());
        self.start(now);
    }

    // ── navigation ────────────────────────────────────────────────────────

    pub fn go_next(&mut self, now: Duration) {
        if self.is_static() {
            return;
        }
        self.apply_pending_snap();
        let n = self.len();
        self.move_to(self.virtual_index + 1);
        if self.virtual_index == n + 1 {
            self.arm_snap(now, 1);
        }
    }

    pub fn go_prev(&mut self, now: Duration) {
        if self.is_static() {
            return;
        }
        self.apply_pending_snap();
        let n = self.len();
        self.move_to(self.virtual_index - 1);
        if self.virtual_index == 0 {
            self.arm_snap(now, n);
        }
    }

    /// Dot tap: straight to real image `i`, pausing autoplay for a while.
    pub fn jump_to(&mut self, i: usize, now: Duration) {
        if self.is_static() || i >= self.len() {
            return;
        }
        self.snap.cancel();
        self.snap_to = None;
        self.move_to(i + 1);
        self.pause_autoplay(now);
    }

    /// Tap at horizontal fraction `fx` of the carousel width.
    pub fn tap(&mut self, fx: f32, now: Duration) {
        if fx < self.cfg.prev_zone_ratio {
            self.go_prev(now);
        } else {
            self.go_next(now);
        }
    }

    /// Pointer down: autoplay holds until [`release`](Self::release).
    pub fn press(&mut self) {
        if self.autoplay.is_running() || self.resume.is_armed() {
            trace!("carousel: autoplay held");
        }
        self.held = true;
        self.autoplay.stop();
    }

    pub fn release(&mut self, now: Duration) {
        if !self.held {
            return;
        }
        self.held = false;
        if !self.resume.is_armed() {
            self.start(now);
        }
    }

    /// Advances the page tween and fires due timers.
    pub fn tick(&mut self, now: Duration, dt: f32) {
        self.page.step(dt);

        if self.snap.fire(now) {
            self.apply_pending_snap();
        }
        if self.resume.fire(now) && !self.held {
            self.start(now);
        }
        if self.autoplay.poll(now) {
            trace!("carousel: autoplay");
            self.go_next(now);
        }
    }

    // ── internal ──────────────────────────────────────────────────────────

    fn move_to(&mut self, virtual_index: usize) {
        let n = self.len();
        self.virtual_index = virtual_index;
        self.logical_index = (virtual_index + n - 1) % n;
        self.page = Tween::new(
            self.page.value(),
            virtual_index as f32,
            CarouselConfig::ms(self.cfg.page_duration_ms),
            self.cfg.page_easing,
        );
    }

    fn arm_snap(&mut self, now: Duration, to: usize) {
        self.snap_to = Some(to);
        self.snap.arm(now, CarouselConfig::ms(self.cfg.snap_delay_ms));
    }

    fn apply_pending_snap(&mut self) {
        let Some(to) = self.snap_to.take() else {
            return;
        };
        self.snap.cancel();
        trace!("carousel: snap {} -> {to}", self.virtual_index);
        self.virtual_index = to;
        self.logical_index = to - 1;
        self.page = Tween::settled(to as f32);
    }

    fn pause_autoplay(&mut self, now: Duration) {
        if !self.cfg.autoplay {
            return;
        }
        self.autoplay.stop();
        self.resume.arm(now, CarouselConfig::ms(self.cfg.pause_after_tap_ms));
    }
}

fn pad(images: &[String]) -> Vec<String> {
    let mut padded = Vec::with_capacity(images.len() + 2);
    if let (Some(first), Some(last)) = (images.first(), images.last()) {
        padded.push(last.clone());
        padded.extend(images.iter().cloned());
        padded.push(first.clone());
    }
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn carousel(images: &[&str]) -> CarouselState {
        let images = images.iter().map(|s| s.to_string()).collect();
        CarouselState::new(images, CarouselConfig::default())
    }

    /// Ticks at 60 fps from `*now` for `span`, advancing `*now`.
    fn run(c: &mut CarouselState, now: &mut Duration, span: Duration) {
        let end = *now + span;
        while *now < end {
            *now += Duration::from_secs_f32(DT);
            c.tick(*now, DT);
        }
    }

    // ── padding ───────────────────────────────────────────────────────────

    #[test]
    fn padded_list_wraps_both_ends() {
        let c = carousel(&["a", "b", "c"]);
        assert_eq!(c.padded(), &["c", "a", "b", "c", "a"]);
        assert_eq!((c.virtual_index(), c.logical_index()), (1, 0));
    }

    #[test]
    fn empty_list_falls_back_to_default_image() {
        let c = CarouselState::new(Vec::new(), CarouselConfig::default());
        assert_eq!(c.images(), &["bundled://placeholder.png".to_string()]);
        assert!(c.is_static());
    }

    // ── next / prev ───────────────────────────────────────────────────────

    #[test]
    fn three_next_with_settling_cycles_logical() {
        let mut c = carousel(&["A", "B", "C"]);
        let mut now = Duration::ZERO;
        let mut seen = vec![c.logical_index()];
        for _ in 0..3 {
            c.go_next(now);
            seen.push(c.logical_index());
            run(&mut c, &mut now, ms(500));
        }
        assert_eq!(seen, vec![0, 1, 2, 0]);
        // The trailing clone was snapped back to the real first image.
        assert_eq!(c.virtual_index(), 1);
        assert!(!c.has_pending_snap());
        assert_eq!(c.page_position(), 1.0);
    }

    #[test]
    fn n_nexts_return_to_start_and_stay_in_range() {
        for n in 2..=6usize {
            let images: Vec<String> = (0..n).map(|i| format!("{i}.jpg")).collect();
            let mut c = CarouselState::new(images, CarouselConfig::default());
            let mut now = Duration::ZERO;
            for step in 0..n {
                c.go_next(now);
                assert!(c.logical_index() < n);
                assert_eq!(c.logical_index(), (step + 1) % n);
                // Rapid taps: only sometimes let the snap land.
                if step % 2 == 0 {
                    run(&mut c, &mut now, ms(400));
                }
            }
            assert_eq!(c.logical_index(), 0);
        }
    }

    #[test]
    fn prev_after_next_returns_to_start() {
        let mut c = carousel(&["A", "B"]);
        let mut now = Duration::ZERO;
        c.go_next(now);
        c.go_prev(now);
        assert_eq!(c.logical_index(), 0);

        // Across the wrap: next lands on the clone, prev comes back.
        let mut c = carousel(&["A", "B"]);
        c.go_next(now);
        run(&mut c, &mut now, ms(400));
        c.go_next(now);
        assert!(c.has_pending_snap());
        c.go_prev(now);
        assert_eq!(c.logical_index(), 1);
        c.go_prev(now);
        assert_eq!(c.logical_index(), 0);
    }

    #[test]
    fn prev_from_first_wraps_to_last() {
        let mut c = carousel(&["A", "B", "C"]);
        let mut now = Duration::ZERO;
        c.go_prev(now);
        assert_eq!((c.virtual_index(), c.logical_index()), (0, 2));
        run(&mut c, &mut now, ms(400));
        assert_eq!((c.virtual_index(), c.logical_index()), (3, 2));
    }

    #[test]
    fn rapid_taps_keep_one_snap_outstanding() {
        let mut c = carousel(&["A", "B"]);
        let now = Duration::ZERO;
        c.go_next(now); // v2
        c.go_next(now); // v3 clone, snap pending
        assert!(c.has_pending_snap());
        c.go_next(now); // snap applied first (v1), then v2
        assert_eq!((c.virtual_index(), c.logical_index()), (2, 1));
        assert!(!c.has_pending_snap());
    }

    // ── single image ──────────────────────────────────────────────────────

    #[test]
    fn single_image_is_inert() {
        let mut c = carousel(&["only"]);
        let now = Duration::ZERO;
        c.start(now);
        c.go_next(now);
        c.go_prev(now);
        c.jump_to(0, now);
        assert_eq!((c.virtual_index(), c.logical_index()), (1, 0));
        assert!(!c.has_timers());
    }

    // ── autoplay ──────────────────────────────────────────────────────────

    #[test]
    fn autoplay_advances_every_interval() {
        let mut c = carousel(&["A", "B", "C"]);
        let mut now = Duration::ZERO;
        c.start(now);
        run(&mut c, &mut now, ms(3900));
        assert_eq!(c.logical_index(), 0);
        run(&mut c, &mut now, ms(200));
        assert_eq!(c.logical_index(), 1);
        run(&mut c, &mut now, ms(4000));
        assert_eq!(c.logical_index(), 2);
    }

    #[test]
    fn stop_cancels_every_timer() {
        let mut c = carousel(&["A", "B"]);
        let mut now = Duration::ZERO;
        c.start(now);
        c.go_next(now);
        c.go_next(now);
        c.stop();
        assert!(!c.has_timers());
        run(&mut c, &mut now, ms(10_000));
        assert_eq!(c.logical_index(), 0);
    }

    #[test]
    fn stop_mid_snap_lands_on_real_entry_before_prev() {
        let mut c = carousel(&["a", "b", "c"]);
        c.go_prev(ms(0));
        assert_eq!(c.virtual_index(), 0);

        c.stop();
        assert!(!c.has_pending_snap());
        assert_eq!((c.virtual_index(), c.logical_index()), (3, 2));

        c.go_prev(ms(10));
        assert_eq!((c.virtual_index(), c.logical_index()), (2, 1));
    }

    #[test]
    fn stop_mid_snap_lands_on_real_entry_before_next() {
        let mut c = carousel(&["a", "b"]);
        c.go_next(ms(0));
        c.go_next(ms(10));
        assert_eq!(c.virtual_index(), 3);

        c.stop();
        assert_eq!((c.virtual_index(), c.logical_index()), (1, 0));

        c.go_next(ms(20));
        assert!(c.virtual_index() < c.padded().len());
        assert_eq!(c.logical_index(), 1);
    }

    #[test]
    fn dot_tap_jumps_and_pauses_autoplay() {
        let mut c = carousel(&["A", "B", "C", "D"]);
        let mut now = Duration::ZERO;
        c.start(now);
        run(&mut c, &mut now, ms(3000));

        c.jump_to(2, now);
        assert_eq!((c.virtual_index(), c.logical_index()), (3, 2));
        assert!(!c.is_autoplaying());

        // Original schedule would have fired at 4 s; paused until 7 s + one interval.
        run(&mut c, &mut now, ms(4100));
        assert_eq!(c.logical_index(), 2);
        assert!(c.is_autoplaying());
        run(&mut c, &mut now, ms(4000));
        assert_eq!(c.logical_index(), 3);
    }

    #[test]
    fn press_holds_autoplay_until_release() {
        let mut c = carousel(&["A", "B"]);
        let mut now = Duration::ZERO;
        c.start(now);
        c.press();
        run(&mut c, &mut now, ms(9000));
        assert_eq!(c.logical_index(), 0);
        c.release(now);
        run(&mut c, &mut now, ms(4100));
        assert_eq!(c.logical_index(), 1);
    }

    #[test]
    fn tap_zones() {
        let mut c = carousel(&["A", "B", "C"]);
        let now = Duration::ZERO;
        c.tap(0.2, now);
        assert_eq!(c.logical_index(), 2);
        c.tap(0.5, now);
        assert_eq!(c.logical_index(), 0);
    }

    #[test]
    fn set_images_resets_and_restarts() {
        let mut c = carousel(&["A", "B", "C"]);
        let mut now = Duration::ZERO;
        c.start(now);
        c.go_next(now);
        run(&mut c, &mut now, ms(100));
        c.set_images(vec!["X".into(), "Y".into()], now);
        assert_eq!(c.padded(), &["Y", "X", "Y", "X"]);
        assert_eq!((c.virtual_index(), c.logical_index()), (1, 0));
        assert!(c.is_autoplaying());
    }
}
