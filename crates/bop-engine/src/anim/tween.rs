use std::time::Duration;

use super::Easing;

/// Fixed-duration interpolation between two scalars.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    /// Seconds.
    duration: f32,
    /// Seconds.
    elapsed: f32,
    easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: Duration, easing: Easing) -> Self {
        Self { from, to, duration: duration.as_secs_f32(), elapsed: 0.0, easing }
    }

    /// A tween that is already finished at `value`.
    pub fn settled(value: f32) -> Self {
        Self { from: value, to: value, duration: 0.0, elapsed: 0.0, easing: Easing::Linear }
    }

    /// Linear progress in [0, 1].
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        let p = self.progress();
        if p >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * self.easing.apply(p)
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.to
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Advances by `dt` seconds. Returns `true` once the tween has finished.
    pub fn step(&mut self, dt: f32) -> bool {
        if dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration.max(0.0));
        }
        self.is_finished()
    }
}
