use std::time::Duration;

/// One-shot timer measured against [`FrameTime::elapsed`](super::FrameTime).
///
/// At most one deadline is outstanding: arming again replaces the previous
/// deadline instead of stacking a second one.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Timeout {
    deadline: Option<Duration>,
}

impl Timeout {
    #[inline]
    pub const fn idle() -> Self {
        Self { deadline: None }
    }

    /// Schedules the timer to fire `after` from `now`, replacing any pending deadline.
    #[inline]
    pub fn arm(&mut self, now: Duration, after: Duration) {
        self.deadline = Some(now + after);
    }

    #[inline]
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    #[inline]
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Returns `true` exactly once, on the first poll at or after the deadline.
    pub fn fire(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(d) if now >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Repeating timer measured against [`FrameTime::elapsed`](super::FrameTime).
///
/// A stalled host does not cause a burst of catch-up fires: each poll fires
/// at most once, and a missed period is rescheduled from `now`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Interval {
    period: Duration,
    next: Option<Duration>,
}

impl Interval {
    /// Creates a stopped interval.
    #[inline]
    pub const fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Starts (or restarts) the interval; the first fire is one period from `now`.
    #[inline]
    pub fn start(&mut self, now: Duration) {
        self.next = Some(now + self.period);
    }

    #[inline]
    pub fn stop(&mut self) {
        self.next = None;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    pub fn poll(&mut self, now: Duration) -> bool {
        let Some(next) = self.next else {
            return false;
        };
        if now < next {
            return false;
        }
        let mut following = next + self.period;
        if following <= now {
            following = now + self.period;
        }
        self.next = Some(following);
        true
    }
}
