//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the host.
//! Intended usage:
//! - one `FrameClock` per scene (or per host loop)
//! - call `tick()` (wall clock) or `advance()` (fixed step) once per frame
//! - widgets measure their timers against `FrameTime::elapsed`
//!
//! Timers are plain values owned by the widget that armed them. Dropping
//! the widget drops its timers; nothing is registered globally.

mod frame_clock;
mod timer;

pub use frame_clock::{FrameClock, FrameTime};
pub use timer::{Interval, Timeout};
