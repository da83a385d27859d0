//! Animation primitives.
//!
//! Two drivers, both advanced explicitly by `dt` (seconds) each frame:
//! - [`Tween`]: time-based interpolation with an [`Easing`] curve, finishes
//!   after a fixed duration.
//! - [`Spring`]: damped harmonic oscillator that settles on its target and
//!   then snaps to it exactly.
//!
//! Neither knows what it animates; widgets own one per animated channel.

mod easing;
mod spring;
mod tween;

pub use easing::Easing;
pub use spring::{Spring, SpringParams};
pub use tween::Tween;
