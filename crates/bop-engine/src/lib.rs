//! Bop engine crate.
//!
//! This crate owns the headless runtime pieces used by the widget layer.
//! Nothing in here knows about windows or GPUs: a host feeds input events in,
//! advances a [`time::FrameClock`], and reads a [`scene::DrawList`] back out.

pub mod anim;
pub mod coords;
pub mod input;
pub mod time;

pub mod logging;
pub mod paint;
pub mod scene;
