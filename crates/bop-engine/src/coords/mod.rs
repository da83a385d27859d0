//! Coordinate and geometry types shared across the engine and UI.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Rotation angles are in degrees, positive = clockwise on screen.

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
